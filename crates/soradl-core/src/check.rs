//! Reachability check for the configured proxy.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::Config;
use crate::endpoint::ProxyEndpoints;
use crate::http::{self, RequestOptions};

/// Upper bound for the whole check request.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// GETs the proxy base URL. Reachable only on HTTP 200; transport errors and
/// any other status count as unreachable and are logged.
pub fn check_connection(
    endpoints: &ProxyEndpoints,
    headers: &HashMap<String, String>,
    opts: RequestOptions,
) -> bool {
    match http::get(endpoints.base(), headers, opts) {
        Ok(resp) if resp.status == 200 => {
            tracing::info!(base = endpoints.base(), "proxy reachable");
            true
        }
        Ok(resp) => {
            tracing::warn!(base = endpoints.base(), status = resp.status, "proxy check failed");
            false
        }
        Err(e) => {
            tracing::warn!(base = endpoints.base(), "proxy unreachable: {}", e);
            false
        }
    }
}

pub fn check_from_config(cfg: &Config) -> bool {
    let opts = RequestOptions {
        connect_timeout: cfg.connect_timeout().min(CHECK_TIMEOUT),
        timeout: CHECK_TIMEOUT,
        max_recv_speed: None,
    };
    check_connection(
        &ProxyEndpoints::new(&cfg.api_base),
        &cfg.request_headers(),
        opts,
    )
}
