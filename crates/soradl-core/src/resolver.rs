//! Metadata resolver: turns a post page URL into [`MediaMetadata`].
//!
//! The session only depends on the [`MetadataResolver`] trait; the proxy
//! lookup is one implementation of it.

use std::collections::HashMap;

use crate::config::Config;
use crate::endpoint::ProxyEndpoints;
use crate::error::ResolveError;
use crate::http::{self, RequestOptions};
use crate::metadata::{parse_metadata, MediaMetadata};
use crate::page_url::PostPageUrl;

/// Anything that can look up the media behind a post page.
pub trait MetadataResolver {
    fn resolve(&self, page: &PostPageUrl) -> Result<MediaMetadata, ResolveError>;
}

/// Looks metadata up with one GET against `<base>/api-proxy/<page>`.
#[derive(Debug, Clone)]
pub struct ProxyResolver {
    endpoints: ProxyEndpoints,
    headers: HashMap<String, String>,
    opts: RequestOptions,
}

impl ProxyResolver {
    pub fn new(
        endpoints: ProxyEndpoints,
        mut headers: HashMap<String, String>,
        opts: RequestOptions,
    ) -> Self {
        headers
            .entry("Accept".to_string())
            .or_insert_with(|| "application/json".to_string());
        Self {
            endpoints,
            headers,
            opts,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            ProxyEndpoints::new(&cfg.api_base),
            cfg.request_headers(),
            RequestOptions {
                connect_timeout: cfg.connect_timeout(),
                timeout: cfg.lookup_timeout(),
                max_recv_speed: None,
            },
        )
    }
}

impl MetadataResolver for ProxyResolver {
    fn resolve(&self, page: &PostPageUrl) -> Result<MediaMetadata, ResolveError> {
        let lookup = self.endpoints.lookup_url(page.as_str());
        tracing::debug!(%page, %lookup, "resolving post metadata");

        let resp = http::get(&lookup, &self.headers, self.opts)?;
        if !resp.is_success() {
            tracing::warn!(%page, status = resp.status, "lookup rejected");
            return Err(ResolveError::Status(resp.status));
        }
        let meta = parse_metadata(&resp.body)?;
        tracing::info!(%page, post_id = %meta.post_id, "resolved post metadata");
        Ok(meta)
    }
}
