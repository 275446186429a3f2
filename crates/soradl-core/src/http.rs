//! Blocking libcurl helpers shared by the resolver and the downloader.
//!
//! Everything here runs on the calling thread; async callers wrap it in
//! `spawn_blocking`.

use std::collections::HashMap;
use std::str;
use std::time::Duration;

/// Timeouts and optional speed cap for one request.
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_recv_speed: Option<u64>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            max_recv_speed: None,
        }
    }
}

/// Buffered response of a small GET (status + body).
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Creates an easy handle configured with `url`, redirects, timeouts and headers.
pub(crate) fn easy_handle(
    url: &str,
    headers: &HashMap<String, String>,
    opts: RequestOptions,
) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    if let Some(speed) = opts.max_recv_speed {
        easy.max_recv_speed(speed)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(easy)
}

/// GET `url` and buffer the whole body. Non-2xx statuses are returned, not errors.
pub fn get(
    url: &str,
    headers: &HashMap<String, String>,
    opts: RequestOptions,
) -> Result<Response, curl::Error> {
    let mut body = Vec::new();
    let mut easy = easy_handle(url, headers, opts)?;
    // Any encoding libcurl can decode; only for buffered bodies, never for ranged media.
    easy.accept_encoding("")?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let status = easy.response_code()?;
    tracing::debug!(url, status, bytes = body.len(), "GET finished");
    Ok(Response { status, body })
}

/// Extracts the status code from a raw header line like `HTTP/1.1 206 Partial Content`.
/// Returns `None` for ordinary header lines.
pub(crate) fn parse_status_line(line: &[u8]) -> Option<u32> {
    let line = str::from_utf8(line).ok()?.trim_end();
    let rest = line.strip_prefix("HTTP/")?;
    let mut parts = rest.split_whitespace();
    let _version = parts.next()?;
    parts.next()?.parse().ok()
}

/// Value of a `Content-Length` header line (any case), or `None` for other lines.
pub(crate) fn parse_content_length(line: &[u8]) -> Option<u64> {
    let line = str::from_utf8(line).ok()?;
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse().ok()
}
