//! Poster image for a post, served by `<base>/thumbnail-proxy?id=<post id>`.
//!
//! Saved next to the video as `<video stem>_thumbnail.jpg`.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::endpoint::ProxyEndpoints;
use crate::http::{self, RequestOptions};
use crate::storage::PartFile;

pub const THUMBNAIL_SUFFIX: &str = "_thumbnail.jpg";

/// `dir/A_clean.mp4` → `dir/A_clean_thumbnail.jpg`. Names without `.mp4` keep
/// their full file name in front of the suffix.
pub fn thumbnail_path(video: &Path) -> PathBuf {
    let name = video
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".mp4").unwrap_or(&name);
    video.with_file_name(format!("{}{}", stem, THUMBNAIL_SUFFIX))
}

#[derive(Debug, Clone)]
pub struct ThumbnailFetcher {
    endpoints: ProxyEndpoints,
    headers: HashMap<String, String>,
    opts: RequestOptions,
}

impl ThumbnailFetcher {
    pub fn new(
        endpoints: ProxyEndpoints,
        headers: HashMap<String, String>,
        opts: RequestOptions,
    ) -> Self {
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
                max_recv_speed: cfg.max_bytes_per_sec,
            },
        )
    }

    /// Fetches the thumbnail of `post_id` and stores it beside `video`.
    /// Returns the saved path.
    pub fn fetch(&self, post_id: &str, video: &Path) -> Result<PathBuf> {
        let url = self.endpoints.thumbnail_url(post_id);
        let resp = http::get(&url, &self.headers, self.opts)
            .with_context(|| format!("GET {}", url))?;
        if !resp.is_success() {
            anyhow::bail!("GET {} returned HTTP {}", url, resp.status);
        }

        let dest = thumbnail_path(video);
        let mut part = PartFile::open(&dest, false)?;
        part.append(&resp.body)?;
        part.finalize(&dest)?;
        tracing::info!(path = %dest.display(), bytes = resp.body.len(), "thumbnail saved");
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_path_replaces_mp4() {
        assert_eq!(
            thumbnail_path(Path::new("/videos/A_Cat_clean.mp4")),
            Path::new("/videos/A_Cat_clean_thumbnail.jpg")
        );
        assert_eq!(
            thumbnail_path(Path::new("mine.mov")),
            Path::new("mine.mov_thumbnail.jpg")
        );
    }

    #[test]
    fn from_config_uses_api_base() {
        let cfg = Config {
            api_base: "http://127.0.0.1:9/".to_string(),
            ..Config::default()
        };
        let f = ThumbnailFetcher::from_config(&cfg);
        assert_eq!(f.endpoints.base(), "http://127.0.0.1:9");
        assert_eq!(f.opts.timeout, cfg.lookup_timeout());
    }
}
