//! Download request construction and the download trigger.
//!
//! A [`DownloadRequest`] pairs the proxy download URL with the derived
//! filename. A [`DownloadTrigger`] starts the transfer; [`FileDownloader`]
//! streams it to disk through a `.part` file.

use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::endpoint::ProxyEndpoints;
use crate::filename::{derive_filename, DerivedFilename};
use crate::http::{self, RequestOptions};
use crate::metadata::MediaMetadata;
use crate::progress::{TransferProgress, PROGRESS_INTERVAL};
use crate::storage::PartFile;

/// What to fetch and what to call it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: DerivedFilename,
}

impl DownloadRequest {
    /// Derives the filename from `metadata`, then builds the download URL from it.
    pub fn plan(endpoints: &ProxyEndpoints, metadata: &MediaMetadata) -> Self {
        let filename = derive_filename(metadata);
        let url = endpoints.download_url(&metadata.post_id, filename.as_str());
        Self { url, filename }
    }
}

/// Result of a finished transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReceipt {
    pub path: PathBuf,
    /// Size of the final file.
    pub bytes: u64,
    /// Bytes that were already on disk from an earlier attempt.
    pub resumed_from: u64,
}

/// Starts a download for a planned request.
pub trait DownloadTrigger {
    fn trigger(&self, request: &DownloadRequest) -> Result<DownloadReceipt>;
}

/// Receives progress snapshots while a download runs.
pub type ProgressFn = Arc<dyn Fn(&TransferProgress) + Send + Sync>;

/// Streams the request body into `<dir>/<filename>` (or an explicit output path).
#[derive(Clone)]
pub struct FileDownloader {
    dir: PathBuf,
    output: Option<PathBuf>,
    headers: HashMap<String, String>,
    opts: RequestOptions,
    resume: bool,
    on_progress: Option<ProgressFn>,
}

impl fmt::Debug for FileDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileDownloader")
            .field("dir", &self.dir)
            .field("output", &self.output)
            .field("headers", &self.headers)
            .field("opts", &self.opts)
            .field("resume", &self.resume)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl FileDownloader {
    pub fn new(
        dir: impl Into<PathBuf>,
        headers: HashMap<String, String>,
        opts: RequestOptions,
    ) -> Self {
        Self {
            dir: dir.into(),
            output: None,
            headers,
            opts,
            resume: true,
            on_progress: None,
        }
    }

    /// Downloader configured from `cfg`; `fallback_dir` is used when the
    /// config has no `download_dir`.
    pub fn from_config(cfg: &Config, fallback_dir: &Path) -> Self {
        let dir = cfg
            .download_dir
            .clone()
            .unwrap_or_else(|| fallback_dir.to_path_buf());
        Self::new(
            dir,
            cfg.request_headers(),
            RequestOptions {
                connect_timeout: cfg.connect_timeout(),
                timeout: cfg.download_timeout(),
                max_recv_speed: cfg.max_bytes_per_sec,
            },
        )
        .with_resume(cfg.resume)
    }

    /// Save to exactly this path instead of `<dir>/<derived filename>`.
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Called about once per [`PROGRESS_INTERVAL`] and once when the transfer ends.
    pub fn with_progress(mut self, on_progress: ProgressFn) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    fn report(&self, progress: &TransferProgress) {
        tracing::info!(
            bytes_done = progress.bytes_done,
            total_bytes = ?progress.total_bytes,
            "download progress: {}",
            progress
        );
        if let Some(cb) = &self.on_progress {
            cb(progress);
        }
    }

    pub fn target_path(&self, filename: &DerivedFilename) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => self.dir.join(filename.as_str()),
        }
    }
}

impl DownloadTrigger for FileDownloader {
    fn trigger(&self, request: &DownloadRequest) -> Result<DownloadReceipt> {
        let final_path = self.target_path(&request.filename);
        let part = PartFile::open(&final_path, self.resume)?;
        let resumed_from = part.len();

        let mut easy = http::easy_handle(&request.url, &self.headers, self.opts)
            .context("invalid download request")?;
        if resumed_from > 0 {
            // curl expects "start-" without the "bytes=" prefix.
            easy.range(&format!("{}-", resumed_from))?;
            tracing::info!(path = %part.path().display(), resumed_from, "resuming partial download");
        }

        let part = RefCell::new(part);
        let status = Cell::new(0u32);
        let content_length: Cell<Option<u64>> = Cell::new(None);
        let body_started = Cell::new(false);
        let write_error: RefCell<Option<anyhow::Error>> = RefCell::new(None);
        let start = Instant::now();
        let last_report = Cell::new(start);

        // Bytes before this transfer's body: the resumed prefix, unless the server restarted.
        let prefix = |code: u32| if code == 206 || code == 416 { resumed_from } else { 0 };
        let snapshot = |done: u64| {
            let base = prefix(status.get());
            TransferProgress {
                bytes_done: done,
                bytes_fetched: done.saturating_sub(base),
                total_bytes: content_length.get().map(|n| n + base),
                elapsed_secs: start.elapsed().as_secs_f64(),
            }
        };

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                if let Some(code) = http::parse_status_line(line) {
                    // New response (e.g. after a redirect); forget the previous length.
                    status.set(code);
                    content_length.set(None);
                } else if let Some(n) = http::parse_content_length(line) {
                    content_length.set(Some(n));
                }
                true
            })?;
            transfer.write_function(|data| {
                let code = status.get();
                if !(200..300).contains(&code) {
                    // Error page or 416 body; never lands in the part file.
                    return Ok(data.len());
                }
                let mut part = part.borrow_mut();
                if !body_started.replace(true) && code == 200 && !part.is_empty() {
                    tracing::warn!("server ignored Range request; restarting from zero");
                    if let Err(e) = part.restart() {
                        *write_error.borrow_mut() = Some(e);
                        return Ok(0);
                    }
                }
                if let Err(e) = part.append(data) {
                    *write_error.borrow_mut() = Some(e);
                    return Ok(0); // abort transfer
                }
                let now = Instant::now();
                if now.duration_since(last_report.get()) >= PROGRESS_INTERVAL {
                    last_report.set(now);
                    self.report(&snapshot(part.len()));
                }
                Ok(data.len())
            })?;
            transfer.perform()
        };

        if let Some(e) = write_error.take() {
            return Err(e.context(format!("writing {}", final_path.display())));
        }
        performed.context("GET request failed")?;

        let code = easy.response_code().context("no response code")?;
        let mut part = part.into_inner();
        match code {
            200..=299 => {}
            416 if resumed_from > 0 => {
                tracing::info!(path = %final_path.display(), "partial file already complete");
            }
            _ => anyhow::bail!("GET {} returned HTTP {}", request.url, code),
        }
        if code == 200 && resumed_from > 0 && !body_started.get() {
            // Full (empty) answer to a ranged request: the old bytes are not part of it.
            tracing::warn!("server ignored Range request with an empty body; discarding partial file");
            part.restart()?;
        }

        let bytes = part.len();
        part.finalize(&final_path)?;

        let done = snapshot(bytes);
        self.report(&done);
        tracing::info!(
            path = %final_path.display(),
            bytes,
            elapsed_secs = done.elapsed_secs,
            mib_s = done.bytes_per_sec() / (1024.0 * 1024.0),
            "download finished"
        );

        Ok(DownloadReceipt {
            path: final_path,
            bytes,
            resumed_from: prefix(code),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PostInfo;

    #[test]
    fn plan_derives_filename_before_url() {
        let endpoints = ProxyEndpoints::new("https://api.example.dev");
        let meta = MediaMetadata::new("s_42").with_info(PostInfo {
            title: Some("Hello World!".to_string()),
            ..PostInfo::default()
        });
        let req = DownloadRequest::plan(&endpoints, &meta);
        assert_eq!(req.filename.as_str(), "Hello_World_clean.mp4");
        assert_eq!(
            req.url,
            "https://api.example.dev/download-proxy?id=s_42&filename=Hello_World_clean.mp4"
        );
    }

    #[test]
    fn target_path_uses_dir_or_output() {
        let meta = MediaMetadata::new("abc");
        let req = DownloadRequest::plan(&ProxyEndpoints::new("http://x"), &meta);
        let d = FileDownloader::new("/videos", HashMap::new(), RequestOptions::default());
        assert_eq!(d.target_path(&req.filename), Path::new("/videos/v_abc_clean.mp4"));

        let d = d.with_output(Some(PathBuf::from("/tmp/mine.mp4")));
        assert_eq!(d.target_path(&req.filename), Path::new("/tmp/mine.mp4"));
    }

    #[test]
    fn from_config_prefers_configured_dir() {
        let mut cfg = Config::default();
        let fallback = Path::new("/cwd");
        let d = FileDownloader::from_config(&cfg, fallback);
        assert_eq!(d.dir, Path::new("/cwd"));
        assert!(d.resume);

        cfg.download_dir = Some(PathBuf::from("/data"));
        cfg.resume = false;
        cfg.max_bytes_per_sec = Some(4096);
        let d = FileDownloader::from_config(&cfg, fallback);
        assert_eq!(d.dir, Path::new("/data"));
        assert!(!d.resume);
        assert_eq!(d.opts.max_recv_speed, Some(4096));
    }
}
