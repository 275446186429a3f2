//! `soradl download <url>` – resolve, derive filename, download.

use anyhow::{Context, Result};
use soradl_core::config::Config;
use soradl_core::download::FileDownloader;
use soradl_core::endpoint::ProxyEndpoints;
use soradl_core::page_url::PostPageUrl;
use soradl_core::progress::TransferProgress;
use soradl_core::resolver::ProxyResolver;
use soradl_core::session::DownloadSession;
use soradl_core::thumbnail::ThumbnailFetcher;
use soradl_core::view::ViewState;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Flags of `soradl download`.
#[derive(Debug, Default)]
pub struct DownloadOptions {
    pub output: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub no_resume: bool,
    pub thumbnail: bool,
}

fn print_progress(p: &TransferProgress) {
    let mut out = std::io::stdout().lock();
    let _ = write!(out, "\r  {}    ", p);
    let _ = out.flush();
}

pub async fn run_download(
    cfg: &Config,
    cwd: &Path,
    url: &str,
    opts: DownloadOptions,
) -> Result<()> {
    let page = PostPageUrl::parse(url)?;

    let mut downloader = FileDownloader::from_config(cfg, cwd)
        .with_output(opts.output)
        .with_progress(Arc::new(print_progress));
    if let Some(dir) = opts.dir {
        downloader = downloader.with_dir(dir);
    }
    if opts.no_resume {
        downloader = downloader.with_resume(false);
    }
    let session = DownloadSession::new(
        ProxyResolver::from_config(cfg),
        downloader,
        ProxyEndpoints::new(&cfg.api_base),
    );

    let mut view = ViewState::new();
    view.begin();
    println!("{}", view.render(Some(page.as_str())));

    let result = tokio::task::spawn_blocking(move || session.run(&page))
        .await
        .context("download task join")?;
    println!();

    view.finish(result.is_ok());
    let report = match result {
        Ok(report) => report,
        Err(err) => {
            println!("{}", view.render(None));
            return Err(err);
        }
    };

    let saved = report.receipt.path.display().to_string();
    println!("{}", view.render(Some(&saved)));
    if report.receipt.resumed_from > 0 {
        println!("  resumed from byte {}", report.receipt.resumed_from);
    }
    println!("  {} bytes", report.receipt.bytes);

    if opts.thumbnail {
        let fetcher = ThumbnailFetcher::from_config(cfg);
        let post_id = report.plan.metadata.post_id.clone();
        let video = report.receipt.path.clone();
        let fetched = tokio::task::spawn_blocking(move || fetcher.fetch(&post_id, &video))
            .await
            .context("thumbnail task join")?;
        // The video is already saved; a missing thumbnail does not fail the command.
        match fetched {
            Ok(path) => println!("  thumbnail {}", path.display()),
            Err(err) => {
                tracing::warn!("thumbnail not saved: {:#}", err);
                println!("  thumbnail not saved: {:#}", err);
            }
        }
    }
    Ok(())
}
