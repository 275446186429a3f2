//! CLI command handlers, one per file.

mod check;
mod config;
mod download;
mod filename;
mod resolve;

pub use check::run_check;
pub use config::run_config;
pub use download::{run_download, DownloadOptions};
pub use filename::run_filename;
pub use resolve::run_resolve;
