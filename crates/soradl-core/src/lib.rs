pub mod config;
pub mod logging;

pub mod check;
pub mod download;
pub mod endpoint;
pub mod error;
pub mod filename;
pub mod http;
pub mod metadata;
pub mod page_url;
pub mod progress;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod thumbnail;
pub mod view;
