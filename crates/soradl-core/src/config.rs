use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default proxy deployment.
pub const DEFAULT_API_BASE: &str = "https://api.soracdn.workers.dev";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_ORIGIN: &str = "https://sorasave.app";
const DEFAULT_REFERER: &str = "https://sorasave.app/";

/// Global configuration loaded from `~/.config/soradl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the lookup/download proxy.
    pub api_base: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Optional `Origin` header (the proxy checks it).
    #[serde(default)]
    pub origin: Option<String>,
    /// Optional `Referer` header.
    #[serde(default)]
    pub referer: Option<String>,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for the metadata lookup in seconds.
    pub lookup_timeout_secs: u64,
    /// Whole-request timeout for the media download in seconds.
    pub download_timeout_secs: u64,
    /// Where downloads land; current directory if unset.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Continue a leftover `.part` file instead of starting over.
    #[serde(default = "default_resume")]
    pub resume: bool,
    /// Optional bandwidth cap in bytes per second (None = no cap).
    #[serde(default)]
    pub max_bytes_per_sec: Option<u64>,
}

fn default_resume() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origin: Some(DEFAULT_ORIGIN.to_string()),
            referer: Some(DEFAULT_REFERER.to_string()),
            connect_timeout_secs: 15,
            lookup_timeout_secs: 30,
            download_timeout_secs: 3600,
            download_dir: None,
            resume: true,
            max_bytes_per_sec: None,
        }
    }
}

impl Config {
    /// Headers sent with both the lookup and the download request.
    pub fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        if let Some(origin) = &self.origin {
            headers.insert("Origin".to_string(), origin.clone());
        }
        if let Some(referer) = &self.referer {
            headers.insert("Referer".to_string(), referer.clone());
        }
        headers
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("soradl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<Config> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<Config> {
    if !path.exists() {
        let default_cfg = Config::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
