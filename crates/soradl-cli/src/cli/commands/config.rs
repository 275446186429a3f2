//! `soradl config` – show where the config and log live and what the config contains.

use anyhow::Result;
use soradl_core::{config, logging};

pub fn run_config() -> Result<()> {
    let path = config::config_path()?;
    let cfg = config::load_or_init_at(&path)?;
    println!("# {}", path.display());
    if let Ok(log) = logging::log_file_path() {
        println!("# log: {}", log.display());
    }
    print!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}
