//! `soradl check` – is the configured proxy reachable?

use anyhow::{Context, Result};
use soradl_core::check;
use soradl_core::config::Config;

pub async fn run_check(cfg: &Config) -> Result<()> {
    println!("checking {} ...", cfg.api_base);
    let owned = cfg.clone();
    let reachable = tokio::task::spawn_blocking(move || check::check_from_config(&owned))
        .await
        .context("check task join")?;
    if !reachable {
        anyhow::bail!("proxy at {} is not reachable", cfg.api_base);
    }
    println!("proxy reachable");
    Ok(())
}
