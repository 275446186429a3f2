//! CLI for soradl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use soradl_core::config;
use std::path::PathBuf;

use commands::{run_check, run_config, run_download, run_filename, run_resolve, DownloadOptions};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "soradl")]
#[command(about = "Download Sora posts through the lookup proxy", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a post page and download its video.
    Download {
        /// Post page URL (https://sora.chatgpt.com/p/<id>).
        url: String,
        /// Save to this exact path instead of the derived filename.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Directory for the derived filename (overrides config `download_dir`).
        #[arg(long, value_name = "DIR", conflicts_with = "output")]
        dir: Option<PathBuf>,
        /// Discard any leftover .part file and start from zero.
        #[arg(long)]
        no_resume: bool,
        /// Also save the post thumbnail as <name>_thumbnail.jpg.
        #[arg(long)]
        thumbnail: bool,
    },

    /// Resolve a post page and print the derived filename and download URL.
    Resolve {
        /// Post page URL.
        url: String,
        /// Print the plan as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Derive a filename from metadata fields without any network access.
    Filename {
        /// Post identifier as returned by the proxy.
        #[arg(long)]
        post_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Check that the configured proxy answers.
    Check,

    /// Show the config file path and the effective configuration.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Download {
                url,
                output,
                dir,
                no_resume,
                thumbnail,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let cwd = std::env::current_dir()?;
                let opts = DownloadOptions {
                    output,
                    dir,
                    no_resume,
                    thumbnail,
                };
                run_download(&cfg, &cwd, &url, opts).await?;
            }
            CliCommand::Resolve { url, json } => {
                let cfg = config::load_or_init()?;
                run_resolve(&cfg, &url, json).await?;
            }
            CliCommand::Filename {
                post_id,
                title,
                description,
                prompt,
            } => run_filename(post_id, title, description, prompt),
            CliCommand::Check => {
                let cfg = config::load_or_init()?;
                run_check(&cfg).await?;
            }
            CliCommand::Config => run_config()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
