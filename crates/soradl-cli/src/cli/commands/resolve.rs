//! `soradl resolve <url>` – look up a post and print what would be downloaded.

use anyhow::{Context, Result};
use soradl_core::config::Config;
use soradl_core::endpoint::ProxyEndpoints;
use soradl_core::page_url::PostPageUrl;
use soradl_core::resolver::ProxyResolver;
use soradl_core::session::{plan_download, Plan};

fn print_plan(plan: &Plan, thumbnail_url: &str) {
    println!("{:<12} {}", "post_id", plan.metadata.post_id);
    if let Some(title) = plan.metadata.title() {
        println!("{:<12} {}", "title", title);
    }
    println!("{:<12} {}", "filename", plan.request.filename);
    println!("{:<12} {}", "download", plan.request.url);
    println!("{:<12} {}", "thumbnail", thumbnail_url);
}

pub async fn run_resolve(cfg: &Config, url: &str, json: bool) -> Result<()> {
    let page = PostPageUrl::parse(url)?;
    let resolver = ProxyResolver::from_config(cfg);
    let endpoints = ProxyEndpoints::new(&cfg.api_base);
    let lookup_endpoints = endpoints.clone();

    let plan =
        tokio::task::spawn_blocking(move || plan_download(&resolver, &lookup_endpoints, &page))
            .await
            .context("resolve task join")??;
    let thumbnail_url = endpoints.thumbnail_url(&plan.metadata.post_id);

    if json {
        let out = serde_json::json!({
            "metadata": plan.metadata,
            "filename": plan.request.filename.as_str(),
            "download_url": plan.request.url,
            "thumbnail_url": thumbnail_url,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_plan(&plan, &thumbnail_url);
    }
    Ok(())
}
