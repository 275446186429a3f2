//! One download, end to end: resolve → derive filename → build request → trigger.
//!
//! Each step starts only once the previous one has returned. Errors carry
//! context for the log; surfaces collapse them to a failure flag.

use anyhow::{Context, Result};

use crate::download::{DownloadReceipt, DownloadRequest, DownloadTrigger};
use crate::endpoint::ProxyEndpoints;
use crate::metadata::MediaMetadata;
use crate::page_url::PostPageUrl;
use crate::resolver::MetadataResolver;

/// Resolved metadata plus the request built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub metadata: MediaMetadata,
    pub request: DownloadRequest,
}

/// Everything a finished session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub plan: Plan,
    pub receipt: DownloadReceipt,
}

/// Resolve `page` and plan its download. Nothing is fetched beyond the lookup.
pub fn plan_download<R: MetadataResolver + ?Sized>(
    resolver: &R,
    endpoints: &ProxyEndpoints,
    page: &PostPageUrl,
) -> Result<Plan> {
    let metadata = resolver
        .resolve(page)
        .with_context(|| format!("resolve {}", page))?;
    let request = DownloadRequest::plan(endpoints, &metadata);
    tracing::debug!(post_id = %metadata.post_id, filename = %request.filename, "planned download");
    Ok(Plan { metadata, request })
}

pub struct DownloadSession<R, T> {
    resolver: R,
    trigger: T,
    endpoints: ProxyEndpoints,
}

impl<R: MetadataResolver, T: DownloadTrigger> DownloadSession<R, T> {
    pub fn new(resolver: R, trigger: T, endpoints: ProxyEndpoints) -> Self {
        Self {
            resolver,
            trigger,
            endpoints,
        }
    }

    /// Resolve and plan without downloading.
    pub fn plan(&self, page: &PostPageUrl) -> Result<Plan> {
        plan_download(&self.resolver, &self.endpoints, page)
    }

    pub fn run(&self, page: &PostPageUrl) -> Result<Report> {
        let plan = self.plan(page)?;
        let receipt = self
            .trigger
            .trigger(&plan.request)
            .with_context(|| format!("download {}", plan.request.filename))?;
        Ok(Report { plan, receipt })
    }
}
