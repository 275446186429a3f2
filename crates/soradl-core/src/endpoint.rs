//! Proxy endpoint URLs built from the configured `api_base`.

const LOOKUP_PATH: &str = "/api-proxy/";
const DOWNLOAD_PATH: &str = "/download-proxy";
const THUMBNAIL_PATH: &str = "/thumbnail-proxy";

/// Percent-encodes `s` as a single URL component (only `A-Za-z0-9-._~` stay literal).
pub fn encode_component(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Lookup and download endpoints of one proxy deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoints {
    base: String,
}

impl ProxyEndpoints {
    pub fn new(api_base: &str) -> Self {
        Self {
            base: api_base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `<base>/api-proxy/<encoded page url>`
    pub fn lookup_url(&self, page_url: &str) -> String {
        format!("{}{}{}", self.base, LOOKUP_PATH, encode_component(page_url))
    }

    /// `<base>/download-proxy?id=<post id>&filename=<name>`
    pub fn download_url(&self, post_id: &str, filename: &str) -> String {
        format!(
            "{}{}?id={}&filename={}",
            self.base,
            DOWNLOAD_PATH,
            encode_component(post_id),
            encode_component(filename)
        )
    }

    /// `<base>/thumbnail-proxy?id=<post id>`
    pub fn thumbnail_url(&self, post_id: &str) -> String {
        format!(
            "{}{}?id={}",
            self.base,
            THUMBNAIL_PATH,
            encode_component(post_id)
        )
    }
}
