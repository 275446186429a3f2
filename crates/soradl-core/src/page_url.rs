//! Post page detection.
//!
//! A post page is `http(s)://sora.chatgpt.com/p/<id>` (subdomains allowed,
//! trailing segments, query and fragment ignored).

use std::fmt;

use crate::error::PageUrlError;

/// Host serving post pages.
pub const POST_HOST: &str = "sora.chatgpt.com";

/// A validated post page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPageUrl {
    url: url::Url,
    post_slug: String,
}

impl PostPageUrl {
    /// Parses and validates `input` (surrounding whitespace is ignored).
    pub fn parse(input: &str) -> Result<Self, PageUrlError> {
        let input = input.trim();
        let url = url::Url::parse(input)?;
        let post_slug =
            post_slug(&url).ok_or_else(|| PageUrlError::NotAPostPage(input.to_string()))?;
        Ok(Self { url, post_slug })
    }

    /// The URL exactly as it will be sent to the lookup endpoint.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// The `<id>` path segment of `/p/<id>`. Not the proxy's post id.
    pub fn post_slug(&self) -> &str {
        &self.post_slug
    }
}

impl fmt::Display for PostPageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn host_matches(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == POST_HOST || host.ends_with(&format!(".{POST_HOST}"))
}

fn post_slug(url: &url::Url) -> Option<String> {
    if url.scheme() != "https" && url.scheme() != "http" {
        return None;
    }
    if !host_matches(url.host_str()?) {
        return None;
    }
    let mut segments = url.path_segments()?;
    if segments.next()? != "p" {
        return None;
    }
    let slug = segments.next()?;
    if slug.is_empty() {
        return None;
    }
    Some(slug.to_string())
}

/// Cheap yes/no check used to decide whether to offer a download at all.
pub fn looks_like_post_page(input: &str) -> bool {
    PostPageUrl::parse(input).is_ok()
}
