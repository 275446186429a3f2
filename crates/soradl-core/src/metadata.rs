//! Media metadata returned by the proxy lookup endpoint.
//!
//! Only `post_id` and `post_info.{title,description,prompt}` are read; every
//! other field in the response is ignored.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Optional human-readable fields attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Parsed lookup response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Opaque identifier used for the download request.
    pub post_id: String,
    #[serde(default)]
    pub post_info: Option<PostInfo>,
}

impl MediaMetadata {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            post_info: None,
        }
    }

    pub fn with_info(mut self, info: PostInfo) -> Self {
        self.post_info = Some(info);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.post_info.as_ref().and_then(|i| i.title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.post_info.as_ref().and_then(|i| i.description.as_deref())
    }

    pub fn prompt(&self) -> Option<&str> {
        self.post_info.as_ref().and_then(|i| i.prompt.as_deref())
    }
}

/// Wire shape; `post_id` may be absent or null in a failed lookup.
#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    post_id: Option<String>,
    #[serde(default)]
    post_info: Option<PostInfo>,
}

/// Parses a lookup response body. A missing, null or empty `post_id` is an error.
pub fn parse_metadata(body: &[u8]) -> Result<MediaMetadata, ResolveError> {
    let raw: LookupResponse = serde_json::from_slice(body)?;
    let post_id = raw
        .post_id
        .filter(|id| !id.is_empty())
        .ok_or(ResolveError::MissingPostId)?;
    Ok(MediaMetadata {
        post_id,
        post_info: raw.post_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_response() {
        let body = br#"{
            "post_id": "s_68e1",
            "post_info": {"title": "Sunset", "description": "d", "prompt": "p"},
            "download_url": "ignored"
        }"#;
        let m = parse_metadata(body).unwrap();
        assert_eq!(m.post_id, "s_68e1");
        assert_eq!(m.title(), Some("Sunset"));
        assert_eq!(m.description(), Some("d"));
        assert_eq!(m.prompt(), Some("p"));
    }

    #[test]
    fn parse_without_post_info() {
        let m = parse_metadata(br#"{"post_id": "abc"}"#).unwrap();
        assert!(m.post_info.is_none());
        assert_eq!(m.title(), None);
    }

    #[test]
    fn null_fields_are_absent() {
        let m = parse_metadata(br#"{"post_id": "abc", "post_info": {"title": null}}"#).unwrap();
        assert_eq!(m.title(), None);
        assert_eq!(m.prompt(), None);

        let m = parse_metadata(br#"{"post_id": "abc", "post_info": null}"#).unwrap();
        assert!(m.post_info.is_none());
    }

    #[test]
    fn missing_or_empty_post_id_rejected() {
        assert!(matches!(
            parse_metadata(br#"{"post_info": {"title": "x"}}"#),
            Err(ResolveError::MissingPostId)
        ));
        assert!(matches!(
            parse_metadata(br#"{"post_id": ""}"#),
            Err(ResolveError::MissingPostId)
        ));
        assert!(matches!(
            parse_metadata(br#"{"post_id": null}"#),
            Err(ResolveError::MissingPostId)
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            parse_metadata(b"<html>rate limited</html>"),
            Err(ResolveError::Json(_))
        ));
    }
}
