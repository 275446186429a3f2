//! Filename derivation from post metadata.
//!
//! Picks a label (`title`, `description`, `prompt`, then `v_<post_id>`),
//! sanitizes it to `[A-Za-z0-9._-]`, bounds it to 85 characters and appends
//! the fixed `_clean.mp4` suffix. Total and deterministic.

mod sanitize;

pub use sanitize::{sanitize_label, MAX_STEM_LEN};

use std::fmt;

use crate::metadata::MediaMetadata;

/// Suffix appended to every derived filename.
pub const FILENAME_SUFFIX: &str = "_clean.mp4";

/// Prefix of the label used when post_info carries no text field.
const GENERATED_LABEL_PREFIX: &str = "v_";

/// Prefix of the stem used when the selected label sanitizes to nothing.
const FALLBACK_STEM_PREFIX: &str = "sora_";

/// A sanitized, suffixed filename. Never empty, never contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedFilename(String);

impl DerivedFilename {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before [`FILENAME_SUFFIX`].
    pub fn stem(&self) -> &str {
        self.0.strip_suffix(FILENAME_SUFFIX).unwrap_or(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DerivedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DerivedFilename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for DerivedFilename {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

/// Chooses the label to sanitize. A field that is present but empty still
/// wins over the ones after it; it then sanitizes to nothing and the
/// `sora_<post_id>` fallback applies.
fn select_label(metadata: &MediaMetadata) -> String {
    metadata
        .title()
        .or_else(|| metadata.description())
        .or_else(|| metadata.prompt())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{GENERATED_LABEL_PREFIX}{}", metadata.post_id))
}

/// Derives the download filename for `metadata`.
///
/// # Examples
///
/// - title `"A Cat Walking!! (v2)"` → `"A_Cat_Walking_v2_clean.mp4"`
/// - no title, empty description and prompt, post id `abc123` → `"sora_abc123_clean.mp4"`
/// - no post_info at all, post id `abc123` → `"v_abc123_clean.mp4"`
pub fn derive_filename(metadata: &MediaMetadata) -> DerivedFilename {
    let mut stem = sanitize_label(&select_label(metadata));
    if stem.is_empty() {
        stem = format!(
            "{FALLBACK_STEM_PREFIX}{}",
            sanitize_label(&metadata.post_id)
        );
        // ASCII only, so truncating bytes is char-safe.
        stem.truncate(MAX_STEM_LEN);
    }
    stem.push_str(FILENAME_SUFFIX);
    DerivedFilename(stem)
}
