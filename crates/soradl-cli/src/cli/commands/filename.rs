//! `soradl filename` – offline filename derivation.

use soradl_core::filename::derive_filename;
use soradl_core::metadata::{MediaMetadata, PostInfo};

pub(crate) fn metadata_from_args(
    post_id: String,
    title: Option<String>,
    description: Option<String>,
    prompt: Option<String>,
) -> MediaMetadata {
    let meta = MediaMetadata::new(post_id);
    if title.is_none() && description.is_none() && prompt.is_none() {
        return meta;
    }
    meta.with_info(PostInfo {
        title,
        description,
        prompt,
    })
}

pub fn run_filename(
    post_id: String,
    title: Option<String>,
    description: Option<String>,
    prompt: Option<String>,
) {
    let meta = metadata_from_args(post_id, title, description, prompt);
    println!("{}", derive_filename(&meta));
}
