//! Label sanitization: allowed-set filter, whitespace collapse, truncation.

/// Maximum stem length (characters) before the suffix is appended.
pub const MAX_STEM_LEN: usize = 85;

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' ')
}

/// Sanitizes a free-text label into a filename stem.
///
/// - Drops every character outside `[A-Za-z0-9 . _ -]` (tabs, newlines and
///   non-ASCII included)
/// - Collapses each run of spaces into a single `_`
/// - Keeps at most [`MAX_STEM_LEN`] characters
///
/// The result may be empty; callers decide the fallback.
pub fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len().min(MAX_STEM_LEN));
    let mut in_space = false;

    for c in label.chars().filter(|&c| is_allowed(c)) {
        if c == ' ' {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }

    // Only ASCII survives the filter, so byte length equals char count.
    out.truncate(MAX_STEM_LEN);
    out
}
