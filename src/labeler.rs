//! Content labels
//!
//! Annotation content arrives as a paragraph: a 3-character opening tag, the
//! body, and a closing tag ending in a 1-character terminator. Labels are
//! spliced in right after the opening tag so they render inline with the body.

use thiserror::Error;

/// Width of the opening wrapper token (`<p>`)
const OPENER_LEN: usize = 3;

/// Errors produced while labeling content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// Content too short to hold an opening wrapper and a closing terminator
    #[error("content '{content}' has no room for an opening wrapper and closing terminator")]
    MalformedContent { content: String },
}

/// Generate the label element for `label`
pub fn label_span(label: &str, label_class: &str) -> String {
    format!("<span class=\"{}\">{}: </span>", label_class, label)
}

/// Splice a label element into `content` right after its opening wrapper.
///
/// The content is trimmed first. The body after the opening wrapper follows
/// the label after a single space; the final character of the content (the
/// closing terminator) is dropped.
pub fn add_label_to_content(
    content: &str,
    label: &str,
    label_class: &str,
) -> Result<String, LabelError> {
    let trimmed = content.trim();

    // Opener plus at least the closing terminator.
    if trimmed.chars().count() < OPENER_LEN + 1 {
        return Err(LabelError::MalformedContent {
            content: trimmed.to_string(),
        });
    }

    let body_start = trimmed
        .char_indices()
        .nth(OPENER_LEN)
        .map_or(trimmed.len(), |(i, _)| i);
    let body_end = trimmed
        .char_indices()
        .last()
        .map_or(trimmed.len(), |(i, _)| i);

    Ok(format!(
        "{}{} {}",
        &trimmed[..body_start],
        label_span(label, label_class),
        &trimmed[body_start..body_end]
    ))
}
