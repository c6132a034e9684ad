//! Layout configuration
//!
//! Class names the engine looks for and toggles, plus the fixed visual
//! constants used when sizing and placing comments. Every field has a default
//! matching the stock page template, so partial JSON overrides are accepted.

use serde::{Deserialize, Serialize};

/// Configuration for line comment layout
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Class of the reference container comments are sized against
    pub wrapper_class: String,

    /// Class of each code block's line-number element
    pub code_block_class: String,

    /// Class of each annotation block
    pub comment_class: String,

    /// Class added to positioned comments
    pub container_class: String,

    /// Class of the wrapper placed around a positioned comment's content
    pub content_class: String,

    /// Class compressing a comment to a single line
    pub collapse_class: String,

    /// Class added to comments with an invalid target
    pub invalid_class: String,

    /// Class of the generated label element
    pub label_class: String,

    /// Fraction of the container width a comment may take
    pub width_ratio: f64,

    /// Minimum gap kept between a narrowed comment and the viewport edge
    pub edge_margin: f64,

    /// Horizontal space between a comment and its code block
    pub gutter: f64,

    /// Comments closer than this many lines to the next one are collapsed
    pub collapse_distance: i64,

    /// Quiet period after the last resize event before repositioning
    pub resize_debounce_ms: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wrapper_class: "wrapper".to_string(),
            code_block_class: "lineno".to_string(),
            comment_class: "lineComment".to_string(),
            container_class: "line_comment_container".to_string(),
            content_class: "line_comment_content".to_string(),
            collapse_class: "single_height".to_string(),
            invalid_class: "invalid_assignment".to_string(),
            label_class: "line_label".to_string(),
            width_ratio: 0.5,
            edge_margin: 50.0,
            gutter: 48.0,
            collapse_distance: 4,
            resize_debounce_ms: 100,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration override from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
