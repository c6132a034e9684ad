//! Layout Plan
//!
//! The result of one layout pass: where every valid comment goes and which
//! comments could not be assigned. Computing a plan only reads the page;
//! applying it is a separate step.

use std::fmt;

use crate::identifier::display_index;

/// Position and size of a comment, in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub top: f64,
    pub left: f64,
}

/// Horizontal reference frame for one pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutFrame {
    /// Width of the reference container
    pub wrapper_width: f64,

    /// Absolute left position of the reference container
    pub wrapper_left: f64,

    /// Comment width before any per-block narrowing
    pub comment_width: f64,
}

/// Target as parsed from a comment identifier; `None` means not a number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedTarget {
    pub block: Option<i64>,
    pub line: Option<i64>,
}

impl fmt::Display for ParsedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block: {} Line: {}",
            display_index(self.block),
            display_index(self.line)
        )
    }
}

/// A resolved comment target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineTarget {
    pub block: usize,
    pub line: i64,
}

/// How much vertical space a comment may take
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Default multi-line presentation
    Expanded,
    /// Compressed to one line because the next comment is close below
    SingleLine,
}

/// Why a comment could not be positioned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidReason {
    /// Block segment is not a number
    UnparsableBlock,
    /// Block index outside the rendered code blocks
    BlockOutOfRange,
    /// Line segment is not a number
    UnparsableLine,
    /// Line index outside the block's line numbers
    LineOutOfRange,
}

/// A comment positioned next to its target line
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index of the comment among all comments, in document order
    pub comment: usize,
    pub target: LineTarget,
    pub geometry: Geometry,
    pub presentation: Presentation,
}

/// A comment whose target does not resolve
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidAssignment {
    /// Index of the comment among all comments, in document order
    pub comment: usize,
    pub parsed: ParsedTarget,
    pub reason: InvalidReason,
}

/// Complete result of one layout pass
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutPlan {
    pub frame: LayoutFrame,

    /// Positioned comments, by block in document order then ascending line
    pub placements: Vec<Placement>,

    /// Comments excluded from positioning, in the order they were found
    pub invalid: Vec<InvalidAssignment>,
}

impl LayoutPlan {
    /// Placement of the comment at `comment`, if it was positioned
    pub fn placement_for(&self, comment: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.comment == comment)
    }

    /// Invalid assignment of the comment at `comment`, if it was rejected
    pub fn invalid_for(&self, comment: usize) -> Option<&InvalidAssignment> {
        self.invalid.iter().find(|i| i.comment == comment)
    }
}
