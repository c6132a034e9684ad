//! Line identifiers
//!
//! Line markers and annotations share one identifier shape:
//! `block.<blockIndex>.line.<lineIndex>`, where the line segment of a block's
//! terminal marker is the literal `last`.
//!
//! Decoding never fails. A missing or malformed segment decodes to `None`,
//! which plays the role of "not a number" and is treated by the validator as
//! an invalid assignment.

use std::fmt;

/// Delimiter between identifier segments
pub const DELIMITER: char = '.';

/// Line segment used by a block's terminal marker
pub const LAST_LINE: &str = "last";

const BLOCK_SEGMENT: usize = 1;
const LINE_SEGMENT: usize = 3;

/// Line component of a marker identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSlot {
    /// A real, addressable line
    Line(i64),
    /// The end-of-block marker
    Last,
}

impl fmt::Display for LineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineSlot::Line(n) => write!(f, "{}", n),
            LineSlot::Last => f.write_str(LAST_LINE),
        }
    }
}

/// Build the identifier for a line marker
pub fn encode(block_index: usize, line: LineSlot) -> String {
    format!("block{d}{}{d}line{d}{}", block_index, line, d = DELIMITER)
}

/// Decode the block index of an identifier
pub fn decode_block_index(id: Option<&str>) -> Option<i64> {
    segment(id, BLOCK_SEGMENT).and_then(parse_int)
}

/// Decode the line index of an identifier
pub fn decode_line_index(id: Option<&str>) -> Option<i64> {
    segment(id, LINE_SEGMENT).and_then(parse_int)
}

fn segment(id: Option<&str>, position: usize) -> Option<&str> {
    id.filter(|id| !id.is_empty())?.split(DELIMITER).nth(position)
}

/// Parse the leading integer of `text`.
///
/// Surrounding whitespace and a single sign are accepted, then the longest
/// run of ASCII digits is read. Trailing garbage is ignored (`"12px"` is 12).
/// Returns `None` when no digit is found or the value overflows.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Render a decoded index the way the page shows it in labels
pub fn display_index(index: Option<i64>) -> String {
    match index {
        Some(n) => n.to_string(),
        None => "NaN".to_string(),
    }
}
