//! Assignment validation
//!
//! A comment is valid only when its block index names a rendered code block
//! and its line index falls within that block's line numbers. Validation runs
//! in two stages: block ranges once for every comment, then line ranges per
//! block for the comments that block selected.

use super::plan::{InvalidAssignment, InvalidReason, ParsedTarget};
use crate::identifier::{decode_block_index, decode_line_index, parse_int};

/// Parse the declared target of a comment from its identifier
pub fn parse_target(id: Option<&str>) -> ParsedTarget {
    ParsedTarget {
        block: decode_block_index(id),
        line: decode_line_index(id),
    }
}

/// Resolve the block of `target` against `block_count` rendered blocks
pub fn check_block(target: &ParsedTarget, block_count: usize) -> Result<usize, InvalidReason> {
    let block = target.block.ok_or(InvalidReason::UnparsableBlock)?;
    let highest_block = block_count as i64 - 1;

    if block < 0 || block > highest_block {
        return Err(InvalidReason::BlockOutOfRange);
    }

    Ok(block as usize)
}

/// Resolve the line of `target` against a block whose last real line is
/// `highest_line`. A block without a readable last line accepts no lines.
pub fn check_line(target: &ParsedTarget, highest_line: Option<i64>) -> Result<i64, InvalidReason> {
    let line = target.line.ok_or(InvalidReason::UnparsableLine)?;

    match highest_line {
        Some(highest) if line > -1 && line <= highest => Ok(line),
        _ => Err(InvalidReason::LineOutOfRange),
    }
}

/// Find every comment whose block index is not a rendered code block
pub fn validate_blocks(targets: &[ParsedTarget], block_count: usize) -> Vec<InvalidAssignment> {
    targets
        .iter()
        .enumerate()
        .filter_map(|(comment, target)| {
            check_block(target, block_count)
                .err()
                .map(|reason| InvalidAssignment {
                    comment,
                    parsed: *target,
                    reason,
                })
        })
        .collect()
}

/// Highest real line number of a block, read from its marker texts.
///
/// The final marker is the end-of-block terminator, so the last real line is
/// the one before it.
pub fn highest_line_number(marker_texts: &[String]) -> Option<i64> {
    let index = marker_texts.len().checked_sub(2)?;
    parse_int(&marker_texts[index])
}
