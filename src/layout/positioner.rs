//! Line comment positioner
//!
//! Places every valid line comment to the left of its code block, level with
//! its target line. Layout runs in two explicit phases:
//!
//! - **setup** runs once per page. It turns each code block's line-number text
//!   into addressable line markers, labels invalid comments, and wraps the
//!   content of positioned comments (deciding their collapsed presentation).
//! - **reposition** runs after every viewport change and only rewrites the
//!   width/top/left of positioned comments.
//!
//! Both phases share the per-block planning step; [`compute_plan`] runs it
//! over the whole page and returns a [`LayoutPlan`] without modifying anything.

use std::cell::Cell;

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::plan::*;
use super::validate::{check_line, highest_line_number, parse_target, validate_blocks};
use crate::dom::{DocumentView, LineMarker};
use crate::geometry::{absolute_left, absolute_top};
use crate::identifier::{encode, parse_int, LineSlot};
use crate::labeler::add_label_to_content;

/// Build one marker per line of a code block's line-number text.
///
/// The text is split on newlines; a segment without a line number (normally
/// the empty one after the final newline) becomes the end-of-block marker.
pub fn line_markers(block_index: usize, line_number_text: &str) -> Vec<LineMarker> {
    line_number_text
        .split('\n')
        .map(|text| {
            let slot = parse_int(text).map_or(LineSlot::Last, LineSlot::Line);
            LineMarker {
                id: encode(block_index, slot),
                text: text.to_string(),
            }
        })
        .collect()
}

/// Comment width for a block whose left edge sits at `left_offset`.
///
/// Comments wider than the space left of the block would run off screen, so
/// they are narrowed to leave `edge_margin` pixels, unless the block itself is
/// within the margin.
pub fn block_comment_width(comment_width: f64, left_offset: f64, edge_margin: f64) -> f64 {
    if comment_width > left_offset && left_offset > edge_margin {
        left_offset - edge_margin
    } else {
        comment_width
    }
}

/// Measure the reference container and derive the base comment width
fn resolve_frame<D: DocumentView>(view: &D, config: &LayoutConfig) -> Result<LayoutFrame, LayoutError> {
    let wrapper = view
        .elements_by_class(&config.wrapper_class)
        .into_iter()
        .next()
        .ok_or_else(|| LayoutError::MissingContainer(config.wrapper_class.clone()))?;

    let wrapper_width = view.offset_width(&wrapper);
    let wrapper_left = absolute_left(Some(&wrapper));

    Ok(LayoutFrame {
        wrapper_width,
        wrapper_left,
        comment_width: (wrapper_width * config.width_ratio).min(wrapper_left),
    })
}

/// Compute the layout of every comment on the page without modifying it
pub fn compute_plan<D: DocumentView>(view: &D, config: &LayoutConfig) -> Result<LayoutPlan, LayoutError> {
    let comments = view.elements_by_class(&config.comment_class);
    let blocks = view.elements_by_class(&config.code_block_class);
    let frame = resolve_frame(view, config)?;
    let targets = parse_targets(view, &comments);

    // Comments naming a block that doesn't exist never reach a block below.
    let mut invalid = validate_blocks(&targets, blocks.len());
    let mut placements = Vec::new();

    for (block_index, block) in blocks.iter().enumerate() {
        let (block_placements, block_invalid) =
            plan_block(view, config, &frame, &targets, block_index, block);
        placements.extend(block_placements);
        invalid.extend(block_invalid);
    }

    Ok(LayoutPlan {
        frame,
        placements,
        invalid,
    })
}

fn parse_targets<D: DocumentView>(view: &D, comments: &[D::Element]) -> Vec<ParsedTarget> {
    comments
        .iter()
        .map(|comment| parse_target(view.id_of(comment).as_deref()))
        .collect()
}

/// Lay out the comments of one code block, in ascending line order
fn plan_block<D: DocumentView>(
    view: &D,
    config: &LayoutConfig,
    frame: &LayoutFrame,
    targets: &[ParsedTarget],
    block_index: usize,
    block: &D::Element,
) -> (Vec<Placement>, Vec<InvalidAssignment>) {
    let highest_line = highest_line_number(&view.child_texts(block));

    let mut selected: Vec<(usize, &ParsedTarget)> = targets
        .iter()
        .enumerate()
        .filter(|(_, target)| target.block == Some(block_index as i64))
        .collect();
    selected.sort_by_key(|(_, target)| target.line);

    let mut valid: Vec<(usize, i64)> = Vec::with_capacity(selected.len());
    let mut invalid = Vec::new();
    for (comment, target) in selected {
        match check_line(target, highest_line) {
            Ok(line) => valid.push((comment, line)),
            Err(reason) => invalid.push(InvalidAssignment {
                comment,
                parsed: *target,
                reason,
            }),
        }
    }

    let left_offset = absolute_left(Some(block));
    let width = block_comment_width(frame.comment_width, left_offset, config.edge_margin);

    let mut placements = Vec::with_capacity(valid.len());
    for (position, &(comment, line)) in valid.iter().enumerate() {
        let marker = view.marker_in(block, &encode(block_index, LineSlot::Line(line)));
        let geometry = Geometry {
            width,
            top: absolute_top(marker.as_ref()),
            left: left_offset - width - config.gutter,
        };

        let presentation = match valid.get(position + 1) {
            Some(&(_, next_line)) if next_line - line < config.collapse_distance => {
                Presentation::SingleLine
            }
            _ => Presentation::Expanded,
        };

        log::debug!(
            "block {} line {}: width={} (wrapper {}), top={}, left={}",
            block_index,
            line,
            geometry.width,
            frame.wrapper_width,
            geometry.top,
            geometry.left
        );

        placements.push(Placement {
            comment,
            target: LineTarget { block: block_index, line },
            geometry,
            presentation,
        });
    }

    (placements, invalid)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Ready,
}

/// Line comment layout bound to one page
pub struct LineCommentLayout<D: DocumentView> {
    view: D,
    config: LayoutConfig,
    phase: Cell<Phase>,
}

impl<D: DocumentView> LineCommentLayout<D> {
    pub fn new(view: D, config: LayoutConfig) -> Self {
        Self {
            view,
            config,
            phase: Cell::new(Phase::Pending),
        }
    }

    pub fn view(&self) -> &D {
        &self.view
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Whether the one-time setup has run
    pub fn is_set_up(&self) -> bool {
        self.phase.get() == Phase::Ready
    }

    /// Compute the current layout without touching the page.
    ///
    /// Line markers only exist after setup, so this returns
    /// [`LayoutError::NotSetUp`] until then.
    pub fn plan(&self) -> Result<LayoutPlan, LayoutError> {
        if !self.is_set_up() {
            return Err(LayoutError::NotSetUp);
        }
        compute_plan(&self.view, &self.config)
    }

    /// Transform the page and position every comment.
    ///
    /// Blocks are handled one at a time: a block's markers are created and
    /// its comments restyled before the next block is measured, so later
    /// blocks see the page as it will stay. Runs at most once; later calls
    /// return [`LayoutError::AlreadySetUp`].
    pub fn setup(&self) -> Result<LayoutPlan, LayoutError> {
        if self.is_set_up() {
            return Err(LayoutError::AlreadySetUp);
        }

        let comments = self.view.elements_by_class(&self.config.comment_class);
        let blocks = self.view.elements_by_class(&self.config.code_block_class);

        // Fail before mutating anything if the page has no reference frame.
        let frame = resolve_frame(&self.view, &self.config)?;
        self.phase.set(Phase::Ready);

        let targets = parse_targets(&self.view, &comments);
        let mut invalid = validate_blocks(&targets, blocks.len());
        self.mark_invalid(&invalid, &comments);

        let mut placements = Vec::new();
        for (block_index, block) in blocks.iter().enumerate() {
            let markers = line_markers(block_index, &self.view.inner_html(block));
            self.view.replace_with_markers(block, &markers)?;

            let (block_placements, block_invalid) =
                plan_block(&self.view, &self.config, &frame, &targets, block_index, block);
            self.mark_invalid(&block_invalid, &comments);
            self.decorate(&block_placements, &comments);

            placements.extend(block_placements);
            invalid.extend(block_invalid);
        }

        log::info!(
            "Positioned {} line comments across {} code blocks ({} invalid)",
            placements.len(),
            blocks.len(),
            invalid.len()
        );

        Ok(LayoutPlan {
            frame,
            placements,
            invalid,
        })
    }

    /// Recompute and write the geometry of every positioned comment
    pub fn reposition(&self) -> Result<LayoutPlan, LayoutError> {
        if !self.is_set_up() {
            return Err(LayoutError::NotSetUp);
        }

        let comments = self.view.elements_by_class(&self.config.comment_class);
        let plan = compute_plan(&self.view, &self.config)?;

        for placement in &plan.placements {
            if let Some(comment) = comments.get(placement.comment) {
                self.view.set_geometry(comment, &placement.geometry);
            }
        }

        Ok(plan)
    }

    /// Label and flag comments whose target does not resolve
    fn mark_invalid(&self, invalid: &[InvalidAssignment], comments: &[D::Element]) {
        let config = &self.config;

        for assignment in invalid {
            let Some(comment) = comments.get(assignment.comment) else {
                continue;
            };

            log::warn!(
                "Line comment {:?} has an invalid assignment ({:?})",
                self.view.id_of(comment),
                assignment.reason
            );

            let content = self.view.inner_html(comment);
            match add_label_to_content(&content, &assignment.parsed.to_string(), &config.label_class) {
                Ok(labeled) => self.view.set_inner_html(comment, &labeled),
                Err(e) => log::warn!("Leaving invalid line comment unlabeled: {}", e),
            }
            self.view.add_class(comment, &config.invalid_class);
        }
    }

    /// Place comments and give them their one-time label and wrapper
    fn decorate(&self, placements: &[Placement], comments: &[D::Element]) {
        let config = &self.config;

        for placement in placements {
            let Some(comment) = comments.get(placement.comment) else {
                continue;
            };

            self.view.set_geometry(comment, &placement.geometry);
            self.view.add_class(comment, &config.container_class);

            let content = self.view.inner_html(comment);
            let label = format!("Line: {}", placement.target.line);
            let labeled = add_label_to_content(&content, &label, &config.label_class)
                .unwrap_or_else(|e| {
                    log::warn!("Leaving line comment unlabeled: {}", e);
                    content.trim().to_string()
                });

            let mut content_classes = config.content_class.clone();
            if placement.presentation == Presentation::SingleLine {
                self.view.add_class(comment, &config.collapse_class);
                content_classes.push(' ');
                content_classes.push_str(&config.collapse_class);
            }

            self.view.set_inner_html(
                comment,
                &format!("<div class=\"{}\">{}</div>", content_classes, labeled),
            );
        }
    }
}
