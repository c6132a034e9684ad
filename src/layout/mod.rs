//! Line comment layout
//!
//! Validates where each line comment wants to go, computes its geometry next
//! to the target line, and applies the result to the page.

pub mod config;
pub mod error;
pub mod plan;
pub mod positioner;
pub mod validate;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use plan::{
    Geometry, InvalidAssignment, InvalidReason, LayoutFrame, LayoutPlan, LineTarget, ParsedTarget,
    Placement, Presentation,
};
pub use positioner::{compute_plan, LineCommentLayout};
