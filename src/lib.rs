//! Line Comments WASM Module
//!
//! Positions line comment blocks next to the lines of rendered code blocks
//! they annotate, and keeps them in place as the viewport resizes.

pub mod api;
pub mod dom;
pub mod geometry;
pub mod identifier;
pub mod labeler;
pub mod layout;
pub mod scheduler;
pub mod utils;

// Re-export commonly used types
pub use dom::{DocumentView, LineMarker, WebDocument};
pub use geometry::OffsetNode;
pub use layout::{
    compute_plan, Geometry, InvalidAssignment, InvalidReason, LayoutConfig, LayoutError, LayoutPlan,
    LineCommentLayout, Placement, Presentation,
};
pub use scheduler::{Debouncer, Scheduler, TimeoutScheduler};

use wasm_bindgen::prelude::*;

// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Debug) {
            web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
        }
    }

    log::info!("Line comments WASM module initialized");

    if let Err(e) = api::mount_when_ready() {
        log::error!("Failed to set up line comments: {}", e);
    }
}
