//! WASM entry points
//!
//! Wires the layout engine to the live page: reads the optional inline
//! configuration, runs setup once the document is parsed, and binds the
//! debounced reposition pass to window resizes.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;

use crate::dom::WebDocument;
use crate::layout::{LayoutConfig, LayoutError, LineCommentLayout};
use crate::scheduler::{Debouncer, TimeoutScheduler};
use crate::utils::{now_ms, PassTimings};

/// Identifier of the optional `<script type="application/json">` element
/// carrying configuration overrides
pub const CONFIG_ELEMENT_ID: &str = "line-comments-config";

/// Read configuration overrides from the page, falling back to defaults
pub fn load_config(document: &WebDocument) -> LayoutConfig {
    let Some(json) = document.text_of(CONFIG_ELEMENT_ID) else {
        return LayoutConfig::default();
    };

    LayoutConfig::from_json(&json).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed #{} ({}), using defaults", CONFIG_ELEMENT_ID, e);
        LayoutConfig::default()
    })
}

/// Mount line comments now, or once the document has finished parsing
pub fn mount_when_ready() -> Result<(), LayoutError> {
    let document = WebDocument::from_window()?;

    if document.document().ready_state() != "loading" {
        return mount(document);
    }

    let target = document.document().clone();
    EventListener::once(&target, "DOMContentLoaded", move |_event| {
        if let Err(e) = mount(document) {
            log::error!("Failed to set up line comments: {}", e);
        }
    })
    .forget();

    Ok(())
}

/// Set up line comments on `document` and keep them positioned on resize
pub fn mount(document: WebDocument) -> Result<(), LayoutError> {
    let window = web_sys::window()
        .ok_or_else(|| LayoutError::Dom("no window available".to_string()))?;

    let config = load_config(&document);
    let wait_ms = config.resize_debounce_ms;
    let layout = Rc::new(LineCommentLayout::new(document, config));
    let timings = Rc::new(RefCell::new(PassTimings::new()));

    let started = now_ms();
    layout.setup()?;
    timings.borrow_mut().record("setup", now_ms() - started);

    let debouncer = Debouncer::new(TimeoutScheduler, wait_ms, move || {
        let started = now_ms();
        match layout.reposition() {
            Ok(plan) => {
                let mut timings = timings.borrow_mut();
                timings.record("reposition", now_ms() - started);
                log::debug!(
                    "Repositioned {} line comments (average {:.2} ms over {} passes)",
                    plan.placements.len(),
                    timings.average("reposition").unwrap_or_default(),
                    timings.count("reposition")
                );
            }
            Err(e) => log::error!("Failed to reposition line comments: {}", e),
        }
    });

    EventListener::new(&window, "resize", move |_event| debouncer.trigger()).forget();

    Ok(())
}
