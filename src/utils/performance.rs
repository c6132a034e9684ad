//! Layout pass timing
//!
//! Records how long setup and reposition passes take so slow pages show up in
//! the debug log.

use std::collections::HashMap;

/// Current high-resolution time in milliseconds.
///
/// Falls back to wall-clock time when the window has no `performance` object.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Running total of one pass's durations
#[derive(Debug, Default, Clone, Copy)]
struct Samples {
    total_ms: f64,
    count: usize,
}

/// Per-pass duration totals
#[derive(Debug, Default)]
pub struct PassTimings {
    measurements: HashMap<String, Samples>,
}

impl PassTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pass: &str, duration_ms: f64) {
        let samples = self.measurements.entry(pass.to_string()).or_default();
        samples.total_ms += duration_ms;
        samples.count += 1;
    }

    /// Number of recorded samples for `pass`
    pub fn count(&self, pass: &str) -> usize {
        self.measurements.get(pass).map_or(0, |samples| samples.count)
    }

    pub fn average(&self, pass: &str) -> Option<f64> {
        let samples = self.measurements.get(pass)?;
        if samples.count == 0 {
            return None;
        }
        Some(samples.total_ms / samples.count as f64)
    }
}
