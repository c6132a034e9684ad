//! Utility modules for the line comments engine

pub mod performance;

// Re-export commonly used types
pub use performance::*;
