//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod dashboard;
pub mod export;
pub mod health;

// Re-export all handlers for use in router
pub use dashboard::*;
pub use export::*;
pub use health::*;
