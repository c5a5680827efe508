//! Monitoring for CursorPage
//!
//! Structured logging with tracing

pub mod logging;

pub use logging::*;
