//! CursorPage Core - Keyset pagination for document databases
//!
//! This crate provides:
//! - Cursor filters that resume a sort after the last record seen
//! - Tag-based field name resolution for document types
//! - Cursor tokens and page planning
//! - Configuration and logging setup

pub mod config;
pub mod document;
pub mod model;
pub mod monitoring;
pub mod query;

pub use config::*;
pub use document::*;
pub use model::*;
pub use monitoring::*;
pub use query::*;
