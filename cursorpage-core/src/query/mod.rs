//! Keyset pagination queries for CursorPage
//!
//! This module builds MongoDB-compatible cursor filters and plans page queries

pub mod ast;
pub mod cursor;
pub mod page;
pub mod parser;
pub mod token;
pub mod wire;

pub use ast::{CompareOp, Filter, Sort, SortOrder};
pub use cursor::{build_cursor_query, CursorError, ID_FIELD};
pub use page::{Page, PagePlanner, PageQuery, PageRequest};
pub use parser::{FilterParseError, FilterParser};
pub use token::{decode_cursor, encode_cursor};
pub use wire::{filter_to_json, json_to_value, sort_to_json, value_to_json};
