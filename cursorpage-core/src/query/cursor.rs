//! Keyset cursor filters
//!
//! Builds the fragment that selects rows strictly past a cursor. When the
//! paginated field can hold duplicates, rows tied on it are ordered by the
//! collection's identity field so that `(field, _id)` is a total order.

use super::ast::{CompareOp, Filter};
use crate::document::Value;
use tracing::debug;

/// Identity field used to break ties on the paginated field
pub const ID_FIELD: &str = "_id";

/// Build the filter for the page that follows `cursor_values`.
///
/// `cursor_values` holds `[primary]` when `secondary_sort_on_id` is false and
/// `[primary, id]` when it is true. Any other count is rejected and no
/// fragment is produced.
pub fn build_cursor_query(
    secondary_sort_on_id: bool,
    paginated_field: &str,
    comparison_op: CompareOp,
    cursor_values: &[Value],
) -> Result<Filter, CursorError> {
    let expected = if secondary_sort_on_id { 2 } else { 1 };
    if cursor_values.len() != expected {
        return Err(CursorError::InvalidArity {
            expected,
            actual: cursor_values.len(),
        });
    }

    debug!(
        field = paginated_field,
        op = %comparison_op,
        secondary_sort_on_id,
        "Building cursor query"
    );

    let primary = &cursor_values[0];
    let past_cursor = Filter::compare(paginated_field, comparison_op, primary.clone());

    if !secondary_sort_on_id {
        return Ok(past_cursor);
    }

    let id = &cursor_values[1];
    Ok(Filter::Or(vec![
        past_cursor,
        Filter::And(vec![
            Filter::eq(paginated_field, primary.clone()),
            Filter::compare(ID_FIELD, comparison_op, id.clone()),
        ]),
    ]))
}

/// Cursor pagination errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CursorError {
    #[error("wrong number of cursor field values specified: expected {expected}, got {actual}")]
    InvalidArity { expected: usize, actual: usize },

    #[error("Unknown comparison operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid cursor token: {0}")]
    InvalidToken(String),

    #[error("next and previous cursors cannot both be set")]
    ConflictingCursors,
}
