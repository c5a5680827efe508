//! Page planning
//!
//! Turns a page request (base filter, sort field, direction, limit, cursor
//! token) into the filter, sort and limit to run, and turns the fetched
//! batch back into a page with next/previous tokens.

use super::ast::{CompareOp, Filter, Sort, SortOrder};
use super::cursor::{build_cursor_query, CursorError, ID_FIELD};
use super::token::{decode_cursor, encode_cursor};
use crate::config::PaginationConfig;
use crate::document::Value;
use serde::Serialize;
use tracing::debug;

/// A request for one page of results
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Caller's base filter
    pub filter: Filter,
    /// Field to paginate on; empty means the identity field
    pub paginated_field: String,
    /// Sort direction of the paginated field
    pub sort_ascending: bool,
    /// Page size; 0 means the configured default
    pub limit: u64,
    /// Token of the last item of the previous page
    pub next: Option<String>,
    /// Token of the first item of the next page
    pub previous: Option<String>,
}

impl PageRequest {
    pub fn new(paginated_field: impl Into<String>) -> Self {
        Self {
            paginated_field: paginated_field.into(),
            sort_ascending: true,
            ..Self::default()
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn descending(mut self) -> Self {
        self.sort_ascending = false;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn after(mut self, token: impl Into<String>) -> Self {
        self.next = Some(token.into());
        self
    }

    pub fn before(mut self, token: impl Into<String>) -> Self {
        self.previous = Some(token.into());
        self
    }
}

/// The query to run for a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    pub filter: Filter,
    pub sort: Sort,
    /// Rows to fetch: one more than the page size
    pub limit: u64,
    #[serde(skip)]
    pub page_limit: u64,
    #[serde(skip)]
    pub paginating_backwards: bool,
    #[serde(skip)]
    pub had_next_token: bool,
}

impl PageQuery {
    /// Whether rows are ordered on `_id` after the paginated field
    pub fn secondary_sort_on_id(&self) -> bool {
        self.sort.fields.len() > 1
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Plans page queries against a pagination configuration
#[derive(Debug, Clone, Default)]
pub struct PagePlanner {
    config: PaginationConfig,
}

impl PagePlanner {
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// Effective page size for a requested limit
    pub fn page_limit(&self, requested: u64) -> u64 {
        match requested {
            0 => self.config.default_limit,
            n => n.min(self.config.max_limit),
        }
    }

    /// Build the query for a page request
    pub fn plan(&self, request: &PageRequest) -> Result<PageQuery, CursorError> {
        if request.next.is_some() && request.previous.is_some() {
            return Err(CursorError::ConflictingCursors);
        }

        let field = if request.paginated_field.is_empty() {
            ID_FIELD
        } else {
            request.paginated_field.as_str()
        };
        let secondary_sort_on_id = field != ID_FIELD;
        let paginating_backwards = request.previous.is_some();

        let mut filter = request.filter.clone();
        if let Some(token) = request.next.as_deref().or(request.previous.as_deref()) {
            let values = decode_cursor(token)?;
            let op = CompareOp::for_page(request.sort_ascending, paginating_backwards);
            let cursor = build_cursor_query(secondary_sort_on_id, field, op, &values)?;
            filter = filter.merge(cursor);
        }

        // Walking backwards reads the preceding rows in reverse order
        let order = SortOrder::from_ascending(request.sort_ascending != paginating_backwards);
        let mut sort = Sort::new().add(field, order);
        if secondary_sort_on_id {
            sort = sort.add(ID_FIELD, order);
        }

        let page_limit = self.page_limit(request.limit);
        debug!(
            field,
            page_limit,
            paginating_backwards,
            secondary_sort_on_id,
            "Planned page query"
        );

        Ok(PageQuery {
            filter,
            sort,
            limit: page_limit.saturating_add(1),
            page_limit,
            paginating_backwards,
            had_next_token: request.next.is_some(),
        })
    }

    /// Assemble fetched rows into a page.
    ///
    /// `cursor_of` returns the cursor values of a row: `[field]`, or
    /// `[field, _id]` when the query tie-breaks on `_id`.
    pub fn assemble<T, F>(&self, query: &PageQuery, mut rows: Vec<T>, cursor_of: F) -> Page<T>
    where
        F: Fn(&T) -> Vec<Value>,
    {
        let page_limit = usize::try_from(query.page_limit).unwrap_or(usize::MAX);
        let has_more = rows.len() > page_limit;
        rows.truncate(page_limit);

        if query.paginating_backwards {
            rows.reverse();
        }

        let has_previous =
            query.had_next_token || (query.paginating_backwards && has_more);
        let has_next = query.paginating_backwards || has_more;

        let previous = if has_previous {
            rows.first().map(|row| encode_cursor(&cursor_of(row)))
        } else {
            None
        };
        let next = if has_next {
            rows.last().map(|row| encode_cursor(&cursor_of(row)))
        } else {
            None
        };

        Page {
            items: rows,
            next,
            previous,
            has_next,
            has_previous,
        }
    }
}
