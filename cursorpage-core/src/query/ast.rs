//! Query fragment definitions
//!
//! Defines the filter tree produced by the cursor builder and the sort
//! specification that accompanies it

use crate::document::Value;
use crate::query::CursorError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a single-field filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Greater than: `$gt`
    Gt,
    /// Greater than or equal: `$gte`
    Gte,
    /// Less than: `$lt`
    Lt,
    /// Less than or equal: `$lte`
    Lte,
    /// Equality: `$eq`
    Eq,
}

impl CompareOp {
    /// Wire symbol for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Gt => "$gt",
            CompareOp::Gte => "$gte",
            CompareOp::Lt => "$lt",
            CompareOp::Lte => "$lte",
            CompareOp::Eq => "$eq",
        }
    }

    /// Operator that moves a page past its cursor.
    ///
    /// Walking forward through an ascending sort, or backward through a
    /// descending one, means "greater than the cursor"; the other two
    /// combinations mean "less than".
    pub fn for_page(sort_ascending: bool, paginating_backwards: bool) -> Self {
        if sort_ascending != paginating_backwards {
            CompareOp::Gt
        } else {
            CompareOp::Lt
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$gt" => Ok(CompareOp::Gt),
            "$gte" => Ok(CompareOp::Gte),
            "$lt" => Ok(CompareOp::Lt),
            "$lte" => Ok(CompareOp::Lte),
            "$eq" => Ok(CompareOp::Eq),
            other => Err(CursorError::UnknownOperator(other.to_string())),
        }
    }
}

/// Filter conditions for queries
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Empty filter (matches all documents)
    Empty,

    /// Single field comparison: `{field: {op: value}}`
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },

    /// Logical AND: all conditions must match
    And(Vec<Filter>),

    /// Logical OR: at least one condition must match
    Or(Vec<Filter>),
}

impl Filter {
    /// Create a comparison filter
    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    /// Create a greater-than filter
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    /// Create a less-than filter
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    /// Create an AND filter
    pub fn and(filters: Vec<Filter>) -> Self {
        Self::And(filters)
    }

    /// Create an OR filter
    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }

    /// Conjoin two filters, dropping an empty side
    pub fn merge(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::Empty, f) | (f, Filter::Empty) => f,
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Check if this filter is empty (matches all)
    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::Empty)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Empty
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// Fields to sort by with their order
    pub fields: Vec<(String, SortOrder)>,
}

impl Sort {
    /// Create a new empty sort
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to sort by
    pub fn add(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.fields.push((field.into(), order));
        self
    }

    /// Sort by field in ascending order
    pub fn asc(self, field: impl Into<String>) -> Self {
        self.add(field, SortOrder::Ascending)
    }

    /// Sort by field in descending order
    pub fn desc(self, field: impl Into<String>) -> Self {
        self.add(field, SortOrder::Descending)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (1)
    Ascending,
    /// Descending order (-1)
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    /// Wire value: 1 or -1
    pub fn as_i32(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}
