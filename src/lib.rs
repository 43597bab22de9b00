//! csquery - Structured query builder for search engines.
//!
//! This library turns a typed expression tree into the literal string
//! syntax of a search engine's structured query language, e.g.
//! `(and title:'star' (range field=year [1990,2000}))`.

pub mod expr;
pub mod query;

#[cfg(test)]
mod testing;

pub use expr::{
    format_value, Child, Clause, FieldPair, FormattedValue, Near, Node, Range, RangeBuilder,
    ScalarValue,
};
pub use query::Query;

use thiserror::Error;

/// csquery error types covering all failure modes.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Both range bounds were absent (or formatted to empty text)
    #[error("Range error: cannot set both bounds to absent or empty")]
    RangeArgument,

    /// Range lower bound sorts after the upper bound
    #[error("Range error: min must not exceed max ({min}, {max})")]
    InvalidRange { min: ScalarValue, max: ScalarValue },

    /// TOML query document errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON query document errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;
