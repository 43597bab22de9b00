//! Range operator with construction-time bound validation.
//!
//! Bounds are validated on their *rendered literals*: both bounds present
//! requires `min <= max` as text, so `9` sorts after `10`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::value::ScalarValue;
use crate::{QueryError, Result};

/// Range operator: `(range field=F [boost=B] [MIN,MAX})`.
///
/// Only obtainable through [`RangeBuilder::build`] (or deserialization, which
/// runs the same checks), so every instance has at least one bound and
/// ordered bounds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBuilder")]
pub struct Range {
    field: String,
    min: ScalarValue,
    max: ScalarValue,
    boost: i64,
    min_inclusive: bool,
    max_inclusive: bool,
}

impl Range {
    /// Start building a range over `field`.
    ///
    /// # Examples
    ///
    /// ```
    /// use csquery::{Node, Range};
    ///
    /// let range = Range::builder("year").min(12).max(34).build().unwrap();
    /// assert_eq!(Node::from(range).render(), "(range field=year [12,34})");
    /// ```
    pub fn builder(field: impl Into<String>) -> RangeBuilder {
        RangeBuilder::new(field)
    }

    /// Range with both bounds and default inclusivity (`[min,max}`).
    pub fn new(
        field: impl Into<String>,
        min: impl Into<ScalarValue>,
        max: impl Into<ScalarValue>,
    ) -> Result<Self> {
        Self::builder(field).min(min).max(max).build()
    }

    /// Field the range applies to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Lower bound (`Absent` when unset).
    pub fn lower(&self) -> &ScalarValue {
        &self.min
    }

    /// Upper bound (`Absent` when unset).
    pub fn upper(&self) -> &ScalarValue {
        &self.max
    }

    /// Relevance boost, 0 when unset.
    pub fn boost(&self) -> i64 {
        self.boost
    }

    /// Whether a set lower bound is included.
    pub fn min_inclusive(&self) -> bool {
        self.min_inclusive
    }

    /// Whether a set upper bound is included.
    pub fn max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    /// Write the clause. An unset bound always gets the exclusive bracket.
    pub(crate) fn write_to(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = self.min.formatted();
        let max = self.max.formatted();

        write!(f, "(range field={}", self.field)?;
        if self.boost != 0 {
            write!(f, " boost={}", self.boost)?;
        }
        let open = if !min.is_empty() && self.min_inclusive { '[' } else { '{' };
        let close = if !max.is_empty() && self.max_inclusive { ']' } else { '}' };
        write!(f, " {}{},{}{})", open, min, max, close)
    }
}

/// Builder for [`Range`]; defaults to `min_inclusive = true`,
/// `max_inclusive = false`, no boost and both bounds absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RangeBuilder {
    field: String,
    #[serde(default)]
    min: ScalarValue,
    #[serde(default)]
    max: ScalarValue,
    #[serde(default)]
    boost: i64,
    #[serde(default = "default_min_inclusive")]
    min_inclusive: bool,
    #[serde(default)]
    max_inclusive: bool,
}

fn default_min_inclusive() -> bool {
    true
}

impl RangeBuilder {
    /// Builder with no bounds over `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            min: ScalarValue::Absent,
            max: ScalarValue::Absent,
            boost: 0,
            min_inclusive: true,
            max_inclusive: false,
        }
    }

    /// Lower bound.
    pub fn min(mut self, min: impl Into<ScalarValue>) -> Self {
        self.min = min.into();
        self
    }

    /// Upper bound.
    pub fn max(mut self, max: impl Into<ScalarValue>) -> Self {
        self.max = max.into();
        self
    }

    /// Relevance boost (0 leaves it unset).
    pub fn boost(mut self, boost: i64) -> Self {
        self.boost = boost;
        self
    }

    /// Include the lower bound (`[`) or not (`{`).
    pub fn min_inclusive(mut self, inclusive: bool) -> Self {
        self.min_inclusive = inclusive;
        self
    }

    /// Include the upper bound (`]`) or not (`}`).
    pub fn max_inclusive(mut self, inclusive: bool) -> Self {
        self.max_inclusive = inclusive;
        self
    }

    /// Validate the bounds and produce the range.
    ///
    /// # Errors
    /// - [`QueryError::RangeArgument`] if both bounds render empty
    /// - [`QueryError::InvalidRange`] if both are set and min's literal sorts after max's
    pub fn build(self) -> Result<Range> {
        let min = self.min.formatted();
        let max = self.max.formatted();

        if min.is_empty() && max.is_empty() {
            debug!(field = %self.field, "Rejecting range without bounds");
            return Err(QueryError::RangeArgument);
        }

        let ordered = (!max.is_empty() && min <= max) || (!min.is_empty() && max.is_empty());
        if !ordered {
            debug!(field = %self.field, %min, %max, "Rejecting range with min after max");
            return Err(QueryError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }

        Ok(Range {
            field: self.field,
            min: self.min,
            max: self.max,
            boost: self.boost,
            min_inclusive: self.min_inclusive,
            max_inclusive: self.max_inclusive,
        })
    }
}

impl TryFrom<RangeBuilder> for Range {
    type Error = QueryError;

    fn try_from(builder: RangeBuilder) -> Result<Self> {
        builder.build()
    }
}
