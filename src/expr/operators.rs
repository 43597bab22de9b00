//! Specialized field operators: near, phrase, prefix and term.
//!
//! A modifier of `0` means "unset" and is never rendered, so a real
//! distance or boost of zero cannot be expressed.

use serde::{Deserialize, Serialize};

use super::value::ScalarValue;

/// Operands shared by the phrase, prefix and term operators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Clause {
    field: String,
    value: ScalarValue,
    #[serde(default)]
    boost: i64,
}

impl Clause {
    /// Create a clause matching `value` in `field`.
    pub fn new(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            boost: 0,
        }
    }

    /// Set the relevance boost (0 leaves it unset).
    pub fn with_boost(self, boost: i64) -> Self {
        Self { boost, ..self }
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value matched against the field.
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// Relevance boost, 0 when unset.
    pub fn boost(&self) -> i64 {
        self.boost
    }

    /// Write `(<name> field=F [boost=B] V)`.
    pub(crate) fn write_to(&self, name: &str, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} field={}", name, self.field)?;
        if self.boost != 0 {
            write!(f, " boost={}", self.boost)?;
        }
        write!(f, " {})", self.value)
    }
}

/// Proximity operator: `(near field=F [distance=D] [boost=B] V)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Near {
    field: String,
    value: ScalarValue,
    #[serde(default)]
    distance: i64,
    #[serde(default)]
    boost: i64,
}

impl Near {
    /// Near `value` in `field`, without modifiers.
    pub fn new(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            distance: 0,
            boost: 0,
        }
    }

    /// Set the maximum term distance (0 leaves it unset).
    pub fn with_distance(self, distance: i64) -> Self {
        Self { distance, ..self }
    }

    /// Set the relevance boost (0 leaves it unset).
    pub fn with_boost(self, boost: i64) -> Self {
        Self { boost, ..self }
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value matched against the field.
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// Maximum term distance, 0 when unset.
    pub fn distance(&self) -> i64 {
        self.distance
    }

    /// Relevance boost, 0 when unset.
    pub fn boost(&self) -> i64 {
        self.boost
    }

    pub(crate) fn write_to(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(near field={}", self.field)?;
        if self.distance != 0 {
            write!(f, " distance={}", self.distance)?;
        }
        if self.boost != 0 {
            write!(f, " boost={}", self.boost)?;
        }
        write!(f, " {})", self.value)
    }
}
