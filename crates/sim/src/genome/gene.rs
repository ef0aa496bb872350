use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// A single gene with a non-negative expression level.
///
/// The level is clamped to `>= 0` at every assignment site, so no code path
/// can observe a negative value. NaN inputs are treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    /// Gene identifier
    id: Arc<str>,
    /// Current expression level (always >= 0)
    #[serde(deserialize_with = "deserialize_level")]
    expression_level: f64,
}

impl Gene {
    /// Create a new gene, clamping a negative level to zero.
    pub fn new(id: impl Into<Arc<str>>, expression_level: f64) -> Self {
        Self {
            id: id.into(),
            expression_level: clamp_level(expression_level),
        }
    }

    /// Return the gene identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the current expression level.
    #[inline]
    pub fn expression_level(&self) -> f64 {
        self.expression_level
    }

    /// Overwrite the expression level, clamping negatives to zero.
    #[inline]
    pub fn set_expression_level(&mut self, level: f64) {
        self.expression_level = clamp_level(level);
    }
}

/// Clamp an expression value to the non-negative range.
#[inline]
pub(crate) fn clamp_level(level: f64) -> f64 {
    // `max` returns the other operand for NaN, so NaN becomes 0.0 here.
    level.max(0.0)
}

fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_level)
}
