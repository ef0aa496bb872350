//! Regulatory layers that modulate a base expression level.
//!
//! A regulatory layer takes the basal expression computed from conditions
//! and a transcription-factor input from the regulatory network, and
//! combines them through a signed weight. Negative weights model repression.
//! The TF input itself is used as-is (it may be negative); only the
//! resulting expression is clamped at zero.

use super::ensure_finite;
use crate::errors::ExpressionError;
use serde::Serialize;
use std::fmt;

/// Trait for transforming a base expression level with a TF input.
pub trait RegulatoryExpressionModel: fmt::Debug + Send + Sync {
    /// Combine `base_expression` with `tf_input`. Must return a value `>= 0`.
    fn compute(&self, base_expression: f64, tf_input: f64) -> f64;

    /// Signed coupling strength of this layer.
    fn weight(&self) -> f64;
}

impl<M: RegulatoryExpressionModel + ?Sized> RegulatoryExpressionModel for Box<M> {
    fn compute(&self, base_expression: f64, tf_input: f64) -> f64 {
        (**self).compute(base_expression, tf_input)
    }

    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

/// Additive regulation: `base + weight * tf`, clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdditiveRegulation {
    weight: f64,
}

impl AdditiveRegulation {
    /// Create an additive layer.
    ///
    /// # Errors
    /// Returns an error if `weight` is not finite.
    pub fn new(weight: f64) -> Result<Self, ExpressionError> {
        ensure_finite("weight", weight)?;
        Ok(Self { weight })
    }
}

impl RegulatoryExpressionModel for AdditiveRegulation {
    fn compute(&self, base_expression: f64, tf_input: f64) -> f64 {
        (base_expression + self.weight * tf_input).max(0.0)
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Multiplicative regulation: `base * (1 + weight * tf)`, clamped at zero.
///
/// A product `weight * tf` of exactly -1 silences the gene completely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultiplicativeRegulation {
    weight: f64,
}

impl MultiplicativeRegulation {
    /// Create a multiplicative layer.
    ///
    /// # Errors
    /// Returns an error if `weight` is not finite.
    pub fn new(weight: f64) -> Result<Self, ExpressionError> {
        ensure_finite("weight", weight)?;
        Ok(Self { weight })
    }
}

impl RegulatoryExpressionModel for MultiplicativeRegulation {
    fn compute(&self, base_expression: f64, tf_input: f64) -> f64 {
        (base_expression * (1.0 + self.weight * tf_input)).max(0.0)
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_activation() {
        let reg = AdditiveRegulation::new(1.0).unwrap();
        assert_eq!(reg.compute(0.5, 2.0), 2.5);
        assert_eq!(reg.weight(), 1.0);
    }

    #[test]
    fn test_additive_repression_clamps() {
        let reg = AdditiveRegulation::new(-2.0).unwrap();
        assert_eq!(reg.compute(1.0, 0.25), 0.5);
        assert_eq!(reg.compute(1.0, 3.0), 0.0);
    }

    #[test]
    fn test_additive_negative_tf_input_is_used() {
        // A negative TF input with positive weight still represses
        let reg = AdditiveRegulation::new(1.0).unwrap();
        assert_eq!(reg.compute(1.0, -0.5), 0.5);
    }

    #[test]
    fn test_multiplicative_scaling() {
        let reg = MultiplicativeRegulation::new(0.5).unwrap();
        assert_eq!(reg.compute(2.0, 2.0), 4.0);
        assert_eq!(reg.compute(2.0, 0.0), 2.0);
    }

    #[test]
    fn test_multiplicative_complete_silencing() {
        let reg = MultiplicativeRegulation::new(-0.5).unwrap();
        assert_eq!(reg.compute(3.0, 2.0), 0.0);
        assert_eq!(reg.compute(3.0, 10.0), 0.0);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        assert!(AdditiveRegulation::new(f64::NAN).is_err());
        assert!(MultiplicativeRegulation::new(f64::INFINITY).is_err());
    }
}
