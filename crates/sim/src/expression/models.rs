//! Basal expression models driven only by environmental conditions.

use super::{ensure_finite, ExpressionModel};
use crate::base::Conditions;
use crate::errors::ExpressionError;
use serde::Serialize;

/// Expression fixed at a configured level.
///
/// Models are only built through their validating constructors; serialised
/// input goes through [`crate::simulation::ExpressionConfig`].
///
/// ```compile_fail
/// use grnevo_sim::expression::ConstantExpression;
///
/// let model: ConstantExpression = serde_json::from_str(r#"{"level": -3.0}"#).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstantExpression {
    level: f64,
}

impl ConstantExpression {
    /// Create a constant model.
    ///
    /// # Errors
    /// Returns an error if `level` is negative or not finite.
    pub fn new(level: f64) -> Result<Self, ExpressionError> {
        ensure_finite("level", level)?;
        if level < 0.0 {
            return Err(ExpressionError::InvalidParameter(format!(
                "level must be non-negative, got {level}"
            )));
        }
        Ok(Self { level })
    }

    /// The configured level.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }
}

impl ExpressionModel for ConstantExpression {
    fn compute(&self, _conditions: &Conditions, _tf_input: f64) -> f64 {
        self.level
    }
}

/// Expression linear in the environmental TF concentration.
///
/// A negative slope models repression; the output is clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearExpression {
    slope: f64,
    intercept: f64,
}

impl LinearExpression {
    /// Create a linear model.
    ///
    /// # Errors
    /// Returns an error if `intercept` is negative or either parameter is not
    /// finite.
    pub fn new(slope: f64, intercept: f64) -> Result<Self, ExpressionError> {
        ensure_finite("slope", slope)?;
        ensure_finite("intercept", intercept)?;
        if intercept < 0.0 {
            return Err(ExpressionError::InvalidParameter(format!(
                "intercept must be non-negative, got {intercept}"
            )));
        }
        Ok(Self { slope, intercept })
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl ExpressionModel for LinearExpression {
    fn compute(&self, conditions: &Conditions, _tf_input: f64) -> f64 {
        (self.slope * conditions.tf_concentration + self.intercept).max(0.0)
    }
}

/// Hill-type cooperative activation by the environmental TF concentration.
///
/// `v_max * tf^n / (k^n + tf^n)`. The response is exactly zero at `tf = 0`,
/// exactly `v_max / 2` at `tf = k` for every `n`, and saturates towards
/// `v_max` as `tf` grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HillExpression {
    v_max: f64,
    k: f64,
    n: f64,
}

impl HillExpression {
    /// Create a Hill model.
    ///
    /// # Arguments
    /// * `v_max` - Maximal expression rate (must be >= 0)
    /// * `k` - Half-activation constant (must be > 0)
    /// * `n` - Hill coefficient (must be > 0); values above 1 are cooperative
    ///
    /// # Errors
    /// Returns an error if any parameter is outside its range or not finite.
    pub fn new(v_max: f64, k: f64, n: f64) -> Result<Self, ExpressionError> {
        ensure_finite("v_max", v_max)?;
        ensure_finite("k", k)?;
        ensure_finite("n", n)?;
        if v_max < 0.0 {
            return Err(ExpressionError::InvalidParameter(format!(
                "v_max must be non-negative, got {v_max}"
            )));
        }
        if k <= 0.0 {
            return Err(ExpressionError::InvalidParameter(format!(
                "k must be greater than 0.0, got {k}"
            )));
        }
        if n <= 0.0 {
            return Err(ExpressionError::InvalidParameter(format!(
                "n must be greater than 0.0, got {n}"
            )));
        }
        Ok(Self { v_max, k, n })
    }

    #[inline]
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[inline]
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Fractional occupancy `tf^n / (k^n + tf^n)` in `[0, 1]`.
    fn occupancy(&self, tf: f64) -> f64 {
        if tf <= 0.0 || tf.is_nan() {
            return 0.0;
        }
        // Rewritten as 1 / (1 + (k/tf)^n) so large tf cannot overflow and
        // tf == k gives exactly 0.5.
        1.0 / (1.0 + (self.k / tf).powf(self.n))
    }
}

impl ExpressionModel for HillExpression {
    fn compute(&self, conditions: &Conditions, _tf_input: f64) -> f64 {
        (self.v_max * self.occupancy(conditions.tf_concentration)).max(0.0)
    }
}
