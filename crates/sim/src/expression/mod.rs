//! Gene expression models.
//!
//! An expression model maps the current environmental `Conditions` (and an
//! optional transcription-factor input derived from a regulatory network) to
//! a non-negative expression level. Models compose: a `CompositeExpression`
//! wraps a base model with a regulatory layer, and may itself be used as the
//! base of another composite.
//!
//! - **Constant**: fixed level, independent of conditions
//! - **Linear**: `slope * tf + intercept`, clamped at zero
//! - **Hill**: cooperative activation `v_max * tf^n / (k^n + tf^n)`
//! - **Composite**: `regulation(base(conditions), tf_input)`

pub mod composite;
pub mod models;
pub mod regulatory;

pub use composite::CompositeExpression;
pub use models::{ConstantExpression, HillExpression, LinearExpression};
pub use regulatory::{AdditiveRegulation, MultiplicativeRegulation, RegulatoryExpressionModel};

use crate::base::Conditions;
use std::fmt;

/// Trait for computing a gene's expression level.
///
/// Implementors must return a non-negative value for every input. The
/// `tf_input` argument carries the regulatory-network influence on the gene
/// being evaluated; models without a regulatory layer ignore it.
pub trait ExpressionModel: fmt::Debug + Send + Sync {
    /// Compute the expression level under `conditions` with the given
    /// transcription-factor input.
    fn compute(&self, conditions: &Conditions, tf_input: f64) -> f64;

    /// Compute the expression level with no regulatory input.
    fn compute_basal(&self, conditions: &Conditions) -> f64 {
        self.compute(conditions, 0.0)
    }

    /// The outermost regulatory layer, if this model has one.
    ///
    /// The engine uses this to decide whether per-gene TF inputs should be
    /// fed into `compute`, or whether a single conditions-only evaluation is
    /// shared by every gene.
    fn regulatory_layer(&self) -> Option<&dyn RegulatoryExpressionModel> {
        None
    }

    /// Downcast to a composite, used to walk nested stacks.
    fn as_composite(&self) -> Option<&CompositeExpression> {
        None
    }
}

impl<M: ExpressionModel + ?Sized> ExpressionModel for Box<M> {
    fn compute(&self, conditions: &Conditions, tf_input: f64) -> f64 {
        (**self).compute(conditions, tf_input)
    }

    fn regulatory_layer(&self) -> Option<&dyn RegulatoryExpressionModel> {
        (**self).regulatory_layer()
    }

    fn as_composite(&self) -> Option<&CompositeExpression> {
        (**self).as_composite()
    }
}

/// Reject NaN and infinite parameters with a named message.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<(), crate::errors::ExpressionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(crate::errors::ExpressionError::InvalidParameter(format!(
            "{name} must be finite, got {value}"
        )))
    }
}
