//! Composition of a base expression model with a regulatory layer.

use super::{ExpressionModel, RegulatoryExpressionModel};
use crate::base::Conditions;

/// A base expression model wrapped by a regulatory layer.
///
/// `compute(conditions, tf)` evaluates the base with no TF input and feeds
/// the result through the regulatory layer together with `tf`. The composite
/// owns both parts exclusively; because the base may itself be a composite,
/// arbitrarily deep stacks can be built without sharing or cycles.
///
/// ```
/// use grnevo_sim::base::Conditions;
/// use grnevo_sim::expression::{
///     AdditiveRegulation, CompositeExpression, ConstantExpression, ExpressionModel,
/// };
///
/// let model = CompositeExpression::new(
///     ConstantExpression::new(0.5).unwrap(),
///     AdditiveRegulation::new(1.0).unwrap(),
/// );
/// assert_eq!(model.compute(&Conditions::default(), 2.0), 2.5);
/// ```
#[derive(Debug)]
pub struct CompositeExpression {
    base: Box<dyn ExpressionModel>,
    regulatory: Box<dyn RegulatoryExpressionModel>,
}

impl CompositeExpression {
    /// Wrap `base` with the `regulatory` layer.
    pub fn new(
        base: impl ExpressionModel + 'static,
        regulatory: impl RegulatoryExpressionModel + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(base), Box::new(regulatory))
    }

    /// Wrap already-boxed parts.
    pub fn from_boxed(
        base: Box<dyn ExpressionModel>,
        regulatory: Box<dyn RegulatoryExpressionModel>,
    ) -> Self {
        Self { base, regulatory }
    }

    /// The wrapped base model.
    pub fn base(&self) -> &dyn ExpressionModel {
        self.base.as_ref()
    }

    /// The wrapped regulatory layer.
    pub fn regulatory(&self) -> &dyn RegulatoryExpressionModel {
        self.regulatory.as_ref()
    }

    /// Number of composite layers, counting this one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.base.as_ref();
        while let Some(inner) = current.as_composite() {
            depth += 1;
            current = inner.base();
        }
        depth
    }
}

impl ExpressionModel for CompositeExpression {
    fn compute(&self, conditions: &Conditions, tf_input: f64) -> f64 {
        let basal = self.base.compute_basal(conditions);
        self.regulatory.compute(basal, tf_input).max(0.0)
    }

    fn regulatory_layer(&self) -> Option<&dyn RegulatoryExpressionModel> {
        Some(self.regulatory.as_ref())
    }

    fn as_composite(&self) -> Option<&CompositeExpression> {
        Some(self)
    }
}
