//! Operator cardinality estimators.
//!
//! Operators expose an optional estimator per output; the optimizer calls
//! it with the input-channel estimates to predict the output cardinality.
//! Estimator variants are tagged so the optimizer can introspect them
//! without downcasting.

use crossflow_core::config::Configuration;

use crate::cardinality::CardinalityEstimate;
use crate::error::EstimateError;
use crate::interval::ProbInterval;
use crate::selectivity::{PredicateDescriptor, SpecBackedProvider, UdfSelectivityProvider};

/// Everything an estimator may consult besides its inputs.
pub struct EstimationContext<'a> {
    pub config: &'a Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatorKind {
    DefaultSelectivity,
    CoefficientAware,
    Custom,
}

pub trait CardinalityEstimator: std::fmt::Debug {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Custom
    }

    /// Predict the output cardinality from the input-channel estimates.
    /// The input slice length must match the operator's input arity.
    fn estimate(
        &self,
        ctx: &EstimationContext<'_>,
        inputs: &[CardinalityEstimate],
    ) -> CardinalityEstimate;
}

/// Fixed-selectivity estimator for unary operators: scales the interval by
/// `selectivity` and discounts the confidence by `confidence`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultSelectivityEstimator {
    selectivity: f64,
    confidence: f64,
}

impl DefaultSelectivityEstimator {
    pub fn new(selectivity: f64, confidence: f64) -> Self {
        Self {
            selectivity,
            confidence,
        }
    }
}

impl CardinalityEstimator for DefaultSelectivityEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::DefaultSelectivity
    }

    fn estimate(
        &self,
        _ctx: &EstimationContext<'_>,
        inputs: &[CardinalityEstimate],
    ) -> CardinalityEstimate {
        assert_eq!(inputs.len(), 1, "expected exactly one input estimate");
        let input = &inputs[0];
        CardinalityEstimate::new(
            (input.lower() as f64 * self.selectivity) as u64,
            (input.upper() as f64 * self.selectivity) as u64,
            self.confidence * input.correctness(),
        )
    }
}

/// Selectivity-interval estimator for unary operators.
///
/// With `coeff == 0` the output is the input scaled by the selectivity
/// interval. A non-zero `coeff` applies the input cardinality twice,
/// modeling operators whose output grows with the square of the input size.
#[derive(Debug, Clone)]
pub struct SpecSelectivityEstimator {
    selectivity: ProbInterval,
}

impl SpecSelectivityEstimator {
    pub fn new(selectivity: ProbInterval) -> Self {
        Self { selectivity }
    }

    pub fn selectivity(&self) -> &ProbInterval {
        &self.selectivity
    }
}

impl CardinalityEstimator for SpecSelectivityEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::CoefficientAware
    }

    fn estimate(
        &self,
        _ctx: &EstimationContext<'_>,
        inputs: &[CardinalityEstimate],
    ) -> CardinalityEstimate {
        assert_eq!(inputs.len(), 1, "expected exactly one input estimate");
        let input = &inputs[0];
        let sel = &self.selectivity;
        if sel.coeff() == 0.0 {
            CardinalityEstimate::new(
                (input.lower() as f64 * sel.lower()) as u64,
                (input.upper() as f64 * sel.upper()) as u64,
                input.correctness() * sel.correctness(),
            )
        } else {
            CardinalityEstimate::new(
                (input.lower() as f64 * sel.coeff() * input.lower() as f64) as u64,
                (input.upper() as f64 * sel.coeff() * input.upper() as f64) as u64,
                input.correctness() * sel.correctness(),
            )
        }
    }
}

/// The contract operators implement towards the optimizer.
pub trait CardinalityEstimable {
    fn num_inputs(&self) -> usize;

    fn num_outputs(&self) -> usize;

    /// Obtain an estimator for the given output, if the operator has one.
    /// Specification problems surface here, not at estimation time.
    fn cardinality_estimator(
        &self,
        output_index: usize,
        config: &Configuration,
    ) -> Result<Option<Box<dyn CardinalityEstimator>>, EstimateError>;
}

/// Baseline selectivity for deduplication: with a confidence of 0.7,
/// assume 70% of the input elements are pairwise distinct.
pub const DEDUP_SELECTIVITY: f64 = 0.7;
pub const DEDUP_CONFIDENCE: f64 = 0.7;

/// Deduplication operator, reduced to its estimator contract.
///
/// When a predicate descriptor with a configured selectivity is present,
/// the estimator is coefficient-aware and driven by that specification;
/// otherwise the fixed baseline applies.
#[derive(Debug, Clone, Default)]
pub struct DedupOperator {
    descriptor: Option<PredicateDescriptor>,
}

impl DedupOperator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor(descriptor: PredicateDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
        }
    }

    pub fn descriptor(&self) -> Option<&PredicateDescriptor> {
        self.descriptor.as_ref()
    }
}

impl CardinalityEstimable for DedupOperator {
    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn cardinality_estimator(
        &self,
        output_index: usize,
        config: &Configuration,
    ) -> Result<Option<Box<dyn CardinalityEstimator>>, EstimateError> {
        assert!(
            output_index < self.num_outputs(),
            "output index {} out of bounds",
            output_index
        );
        if let Some(descriptor) = &self.descriptor {
            if let Some(selectivity) = SpecBackedProvider.provide_for(config, descriptor)? {
                return Ok(Some(Box::new(SpecSelectivityEstimator::new(selectivity))));
            }
        }
        Ok(Some(Box::new(DefaultSelectivityEstimator::new(
            DEDUP_SELECTIVITY,
            DEDUP_CONFIDENCE,
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_baseline() {
        let config = Configuration::new();
        let op = DedupOperator::new();
        let estimator = op.cardinality_estimator(0, &config).unwrap().unwrap();
        assert_eq!(estimator.kind(), EstimatorKind::DefaultSelectivity);
        let ctx = EstimationContext { config: &config };
        let out = estimator.estimate(&ctx, &[CardinalityEstimate::exact(1000)]);
        assert_eq!((out.lower(), out.upper()), (700, 700));
        assert!((out.correctness() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn dedup_prefers_a_configured_spec() {
        let config = Configuration::new()
            .with_property("dedup.sel", r#"{"p":0.9,"lower":0.3,"upper":0.5,"coeff":0}"#);
        let op = DedupOperator::with_descriptor(
            PredicateDescriptor::new("dedup_key").with_selectivity_key("dedup.sel"),
        );
        let estimator = op.cardinality_estimator(0, &config).unwrap().unwrap();
        assert_eq!(estimator.kind(), EstimatorKind::CoefficientAware);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn output_index_is_validated() {
        let _ = DedupOperator::new().cardinality_estimator(1, &Configuration::new());
    }
}
