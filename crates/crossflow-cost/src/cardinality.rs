//! Cardinality estimates: row/element counts of a channel.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::estimate::Estimate;

/// An [`Estimate`] over non-negative element counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardinalityEstimate(Estimate);

impl CardinalityEstimate {
    /// A channel known to carry no data.
    pub const EMPTY: CardinalityEstimate = CardinalityEstimate(Estimate::exact(0));

    pub fn new(lower: u64, upper: u64, correctness: f64) -> Self {
        Self(Estimate::new(lower, upper, correctness))
    }

    pub fn exact(cardinality: u64) -> Self {
        Self(Estimate::exact(cardinality))
    }

    pub fn lower(&self) -> u64 {
        self.0.lower()
    }

    pub fn upper(&self) -> u64 {
        self.0.upper()
    }

    pub fn correctness(&self) -> f64 {
        self.0.correctness()
    }

    pub fn is_exactly(&self, cardinality: u64) -> bool {
        self.0.is_exactly(cardinality)
    }

    pub fn average(&self) -> f64 {
        self.0.average()
    }

    pub fn geometric_mean(&self) -> u64 {
        self.0.geometric_mean()
    }

    pub fn plus(&self, that: &CardinalityEstimate) -> CardinalityEstimate {
        Self(self.0.plus(&that.0))
    }

    pub fn times(&self, scalar: f64) -> CardinalityEstimate {
        Self(self.0.times(scalar))
    }

    pub fn equals_within_delta(
        &self,
        that: &CardinalityEstimate,
        prob_delta: f64,
        lower_delta: u64,
        upper_delta: u64,
    ) -> bool {
        self.0
            .equals_within_delta(&that.0, prob_delta, lower_delta, upper_delta)
    }

    pub fn expectation_cmp(a: &CardinalityEstimate, b: &CardinalityEstimate) -> Ordering {
        Estimate::expectation_cmp(&a.0, &b.0)
    }
}

impl fmt::Display for CardinalityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
