//! Time estimates in milliseconds.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crossflow_core::fmt::{format_duration, format_percentage};

use crate::estimate::Estimate;

/// An [`Estimate`] whose integer domain is milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeEstimate(Estimate);

impl TimeEstimate {
    pub const ZERO: TimeEstimate = TimeEstimate(Estimate::exact(0));
    pub const MINIMUM: TimeEstimate = TimeEstimate(Estimate::exact(1));

    pub fn new(lower_millis: u64, upper_millis: u64, correctness: f64) -> Self {
        Self(Estimate::new(lower_millis, upper_millis, correctness))
    }

    /// Point estimate with full confidence.
    pub fn from_millis(millis: u64) -> Self {
        Self(Estimate::exact(millis))
    }

    pub fn lower_millis(&self) -> u64 {
        self.0.lower()
    }

    pub fn upper_millis(&self) -> u64 {
        self.0.upper()
    }

    pub fn correctness(&self) -> f64 {
        self.0.correctness()
    }

    pub fn geometric_mean_millis(&self) -> u64 {
        self.0.geometric_mean()
    }

    pub fn plus(&self, that: &TimeEstimate) -> TimeEstimate {
        Self(self.0.plus(&that.0))
    }

    pub fn plus_millis(&self, millis: u64) -> TimeEstimate {
        Self(self.0.plus_scalar(millis))
    }

    pub fn times(&self, scalar: f64) -> TimeEstimate {
        Self(self.0.times(scalar))
    }

    pub fn expectation_cmp(a: &TimeEstimate, b: &TimeEstimate) -> Ordering {
        Estimate::expectation_cmp(&a.0, &b.0)
    }
}

impl fmt::Display for TimeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} .. {}, p={})",
            format_duration(self.lower_millis()),
            format_duration(self.upper_millis()),
            format_percentage(self.correctness())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert!(TimeEstimate::ZERO.0.is_exactly(0));
        assert!(TimeEstimate::MINIMUM.0.is_exactly(1));
    }

    #[test]
    fn interval_rendering() {
        let t = TimeEstimate::new(1_234, 60_000, 0.9);
        assert_eq!(t.to_string(), "(0:00:01.234 .. 0:01:00.000, p=90.0%)");
    }
}
