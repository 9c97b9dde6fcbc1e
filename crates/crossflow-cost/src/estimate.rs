//! Integer probabilistic interval estimates.
//!
//! An estimate is an interval `[lower, upper]` plus a subjective probability
//! that the true value falls inside it. The interval is *not* a bounding
//! box; observed values may land outside. The probability lets the
//! optimizer pick among many competing estimates.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crossflow_core::fmt::format_percentage;

/// `(lower, upper, correctness)` over non-negative integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    lower: u64,
    upper: u64,
    correctness: f64,
}

impl Estimate {
    pub fn new(lower: u64, upper: u64, correctness: f64) -> Self {
        assert!(lower <= upper, "{} > {}, which is illegal", lower, upper);
        assert!(
            (0.0..=1.0).contains(&correctness),
            "illegal probability {}",
            correctness
        );
        Self {
            lower,
            upper,
            correctness,
        }
    }

    /// Zero-width interval with a correctness of `1`.
    pub const fn exact(value: u64) -> Self {
        Self {
            lower: value,
            upper: value,
            correctness: 1.0,
        }
    }

    pub fn lower(&self) -> u64 {
        self.lower
    }

    pub fn upper(&self) -> u64 {
        self.upper
    }

    pub fn correctness(&self) -> f64 {
        self.correctness
    }

    /// Whether this instance estimates exactly `value` with full confidence.
    pub fn is_exactly(&self, value: u64) -> bool {
        self.correctness == 1.0 && self.lower == self.upper && self.upper == value
    }

    pub fn average(&self) -> f64 {
        (self.lower as f64 + self.upper as f64) / 2.0
    }

    pub fn geometric_mean(&self) -> u64 {
        (self.lower as f64 * self.upper as f64).sqrt().round() as u64
    }

    /// Sum of two estimates. Confidence drops to the weaker summand.
    pub fn plus(&self, that: &Estimate) -> Estimate {
        Estimate {
            lower: self.lower + that.lower,
            upper: self.upper + that.upper,
            correctness: self.correctness.min(that.correctness),
        }
    }

    /// Pure shift; confidence is untouched.
    pub fn plus_scalar(&self, addend: u64) -> Estimate {
        Estimate {
            lower: self.lower + addend,
            upper: self.upper + addend,
            correctness: self.correctness,
        }
    }

    /// Scale the interval, rounding half-up; confidence is untouched.
    pub fn times(&self, scalar: f64) -> Estimate {
        if scalar == 1.0 {
            return *self;
        }
        Estimate {
            lower: (self.lower as f64 * scalar).round() as u64,
            upper: (self.upper as f64 * scalar).round() as u64,
            correctness: self.correctness,
        }
    }

    pub fn equals_within_delta(
        &self,
        that: &Estimate,
        prob_delta: f64,
        lower_delta: u64,
        upper_delta: u64,
    ) -> bool {
        (that.correctness - self.correctness).abs() <= prob_delta
            && self.lower.abs_diff(that.lower) <= lower_delta
            && self.upper.abs_diff(that.upper) <= upper_delta
    }

    /// Ranks estimates for plan selection. An estimate with zero correctness
    /// is uninformative and sorts greater (worse) than any informative one;
    /// otherwise the geometric means are compared. This is a total preorder;
    /// ties report `Equal` and the caller's sort keeps its own order.
    pub fn expectation_cmp(a: &Estimate, b: &Estimate) -> Ordering {
        if a.correctness == 0.0 {
            if b.correctness != 0.0 {
                return Ordering::Greater;
            }
        } else if b.correctness == 0.0 {
            return Ordering::Less;
        }
        // No uniform-distribution assumption within the intervals.
        a.geometric_mean().cmp(&b.geometric_mean())
    }
}

impl Eq for Estimate {}

impl Hash for Estimate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lower.hash(state);
        self.upper.hash(state);
        self.correctness.to_bits().hash(state);
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}..{} ~ {})",
            self.lower,
            self.upper,
            format_percentage(self.correctness)
        )
    }
}
