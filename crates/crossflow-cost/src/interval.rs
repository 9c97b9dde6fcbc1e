//! Probabilistic double intervals, used for selectivities.
//!
//! Unlike the integer [`Estimate`](crate::estimate::Estimate), these range
//! over `f64` and may carry a selectivity key (where the value came from in
//! the configuration) and a growth coefficient (see the coefficient-aware
//! estimator). Equality and hashing consider only `(lower, upper,
//! correctness)`; the provenance fields do not affect identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crossflow_core::fmt::format_percentage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbInterval {
    lower: f64,
    upper: f64,
    correctness: f64,
    /// When merging competing estimates, an override wins over the rest.
    is_override: bool,
    /// Configuration key this selectivity was loaded from; empty = none.
    key: String,
    /// Growth coefficient; `0` means plain multiplicative selectivity.
    coeff: f64,
}

impl ProbInterval {
    pub const ZERO: ProbInterval = ProbInterval {
        lower: 0.0,
        upper: 0.0,
        correctness: 1.0,
        is_override: false,
        key: String::new(),
        coeff: 0.0,
    };

    pub fn new(lower: f64, upper: f64, correctness: f64) -> Self {
        Self::builder(lower, upper, correctness).build()
    }

    /// Zero-width interval with a correctness of `1`.
    pub fn exact(value: f64) -> Self {
        Self::new(value, value, 1.0)
    }

    pub fn builder(lower: f64, upper: f64, correctness: f64) -> ProbIntervalBuilder {
        assert!(lower <= upper, "{} > {}, which is illegal", lower, upper);
        assert!(
            (0.0..=1.0).contains(&correctness),
            "illegal probability {}",
            correctness
        );
        ProbIntervalBuilder {
            interval: ProbInterval {
                lower,
                upper,
                correctness,
                is_override: false,
                key: String::new(),
                coeff: 0.0,
            },
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn correctness(&self) -> f64 {
        self.correctness
    }

    pub fn is_override(&self) -> bool {
        self.is_override
    }

    /// `None` when this interval was not loaded from a configuration key.
    pub fn key(&self) -> Option<&str> {
        if self.key.is_empty() {
            None
        } else {
            Some(&self.key)
        }
    }

    pub fn coeff(&self) -> f64 {
        self.coeff
    }

    pub fn average(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn geometric_mean(&self) -> u64 {
        (self.lower * self.upper).sqrt().round() as u64
    }

    pub fn is_exactly(&self, value: f64) -> bool {
        self.correctness == 1.0 && self.lower == self.upper && self.upper == value
    }

    /// Sum of two intervals; confidence drops to the weaker summand.
    /// Provenance fields are not propagated.
    pub fn plus(&self, that: &ProbInterval) -> ProbInterval {
        ProbInterval::new(
            self.lower + that.lower,
            self.upper + that.upper,
            self.correctness.min(that.correctness),
        )
    }

    pub fn equals_within_delta(
        &self,
        that: &ProbInterval,
        prob_delta: f64,
        lower_delta: f64,
        upper_delta: f64,
    ) -> bool {
        (that.correctness - self.correctness).abs() <= prob_delta
            && (self.lower - that.lower).abs() <= lower_delta
            && (self.upper - that.upper).abs() <= upper_delta
    }
}

impl PartialEq for ProbInterval {
    fn eq(&self, other: &Self) -> bool {
        self.lower == other.lower
            && self.upper == other.upper
            && self.correctness == other.correctness
    }
}

impl Eq for ProbInterval {}

impl Hash for ProbInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lower.to_bits().hash(state);
        self.upper.to_bits().hash(state);
        self.correctness.to_bits().hash(state);
    }
}

impl fmt::Display for ProbInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}..{:.2} ~ {})",
            self.lower,
            self.upper,
            format_percentage(self.correctness)
        )?;
        if let Some(key) = self.key() {
            write!(f, " selectivityKey: {}", key)?;
        }
        Ok(())
    }
}

pub struct ProbIntervalBuilder {
    interval: ProbInterval,
}

impl ProbIntervalBuilder {
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.interval.key = key.into();
        self
    }

    pub fn coeff(mut self, coeff: f64) -> Self {
        self.interval.coeff = coeff;
        self
    }

    pub fn overriding(mut self) -> Self {
        self.interval.is_override = true;
        self
    }

    pub fn build(self) -> ProbInterval {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_provenance() {
        let plain = ProbInterval::new(0.3, 0.5, 0.9);
        let keyed = ProbInterval::builder(0.3, 0.5, 0.9)
            .key("my.op.selectivity")
            .coeff(0.5)
            .build();
        assert_eq!(plain, keyed);
    }

    #[test]
    fn display_mentions_the_key() {
        let keyed = ProbInterval::builder(0.3, 0.5, 0.9).key("k").build();
        assert_eq!(keyed.to_string(), "(0.30..0.50 ~ 90.0%) selectivityKey: k");
        assert_eq!(ProbInterval::ZERO.to_string(), "(0.00..0.00 ~ 100.0%)");
    }
}
