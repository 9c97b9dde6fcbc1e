#![forbid(unsafe_code)]
//! crossflow-cost: the estimate algebra feeding plan selection.
//!
//! Responsibilities:
//! - Probabilistic interval estimates over integers (`Estimate`) with the
//!   time and cardinality specializations.
//! - Selectivity intervals over `f64` (`ProbInterval`) and the JSON
//!   specification format they are loaded from.
//! - The operator-facing cardinality-estimator contract plus the standard
//!   default-selectivity and coefficient-aware estimators.
//!
//! **No scheduling** here; the exec crate consumes none of this at run
//! time. Estimates are the optimizer's currency and are compared against
//! measured values after a run.

pub mod cardinality;
pub mod error;
pub mod estimate;
pub mod estimator;
pub mod interval;
pub mod selectivity;
pub mod spec;
pub mod time;

pub use cardinality::CardinalityEstimate;
pub use error::EstimateError;
pub use estimate::Estimate;
pub use estimator::{
    CardinalityEstimable, CardinalityEstimator, DedupOperator, DefaultSelectivityEstimator,
    EstimationContext, EstimatorKind, SpecSelectivityEstimator,
};
pub use interval::{ProbInterval, ProbIntervalBuilder};
pub use selectivity::{PredicateDescriptor, SpecBackedProvider, UdfSelectivityProvider};
pub use spec::{NoopSpecCache, SpecCache};
pub use time::TimeEstimate;
