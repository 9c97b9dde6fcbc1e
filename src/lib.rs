#![forbid(unsafe_code)]
//! Crossflow: the execution core of a cross-platform dataflow system.
//!
//! An upstream optimizer compiles a logical operator plan into a DAG of
//! execution stages, each bound to an execution platform; the
//! [`CrossPlatformDriver`] walks that DAG to completion, honoring
//! user-installed breakpoints and gathering a runtime profile. The cost
//! types are the estimate algebra that same optimizer uses to rank plans
//! and that hosts use to compare estimates against measured values.
//!
//! This crate is a facade over the workspace members:
//! - [`crossflow_core`] — plan model, platform contracts, configuration.
//! - [`crossflow_cost`] — probabilistic interval estimates and operator
//!   cardinality estimators.
//! - [`crossflow_exec`] — the driver, breakpoints, executor lifecycle.

pub use crossflow_core::prelude::{
    ChannelId, Configuration, ExecutionPlan, ExecutionState, Executor, ExecutorError,
    ExecutorFactory, GroupId, Hash256, Job, PlanBuilder, Platform, StageContext, StageId,
};

pub use crossflow_cost::{
    CardinalityEstimable, CardinalityEstimate, CardinalityEstimator, DedupOperator, Estimate,
    EstimateError, EstimationContext, EstimatorKind, PredicateDescriptor, ProbInterval,
    TimeEstimate,
};

pub use crossflow_exec::{
    Breakpoint, ConjunctiveBreakpoint, CrossPlatformDriver, DriveError, ExecutionSnapshot,
    HaltAll, HaltAtStage, InstrumentationStrategy, NoInstrumentation, OutboundInstrumentation,
};
