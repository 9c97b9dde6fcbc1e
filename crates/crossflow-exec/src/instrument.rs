//! Instrumentation strategies: which channels to measure at run time.
//!
//! Applied once per stage, right before its actual (non-fast-forward)
//! execution. Strategies mark channels in the driver-owned mark set; the
//! executor sees the marks through its `StageContext` and reports measured
//! cardinalities for them in the returned execution state.

use std::collections::BTreeSet;

use crossflow_core::id::{ChannelId, StageId};
use crossflow_core::plan::ExecutionPlan;

pub trait InstrumentationStrategy {
    fn apply_to(&self, plan: &ExecutionPlan, stage: StageId, marks: &mut BTreeSet<ChannelId>);
}

/// Marks every outbound channel of the stage. The default: cardinalities
/// become known at every stage boundary.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutboundInstrumentation;

impl InstrumentationStrategy for OutboundInstrumentation {
    fn apply_to(&self, plan: &ExecutionPlan, stage: StageId, marks: &mut BTreeSet<ChannelId>) {
        marks.extend(plan.stage(stage).outbound_channels().iter().copied());
    }
}

/// Marks nothing; executions run unobserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInstrumentation;

impl InstrumentationStrategy for NoInstrumentation {
    fn apply_to(&self, _plan: &ExecutionPlan, _stage: StageId, _marks: &mut BTreeSet<ChannelId>) {}
}
