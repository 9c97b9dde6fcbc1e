//! Breakpoints: predicates gating stage admission.
//!
//! A breakpoint clause may inspect any stage attribute through the plan.
//! Clauses added via the driver combine conjunctively and are cleared after
//! every `execute_until_breakpoint` call: breakpoints are per-invocation
//! gates, not sticky.

use crossflow_core::id::StageId;
use crossflow_core::plan::ExecutionPlan;

pub trait Breakpoint {
    /// Whether the stage may be submitted for execution.
    fn permits(&self, plan: &ExecutionPlan, stage: StageId) -> bool;
}

impl<F> Breakpoint for F
where
    F: Fn(&ExecutionPlan, StageId) -> bool,
{
    fn permits(&self, plan: &ExecutionPlan, stage: StageId) -> bool {
        self(plan, stage)
    }
}

/// Permits nothing. Installing this before a call pauses the whole plan at
/// its current frontier.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaltAll;

impl Breakpoint for HaltAll {
    fn permits(&self, _plan: &ExecutionPlan, _stage: StageId) -> bool {
        false
    }
}

/// Denies the stage with the given name, permitting everything else.
#[derive(Debug, Clone)]
pub struct HaltAtStage(pub String);

impl Breakpoint for HaltAtStage {
    fn permits(&self, plan: &ExecutionPlan, stage: StageId) -> bool {
        plan.stage(stage).name() != self.0
    }
}

/// Ordered conjunction of clauses; `permits` is the AND over all of them.
/// The empty conjunction permits everything.
#[derive(Default)]
pub struct ConjunctiveBreakpoint {
    conjuncts: Vec<Box<dyn Breakpoint>>,
}

impl ConjunctiveBreakpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_conjunct(&mut self, clause: Box<dyn Breakpoint>) {
        self.conjuncts.push(clause);
    }

    pub fn num_conjuncts(&self) -> usize {
        self.conjuncts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conjuncts.is_empty()
    }
}

impl Breakpoint for ConjunctiveBreakpoint {
    fn permits(&self, plan: &ExecutionPlan, stage: StageId) -> bool {
        self.conjuncts.iter().all(|c| c.permits(plan, stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossflow_core::platform::{Executor, ExecutorFactory, Job, Platform, StageContext};
    use crossflow_core::state::ExecutionState;
    use std::sync::Arc;

    struct NullPlatform;
    struct NullFactory;
    struct NullExecutor;

    impl Platform for NullPlatform {
        fn name(&self) -> &str {
            "null"
        }
        fn executor_factory(&self) -> &dyn ExecutorFactory {
            &NullFactory
        }
    }
    impl ExecutorFactory for NullFactory {
        fn create(&self, _job: &Job) -> Box<dyn Executor> {
            Box::new(NullExecutor)
        }
    }
    impl Executor for NullExecutor {
        fn execute(
            &mut self,
            _stage: StageContext<'_>,
            _state: &ExecutionState,
        ) -> Result<ExecutionState, crossflow_core::platform::ExecutorError> {
            Ok(ExecutionState::new())
        }
        fn dispose(&mut self) {}
    }

    fn single_stage_plan() -> (ExecutionPlan, StageId) {
        let mut builder = ExecutionPlan::builder();
        let group = builder.add_group(Arc::new(NullPlatform));
        let stage = builder.add_stage(group, "only");
        (builder.build(), stage)
    }

    #[test]
    fn empty_conjunction_permits_everything() {
        let (plan, stage) = single_stage_plan();
        let bp = ConjunctiveBreakpoint::new();
        assert!(bp.permits(&plan, stage));
    }

    #[test]
    fn any_denying_clause_wins() {
        let (plan, stage) = single_stage_plan();
        let mut bp = ConjunctiveBreakpoint::new();
        bp.add_conjunct(Box::new(|_: &ExecutionPlan, _: StageId| true));
        bp.add_conjunct(Box::new(HaltAll));
        assert!(!bp.permits(&plan, stage));
    }

    #[test]
    fn halt_at_stage_matches_by_name() {
        let (plan, stage) = single_stage_plan();
        assert!(!HaltAtStage("only".into()).permits(&plan, stage));
        assert!(HaltAtStage("other".into()).permits(&plan, stage));
    }
}
