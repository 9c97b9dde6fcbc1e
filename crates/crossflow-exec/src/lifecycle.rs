//! Executor lifecycle: one live handle per active platform execution.
//!
//! Executors are constructed lazily when the first stage of their group
//! actually executes, and disposed exactly once after the last stage of the
//! group has been submitted. Fast-forwarded stages count towards the
//! group's completion but never summon an executor; replaying a finished
//! plan therefore creates no executors at all.

use std::collections::HashMap;
use tracing::debug;

use crossflow_core::id::{GroupId, StageId};
use crossflow_core::plan::ExecutionPlan;
use crossflow_core::platform::{Executor, Job};

#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<GroupId, Box<dyn Executor>>,
    /// Submitted (executed or fast-forwarded) stages per group.
    submitted: HashMap<GroupId, usize>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the per-run submission counters. Live executors are left
    /// untouched; a group interrupted by a breakpoint keeps its executor
    /// across calls.
    pub fn reset_counters(&mut self) {
        self.submitted.clear();
    }

    pub fn num_live(&self) -> usize {
        self.executors.len()
    }

    /// Fetch the group's executor, constructing it through the platform's
    /// factory on first use.
    pub fn get_or_create(
        &mut self,
        plan: &ExecutionPlan,
        stage: StageId,
        job: &Job,
    ) -> &mut Box<dyn Executor> {
        let group = plan.stage(stage).group();
        self.executors.entry(group).or_insert_with(|| {
            let platform = plan.group(group).platform();
            debug!(%group, platform = platform.name(), "creating executor");
            platform.executor_factory().create(job)
        })
    }

    /// Count one submitted stage for `group`; once the whole group has been
    /// submitted, dispose its executor (if one was ever created).
    pub fn note_submission(&mut self, plan: &ExecutionPlan, group: GroupId) {
        let submitted = self.submitted.entry(group).or_insert(0);
        *submitted += 1;
        if *submitted == plan.group(group).stages().len() {
            if let Some(mut executor) = self.executors.remove(&group) {
                debug!(%group, "disposing executor, group complete");
                executor.dispose();
            }
        }
    }

    /// Dispose all remaining live executors.
    pub fn shutdown(&mut self) {
        for (group, mut executor) in self.executors.drain() {
            debug!(%group, "disposing executor on shutdown");
            executor.dispose();
        }
    }
}
