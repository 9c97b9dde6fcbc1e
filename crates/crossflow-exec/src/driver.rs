//! The cross-platform driver: walks an execution plan stage by stage.
//!
//! Single-threaded and cooperative: the driver owns its queues and counters
//! and the only long-running calls are `Executor::execute` invocations,
//! which may block for as long as a whole cluster job. Parallelism, if any,
//! happens inside a platform executor.
//!
//! The driver owns the execution status of every stage it has run; plan
//! nodes are never mutated. Re-invoking `execute_until_breakpoint` on the
//! same driver fast-forwards stages executed in earlier calls (their
//! successors still activate, no work is re-done).

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, info, warn};

use crossflow_core::fmt::format_duration;
use crossflow_core::hash::Hash256;
use crossflow_core::id::{ChannelId, StageId};
use crossflow_core::plan::ExecutionPlan;
use crossflow_core::platform::{Job, StageContext};
use crossflow_core::state::ExecutionState;

use crate::breakpoint::{Breakpoint, ConjunctiveBreakpoint};
use crate::error::DriveError;
use crate::instrument::InstrumentationStrategy;
use crate::lifecycle::ExecutorRegistry;
use crate::snapshot::ExecutionSnapshot;

pub struct CrossPlatformDriver {
    job: Job,
    instrumentation: Box<dyn InstrumentationStrategy>,

    /// User-installed pause conditions; replaced with a fresh empty
    /// conjunction after every `execute_until_breakpoint` call.
    breakpoint: ConjunctiveBreakpoint,

    /// Completed predecessors per not-yet-activated stage.
    predecessor_counter: HashMap<StageId, usize>,

    /// Activated and considered for execution, FIFO.
    activated: VecDeque<StageId>,

    /// Blocked by a breakpoint in the current call; kept so execution can
    /// go on without re-planning.
    suspended: Vec<StageId>,

    executors: ExecutorRegistry,

    /// Stages this driver has actually executed, across calls. Doubles as
    /// the execution-status record: the plan itself is never mutated.
    completed: BTreeSet<StageId>,

    /// Channels marked for runtime measurement.
    marks: BTreeSet<ChannelId>,

    state: ExecutionState,
    last_fingerprint: Option<Hash256>,
}

impl CrossPlatformDriver {
    pub fn new(job: Job, instrumentation: Box<dyn InstrumentationStrategy>) -> Self {
        Self {
            job,
            instrumentation,
            breakpoint: ConjunctiveBreakpoint::new(),
            predecessor_counter: HashMap::new(),
            activated: VecDeque::new(),
            suspended: Vec::new(),
            executors: ExecutorRegistry::new(),
            completed: BTreeSet::new(),
            marks: BTreeSet::new(),
            state: ExecutionState::new(),
            last_fingerprint: None,
        }
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Append a clause to the breakpoint gating the *next* call.
    pub fn extend_breakpoint(&mut self, clause: Box<dyn Breakpoint>) {
        self.breakpoint.add_conjunct(clause);
    }

    pub fn num_breakpoint_conjuncts(&self) -> usize {
        self.breakpoint.num_conjuncts()
    }

    /// Whether this driver has executed the stage in some call.
    pub fn was_executed(&self, stage: StageId) -> bool {
        self.completed.contains(&stage)
    }

    /// Seed the execution status from a snapshot captured elsewhere, so a
    /// fresh driver can resume another driver's run without re-executing
    /// its completed stages.
    pub fn adopt_snapshot(&mut self, snapshot: &ExecutionSnapshot) {
        self.completed.extend(snapshot.completed().iter().copied());
        self.state.merge(snapshot.profile().clone());
    }

    /// Execute the plan until it finishes or every remaining stage is held
    /// back by a breakpoint. Returns the captured state either way.
    pub fn execute_until_breakpoint(
        &mut self,
        plan: &ExecutionPlan,
    ) -> Result<ExecutionSnapshot, DriveError> {
        self.prepare(plan);
        let outcome = self.run_to_breakpoint(plan);
        // Breakpoints are per-invocation gates; drop them even on failure.
        self.breakpoint = ConjunctiveBreakpoint::new();
        self.last_fingerprint = Some(plan.fingerprint());
        outcome?;
        Ok(self.capture_state())
    }

    /// Reset the per-call bookkeeping and seed the activated queue with the
    /// plan's starting stages. The completed set survives, which is what
    /// makes fast-forward resumption work.
    fn prepare(&mut self, plan: &ExecutionPlan) {
        self.predecessor_counter.clear();
        self.executors.reset_counters();
        self.activated.clear();
        self.suspended.clear();
        self.activated.extend(plan.starting_stages());
        self.marks.clear();
        self.state = ExecutionState::new();
    }

    fn run_to_breakpoint(&mut self, plan: &ExecutionPlan) -> Result<(), DriveError> {
        let started = Instant::now();
        let mut num_executed = 0usize;
        let mut num_skipped = 0usize;
        let mut last_num_skipped = 0usize;
        let mut newly_activated: Vec<StageId> = Vec::new();
        let mut breakpoints_disabled = false;
        loop {
            while let Some(stage) = self.activated.pop_front() {
                if !self.was_executed(stage)
                    && !breakpoints_disabled
                    && self.suspend_if_breakpoint_denies(plan, stage)
                {
                    continue;
                }

                if self.execute(plan, stage)? {
                    num_executed += 1;
                } else {
                    num_skipped += 1;
                }
                self.try_activate_successors(plan, stage, &mut newly_activated);
                // A recovery pass runs to quiescence: successors join the
                // current pass while breakpoints are disabled.
                if breakpoints_disabled {
                    self.activated.extend(newly_activated.drain(..));
                }
            }
            // Safety net against breakpoint configurations that would
            // live-lock the run: nothing executed and nothing newly skipped
            // means every ready stage is suspended.
            if !breakpoints_disabled && num_executed == 0 && num_skipped == last_num_skipped {
                warn!("could not execute a single stage; retrying with breakpoints disabled");
                breakpoints_disabled = true;
                self.activated.extend(self.suspended.drain(..));
            } else {
                self.activated.extend(newly_activated.drain(..));
                breakpoints_disabled = false;
                last_num_skipped = num_skipped;
            }
            if self.activated.is_empty() {
                break;
            }
        }
        let elapsed = started.elapsed().as_millis() as u64;
        info!(
            num_executed,
            num_skipped,
            elapsed = %format_duration(elapsed),
            "finished plan traversal"
        );

        if num_executed == 0 {
            return Err(DriveError::NoProgress);
        }
        Ok(())
    }

    fn suspend_if_breakpoint_denies(&mut self, plan: &ExecutionPlan, stage: StageId) -> bool {
        if !self.breakpoint.permits(plan, stage) {
            self.suspended.push(stage);
            return true;
        }
        false
    }

    /// Try to execute the stage; returns whether it really ran (as opposed
    /// to being fast-forwarded).
    fn execute(&mut self, plan: &ExecutionPlan, stage: StageId) -> Result<bool, DriveError> {
        let should_execute = !self.was_executed(stage);
        if should_execute {
            self.instrumentation.apply_to(plan, stage, &mut self.marks);
            info!(stage = plan.stage(stage).name(), "start executing stage");
            debug!(
                "stage plan:\n{}",
                plan.extensive_description(stage)
            );
            let submit_time = Instant::now();
            let executor = self.executors.get_or_create(plan, stage, &self.job);
            let new_state = executor.execute(
                StageContext {
                    plan,
                    stage,
                    instrumented: &self.marks,
                },
                &self.state,
            )?;
            let elapsed = submit_time.elapsed().as_millis() as u64;
            info!(
                stage = plan.stage(stage).name(),
                elapsed = %format_duration(elapsed),
                "executed stage"
            );
            self.state.merge(new_state);
            self.state.add_timing(stage, elapsed);
            self.completed.insert(stage);
        } else {
            debug!(
                stage = plan.stage(stage).name(),
                "skipping already executed stage"
            );
        }

        self.executors
            .note_submission(plan, plan.stage(stage).group());

        Ok(should_execute)
    }

    /// Count one completed predecessor for each successor; fully-counted
    /// successors move into the collector for the next pass.
    fn try_activate_successors(
        &mut self,
        plan: &ExecutionPlan,
        stage: StageId,
        collector: &mut Vec<StageId>,
    ) {
        for &successor in plan.stage(stage).successors() {
            let counted = {
                let c = self.predecessor_counter.entry(successor).or_insert(0);
                *c += 1;
                *c
            };
            let num_predecessors = plan.stage(successor).predecessors().len();
            debug!(
                from = plan.stage(stage).name(),
                to = plan.stage(successor).name(),
                counted,
                num_predecessors,
                "activated successor"
            );
            if counted == num_predecessors {
                collector.push(successor);
                self.predecessor_counter.remove(&successor);
            } else {
                assert!(
                    counted < num_predecessors,
                    "activated {} too often",
                    plan.stage(successor).name()
                );
            }
        }
    }

    /// Snapshot the current profile and stage sets.
    pub fn capture_state(&self) -> ExecutionSnapshot {
        ExecutionSnapshot::new(
            self.state.clone(),
            self.completed.clone(),
            self.suspended.iter().copied().collect(),
            self.last_fingerprint,
        )
    }

    /// Dispose all live executors.
    pub fn shutdown(&mut self) {
        self.executors.shutdown();
    }
}

impl Drop for CrossPlatformDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
