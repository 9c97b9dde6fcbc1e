//! Resumable snapshots of an interrupted plan execution.

use serde::Serialize;
use std::collections::BTreeSet;

use crossflow_core::hash::Hash256;
use crossflow_core::id::StageId;
use crossflow_core::state::ExecutionState;

/// Intermediate state of a (possibly interrupted) plan execution.
///
/// The profile and stage sets are deep copies of the driver's containers;
/// mutating the driver afterwards does not affect a captured snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSnapshot {
    profile: ExecutionState,
    completed: BTreeSet<StageId>,
    suspended: BTreeSet<StageId>,
    /// Topology fingerprint of the plan this snapshot was captured against,
    /// if one was executed. Lets a caller check plan equivalence on resume.
    plan_fingerprint: Option<Hash256>,
    /// Engine version, for provenance when snapshots are persisted by hosts.
    engine_version: String,
}

impl ExecutionSnapshot {
    pub(crate) fn new(
        profile: ExecutionState,
        completed: BTreeSet<StageId>,
        suspended: BTreeSet<StageId>,
        plan_fingerprint: Option<Hash256>,
    ) -> Self {
        Self {
            profile,
            completed,
            suspended,
            plan_fingerprint,
            engine_version: crossflow_core::VERSION.to_string(),
        }
    }

    pub fn profile(&self) -> &ExecutionState {
        &self.profile
    }

    pub fn completed(&self) -> &BTreeSet<StageId> {
        &self.completed
    }

    pub fn suspended(&self) -> &BTreeSet<StageId> {
        &self.suspended
    }

    pub fn plan_fingerprint(&self) -> Option<Hash256> {
        self.plan_fingerprint
    }

    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    /// The run finished: no stage is waiting behind a breakpoint.
    pub fn is_complete(&self) -> bool {
        self.suspended.is_empty()
    }
}
