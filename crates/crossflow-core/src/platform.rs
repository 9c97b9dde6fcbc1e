//! Platform and executor contracts.
//!
//! Concrete platform backends live outside this workspace. We keep only the
//! traits here so the driver can be exercised against any backend, mocks
//! included, without pulling runtime-specific dependencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Configuration;
use crate::id::{ChannelId, StageId};
use crate::plan::ExecutionPlan;
use crate::state::ExecutionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub Uuid);

/// A unit of work being driven through the engine: name for diagnostics,
/// configuration for estimators and platforms.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub config: Arc<Configuration>,
}

impl Job {
    pub fn new(name: impl Into<String>, config: Configuration) -> Self {
        Self {
            id: JobId(Uuid::new_v4()),
            name: name.into(),
            config: Arc::new(config),
        }
    }
}

/// Failure raised by a platform executor. The driver propagates these
/// unchanged; the failing stage is not marked executed.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("platform job failed: {0}")]
    Failed(String),

    #[error("platform unavailable: {0}")]
    Unavailable(String),
}

/// An execution platform (a distributed runtime, a local runtime, ...).
pub trait Platform: Send + Sync {
    /// Stable platform name for diagnostics and plan fingerprints.
    fn name(&self) -> &str;

    fn executor_factory(&self) -> &dyn ExecutorFactory;
}

pub trait ExecutorFactory: Send + Sync {
    fn create(&self, job: &Job) -> Box<dyn Executor>;
}

/// A live, platform-specific worker bound to one platform-execution group.
///
/// `execute` may block for arbitrarily long (an entire cluster job). It
/// receives the rolling profile gathered so far and returns whatever new
/// observations it made.
pub trait Executor {
    fn execute(
        &mut self,
        stage: StageContext<'_>,
        state: &ExecutionState,
    ) -> Result<ExecutionState, ExecutorError>;

    /// Release platform resources. Called exactly once.
    fn dispose(&mut self);
}

/// Everything an executor gets to see about the stage it is running.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    pub plan: &'a ExecutionPlan,
    pub stage: StageId,
    /// Channels the instrumentation strategy marked for measurement.
    pub instrumented: &'a BTreeSet<ChannelId>,
}

impl<'a> StageContext<'a> {
    pub fn name(&self) -> &'a str {
        self.plan.stage(self.stage).name()
    }

    pub fn outbound_channels(&self) -> &'a [ChannelId] {
        self.plan.stage(self.stage).outbound_channels()
    }

    pub fn is_instrumented(&self, channel: ChannelId) -> bool {
        self.instrumented.contains(&channel)
    }
}
