//! Convenient re-exports for downstream crates.

pub use crate::config::Configuration;
pub use crate::error::{Error, Result};
pub use crate::hash::Hash256;
pub use crate::id::{ChannelId, GroupId, StageId};
pub use crate::plan::{ExecutionPlan, GroupNode, PlanBuilder, StageNode};
pub use crate::platform::{
    Executor, ExecutorError, ExecutorFactory, Job, JobId, Platform, StageContext,
};
pub use crate::state::ExecutionState;
