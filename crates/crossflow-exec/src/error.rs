use thiserror::Error;

use crossflow_core::platform::ExecutorError;

#[derive(Debug, Error)]
pub enum DriveError {
    /// Not a single stage could be executed in an entire call; the plan or
    /// the installed breakpoints are broken.
    #[error("could not execute a single stage; check the plan and breakpoints")]
    NoProgress,

    /// A platform executor failed. Propagated unchanged; the failing stage
    /// is not marked executed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}
