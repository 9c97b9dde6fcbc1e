#![forbid(unsafe_code)]
//! crossflow-exec: the cross-platform driver and its supporting pieces.
//!
//! Responsibilities:
//! - Walk an `ExecutionPlan` stage by stage, activating successors once all
//!   predecessors completed.
//! - Honor user-installed breakpoints, with a logged safety net against
//!   breakpoint-induced live-locks.
//! - Manage one lazily-created, exactly-once-disposed executor per platform
//!   execution group.
//! - Merge per-stage execution state into a rolling profile and capture
//!   resumable snapshots.

pub mod breakpoint;
pub mod driver;
pub mod error;
pub mod instrument;
pub mod lifecycle;
pub mod snapshot;

pub use breakpoint::{Breakpoint, ConjunctiveBreakpoint, HaltAll, HaltAtStage};
pub use driver::CrossPlatformDriver;
pub use error::DriveError;
pub use instrument::{InstrumentationStrategy, NoInstrumentation, OutboundInstrumentation};
pub use snapshot::ExecutionSnapshot;
