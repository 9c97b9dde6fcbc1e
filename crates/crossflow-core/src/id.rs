//! Strongly-typed identifiers used across the engine.
//!
//! Downstream crates (exec, cost, platform backends) should *not* use raw
//! integers for IDs. Plan-graph relations are id sets keyed into arenas,
//! which keeps the stage/group object graph acyclic.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(StageId);
new_id!(GroupId);
new_id!(ChannelId);
