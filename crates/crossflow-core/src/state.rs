//! Execution profile gathered while a plan runs.
//!
//! Executors report what they measured (channel cardinalities, anything
//! else they care to count); the driver adds per-stage wall-clock timings
//! and merges everything into one rolling profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::{ChannelId, StageId};

/// An append/merge-only record of runtime observations.
///
/// Merging unions the maps; on identical keys the incoming value wins. The
/// plan structure prevents legitimate conflicts (a channel is produced by
/// exactly one stage), so last-writer-wins is only a tiebreak for replays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionState {
    cardinalities: BTreeMap<ChannelId, u64>,
    timings_ms: BTreeMap<StageId, u64>,
    counters: BTreeMap<String, u64>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cardinality(&mut self, channel: ChannelId, measured: u64) {
        self.cardinalities.insert(channel, measured);
    }

    pub fn add_timing(&mut self, stage: StageId, millis: u64) {
        self.timings_ms.insert(stage, millis);
    }

    pub fn add_counter(&mut self, name: impl Into<String>, value: u64) {
        self.counters.insert(name.into(), value);
    }

    pub fn cardinality(&self, channel: ChannelId) -> Option<u64> {
        self.cardinalities.get(&channel).copied()
    }

    pub fn timing_ms(&self, stage: StageId) -> Option<u64> {
        self.timings_ms.get(&stage).copied()
    }

    pub fn counter(&self, name: &str) -> Option<u64> {
        self.counters.get(name).copied()
    }

    pub fn cardinalities(&self) -> impl Iterator<Item = (ChannelId, u64)> + '_ {
        self.cardinalities.iter().map(|(c, v)| (*c, *v))
    }

    pub fn timings_ms(&self) -> impl Iterator<Item = (StageId, u64)> + '_ {
        self.timings_ms.iter().map(|(s, v)| (*s, *v))
    }

    /// Union `other` into this profile, last-writer-wins per key.
    pub fn merge(&mut self, other: ExecutionState) {
        self.cardinalities.extend(other.cardinalities);
        self.timings_ms.extend(other.timings_ms);
        self.counters.extend(other.counters);
    }

    pub fn is_empty(&self) -> bool {
        self.cardinalities.is_empty() && self.timings_ms.is_empty() && self.counters.is_empty()
    }
}
