//! The execution plan: a DAG of stages grouped into platform executions.
//!
//! Stages and groups live in arenas keyed by their ids; predecessor,
//! successor, and membership relations are id lists. Stages reference their
//! group and the group lists its member stages without forming a cyclic
//! object graph. The plan is immutable once built; the driver keeps its own
//! execution-status bookkeeping on the side.

use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::hash::{hash_serde, Hash256};
use crate::id::{ChannelId, GroupId, StageId};
use crate::platform::Platform;

/// Identity-bearing node of the plan DAG, one dispatch unit per executor call.
pub struct StageNode {
    id: StageId,
    name: String,
    group: GroupId,
    predecessors: Vec<StageId>,
    successors: Vec<StageId>,
    /// One channel per outgoing edge, in `successors` order.
    outbound: Vec<ChannelId>,
}

impl StageNode {
    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn predecessors(&self) -> &[StageId] {
        &self.predecessors
    }

    pub fn successors(&self) -> &[StageId] {
        &self.successors
    }

    pub fn outbound_channels(&self) -> &[ChannelId] {
        &self.outbound
    }
}

/// A platform execution: the maximal set of stages served by one executor
/// instance of a given platform.
pub struct GroupNode {
    id: GroupId,
    platform: Arc<dyn Platform>,
    stages: Vec<StageId>,
}

impl GroupNode {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn platform(&self) -> &Arc<dyn Platform> {
        &self.platform
    }

    pub fn stages(&self) -> &[StageId] {
        &self.stages
    }
}

#[derive(Default)]
pub struct ExecutionPlan {
    stages: Vec<StageNode>,
    groups: Vec<GroupNode>,
    next_channel: u64,
}

impl ExecutionPlan {
    pub fn builder() -> PlanBuilder {
        PlanBuilder {
            plan: ExecutionPlan::default(),
        }
    }

    pub fn stage(&self, id: StageId) -> &StageNode {
        &self.stages[id.get() as usize]
    }

    pub fn group(&self, id: GroupId) -> &GroupNode {
        &self.groups[id.get() as usize]
    }

    pub fn stages(&self) -> impl Iterator<Item = &StageNode> {
        self.stages.iter()
    }

    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    /// Stages without predecessors; these seed the driver's activated queue.
    pub fn starting_stages(&self) -> Vec<StageId> {
        self.stages
            .iter()
            .filter(|s| s.predecessors.is_empty())
            .map(|s| s.id)
            .collect()
    }

    /// Multi-line diagnostic rendering of one stage and its surroundings.
    pub fn extensive_description(&self, id: StageId) -> String {
        let stage = self.stage(id);
        let group = self.group(stage.group);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} '{}' on platform '{}'",
            stage.id,
            stage.name,
            group.platform.name()
        );
        let _ = writeln!(
            out,
            "  predecessors: {:?}",
            stage
                .predecessors
                .iter()
                .map(|p| self.stage(*p).name())
                .collect::<Vec<_>>()
        );
        let _ = writeln!(
            out,
            "  successors:   {:?}",
            stage
                .successors
                .iter()
                .map(|s| self.stage(*s).name())
                .collect::<Vec<_>>()
        );
        let _ = write!(out, "  channels:     {:?}", stage.outbound);
        out
    }

    /// Stable fingerprint of the plan topology (names, edges, grouping,
    /// platform names). Two structurally equivalent plans hash alike.
    pub fn fingerprint(&self) -> Hash256 {
        #[derive(Serialize)]
        struct StageView<'a> {
            id: u64,
            name: &'a str,
            group: u64,
            predecessors: Vec<u64>,
        }
        #[derive(Serialize)]
        struct Topology<'a> {
            stages: Vec<StageView<'a>>,
            groups: Vec<(u64, &'a str)>,
        }
        let view = Topology {
            stages: self
                .stages
                .iter()
                .map(|s| StageView {
                    id: s.id.get(),
                    name: &s.name,
                    group: s.group.get(),
                    predecessors: s.predecessors.iter().map(|p| p.get()).collect(),
                })
                .collect(),
            groups: self
                .groups
                .iter()
                .map(|g| (g.id.get(), g.platform.name()))
                .collect(),
        };
        // Serialization of a plain borrowed view cannot fail.
        hash_serde(&view).expect("plan topology serializes")
    }
}

/// Constructs an [`ExecutionPlan`]. The builder maintains the invariant
/// that every stage references the group that lists it as a member.
pub struct PlanBuilder {
    plan: ExecutionPlan,
}

impl PlanBuilder {
    pub fn add_group(&mut self, platform: Arc<dyn Platform>) -> GroupId {
        let id = GroupId::new(self.plan.groups.len() as u64);
        self.plan.groups.push(GroupNode {
            id,
            platform,
            stages: Vec::new(),
        });
        id
    }

    pub fn add_stage(&mut self, group: GroupId, name: impl Into<String>) -> StageId {
        let id = StageId::new(self.plan.stages.len() as u64);
        self.plan.stages.push(StageNode {
            id,
            name: name.into(),
            group,
            predecessors: Vec::new(),
            successors: Vec::new(),
            outbound: Vec::new(),
        });
        self.plan.groups[group.get() as usize].stages.push(id);
        id
    }

    /// Declare `from -> to` and allocate the channel carrying that edge's
    /// data. Acyclicity is the planner's contract; it is not verified here.
    pub fn connect(&mut self, from: StageId, to: StageId) -> ChannelId {
        let channel = ChannelId::new(self.plan.next_channel);
        self.plan.next_channel += 1;
        self.plan.stages[from.get() as usize].successors.push(to);
        self.plan.stages[from.get() as usize].outbound.push(channel);
        self.plan.stages[to.get() as usize].predecessors.push(from);
        channel
    }

    pub fn build(self) -> ExecutionPlan {
        self.plan
    }
}
