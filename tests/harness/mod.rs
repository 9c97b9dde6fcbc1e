//! Shared mock platform for driver tests.
//!
//! The platform records every factory/executor interaction so tests can
//! assert submission order, at-most-once execution, and disposal counts.

use std::sync::{Arc, Mutex};

use crossflow::{
    Configuration, ExecutionPlan, ExecutionState, Executor, ExecutorError, ExecutorFactory,
    GroupId, Job, Platform, StageContext, StageId,
};

#[derive(Default)]
pub struct Recorder {
    pub created: usize,
    pub disposed: usize,
    /// Stage names in actual submission order, across all executors.
    pub executed: Vec<String>,
}

pub type SharedRecorder = Arc<Mutex<Recorder>>;

pub fn recorder() -> SharedRecorder {
    Arc::new(Mutex::new(Recorder::default()))
}

pub struct MockPlatform {
    name: String,
    factory: MockFactory,
}

impl MockPlatform {
    pub fn shared(name: &str, recorder: SharedRecorder) -> Arc<dyn Platform> {
        Arc::new(Self {
            name: name.to_string(),
            factory: MockFactory {
                recorder,
                fail_on: None,
            },
        })
    }

    /// Executors of this platform fail on the stage with the given name.
    pub fn failing_on(name: &str, recorder: SharedRecorder, fail_on: &str) -> Arc<dyn Platform> {
        Arc::new(Self {
            name: name.to_string(),
            factory: MockFactory {
                recorder,
                fail_on: Some(fail_on.to_string()),
            },
        })
    }
}

impl Platform for MockPlatform {
    fn name(&self) -> &str {
        &self.name
    }

    fn executor_factory(&self) -> &dyn ExecutorFactory {
        &self.factory
    }
}

struct MockFactory {
    recorder: SharedRecorder,
    fail_on: Option<String>,
}

impl ExecutorFactory for MockFactory {
    fn create(&self, _job: &Job) -> Box<dyn Executor> {
        self.recorder.lock().unwrap().created += 1;
        Box::new(MockExecutor {
            recorder: Arc::clone(&self.recorder),
            fail_on: self.fail_on.clone(),
            disposed: false,
        })
    }
}

struct MockExecutor {
    recorder: SharedRecorder,
    fail_on: Option<String>,
    disposed: bool,
}

impl Executor for MockExecutor {
    fn execute(
        &mut self,
        stage: StageContext<'_>,
        _state: &ExecutionState,
    ) -> Result<ExecutionState, ExecutorError> {
        if self.fail_on.as_deref() == Some(stage.name()) {
            return Err(ExecutorError::Failed(format!(
                "injected failure in {}",
                stage.name()
            )));
        }
        self.recorder
            .lock()
            .unwrap()
            .executed
            .push(stage.name().to_string());
        let mut out = ExecutionState::new();
        for &channel in stage.outbound_channels() {
            if stage.is_instrumented(channel) {
                out.add_cardinality(channel, 42);
            }
        }
        Ok(out)
    }

    fn dispose(&mut self) {
        assert!(!self.disposed, "executor disposed twice");
        self.disposed = true;
        self.recorder.lock().unwrap().disposed += 1;
    }
}

pub fn job() -> Job {
    Job::new("test-job", Configuration::new())
}

/// `A -> B -> ... -> Z` in a single platform group.
pub fn chain(platform: &Arc<dyn Platform>, names: &[&str]) -> (ExecutionPlan, Vec<StageId>) {
    let mut builder = ExecutionPlan::builder();
    let group = builder.add_group(Arc::clone(platform));
    let stages: Vec<StageId> = names.iter().map(|n| builder.add_stage(group, *n)).collect();
    for pair in stages.windows(2) {
        builder.connect(pair[0], pair[1]);
    }
    (builder.build(), stages)
}

/// `A -> {B, C} -> D` in a single platform group.
pub fn diamond(platform: &Arc<dyn Platform>) -> (ExecutionPlan, Vec<StageId>) {
    let mut builder = ExecutionPlan::builder();
    let group = builder.add_group(Arc::clone(platform));
    let a = builder.add_stage(group, "A");
    let b = builder.add_stage(group, "B");
    let c = builder.add_stage(group, "C");
    let d = builder.add_stage(group, "D");
    builder.connect(a, b);
    builder.connect(a, c);
    builder.connect(b, d);
    builder.connect(c, d);
    (builder.build(), vec![a, b, c, d])
}

/// Two chained groups on distinct platforms: `A -> B` on the first,
/// `C -> D` on the second.
pub fn two_group_chain(
    first: &Arc<dyn Platform>,
    second: &Arc<dyn Platform>,
) -> (ExecutionPlan, Vec<StageId>, GroupId, GroupId) {
    let mut builder = ExecutionPlan::builder();
    let g1 = builder.add_group(Arc::clone(first));
    let g2 = builder.add_group(Arc::clone(second));
    let a = builder.add_stage(g1, "A");
    let b = builder.add_stage(g1, "B");
    let c = builder.add_stage(g2, "C");
    let d = builder.add_stage(g2, "D");
    builder.connect(a, b);
    builder.connect(b, c);
    builder.connect(c, d);
    (builder.build(), vec![a, b, c, d], g1, g2)
}
