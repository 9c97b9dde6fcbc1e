//! Microbenchmarks for the estimate algebra and the driver loop.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use crossflow::{
    Configuration, CrossPlatformDriver, Estimate, ExecutionPlan, ExecutionState, Executor,
    ExecutorError, ExecutorFactory, Job, NoInstrumentation, Platform, StageContext,
};

struct NoopPlatform {
    factory: NoopFactory,
}

struct NoopFactory;
struct NoopExecutor;

impl Platform for NoopPlatform {
    fn name(&self) -> &str {
        "noop"
    }
    fn executor_factory(&self) -> &dyn ExecutorFactory {
        &self.factory
    }
}

impl ExecutorFactory for NoopFactory {
    fn create(&self, _job: &Job) -> Box<dyn Executor> {
        Box::new(NoopExecutor)
    }
}

impl Executor for NoopExecutor {
    fn execute(
        &mut self,
        _stage: StageContext<'_>,
        _state: &ExecutionState,
    ) -> Result<ExecutionState, ExecutorError> {
        Ok(ExecutionState::new())
    }
    fn dispose(&mut self) {}
}

fn chain_plan(length: usize) -> ExecutionPlan {
    let platform: Arc<dyn Platform> = Arc::new(NoopPlatform {
        factory: NoopFactory,
    });
    let mut builder = ExecutionPlan::builder();
    let group = builder.add_group(platform);
    let mut prev = None;
    for i in 0..length {
        let stage = builder.add_stage(group, format!("stage-{i}"));
        if let Some(p) = prev {
            builder.connect(p, stage);
        }
        prev = Some(stage);
    }
    builder.build()
}

fn bench_estimate_algebra(c: &mut Criterion) {
    let a = Estimate::new(1_000, 2_000, 0.8);
    let b = Estimate::new(300, 900, 0.9);
    c.bench_function("estimate_plus_times", |bench| {
        bench.iter(|| black_box(a.plus(&b).times(0.7)))
    });
    c.bench_function("estimate_geometric_mean", |bench| {
        bench.iter(|| black_box(a.geometric_mean()))
    });
}

fn bench_driver_chain(c: &mut Criterion) {
    let plan = chain_plan(64);
    c.bench_function("drive_chain_64", |bench| {
        bench.iter(|| {
            let job = Job::new("bench", Configuration::new());
            let mut driver = CrossPlatformDriver::new(job, Box::new(NoInstrumentation));
            black_box(driver.execute_until_breakpoint(&plan).unwrap());
        })
    });
}

criterion_group!(benches, bench_estimate_algebra, bench_driver_chain);
criterion_main!(benches);
