//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use ceres_calc::{CalcEngine, CalcFactory};
use ceres_core::{EnginePool, Executor, PoolConfig, TaskBuilder};

/// Executor over a freshly seeded pool with the default retention cap.
pub fn executor() -> Executor<CalcFactory> {
    executor_with_cap(PoolConfig::default().max_idle)
}

/// Executor over a freshly seeded pool with an explicit retention cap.
pub fn executor_with_cap(max_idle: usize) -> Executor<CalcFactory> {
    let pool = EnginePool::with_config(CalcFactory::new(), PoolConfig { max_idle })
        .expect("seed engine");
    Executor::new(Arc::new(pool))
}

/// The four task/result encoding combinations: in-process, relayed tasks,
/// relayed results, and fully relayed.
pub const ENCODING_MODES: [(bool, bool); 4] =
    [(false, false), (true, false), (false, true), (true, true)];

/// Task builder with the given encoding combination applied.
pub fn builder<'e>(encode_inputs: bool, encode_output: bool) -> TaskBuilder<'e, CalcEngine> {
    TaskBuilder::new()
        .encode_inputs(encode_inputs)
        .encode_output(encode_output)
}
