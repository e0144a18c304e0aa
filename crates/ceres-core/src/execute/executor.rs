//! Task executor driving single executions and rayon-backed batches.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::engine::{Engine, EngineFactory};
use crate::error::{Error, Result};
use crate::pool::EnginePool;
use crate::result::ExecutionResult;
use crate::task::{EngineSource, ExecutionTask, Payload, TaskInputs};

type EngineValue<F> = <<F as EngineFactory>::Engine as Engine>::Value;

/// A failure captured mid-execution: descriptive message plus the fault.
type Failure = (String, Error);

/// Orchestrates task execution against a shared engine pool.
///
/// `execute` returns `Err` only when an engine cannot be created at all;
/// every failure past that point — bad bindings, rejected code, codec
/// trouble while capturing the output — is folded into a normally-returned
/// [`ExecutionResult`] with `success() == false`, so batch callers can
/// treat failed tasks as ordinary data.
pub struct Executor<F: EngineFactory> {
    pool: Arc<EnginePool<F>>,
}

impl<F: EngineFactory> Clone for Executor<F> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<F: EngineFactory> Executor<F> {
    pub fn new(pool: Arc<EnginePool<F>>) -> Self {
        Self { pool }
    }

    /// The pool this executor checks engines out of.
    pub fn pool(&self) -> &EnginePool<F> {
        &self.pool
    }

    /// Execute one task to completion, blocking the calling thread.
    pub fn execute(
        &self,
        task: ExecutionTask<'_, F::Engine>,
    ) -> Result<ExecutionResult<EngineValue<F>>> {
        let started = Instant::now();
        let (code, inputs, encode_output, source) = task.into_parts();

        let outcome = match source {
            EngineSource::Supplied { engine, auto_clear } => {
                let outcome = run(engine, &code, &inputs, encode_output, started);
                if auto_clear {
                    engine.clear_workspace();
                }
                outcome
            }
            EngineSource::Pool => {
                let mut engine = self.pool.acquire()?;
                let outcome = run(&mut engine, &code, &inputs, encode_output, started);
                self.pool.release(engine);
                outcome
            }
        };

        Ok(into_result(outcome, inputs))
    }

    /// Execute a batch of independent pool-targeted tasks in parallel.
    ///
    /// Per-task failures are encoded in the returned results exactly as
    /// with [`execute`](Self::execute); an `Err` element means that task
    /// could not obtain an engine.
    pub fn execute_batch(
        &self,
        tasks: Vec<ExecutionTask<'static, F::Engine>>,
    ) -> Vec<Result<ExecutionResult<EngineValue<F>>>> {
        tasks
            .into_par_iter()
            .map(|task| self.execute(task))
            .collect()
    }
}

/// BIND, EVALUATE and CAPTURE against one engine.
fn run<E: Engine>(
    engine: &mut E,
    code: &str,
    inputs: &TaskInputs<E::Value>,
    encode_output: bool,
    started: Instant,
) -> std::result::Result<(Payload<E::Value>, Duration), Failure> {
    for (name, value) in inputs.primitive_entries() {
        engine.bind_primitive(name, value).map_err(|e| {
            (
                format!("task bind failed for input `{name}`"),
                Error::Binding {
                    name: name.to_string(),
                    source: Box::new(e),
                },
            )
        })?;
    }

    for (name, payload) in inputs.payload_entries() {
        let value = payload.value().map_err(|e| {
            (
                format!("task input `{name}` could not be decoded"),
                Error::Binding {
                    name: name.to_string(),
                    source: Box::new(e),
                },
            )
        })?;
        engine.bind(name, value.clone()).map_err(|e| {
            (
                format!("task bind failed for input `{name}`"),
                Error::Binding {
                    name: name.to_string(),
                    source: Box::new(e),
                },
            )
        })?;
    }

    let produced = engine.eval(code).map_err(|e| {
        (
            "task evaluation failed".to_string(),
            Error::Evaluation(Box::new(e)),
        )
    })?;
    let elapsed = started.elapsed();

    let output = Payload::from_value(produced, encode_output).map_err(|e| {
        (
            "task output could not be encoded".to_string(),
            e,
        )
    })?;

    Ok((output, elapsed))
}

fn into_result<V: crate::value::ScriptValue>(
    outcome: std::result::Result<(Payload<V>, Duration), Failure>,
    inputs: TaskInputs<V>,
) -> ExecutionResult<V> {
    match outcome {
        Ok((output, elapsed)) => ExecutionResult::succeeded(output, elapsed, inputs),
        Err((message, cause)) => {
            tracing::debug!(error = %cause, "task execution failed");
            ExecutionResult::failed(message, cause, inputs)
        }
    }
}
