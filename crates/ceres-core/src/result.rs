//! Execution outcome model.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::task::{Payload, TaskInputs};
use crate::value::ScriptValue;
use crate::wire::PackagedResult;

/// The outcome of one task execution.
///
/// Produced exactly once per execution and immutable thereafter. A
/// successful result carries the produced output (native or codec-encoded,
/// decoded lazily on access) and the elapsed evaluation time. A failed
/// result carries a descriptive message and the underlying fault, and never
/// carries an output. Every result echoes the task's inputs so the
/// receiving side of a relay can reconstruct them.
pub struct ExecutionResult<V: ScriptValue> {
    outcome: Outcome<V>,
    elapsed: Duration,
    inputs: TaskInputs<V>,
}

enum Outcome<V: ScriptValue> {
    Success { output: Payload<V> },
    Failure { error: String, cause: Error },
}

impl<V: ScriptValue> ExecutionResult<V> {
    pub(crate) fn succeeded(output: Payload<V>, elapsed: Duration, inputs: TaskInputs<V>) -> Self {
        Self {
            outcome: Outcome::Success { output },
            elapsed,
            inputs,
        }
    }

    pub(crate) fn failed(error: String, cause: Error, inputs: TaskInputs<V>) -> Self {
        Self {
            outcome: Outcome::Failure { error, cause },
            elapsed: Duration::ZERO,
            inputs,
        }
    }

    /// Whether the execution produced a value.
    pub fn success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Human-readable failure message, if the execution failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failure { error, .. } => Some(error),
            Outcome::Success { .. } => None,
        }
    }

    /// The underlying fault, if the execution failed.
    pub fn cause(&self) -> Option<&Error> {
        match &self.outcome {
            Outcome::Failure { cause, .. } => Some(cause),
            Outcome::Success { .. } => None,
        }
    }

    /// The produced output, decoding it on first access if it was captured
    /// as codec bytes. A failed result has no output.
    pub fn output(&self) -> Result<Option<&V>> {
        match &self.outcome {
            Outcome::Success { output } => output.value().map(Some),
            Outcome::Failure { .. } => Ok(None),
        }
    }

    /// Consume the result, yielding the produced output.
    pub fn into_output(self) -> Result<Option<V>> {
        match self.outcome {
            Outcome::Success { output } => output.into_value().map(Some),
            Outcome::Failure { .. } => Ok(None),
        }
    }

    /// Time spent evaluating the task. Zero for a failed execution.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The inputs the task was executed with, reconstructable in every
    /// transport mode.
    pub fn inputs(&self) -> &TaskInputs<V> {
        &self.inputs
    }

    /// Snapshot this result into its transport form, encoding any payload
    /// still carried natively.
    pub fn package(&self) -> Result<PackagedResult> {
        let (values, primitives) = self.inputs.to_wire()?;
        match &self.outcome {
            Outcome::Success { output } => Ok(PackagedResult::from_success(
                output.to_bytes()?,
                self.elapsed,
                values,
                primitives,
            )),
            Outcome::Failure { error, cause } => Ok(PackagedResult::from_failure(
                error.clone(),
                cause.render_chain(),
                values,
                primitives,
            )),
        }
    }

    /// The output payload itself, exposing whether it is carried natively
    /// or as codec bytes. `None` for a failed result.
    pub fn output_payload(&self) -> Option<&Payload<V>> {
        match &self.outcome {
            Outcome::Success { output } => Some(output),
            Outcome::Failure { .. } => None,
        }
    }
}

impl<V: ScriptValue> fmt::Display for ExecutionResult<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExecutionResult[success={}]", self.success())
    }
}
