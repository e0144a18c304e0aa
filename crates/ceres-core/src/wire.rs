//! Transport packaging for tasks and results.
//!
//! A packaged form is a plain-data snapshot in which every
//! interpreter-native payload has been converted to codec bytes, so the
//! whole object can be relayed between processes by any serializer the
//! embedding framework chooses. Unpacking reconstructs the live form;
//! native values are decoded lazily on first access, exactly as if they had
//! been built encoded in the receiving process.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::Error;
use crate::result::ExecutionResult;
use crate::task::{ExecutionTask, Payload, TaskInputs};
use crate::value::{Primitive, ScriptValue};

/// Transport form of an [`ExecutionTask`].
///
/// Produced by [`ExecutionTask::package`]; only pool-targeted tasks can be
/// packaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagedTask {
    code: String,
    value_inputs: HashMap<String, Vec<u8>>,
    primitive_inputs: HashMap<String, Primitive>,
    encode_output: bool,
}

impl PackagedTask {
    pub(crate) fn from_parts(
        code: String,
        value_inputs: HashMap<String, Vec<u8>>,
        primitive_inputs: HashMap<String, Primitive>,
        encode_output: bool,
    ) -> Self {
        Self {
            code,
            value_inputs,
            primitive_inputs,
            encode_output,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Reconstruct an executable, pool-targeted task in this process.
    pub fn unpack<E: Engine>(self) -> ExecutionTask<'static, E> {
        let mut inputs = TaskInputs::new();
        for (name, bytes) in self.value_inputs {
            inputs.insert_value(name, Payload::encoded(bytes));
        }
        for (name, value) in self.primitive_inputs {
            inputs.insert_primitive(name, value);
        }
        ExecutionTask::from_wire(self.code, inputs, self.encode_output)
    }
}

/// Transport form of an [`ExecutionResult`].
///
/// Records per payload whether it travels as codec bytes or as a
/// primitive. The original fault object of a failed result cannot cross a
/// process boundary; its rendered chain is carried instead and resurfaces
/// as [`Error::Relayed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagedResult {
    success: bool,
    error: Option<String>,
    cause: Option<String>,
    output: Option<Vec<u8>>,
    elapsed: Duration,
    value_inputs: HashMap<String, Vec<u8>>,
    primitive_inputs: HashMap<String, Primitive>,
}

impl PackagedResult {
    pub(crate) fn from_success(
        output: Vec<u8>,
        elapsed: Duration,
        value_inputs: HashMap<String, Vec<u8>>,
        primitive_inputs: HashMap<String, Primitive>,
    ) -> Self {
        Self {
            success: true,
            error: None,
            cause: None,
            output: Some(output),
            elapsed,
            value_inputs,
            primitive_inputs,
        }
    }

    pub(crate) fn from_failure(
        error: String,
        cause: String,
        value_inputs: HashMap<String, Vec<u8>>,
        primitive_inputs: HashMap<String, Primitive>,
    ) -> Self {
        Self {
            success: false,
            error: Some(error),
            cause: Some(cause),
            output: None,
            elapsed: Duration::ZERO,
            value_inputs,
            primitive_inputs,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Reconstruct a result whose payloads decode lazily on access.
    pub fn unpack<V: ScriptValue>(self) -> ExecutionResult<V> {
        let mut inputs = TaskInputs::new();
        for (name, bytes) in self.value_inputs {
            inputs.insert_value(name, Payload::encoded(bytes));
        }
        for (name, value) in self.primitive_inputs {
            inputs.insert_primitive(name, value);
        }

        match (self.success, self.output) {
            (true, Some(bytes)) => {
                ExecutionResult::succeeded(Payload::encoded(bytes), self.elapsed, inputs)
            }
            (true, None) => ExecutionResult::failed(
                "packaged result carried no output".to_string(),
                Error::Relayed("success recorded without output bytes".to_string()),
                inputs,
            ),
            (false, _) => ExecutionResult::failed(
                self.error
                    .unwrap_or_else(|| "unspecified relayed failure".to_string()),
                Error::Relayed(self.cause.unwrap_or_default()),
                inputs,
            ),
        }
    }
}
