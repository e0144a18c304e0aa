//! Task object model: named inputs, the single-use builder, and the
//! immutable execution task.
//!
//! A task carries a unit of interpreter code, the inputs to bind before
//! evaluating it, and the transport flags deciding whether payloads travel
//! as codec bytes or stay native. Tasks built without an engine run on the
//! shared pool; tasks built with a caller-supplied engine run on that
//! engine and leave the pool alone.

mod payload;

pub use payload::Payload;

use std::collections::HashMap;
use std::io::Read;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::value::{Primitive, ScriptValue};
use crate::wire::PackagedTask;

/// The two disjoint input mappings of a task.
///
/// A name is present in at most one mapping; inserting it into one removes
/// it from the other, so the last write for a name wins.
#[derive(Debug)]
pub struct TaskInputs<V: ScriptValue> {
    values: HashMap<String, Payload<V>>,
    primitives: HashMap<String, Primitive>,
}

impl<V: ScriptValue> TaskInputs<V> {
    pub(crate) fn new() -> Self {
        Self {
            values: HashMap::new(),
            primitives: HashMap::new(),
        }
    }

    pub(crate) fn insert_value(&mut self, name: String, payload: Payload<V>) {
        self.primitives.remove(&name);
        self.values.insert(name, payload);
    }

    pub(crate) fn insert_primitive(&mut self, name: String, value: Primitive) {
        self.values.remove(&name);
        self.primitives.insert(name, value);
    }

    /// Look up an interpreter-native input, decoding it if it arrived as
    /// codec bytes.
    pub fn native(&self, name: &str) -> Result<Option<&V>> {
        match self.values.get(name) {
            Some(payload) => payload.value().map(Some),
            None => Ok(None),
        }
    }

    /// Look up a primitive input.
    pub fn primitive(&self, name: &str) -> Option<&Primitive> {
        self.primitives.get(name)
    }

    /// Combined view over both mappings.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .chain(self.primitives.keys())
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.primitives.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.primitives.is_empty()
    }

    pub(crate) fn payload_entries(&self) -> impl Iterator<Item = (&str, &Payload<V>)> {
        self.values.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub(crate) fn primitive_entries(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.primitives.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Encode every native payload, yielding the wire form of both maps.
    pub(crate) fn to_wire(&self) -> Result<(HashMap<String, Vec<u8>>, HashMap<String, Primitive>)> {
        let mut values = HashMap::with_capacity(self.values.len());
        for (name, payload) in &self.values {
            values.insert(name.clone(), payload.to_bytes()?);
        }
        Ok((values, self.primitives.clone()))
    }
}

/// Where an execution gets its engine from.
#[derive(Debug)]
pub(crate) enum EngineSource<'e, E: Engine> {
    /// Check an engine out of the shared pool and return it afterwards.
    Pool,
    /// Use the caller's engine; the pool is never consulted or repaid.
    Supplied {
        engine: &'e mut E,
        auto_clear: bool,
    },
}

enum RawInput<V> {
    Value(V),
    Primitive(Primitive),
}

/// Single-use builder for [`ExecutionTask`].
///
/// `build` consumes the builder, so a builder can produce at most one task;
/// reuse is a compile error rather than a run-time fault. Both transport
/// flags default to on, the safe choice when tasks and results may be
/// relayed to another process.
pub struct TaskBuilder<'e, E: Engine> {
    code: Option<String>,
    inputs: Vec<(String, RawInput<E::Value>)>,
    encode_inputs: bool,
    encode_output: bool,
    source: EngineSource<'e, E>,
}

impl<'e, E: Engine> Default for TaskBuilder<'e, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e, E: Engine> TaskBuilder<'e, E> {
    pub fn new() -> Self {
        Self {
            code: None,
            inputs: Vec::new(),
            encode_inputs: true,
            encode_output: true,
            source: EngineSource::Pool,
        }
    }

    /// The code the task will evaluate.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Read the task code from a streamed text source.
    pub fn code_from(self, mut source: impl Read) -> Result<Self> {
        let mut code = String::new();
        source
            .read_to_string(&mut code)
            .map_err(|e| Error::Definition(format!("code source could not be read: {e}")))?;
        Ok(self.code(code))
    }

    /// Add a primitive input.
    pub fn input(mut self, name: impl Into<String>, value: impl Into<Primitive>) -> Self {
        self.inputs
            .push((name.into(), RawInput::Primitive(value.into())));
        self
    }

    /// Add an interpreter-native input.
    pub fn native_input(mut self, name: impl Into<String>, value: E::Value) -> Self {
        self.inputs.push((name.into(), RawInput::Value(value)));
        self
    }

    /// Add several primitive inputs.
    pub fn inputs<I, K, P>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Primitive>,
    {
        for (name, value) in pairs {
            self = self.input(name, value);
        }
        self
    }

    /// Add several interpreter-native inputs.
    pub fn native_inputs<I, K>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, E::Value)>,
        K: Into<String>,
    {
        for (name, value) in pairs {
            self = self.native_input(name, value);
        }
        self
    }

    /// Whether native inputs are converted to codec bytes at build time.
    /// Defaults to true. Disable only when the task never leaves this
    /// process.
    pub fn encode_inputs(mut self, enabled: bool) -> Self {
        self.encode_inputs = enabled;
        self
    }

    /// Whether the produced output is converted to codec bytes when the
    /// result is captured. Defaults to true. Disable only when the result
    /// never leaves this process.
    pub fn encode_output(mut self, enabled: bool) -> Self {
        self.encode_output = enabled;
        self
    }

    /// Run the task on a caller-supplied engine, leaving its workspace
    /// intact afterwards (stateful reuse).
    pub fn engine(mut self, engine: &'e mut E) -> Self {
        self.source = EngineSource::Supplied {
            engine,
            auto_clear: false,
        };
        self
    }

    /// Run the task on a caller-supplied engine and clear its workspace
    /// after execution (stateless reuse).
    pub fn engine_auto_clear(mut self, engine: &'e mut E) -> Self {
        self.source = EngineSource::Supplied {
            engine,
            auto_clear: true,
        };
        self
    }

    /// Produce the immutable task.
    ///
    /// Fails with [`Error::Definition`] when no code was supplied or when a
    /// native input cannot be encoded under the input-encoding flag.
    pub fn build(self) -> Result<ExecutionTask<'e, E>> {
        let code = self
            .code
            .ok_or_else(|| Error::Definition("code on task not specified".to_string()))?;

        let mut inputs = TaskInputs::new();
        for (name, raw) in self.inputs {
            match raw {
                RawInput::Primitive(value) => inputs.insert_primitive(name, value),
                RawInput::Value(value) => {
                    let payload = if self.encode_inputs {
                        let bytes = value.encode().map_err(|e| {
                            Error::Definition(format!("input `{name}` could not be encoded: {e}"))
                        })?;
                        Payload::encoded(bytes)
                    } else {
                        Payload::native(value)
                    };
                    inputs.insert_value(name, payload);
                }
            }
        }

        Ok(ExecutionTask {
            code,
            inputs,
            encode_output: self.encode_output,
            source: self.source,
        })
    }
}

/// The unit of work: code, named inputs and transport flags.
///
/// Immutable once built; consumed by a single execution.
#[derive(Debug)]
pub struct ExecutionTask<'e, E: Engine> {
    code: String,
    inputs: TaskInputs<E::Value>,
    encode_output: bool,
    source: EngineSource<'e, E>,
}

impl<'e, E: Engine> ExecutionTask<'e, E> {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn inputs(&self) -> &TaskInputs<E::Value> {
        &self.inputs
    }

    /// Whether this task runs on a caller-supplied engine.
    pub fn uses_supplied_engine(&self) -> bool {
        matches!(self.source, EngineSource::Supplied { .. })
    }

    /// Snapshot this task into its transport form.
    ///
    /// Only pool-targeted tasks can be packaged; an engine cannot cross a
    /// process boundary.
    pub fn package(&self) -> Result<PackagedTask> {
        if self.uses_supplied_engine() {
            return Err(Error::Definition(
                "a task bound to a caller-supplied engine cannot be packaged".to_string(),
            ));
        }
        let (values, primitives) = self.inputs.to_wire()?;
        Ok(PackagedTask::from_parts(
            self.code.clone(),
            values,
            primitives,
            self.encode_output,
        ))
    }

    pub(crate) fn from_wire(
        code: String,
        inputs: TaskInputs<E::Value>,
        encode_output: bool,
    ) -> Self {
        Self {
            code,
            inputs,
            encode_output,
            source: EngineSource::Pool,
        }
    }

    pub(crate) fn into_parts(
        self,
    ) -> (String, TaskInputs<E::Value>, bool, EngineSource<'e, E>) {
        (self.code, self.inputs, self.encode_output, self.source)
    }
}
