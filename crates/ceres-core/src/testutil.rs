//! Shared stub interpreter used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use thiserror::Error;

use crate::engine::{Engine, EngineFactory};
use crate::pool::EnginePool;
use crate::value::{Primitive, ScriptValue};

/// A one-field native value with a fixed-width byte codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StubValue(pub i64);

#[derive(Debug, Error)]
pub(crate) enum StubError {
    #[error("stub codec rejected {0} bytes")]
    Codec(usize),
    #[error("object `{0}` not found")]
    Undefined(String),
    #[error("binding `{0}` rejected")]
    Rejected(String),
    #[error("stub engine cannot hold {0:?}")]
    Unsupported(Primitive),
    #[error("engine factory failure injected")]
    Factory,
}

impl ScriptValue for StubValue {
    type Error = StubError;

    fn encode(&self) -> Result<Vec<u8>, StubError> {
        Ok(self.0.to_le_bytes().to_vec())
    }

    fn decode(bytes: &[u8]) -> Result<Self, StubError> {
        let fixed: [u8; 8] = bytes.try_into().map_err(|_| StubError::Codec(bytes.len()))?;
        Ok(StubValue(i64::from_le_bytes(fixed)))
    }
}

/// Engine over integer bindings: code is either an integer literal or the
/// name of a binding to read back. Binding the name `forbidden` fails.
#[derive(Debug, Default)]
pub(crate) struct StubEngine {
    bindings: HashMap<String, i64>,
}

impl StubEngine {
    pub(crate) const REJECTED_NAME: &'static str = "forbidden";

    pub(crate) fn lookup(&self, name: &str) -> Option<i64> {
        self.bindings.get(name).copied()
    }
}

impl Engine for StubEngine {
    type Value = StubValue;
    type Error = StubError;

    fn bind(&mut self, name: &str, value: StubValue) -> Result<(), StubError> {
        if name == Self::REJECTED_NAME {
            return Err(StubError::Rejected(name.to_string()));
        }
        self.bindings.insert(name.to_string(), value.0);
        Ok(())
    }

    fn bind_primitive(&mut self, name: &str, value: &Primitive) -> Result<(), StubError> {
        if name == Self::REJECTED_NAME {
            return Err(StubError::Rejected(name.to_string()));
        }
        match value {
            Primitive::Int(v) => {
                self.bindings.insert(name.to_string(), *v);
                Ok(())
            }
            other => Err(StubError::Unsupported(other.clone())),
        }
    }

    fn eval(&mut self, code: &str) -> Result<StubValue, StubError> {
        let code = code.trim();
        if let Ok(literal) = code.parse::<i64>() {
            return Ok(StubValue(literal));
        }
        self.bindings
            .get(code)
            .copied()
            .map(StubValue)
            .ok_or_else(|| StubError::Undefined(code.to_string()))
    }

    fn clear_workspace(&mut self) {
        self.bindings.clear();
    }
}

/// Factory counting creations, with one-shot failure injection.
#[derive(Debug, Default)]
pub(crate) struct StubFactory {
    created: AtomicUsize,
    fail_next: AtomicBool,
}

impl StubFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl EngineFactory for StubFactory {
    type Engine = StubEngine;
    type Error = StubError;

    fn create_engine(&self) -> Result<StubEngine, StubError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StubError::Factory);
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(StubEngine::default())
    }
}

pub(crate) type TestPool = EnginePool<StubFactory>;
