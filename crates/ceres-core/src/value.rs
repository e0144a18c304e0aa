//! Value model shared between the core and interpreter collaborators.
//!
//! The interpreter's native values stay opaque to ceres-core. The core only
//! needs to move them in and out of engine workspaces and, when a task or
//! result has to cross a process boundary, convert them to bytes and back
//! through the interpreter's own codec. [`ScriptValue`] captures exactly
//! that contract. [`Primitive`] covers the basic values that need no codec
//! at all and pass through untouched.

use serde::{Deserialize, Serialize};

/// A native interpreter value together with its opaque byte codec.
///
/// Implemented by the interpreter crate, not by ceres-core. The codec is
/// treated as a black box: `decode(encode(v))` must be observably
/// equivalent to `v` when bound into an engine workspace.
pub trait ScriptValue: Clone + Send + Sync + 'static {
    /// Codec failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Convert this value to its serialized byte form.
    fn encode(&self) -> std::result::Result<Vec<u8>, Self::Error>;

    /// Reconstruct a native value from its serialized byte form.
    fn decode(bytes: &[u8]) -> std::result::Result<Self, Self::Error>;
}

/// A basic task input that is natively transportable and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Primitive {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Primitive::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Primitive::Float(value) => Some(*value),
            Primitive::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Int(i64::from(value))
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Int(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Float(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::Str(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::Str(value)
    }
}
