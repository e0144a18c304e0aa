//! Calc native values and their byte codec.

use bincode::{Decode, Encode};
use ceres_core::ScriptValue;

use crate::error::CalcError;

/// A value in the calc interpreter's native representation.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub enum CalcValue {
    Number(f64),
    Vector(Vec<f64>),
    Str(String),
    Bool(bool),
}

impl CalcValue {
    /// Whether arithmetic applies to this value.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CalcValue::Number(_) | CalcValue::Vector(_))
    }

    /// Element count, with scalars counting as one.
    pub fn len(&self) -> usize {
        match self {
            CalcValue::Vector(items) => items.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CalcValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            CalcValue::Number(_) | CalcValue::Vector(_) => "numeric",
            CalcValue::Str(_) => "character",
            CalcValue::Bool(_) => "logical",
        }
    }
}

impl ScriptValue for CalcValue {
    type Error = CalcError;

    fn encode(&self) -> Result<Vec<u8>, CalcError> {
        bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| CalcError::Codec(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Self, CalcError> {
        bincode::decode_from_slice(bytes, bincode::config::standard())
            .map(|(value, _)| value)
            .map_err(|e| CalcError::Codec(e.to_string()))
    }
}
