//! Tagged payload representation for task inputs and result outputs.

use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::value::ScriptValue;

/// A value carried either in native form or as codec bytes.
///
/// The encoded form is what survives a process boundary; the native form is
/// only valid inside the process that produced it. `value()` converges the
/// two: an encoded payload is decoded on first read and the decoded value
/// is cached for subsequent reads.
#[derive(Debug, Clone)]
pub struct Payload<V: ScriptValue> {
    repr: Repr<V>,
}

#[derive(Debug, Clone)]
enum Repr<V> {
    Native(V),
    Encoded {
        bytes: Vec<u8>,
        decoded: OnceLock<V>,
    },
}

impl<V: ScriptValue> Payload<V> {
    /// Wrap a value in native form.
    pub fn native(value: V) -> Self {
        Self {
            repr: Repr::Native(value),
        }
    }

    /// Wrap a value already in codec byte form.
    pub fn encoded(bytes: Vec<u8>) -> Self {
        Self {
            repr: Repr::Encoded {
                bytes,
                decoded: OnceLock::new(),
            },
        }
    }

    /// Build a payload from a native value, encoding it first if asked.
    pub fn from_value(value: V, encode: bool) -> Result<Self> {
        if encode {
            let bytes = value.encode().map_err(|e| Error::Packaging(Box::new(e)))?;
            Ok(Self::encoded(bytes))
        } else {
            Ok(Self::native(value))
        }
    }

    /// Whether this payload is carried as codec bytes.
    pub fn is_encoded(&self) -> bool {
        matches!(self.repr, Repr::Encoded { .. })
    }

    /// Access the native value, decoding and caching it on first read.
    pub fn value(&self) -> Result<&V> {
        match &self.repr {
            Repr::Native(value) => Ok(value),
            Repr::Encoded { bytes, decoded } => {
                if let Some(value) = decoded.get() {
                    return Ok(value);
                }
                let value = V::decode(bytes).map_err(|e| Error::Packaging(Box::new(e)))?;
                Ok(decoded.get_or_init(|| value))
            }
        }
    }

    /// Consume the payload, yielding the native value.
    pub fn into_value(self) -> Result<V> {
        match self.repr {
            Repr::Native(value) => Ok(value),
            Repr::Encoded { bytes, decoded } => match decoded.into_inner() {
                Some(value) => Ok(value),
                None => V::decode(&bytes).map_err(|e| Error::Packaging(Box::new(e))),
            },
        }
    }

    /// The codec byte form of this payload, encoding a native value on
    /// demand.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match &self.repr {
            Repr::Native(value) => value.encode().map_err(|e| Error::Packaging(Box::new(e))),
            Repr::Encoded { bytes, .. } => Ok(bytes.clone()),
        }
    }
}
