//! Core library for Ceres: pooled execution of interpreted-language tasks.
//!
//! This crate provides:
//! - Collaborator traits for an external interpreter runtime and its value
//!   codec
//! - An elastic, never-blocking pool of reusable engine instances
//! - A task/result object model whose payloads carry their own
//!   native-or-encoded representation, safe to relay between processes
//! - A blocking executor that binds inputs, evaluates code and folds every
//!   per-task failure into the returned result
//!
//! The interpreter itself is not part of this crate; embeddings implement
//! [`Engine`], [`EngineFactory`] and [`ScriptValue`] for their runtime (the
//! `ceres-calc` crate ships a small reference implementation).

pub mod engine;
pub mod error;
pub mod execute;
pub mod pool;
pub mod result;
pub mod task;
pub mod value;
pub mod wire;

#[cfg(test)]
mod testutil;

pub use engine::{Engine, EngineFactory};
pub use error::{BoxedCause, Error, Result};
pub use execute::Executor;
pub use pool::{DEFAULT_MAX_IDLE, EnginePool, POOL_LIMIT_ENV, PoolConfig};
pub use result::ExecutionResult;
pub use task::{ExecutionTask, Payload, TaskBuilder, TaskInputs};
pub use value::{Primitive, ScriptValue};
pub use wire::{PackagedResult, PackagedTask};
