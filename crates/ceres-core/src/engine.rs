//! Collaborator traits for the external interpreter runtime.
//!
//! ceres-core does not interpret anything itself. An embedding provides an
//! [`EngineFactory`] that bootstraps interpreter instances, and each
//! [`Engine`] exposes the three operations the executor needs: install a
//! binding, evaluate a unit of code, and reset the workspace.

use crate::value::{Primitive, ScriptValue};

/// One instance of the external interpreter runtime.
///
/// An engine accumulates a workspace of name-to-value bindings across
/// evaluations. While idle it is owned by the pool; during an execution it
/// is owned by exactly one executor invocation and never shared.
pub trait Engine: Send {
    /// The interpreter's native value representation.
    type Value: ScriptValue;

    /// The interpreter's failure type for bind and eval operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Install a native value into the workspace under `name`.
    fn bind(&mut self, name: &str, value: Self::Value) -> std::result::Result<(), Self::Error>;

    /// Install a primitive value into the workspace under `name`.
    ///
    /// The engine coerces the primitive into whatever native representation
    /// suits it; no codec is involved.
    fn bind_primitive(
        &mut self,
        name: &str,
        value: &Primitive,
    ) -> std::result::Result<(), Self::Error>;

    /// Evaluate `code` as a single unit and return the value it produces.
    fn eval(&mut self, code: &str) -> std::result::Result<Self::Value, Self::Error>;

    /// Reset the workspace to empty, dropping every binding.
    fn clear_workspace(&mut self);
}

/// Factory bootstrapping new interpreter engine instances.
///
/// Creation is assumed expensive; the pool exists to amortize it.
pub trait EngineFactory: Send + Sync {
    /// The engine type this factory produces.
    type Engine: Engine;

    /// The factory's failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Bootstrap a fresh engine with an empty workspace.
    fn create_engine(&self) -> std::result::Result<Self::Engine, Self::Error>;
}
