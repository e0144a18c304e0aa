//! The calc engine and its factory.

use std::collections::HashMap;

use ceres_core::{Engine, EngineFactory, Primitive};

use crate::error::CalcError;
use crate::eval::eval_program;
use crate::value::CalcValue;

/// One calc interpreter instance.
///
/// The workspace is the mutable set of name-to-value bindings accumulated
/// across evaluations; it persists until [`Engine::clear_workspace`] wipes
/// it.
#[derive(Debug, Default)]
pub struct CalcEngine {
    workspace: HashMap<String, CalcValue>,
}

impl CalcEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a binding back out of the workspace.
    pub fn get(&self, name: &str) -> Option<&CalcValue> {
        self.workspace.get(name)
    }
}

impl Engine for CalcEngine {
    type Value = CalcValue;
    type Error = CalcError;

    fn bind(&mut self, name: &str, value: CalcValue) -> Result<(), CalcError> {
        self.workspace.insert(name.to_string(), value);
        Ok(())
    }

    fn bind_primitive(&mut self, name: &str, value: &Primitive) -> Result<(), CalcError> {
        let coerced = match value {
            Primitive::Bool(b) => CalcValue::Bool(*b),
            Primitive::Int(i) => CalcValue::Number(*i as f64),
            Primitive::Float(f) => CalcValue::Number(*f),
            Primitive::Str(s) => CalcValue::Str(s.clone()),
        };
        self.workspace.insert(name.to_string(), coerced);
        Ok(())
    }

    fn eval(&mut self, code: &str) -> Result<CalcValue, CalcError> {
        eval_program(code, &mut self.workspace)
    }

    fn clear_workspace(&mut self) {
        self.workspace.clear();
    }
}

/// Factory bootstrapping fresh calc engines with empty workspaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalcFactory;

impl CalcFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EngineFactory for CalcFactory {
    type Engine = CalcEngine;
    type Error = CalcError;

    fn create_engine(&self) -> Result<CalcEngine, CalcError> {
        Ok(CalcEngine::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_coerce_into_native_values() {
        let mut engine = CalcEngine::new();
        engine.bind_primitive("n", &Primitive::Int(10)).unwrap();
        engine.bind_primitive("mean", &Primitive::Float(5.0)).unwrap();
        assert_eq!(engine.eval("n + mean").unwrap(), CalcValue::Number(15.0));
    }

    #[test]
    fn bindings_persist_across_evaluations() {
        let mut engine = CalcEngine::new();
        engine.bind("z", CalcValue::Number(2.0)).unwrap();
        engine.eval("x<-z*3").unwrap();
        assert_eq!(engine.get("x"), Some(&CalcValue::Number(6.0)));
    }

    #[test]
    fn clear_workspace_drops_every_binding() {
        let mut engine = CalcEngine::new();
        engine.bind("n", CalcValue::Number(12.0)).unwrap();
        engine.clear_workspace();
        assert_eq!(engine.get("n"), None);
        assert!(matches!(engine.eval("n"), Err(CalcError::Undefined(_))));
    }

    #[test]
    fn factory_produces_engines_with_empty_workspaces() {
        let engine = CalcFactory::new().create_engine().unwrap();
        assert_eq!(engine.get("anything"), None);
    }
}
