//! Environment and scope management for the steptrace interpreter.
//!
//! Holds the global variable mapping the tracer reports, the local scopes of
//! active function calls, and the builtin registry.

use crate::error::{Result, RuntimeError};
use crate::value::Value;
use indexmap::IndexMap;

/// Variable environment with scope management
#[derive(Debug, Clone)]
pub struct Environment {
    /// Module-level bindings, in first-assignment order
    globals: Scope,
    /// Local scopes of active calls (most recent scope is last)
    frames: Vec<Scope>,
    /// Built-in functions (always accessible)
    builtin_scope: Scope,
}

/// A single scope containing variable bindings
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Variable name to value mapping
    variables: IndexMap<String, Value>,
}

impl Environment {
    /// Create a new environment with an empty global scope
    pub fn new() -> Self {
        Self {
            globals: Scope::default(),
            frames: Vec::new(),
            builtin_scope: Scope::default(),
        }
    }

    /// Push a new local scope for a function call
    pub fn push_scope(&mut self) {
        self.frames.push(Scope::default());
    }

    /// Pop the most recent local scope
    /// Returns error if only the global scope is left
    pub fn pop_scope(&mut self) -> Result<()> {
        if self.frames.pop().is_none() {
            return Err(RuntimeError::custom("Cannot pop global scope".to_string()));
        }
        Ok(())
    }

    /// Get the current scope depth (0 = global scope)
    pub fn scope_depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind a variable in the current scope
    /// Rebinding keeps the variable's original position
    pub fn define(&mut self, name: String, value: Value) {
        let scope = self.frames.last_mut().unwrap_or(&mut self.globals);
        scope.variables.insert(name, value);
    }

    /// Get a variable value by name
    /// Searches the current call's locals, then globals, then built-ins
    pub fn get(&self, name: &str) -> Result<Value> {
        self.frames
            .last()
            .and_then(|scope| scope.variables.get(name))
            .or_else(|| self.globals.variables.get(name))
            .or_else(|| self.builtin_scope.variables.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::undefined_variable(name.to_string()))
    }

    /// Register a built-in function
    pub fn register_builtin(&mut self, name: String, function: Value) {
        self.builtin_scope.variables.insert(name, function);
    }

    /// Global bindings in insertion order
    pub fn globals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.globals
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_variable_operations() {
        let mut env = Environment::new();

        // Define a variable
        env.define("x".to_string(), Value::Integer(42));
        assert_eq!(env.get("x").unwrap(), Value::Integer(42));

        // Rebind the same variable
        env.define("x".to_string(), Value::String("hello".to_string()));
        assert_eq!(env.get("x").unwrap(), Value::String("hello".to_string()));

        // Variable that doesn't exist
        assert!(matches!(
            env.get("nonexistent"),
            Err(RuntimeError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_rebinding_keeps_insertion_order() {
        let mut env = Environment::new();

        env.define("b".to_string(), Value::Integer(1));
        env.define("a".to_string(), Value::Integer(2));
        env.define("b".to_string(), Value::Integer(3));

        let names: Vec<&str> = env.globals().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_scope_management() {
        let mut env = Environment::new();

        // Define in global scope
        env.define("global_var".to_string(), Value::Integer(1));

        // Push new scope
        env.push_scope();
        env.define("local_var".to_string(), Value::Integer(2));

        // Both variables accessible
        assert_eq!(env.get("global_var").unwrap(), Value::Integer(1));
        assert_eq!(env.get("local_var").unwrap(), Value::Integer(2));

        // Shadow global variable
        env.define("global_var".to_string(), Value::None);
        assert_eq!(env.get("global_var").unwrap(), Value::None);

        // Locals never reach the global mapping
        assert_eq!(env.globals().count(), 1);

        // Pop scope
        env.pop_scope().unwrap();

        // Local variable no longer accessible
        assert!(env.get("local_var").is_err());

        // Global variable restored
        assert_eq!(env.get("global_var").unwrap(), Value::Integer(1));
    }

    #[test]
    fn test_nested_calls_do_not_see_caller_locals() {
        let mut env = Environment::new();

        env.push_scope();
        env.define("outer_local".to_string(), Value::Integer(1));
        env.push_scope();

        assert!(matches!(
            env.get("outer_local"),
            Err(RuntimeError::UndefinedVariable { .. })
        ));
    }

    #[test]
    fn test_builtin_registration() {
        let mut env = Environment::new();

        let len_fn = Value::BuiltinFunction {
            name: "len",
            function: |_args, _out| Ok(Value::Integer(0)),
        };
        env.register_builtin("len".to_string(), len_fn.clone());

        // Built-ins accessible from any scope, but never listed as globals
        assert_eq!(env.get("len").unwrap(), len_fn);
        env.push_scope();
        assert_eq!(env.get("len").unwrap(), len_fn);
        assert_eq!(env.globals().count(), 0);
    }

    #[test]
    fn test_cannot_pop_global_scope() {
        let mut env = Environment::new();

        assert!(env.pop_scope().is_err());

        env.push_scope();
        assert_eq!(env.scope_depth(), 1);
        assert!(env.pop_scope().is_ok());
        assert_eq!(env.scope_depth(), 0);
    }
}
