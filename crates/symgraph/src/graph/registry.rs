// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Caller-owned registry resolving qualified names to modules.
//!
//! The registry replaces a process-global namespace: it is an ordinary value
//! the caller passes `&mut` into a rewrite. The cloner registers every clone
//! it creates, so later lookups by qualified name observe the clone.

use crate::errors::RewriteError;
use crate::graph::location::QualifiedName;
use crate::graph::module::Module;
use crate::graph::symbol::{Symbol, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Name-keyed module registry.
#[derive(Default)]
pub struct SymbolRegistry {
    modules: HashMap<QualifiedName, Arc<Module>>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its qualified name, replacing any previous
    /// entry with that name.
    pub fn insert(&mut self, module: Arc<Module>) {
        trace!(module = %module.qualified_name(), "registering module");
        self.modules.insert(module.qualified_name().clone(), module);
    }

    /// Resolve a qualified name. A missing entry is an inconsistency in the
    /// caller's module graph and propagates as an error.
    pub fn get(&self, name: &QualifiedName) -> Result<Arc<Module>, RewriteError> {
        self.modules.get(name).cloned().ok_or_else(|| RewriteError::ModuleNotFound(name.clone()))
    }

    pub fn lookup(&self, name: &QualifiedName) -> Option<&Arc<Module>> {
        self.modules.get(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Scope for resolving names inside the given module.
    pub fn scope(&self, module: &QualifiedName) -> Result<Scope<'_>, RewriteError> {
        Ok(Scope { registry: self, module: self.get(module)? })
    }

    /// Invoke `name` inside `module` with the module's own scope.
    pub fn call(&self, module: &QualifiedName, name: &str, args: &[Value]) -> Result<Value, RewriteError> {
        self.scope(module)?.call(name, args)
    }
}

/// Explicit environment through which function bodies resolve sibling
/// symbols at call time.
pub struct Scope<'a> {
    registry: &'a SymbolRegistry,
    module: Arc<Module>,
}

impl Scope<'_> {
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn lookup(&self, name: &str) -> Result<&Symbol, RewriteError> {
        self.module.get(name).ok_or_else(|| RewriteError::SymbolNotFound { module: self.module.qualified_name().clone(), name: name.to_string() })
    }

    /// Call a function binding by name. The callee's body runs against the
    /// scope of its own `scope` module, which for functions copied into a
    /// clone is the clone itself.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, RewriteError> {
        match self.lookup(name)? {
            Symbol::Function(f) => {
                let callee_scope = self.registry.scope(&f.scope)?;
                f.body.invoke(&callee_scope, args)
            }
            _ => Err(RewriteError::NotCallable { module: self.module.qualified_name().clone(), name: name.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::ModuleBuilder;
    use crate::graph::symbol::callable;

    #[test]
    fn test_missing_module_is_an_error() {
        let registry = SymbolRegistry::new();
        let err = registry.get(&QualifiedName::from("nowhere")).unwrap_err();
        assert!(matches!(err, RewriteError::ModuleNotFound(_)));
    }

    #[test]
    fn test_call_resolves_siblings_through_scope() {
        let mut registry = SymbolRegistry::new();
        ModuleBuilder::new("math")
            .location("lib/math.rs")
            .function("two", callable(|_scope, _args| Ok(Value::Int(2))))
            .function("double_two", callable(|scope, _args| match scope.call("two", &[])? {
                Value::Int(n) => Ok(Value::Int(2 * n)),
                other => Ok(other),
            }))
            .register(&mut registry);

        let result = registry.call(&QualifiedName::from("math"), "double_two", &[]).unwrap();
        assert_eq!(result, Value::Int(4));
    }

    #[test]
    fn test_calling_an_object_fails() {
        let mut registry = SymbolRegistry::new();
        ModuleBuilder::new("m").location("m.rs").constant("answer", Value::Int(42)).register(&mut registry);
        let err = registry.call(&QualifiedName::from("m"), "answer", &[]).unwrap_err();
        assert!(matches!(err, RewriteError::NotCallable { .. }));
    }
}
