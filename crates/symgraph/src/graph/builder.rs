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

//! Explicit registration API for building module graphs.
//!
//! Dependencies are declared up front: a binding is a locally declared
//! function, an imported function symbol, a nested module reference, or an
//! opaque object. Nothing is discovered by introspection at rewrite time.

use crate::graph::location::{Location, QualifiedName};
use crate::graph::module::Module;
use crate::graph::registry::SymbolRegistry;
use crate::graph::symbol::{Callable, FunctionSymbol, ObjectSymbol, Symbol, Value};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

struct LocalFunction {
    name: String,
    body: Arc<dyn Callable>,
    scope_override: Option<QualifiedName>,
}

/// Builder for a single module and its declared bindings.
pub struct ModuleBuilder {
    qualified_name: QualifiedName,
    location: Option<Location>,
    local_functions: Vec<LocalFunction>,
    bindings: BTreeMap<String, Symbol>,
}

impl ModuleBuilder {
    pub fn new(qualified_name: impl Into<QualifiedName>) -> Self {
        Self { qualified_name: qualified_name.into(), location: None, local_functions: Vec::new(), bindings: BTreeMap::new() }
    }

    /// Defining location. A module built without one is opaque: the rewriter
    /// treats it as an immutable leaf.
    pub fn location(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Declare a function in this module. Its defining location and scope are
    /// the module's own.
    pub fn function(mut self, name: impl Into<String>, body: Arc<dyn Callable>) -> Self {
        self.local_functions.push(LocalFunction { name: name.into(), body, scope_override: None });
        self
    }

    /// Declare a function in this module whose body resolves names against a
    /// different module's bindings. The cloner never rebinds such functions.
    pub fn foreign_scope_function(mut self, name: impl Into<String>, scope: impl Into<QualifiedName>, body: Arc<dyn Callable>) -> Self {
        self.local_functions.push(LocalFunction { name: name.into(), body, scope_override: Some(scope.into()) });
        self
    }

    /// Bind a function declared in another module under `name`.
    pub fn imported(mut self, name: impl Into<String>, function: FunctionSymbol) -> Self {
        self.bindings.insert(name.into(), Symbol::Function(function));
        self
    }

    /// Bind a reference to a nested module.
    pub fn submodule(mut self, name: impl Into<String>, target: impl Into<QualifiedName>) -> Self {
        self.bindings.insert(name.into(), Symbol::ModuleRef(target.into()));
        self
    }

    /// Bind an opaque object payload.
    pub fn object(mut self, name: impl Into<String>, value: Arc<dyn Any + Send + Sync>) -> Self {
        let name = name.into();
        self.bindings.insert(name.clone(), Symbol::Object(ObjectSymbol::new(name, value)));
        self
    }

    /// Bind a constant value.
    pub fn constant(self, name: impl Into<String>, value: Value) -> Self {
        self.object(name, Arc::new(value))
    }

    pub fn build(self) -> Arc<Module> {
        let mut bindings = self.bindings;
        // Functions without their own source position inherit the module's.
        let local_location = self.location.clone().unwrap_or_else(|| Location::new(self.qualified_name.as_str()));
        for local in self.local_functions {
            let mut function = FunctionSymbol::new(local.name.clone(), self.qualified_name.clone(), local_location.clone(), local.body);
            if let Some(scope) = local.scope_override {
                function = function.with_scope(scope);
            }
            bindings.insert(local.name, Symbol::Function(function));
        }
        Arc::new(Module::new(self.qualified_name, self.location, bindings))
    }

    /// Build the module and register it under its qualified name.
    pub fn register(self, registry: &mut SymbolRegistry) -> Arc<Module> {
        let module = self.build();
        registry.insert(module.clone());
        module
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::symbol::callable;

    #[test]
    fn test_local_function_inherits_module_identity() {
        let module = ModuleBuilder::new("pkg.mod")
            .location("pkg/mod.rs")
            .function("f", callable(|_scope, _args| Ok(Value::Null)))
            .build();

        let f = module.get("f").and_then(Symbol::as_function).unwrap();
        assert_eq!(f.declared_module, QualifiedName::from("pkg.mod"));
        assert_eq!(f.scope, QualifiedName::from("pkg.mod"));
        assert_eq!(f.location, Location::from("pkg/mod.rs"));
    }

    #[test]
    fn test_foreign_scope_function_keeps_override() {
        let module = ModuleBuilder::new("pkg.mod")
            .location("pkg/mod.rs")
            .foreign_scope_function("wrapped", "pkg.decorators", callable(|_scope, _args| Ok(Value::Null)))
            .build();

        let f = module.get("wrapped").and_then(Symbol::as_function).unwrap();
        assert_eq!(f.declared_module, QualifiedName::from("pkg.mod"));
        assert_eq!(f.scope, QualifiedName::from("pkg.decorators"));
    }

    #[test]
    fn test_register_makes_module_resolvable() {
        let mut registry = SymbolRegistry::new();
        let module = ModuleBuilder::new("pkg.mod").location("pkg/mod.rs").register(&mut registry);
        let resolved = registry.get(&QualifiedName::from("pkg.mod")).unwrap();
        assert!(Arc::ptr_eq(&module, &resolved));
    }
}
