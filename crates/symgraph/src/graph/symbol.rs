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

//! Symbols: the named, addressable units inside a module's binding table.
//!
//! A symbol is either a function with an explicit scope, a reference to a
//! nested module, or an opaque object (classes, constants, library handles).
//! Function bodies are shared behind `Arc`, so copying a symbol never copies
//! code and reference identity stays observable through [`Arc::ptr_eq`].

use crate::errors::RewriteError;
use crate::graph::location::{Location, QualifiedName};
use crate::graph::registry::Scope;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Minimal value model passed into and out of callable symbols.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Str(String),
}

/// A callable function body.
///
/// Bodies receive their module's scope explicitly and resolve sibling symbols
/// through it at call time, so a body installed in a clone sees the clone's
/// bindings rather than the original's.
pub trait Callable: Send + Sync {
    fn invoke(&self, scope: &Scope<'_>, args: &[Value]) -> Result<Value, RewriteError>;
}

impl<F> Callable for F
where
    F: Fn(&Scope<'_>, &[Value]) -> Result<Value, RewriteError> + Send + Sync,
{
    fn invoke(&self, scope: &Scope<'_>, args: &[Value]) -> Result<Value, RewriteError> {
        self(scope, args)
    }
}

/// Wrap a closure as a shared callable body.
pub fn callable<F>(body: F) -> Arc<dyn Callable>
where
    F: Fn(&Scope<'_>, &[Value]) -> Result<Value, RewriteError> + Send + Sync + 'static,
{
    Arc::new(body)
}

/// A named function symbol.
///
/// `declared_module` records where the function was defined; a binding whose
/// function is declared elsewhere is an import. `scope` names the module
/// whose bindings the body resolves against; it normally equals
/// `declared_module`, and differs only for functions produced with a foreign
/// captured scope (the decorator case), which the cloner passes through
/// untouched.
#[derive(Clone)]
pub struct FunctionSymbol {
    pub name: String,
    pub declared_module: QualifiedName,
    pub location: Location,
    pub scope: QualifiedName,
    pub body: Arc<dyn Callable>,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, declared_module: QualifiedName, location: Location, body: Arc<dyn Callable>) -> Self {
        let scope = declared_module.clone();
        Self { name: name.into(), declared_module, location, scope, body }
    }

    /// Override the captured scope, marking the function as foreign-scoped.
    pub fn with_scope(mut self, scope: QualifiedName) -> Self {
        self.scope = scope;
        self
    }

    /// Function that ignores its arguments and returns a fixed value.
    pub fn returning(name: impl Into<String>, declared_module: QualifiedName, location: Location, value: Value) -> Self {
        let body = callable(move |_scope, _args| Ok(value.clone()));
        Self::new(name, declared_module, location, body)
    }

    /// Whether two function symbols share the same underlying body.
    pub fn same_body(&self, other: &FunctionSymbol) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSymbol")
            .field("name", &self.name)
            .field("declared_module", &self.declared_module)
            .field("location", &self.location)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// An opaque object binding: classes, constants, library instances.
///
/// Objects are copied by reference during cloning and never traversed.
#[derive(Clone)]
pub struct ObjectSymbol {
    pub name: String,
    pub location: Option<Location>,
    pub value: Arc<dyn Any + Send + Sync>,
}

impl ObjectSymbol {
    pub fn new(name: impl Into<String>, value: Arc<dyn Any + Send + Sync>) -> Self {
        Self { name: name.into(), location: None, value }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Typed view of the payload, if it is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for ObjectSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSymbol").field("name", &self.name).field("location", &self.location).finish_non_exhaustive()
    }
}

/// A single entry in a module's binding table.
#[derive(Clone, Debug)]
pub enum Symbol {
    Function(FunctionSymbol),
    /// Reference to a nested module, resolved through the registry.
    ModuleRef(QualifiedName),
    Object(ObjectSymbol),
}

impl Symbol {
    /// The symbol's own name, if it carries one. Module references report
    /// their full qualified name.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Function(f) => Some(&f.name),
            Symbol::ModuleRef(name) => Some(name.as_str()),
            Symbol::Object(o) => Some(&o.name),
        }
    }

    /// Defining location, if known. Module references carry none; their
    /// target's location lives on the target module itself.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Symbol::Function(f) => Some(&f.location),
            Symbol::ModuleRef(_) => None,
            Symbol::Object(o) => o.location.as_ref(),
        }
    }

    pub fn as_function(&self) -> Option<&FunctionSymbol> {
        match self {
            Symbol::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Whether two symbols refer to the same underlying payload.
    pub fn same_reference(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Symbol::Function(a), Symbol::Function(b)) => Arc::ptr_eq(&a.body, &b.body),
            (Symbol::ModuleRef(a), Symbol::ModuleRef(b)) => a == b,
            (Symbol::Object(a), Symbol::Object(b)) => Arc::ptr_eq(&a.value, &b.value),
            _ => false,
        }
    }
}
