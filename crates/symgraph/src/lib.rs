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

//! Identity-preserving rewriting of explicit module/symbol graphs.
//!
//! A [`SymbolRegistry`] holds immutable, reference-counted [`Module`]s whose
//! bindings form a directed (possibly cyclic) graph. A [`ModuleRewriter`]
//! walks that graph depth-first, applies a pluggable [`Strategy`] to every
//! binding, and materializes prefixed module clones via [`ModuleCloner`]
//! wherever a binding (or a transitively rewritten dependency) changed.
//! Untouched modules are returned with their original identity.

pub mod errors;
pub mod graph;
pub mod rewrite;

pub use errors::RewriteError;
pub use graph::builder::ModuleBuilder;
pub use graph::location::{Location, QualifiedName};
pub use graph::module::Module;
pub use graph::registry::{Scope, SymbolRegistry};
pub use graph::symbol::{callable, Callable, FunctionSymbol, ObjectSymbol, Symbol, Value};
pub use rewrite::cloner::ModuleCloner;
pub use rewrite::strategies::{CompositeReplace, NameAndLocationMatch, TypePredicateMatch};
pub use rewrite::strategy::{RewriteResult, Strategy};
pub use rewrite::walker::ModuleRewriter;
