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

//! Symbol graph walker: applies a strategy across a module graph and clones
//! every module affected directly or through a rewritten dependency.

use crate::errors::RewriteError;
use crate::graph::location::{Location, QualifiedName};
use crate::graph::module::Module;
use crate::graph::registry::SymbolRegistry;
use crate::graph::symbol::Symbol;
use crate::rewrite::cloner::ModuleCloner;
use crate::rewrite::strategy::{RewriteResult, Strategy};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Depth-first, single-threaded rewriter over an explicit module graph.
///
/// The memo table maps each original module to its (possibly identical)
/// rewritten counterpart, so every module is rewritten at most once. It lives
/// on the rewriter value and is retained across calls; build a fresh rewriter
/// for an independent walk.
pub struct ModuleRewriter<S> {
    strategy: S,
    cloner: ModuleCloner,
    done: HashMap<QualifiedName, Arc<Module>>,
    stack: Vec<Location>,
}

impl<S: Strategy> ModuleRewriter<S> {
    pub fn new(strategy: S, cloner: ModuleCloner) -> Self {
        Self { strategy, cloner, done: HashMap::new(), stack: Vec::new() }
    }

    /// Rewrite `root` and its reachable dependencies.
    ///
    /// Returns `root` itself (same `Arc`) when nothing under it matched the
    /// strategy; otherwise returns a registered clone. Modules without a
    /// defining location are opaque leaves and are returned unchanged.
    ///
    /// Cycle policy: a module whose location is already on the in-progress
    /// stack is not recursed into again and counts as unchanged for its
    /// caller. A rewrite reachable only through the back-edge of a cycle may
    /// therefore not propagate; this under-propagation is known, documented
    /// behavior and is pinned by tests.
    pub fn rewrite(&mut self, registry: &mut SymbolRegistry, root: &Arc<Module>) -> Result<Arc<Module>, RewriteError> {
        if let Some(done) = self.done.get(root.qualified_name()) {
            return Ok(done.clone());
        }
        let Some(location) = root.location().cloned() else {
            self.done.insert(root.qualified_name().clone(), root.clone());
            return Ok(root.clone());
        };

        self.stack.push(location);
        let result = self.rewrite_bindings(registry, root);
        self.stack.pop();
        result
    }

    fn rewrite_bindings(&mut self, registry: &mut SymbolRegistry, root: &Arc<Module>) -> Result<Arc<Module>, RewriteError> {
        let mut updated: BTreeMap<String, Symbol> = BTreeMap::new();

        for (name, symbol) in root.bindings() {
            // Case 1: the strategy replaces the symbol directly.
            if let RewriteResult::Replaced(replacement) = self.strategy.apply(symbol) {
                debug!(symbol = name, module = %root.qualified_name(), "rewrote symbol");
                updated.insert(name.to_string(), replacement);
                continue;
            }

            match symbol {
                // Case 2: a nested module that may be affected transitively.
                Symbol::ModuleRef(target_name) => {
                    let target = registry.get(target_name)?;
                    let on_stack = target.location().is_some_and(|loc| self.stack.contains(loc));
                    if !on_stack {
                        let rewritten = self.rewrite(registry, &target)?;
                        if rewritten.qualified_name() != target.qualified_name() {
                            updated.insert(name.to_string(), Symbol::ModuleRef(rewritten.qualified_name().clone()));
                        }
                    }
                }
                // Case 3: a function imported from another module; rewriting
                // that module may replace the function.
                Symbol::Function(f) if f.declared_module != *root.qualified_name() => {
                    if !self.stack.contains(&f.location) {
                        let owner = registry.get(&f.declared_module)?;
                        let rewritten = self.rewrite(registry, &owner)?;
                        if rewritten.qualified_name() != owner.qualified_name() {
                            let replacement = rewritten
                                .get(&f.name)
                                .ok_or_else(|| RewriteError::SymbolNotFound { module: rewritten.qualified_name().clone(), name: f.name.clone() })?;
                            updated.insert(name.to_string(), replacement.clone());
                        }
                    }
                }
                _ => {}
            }
        }

        if updated.is_empty() {
            // Identity-preserving: callers may compare by pointer.
            self.done.insert(root.qualified_name().clone(), root.clone());
            return Ok(root.clone());
        }

        let clone = self.cloner.clone_module(root, updated, registry)?;
        self.done.insert(root.qualified_name().clone(), clone.clone());
        Ok(clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::ModuleBuilder;
    use crate::graph::symbol::{callable, Value};
    use crate::rewrite::strategy::MockStrategy;
    use mockall::predicate::always;

    fn plain_module(registry: &mut SymbolRegistry, name: &str, bindings: usize) -> Arc<Module> {
        let mut builder = ModuleBuilder::new(name).location(format!("{name}.rs"));
        for i in 0..bindings {
            builder = builder.function(format!("f{i}"), callable(|_scope, _args| Ok(Value::Null)));
        }
        builder.register(registry)
    }

    #[test]
    fn test_strategy_applied_to_every_binding() {
        let mut registry = SymbolRegistry::new();
        let root = plain_module(&mut registry, "root", 3);

        let mut strategy = MockStrategy::new();
        strategy.expect_apply().with(always()).times(3).returning(|_| RewriteResult::Unchanged);

        let cloner = ModuleCloner::new("immediate.").unwrap();
        let mut rewriter = ModuleRewriter::new(strategy, cloner);
        let result = rewriter.rewrite(&mut registry, &root).unwrap();
        assert!(Arc::ptr_eq(&root, &result));
    }

    #[test]
    fn test_memoized_module_not_visited_twice() {
        let mut registry = SymbolRegistry::new();
        let leaf = plain_module(&mut registry, "leaf", 2);
        ModuleBuilder::new("left").location("left.rs").submodule("leaf", "leaf").register(&mut registry);
        ModuleBuilder::new("right").location("right.rs").submodule("leaf", "leaf").register(&mut registry);
        let root = ModuleBuilder::new("root").location("root.rs").submodule("left", "left").submodule("right", "right").register(&mut registry);

        // Diamond: leaf reachable twice, its 2 bindings applied once. Module
        // refs: 2 at root, 1 per side.
        let mut strategy = MockStrategy::new();
        strategy.expect_apply().times(2 + 2 + 1 + 1).returning(|_| RewriteResult::Unchanged);

        let cloner = ModuleCloner::new("immediate.").unwrap();
        let mut rewriter = ModuleRewriter::new(strategy, cloner);
        let result = rewriter.rewrite(&mut registry, &root).unwrap();
        assert!(Arc::ptr_eq(&root, &result));
        let _ = leaf;
    }

    #[test]
    fn test_opaque_module_is_a_leaf() {
        let mut registry = SymbolRegistry::new();
        ModuleBuilder::new("builtin").function("f", callable(|_scope, _args| Ok(Value::Null))).register(&mut registry);
        let root = ModuleBuilder::new("root").location("root.rs").submodule("builtin", "builtin").register(&mut registry);

        // The opaque module's own bindings are never classified; only root's
        // single module ref is seen.
        let mut strategy = MockStrategy::new();
        strategy.expect_apply().times(1).returning(|_| RewriteResult::Unchanged);

        let cloner = ModuleCloner::new("immediate.").unwrap();
        let mut rewriter = ModuleRewriter::new(strategy, cloner);
        let result = rewriter.rewrite(&mut registry, &root).unwrap();
        assert!(Arc::ptr_eq(&root, &result));
    }
}
