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

//! Module cloning: materializes a prefixed copy of a module with a set of
//! replaced bindings.

use crate::errors::RewriteError;
use crate::graph::location::QualifiedName;
use crate::graph::module::Module;
use crate::graph::registry::SymbolRegistry;
use crate::graph::symbol::{FunctionSymbol, Symbol};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Builds clones of modified modules.
///
/// The prefix is prepended to the clone's qualified name and defining
/// location so its identity never collides with the original's, in the
/// registry or in name-based lookups.
pub struct ModuleCloner {
    prefix: String,
}

impl ModuleCloner {
    /// Fails fast on an empty prefix: that is a configuration error, not a
    /// runtime condition.
    pub fn new(prefix: impl Into<String>) -> Result<Self, RewriteError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(RewriteError::EmptyClonePrefix);
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Clone `original` with `updated` bindings substituted, register the
    /// clone in the registry, and return it.
    ///
    /// Functions declared in the original module are copied with their scope
    /// rebound to the clone, so their name resolution sees the clone's
    /// bindings. Functions with a foreign captured scope pass through
    /// unmodified; rebinding them would break their closures. Objects,
    /// classes, and constants are copied by reference.
    pub(crate) fn clone_module(&self, original: &Module, updated: BTreeMap<String, Symbol>, registry: &mut SymbolRegistry) -> Result<Arc<Module>, RewriteError> {
        let location = original.location().ok_or_else(|| RewriteError::MissingLocation(original.qualified_name().clone()))?;
        let clone_name = original.qualified_name().prefixed(&self.prefix);
        let clone_location = location.prefixed(&self.prefix);

        let mut bindings = BTreeMap::new();
        for (name, symbol) in original.bindings() {
            let installed = if let Some(replacement) = updated.get(name) {
                let mut replacement = replacement.clone();
                if let Symbol::Function(f) = &mut replacement {
                    // Re-entrant lookups by name inside the clone must
                    // resolve to the clone, not the original.
                    if f.declared_module == *original.qualified_name() {
                        f.declared_module = clone_name.clone();
                    }
                }
                replacement
            } else if let Symbol::Function(f) = symbol {
                if f.declared_module == *original.qualified_name() {
                    self.copy_function(f, original.qualified_name(), &clone_name)
                } else {
                    // Imported and untouched: retain the old reference.
                    symbol.clone()
                }
            } else {
                symbol.clone()
            };
            bindings.insert(name.to_string(), installed);
        }

        let clone = Arc::new(Module::new(clone_name, Some(clone_location), bindings));
        registry.insert(clone.clone());
        debug!(original = %original.qualified_name(), clone = %clone.qualified_name(), "created module clone");
        Ok(clone)
    }

    /// Shallow copy of a locally declared function, rebound to the clone.
    /// The body is shared; only the identity and scope change.
    fn copy_function(&self, function: &FunctionSymbol, original_name: &QualifiedName, clone_name: &QualifiedName) -> Symbol {
        if function.scope != *original_name {
            // Foreign captured scope (e.g. decorator output).
            return Symbol::Function(function.clone());
        }
        let mut copy = function.clone();
        copy.declared_module = clone_name.clone();
        copy.scope = clone_name.clone();
        Symbol::Function(copy)
    }
}
