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

//! Modules: immutable name → symbol binding tables with identity metadata.

use crate::graph::location::{Location, QualifiedName};
use crate::graph::symbol::Symbol;
use std::collections::BTreeMap;
use std::fmt;

/// An immutable module. Shared as `Arc<Module>`; rewriting never mutates an
/// existing module, it only produces new ones.
///
/// A module without a defining location is opaque: the rewriter treats it as
/// a leaf and returns it unchanged.
pub struct Module {
    qualified_name: QualifiedName,
    location: Option<Location>,
    bindings: BTreeMap<String, Symbol>,
}

impl Module {
    pub(crate) fn new(qualified_name: QualifiedName, location: Option<Location>, bindings: BTreeMap<String, Symbol>) -> Self {
        Self { qualified_name, location, bindings }
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.bindings.get(name)
    }

    /// Iterate bindings in name order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.bindings.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("qualified_name", &self.qualified_name)
            .field("location", &self.location)
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::symbol::{FunctionSymbol, Value};

    #[test]
    fn test_bindings_iterate_in_name_order() {
        let qname = QualifiedName::from("m");
        let loc = Location::from("m.rs");
        let mut bindings = BTreeMap::new();
        for name in ["zeta", "alpha", "mid"] {
            bindings.insert(name.to_string(), Symbol::Function(FunctionSymbol::returning(name, qname.clone(), loc.clone(), Value::Null)));
        }
        let module = Module::new(qname, Some(loc), bindings);
        let names: Vec<&str> = module.bindings().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
