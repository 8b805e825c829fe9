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

//! Ready-made rewrite strategies.

use crate::graph::symbol::{ObjectSymbol, Symbol};
use crate::rewrite::strategy::{RewriteResult, Strategy};
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// Replace a symbol whose name equals a target and whose defining location
/// contains a pattern (typically a file suffix).
///
/// Used to substitute a single function across an entire dependency graph
/// with a fixed replacement.
pub struct NameAndLocationMatch {
    name: String,
    location_pattern: String,
    replacement: Symbol,
}

impl NameAndLocationMatch {
    pub fn new(name: impl Into<String>, location_pattern: impl Into<String>, replacement: Symbol) -> Self {
        Self { name: name.into(), location_pattern: location_pattern.into(), replacement }
    }
}

impl Strategy for NameAndLocationMatch {
    fn apply(&self, symbol: &Symbol) -> RewriteResult {
        let (Some(name), Some(location)) = (symbol.name(), symbol.location()) else {
            return RewriteResult::Unchanged;
        };
        if name == self.name && location.contains(&self.location_pattern) {
            RewriteResult::Replaced(self.replacement.clone())
        } else {
            RewriteResult::Unchanged
        }
    }
}

/// Replace every object symbol whose payload is a `T` with a wrapping
/// adapter built from that instance.
///
/// The adapter closure typically captures a shared environment and returns a
/// symbol wrapping the matched instance.
pub struct TypePredicateMatch<T> {
    wrap: Arc<dyn Fn(&ObjectSymbol, Arc<T>) -> Symbol + Send + Sync>,
    _payload: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypePredicateMatch<T> {
    pub fn new(wrap: impl Fn(&ObjectSymbol, Arc<T>) -> Symbol + Send + Sync + 'static) -> Self {
        Self { wrap: Arc::new(wrap), _payload: PhantomData }
    }
}

impl<T: Any + Send + Sync> Strategy for TypePredicateMatch<T> {
    fn apply(&self, symbol: &Symbol) -> RewriteResult {
        if let Symbol::Object(object) = symbol {
            if let Some(payload) = object.downcast::<T>() {
                return RewriteResult::Replaced((self.wrap)(object, payload));
            }
        }
        RewriteResult::Unchanged
    }
}

/// Try several strategies in order; the first replacement wins.
///
/// Lets one pass replace several distinct kinds of symbols, e.g. a library
/// type plus two specifically named functions.
#[derive(Default)]
pub struct CompositeReplace {
    strategies: Vec<Box<dyn Strategy>>,
}

impl CompositeReplace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }
}

impl Strategy for CompositeReplace {
    fn apply(&self, symbol: &Symbol) -> RewriteResult {
        for strategy in &self.strategies {
            let result = strategy.apply(symbol);
            if !result.is_unchanged() {
                return result;
            }
        }
        RewriteResult::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::location::{Location, QualifiedName};
    use crate::graph::symbol::{FunctionSymbol, Value};

    fn add_in(location: &str) -> Symbol {
        Symbol::Function(FunctionSymbol::returning("add", QualifiedName::from("math.gen"), Location::from(location), Value::Int(0)))
    }

    #[test]
    fn test_name_and_location_match() {
        let replacement = Symbol::Function(FunctionSymbol::returning("add", QualifiedName::from("shim"), Location::from("shim.rs"), Value::Int(1)));
        let strategy = NameAndLocationMatch::new("add", "gen_math_ops.rs", replacement);

        assert!(!strategy.apply(&add_in("lib/gen_math_ops.rs")).is_unchanged());
        assert!(strategy.apply(&add_in("lib/gen_array_ops.rs")).is_unchanged());
    }

    #[test]
    fn test_name_mismatch_is_unchanged() {
        let replacement = add_in("shim.rs");
        let strategy = NameAndLocationMatch::new("sub", "gen_math_ops.rs", replacement);
        assert!(strategy.apply(&add_in("lib/gen_math_ops.rs")).is_unchanged());
    }

    struct OpLibrary {
        #[allow(dead_code)]
        ops: usize,
    }

    #[test]
    fn test_type_predicate_wraps_matching_objects() {
        let strategy = TypePredicateMatch::<OpLibrary>::new(|object, _payload| {
            Symbol::Function(FunctionSymbol::returning(object.name.clone(), QualifiedName::from("wrapped"), Location::from("wrapped.rs"), Value::Null))
        });

        let library = Symbol::Object(ObjectSymbol::new("op_lib", Arc::new(OpLibrary { ops: 3 })));
        let other = Symbol::Object(ObjectSymbol::new("config", Arc::new(7u8)));

        assert!(!strategy.apply(&library).is_unchanged());
        assert!(strategy.apply(&other).is_unchanged());
    }

    #[test]
    fn test_composite_first_replacement_wins() {
        let first = NameAndLocationMatch::new("add", "gen_math_ops.rs", add_in("first.rs"));
        let second = NameAndLocationMatch::new("add", "gen_math_ops.rs", add_in("second.rs"));
        let composite = CompositeReplace::new().with(first).with(second);

        let RewriteResult::Replaced(symbol) = composite.apply(&add_in("lib/gen_math_ops.rs")) else {
            panic!("expected replacement");
        };
        assert_eq!(symbol.location().unwrap().as_str(), "first.rs");
    }

    #[test]
    fn test_empty_composite_is_unchanged() {
        let composite = CompositeReplace::new();
        assert!(composite.apply(&add_in("lib/gen_math_ops.rs")).is_unchanged());
    }
}
