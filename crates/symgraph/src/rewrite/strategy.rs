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

//! Rewrite strategy interface

use crate::graph::symbol::Symbol;

/// Outcome of applying a strategy to one symbol.
#[derive(Clone, Debug)]
pub enum RewriteResult {
    Unchanged,
    /// Replacement symbol. Its name must match the original's, since other
    /// modules rebind imports by looking the name up in the rewritten owner.
    Replaced(Symbol),
}

impl RewriteResult {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, RewriteResult::Unchanged)
    }
}

/// A pluggable rule deciding whether and how to replace a symbol.
///
/// Strategies are pure with respect to the traversal: they see one symbol at
/// a time, never the walk state, and must not mutate the symbol. They may
/// hold their own captured configuration, e.g. a fixed replacement.
#[cfg_attr(test, mockall::automock)]
pub trait Strategy {
    fn apply(&self, symbol: &Symbol) -> RewriteResult;
}

impl<F> Strategy for F
where
    F: Fn(&Symbol) -> RewriteResult,
{
    fn apply(&self, symbol: &Symbol) -> RewriteResult {
        self(symbol)
    }
}
