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

//! Error types for graph construction, rewriting, and invocation

use crate::graph::location::QualifiedName;
use thiserror::Error;

/// Errors that can occur while building, rewriting, or invoking a symbol graph
#[derive(Error, Debug)]
pub enum RewriteError {
    /// Clone prefix validation happens at `ModuleCloner` construction time.
    #[error("module clone prefix must be non-empty")]
    EmptyClonePrefix,

    /// A qualified name had no entry in the registry during transitive
    /// resolution. This indicates an inconsistent module graph and is
    /// propagated rather than recovered from.
    #[error("module not found in registry: {0}")]
    ModuleNotFound(QualifiedName),

    #[error("symbol `{name}` not found in module {module}")]
    SymbolNotFound { module: QualifiedName, name: String },

    #[error("symbol `{name}` in module {module} is not callable")]
    NotCallable { module: QualifiedName, name: String },

    /// Only modules with a defining location may be cloned.
    #[error("module {0} has no defining location")]
    MissingLocation(QualifiedName),

    /// Failure surfaced by a callable body during invocation.
    #[error("invocation failed: {0}")]
    Invocation(String),
}
