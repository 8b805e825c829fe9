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

//! Identity metadata for modules and symbols

use std::fmt;

/// Dotted name under which a module is registered and resolved.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the clone produced for this module under `prefix`.
    pub fn prefixed(&self, prefix: &str) -> QualifiedName {
        QualifiedName(format!("{prefix}{}", self.0))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Path-equivalent defining location of a module or function.
///
/// Used as the cycle key during traversal: a module whose location is on the
/// in-progress stack is never recursed into again.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring match against the location path, e.g. a file suffix.
    pub fn contains(&self, pattern: &str) -> bool {
        self.0.contains(pattern)
    }

    pub fn prefixed(&self, prefix: &str) -> Location {
        Location(format!("{prefix}{}", self.0))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_name_and_location() {
        let name = QualifiedName::from("math.ops");
        assert_eq!(name.prefixed("immediate.").as_str(), "immediate.math.ops");

        let loc = Location::from("lib/math/ops.rs");
        assert_eq!(loc.prefixed("immediate.").as_str(), "immediate.lib/math/ops.rs");
    }

    #[test]
    fn test_location_substring_match() {
        let loc = Location::from("lib/math/gen_math_ops.rs");
        assert!(loc.contains("gen_math_ops.rs"));
        assert!(!loc.contains("gen_array_ops.rs"));
    }
}
