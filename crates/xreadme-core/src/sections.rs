// SPDX-License-Identifier: AGPL-3.0-or-later
//! Ordered, deduplicated registry of README sections
//!
//! The registry always holds a `License` entry; the footer of every
//! generated README depends on it.

use serde::{Deserialize, Serialize};

/// The section that can never be removed
pub const LICENSE_SECTION: &str = "License";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SectionRegistry {
    names: Vec<String>,
}

impl SectionRegistry {
    /// A registry holding only the mandatory `License` entry
    pub fn new() -> Self {
        Self {
            names: vec![LICENSE_SECTION.to_string()],
        }
    }

    /// Build from configured names, dropping blanks and repeats and
    /// appending `License` if it is missing
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self { names: Vec::new() };
        for name in names {
            registry.push_unique(name.into());
        }
        if !registry.contains(LICENSE_SECTION) {
            registry.names.push(LICENSE_SECTION.to_string());
        }
        registry
    }

    /// Append `name` unless it is blank or already present (exact,
    /// case-sensitive match). Returns whether the registry changed.
    pub fn add(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            tracing::debug!("Rejecting blank section name");
            return false;
        }
        self.push_unique(name.to_string())
    }

    /// Remove `name`, keeping the order of the rest. `License` is never
    /// removed. Returns whether the registry changed.
    pub fn remove(&mut self, name: &str) -> bool {
        if name == LICENSE_SECTION {
            tracing::debug!("Refusing to remove the {} section", LICENSE_SECTION);
            return false;
        }
        match self.names.iter().position(|n| n == name) {
            Some(index) => {
                self.names.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Never true while the `License` invariant holds
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    fn push_unique(&mut self, name: String) -> bool {
        if name.trim().is_empty() || self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<String>> for SectionRegistry {
    type Error = std::convert::Infallible;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Ok(Self::from_names(names))
    }
}

impl From<SectionRegistry> for Vec<String> {
    fn from(registry: SectionRegistry) -> Self {
        registry.names
    }
}
