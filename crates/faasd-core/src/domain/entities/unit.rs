use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named service plus the placeholder values its unit definition needs.
///
/// Immutable after creation - `with_substitution` consumes and returns a
/// new descriptor. Substitutions are kept sorted so rendering and logging
/// are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    name: String,
    substitutions: BTreeMap<String, String>,
}

impl UnitDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            substitutions: BTreeMap::new(),
        }
    }

    pub fn with_substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.substitutions.get(key).map(String::as_str)
    }

    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }
}

impl fmt::Display for UnitDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
