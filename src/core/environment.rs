// src/core/environment.rs

use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Cannot set an environment variable with an empty name.")]
    EmptyName,
}

/// The engine's view of the process environment: a case-insensitive
/// key-value table, seeded from the OS at startup, mutated in place as
/// directives are processed, and finally handed to the child minus the
/// wrapper's reserved bookkeeping names.
///
/// Names compare case-insensitively (the Windows semantics this models),
/// but the first-seen spelling of each name is preserved so the child's
/// environment block looks like the one the wrapper inherited.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    // Keyed by the uppercased name; values keep the original spelling.
    entries: HashMap<String, (String, String)>,
}

impl Environment {
    /// Creates an empty table. Mostly useful in tests; production code
    /// starts from [`Environment::from_process`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current process environment.
    pub fn from_process() -> Self {
        let mut env = Self::new();
        for (name, value) in std::env::vars() {
            // Seeding cannot produce an empty name on any supported OS.
            let _ = env.set(&name, &value);
        }
        env
    }

    fn key_of(name: &str) -> String {
        name.to_uppercase()
    }

    /// Looks up a variable, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&Self::key_of(name))
            .map(|(_, value)| value.as_str())
    }

    /// Writes a variable, replacing any prior value under a differently
    /// cased spelling of the same name.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvironmentError> {
        if name.is_empty() {
            return Err(EnvironmentError::EmptyName);
        }
        self.entries
            .entry(Self::key_of(name))
            .and_modify(|(_, existing)| *existing = value.to_string())
            .or_insert_with(|| (name.to_string(), value.to_string()));
        Ok(())
    }

    /// Removes a variable, ignoring case. Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(&Self::key_of(name));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::key_of(name))
    }

    /// Iterates over `(name, value)` pairs in their original spelling, for
    /// building the child's environment block.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// MARK: --- UNIT TESTS ---
