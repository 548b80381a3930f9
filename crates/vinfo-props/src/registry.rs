//! Property registry - lookup by logical property name

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::builtin;
use crate::definition::{PropertyDefinition, PropertyEntry};
use crate::error::{PropsError, PropsResult};

/// Registry of property definitions.
///
/// Built once at startup and shared read-only afterwards; definitions keep
/// their registration order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    definitions: Vec<PropertyDefinition>,
    index: HashMap<String, usize>,
}

/// Layout of a TOML definition file
#[derive(Debug, Default, Deserialize)]
struct DefinitionFile {
    #[serde(default)]
    properties: Vec<PropertyEntry>,
}

impl PropertyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in properties
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for def in builtin::definitions() {
            registry.register(def);
        }
        registry
    }

    /// Load definitions from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> PropsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load definitions from a TOML string with a `[[properties]]` array
    pub fn from_toml(content: &str) -> PropsResult<Self> {
        let mut registry = Self::new();
        registry.load_toml(content)?;
        Ok(registry)
    }

    /// Add or replace definitions from a TOML string
    pub fn load_toml(&mut self, content: &str) -> PropsResult<()> {
        let file: DefinitionFile = toml::from_str(content)?;
        self.load_entries(file.properties)
    }

    /// Add or replace definitions from configuration entries
    pub fn load_entries(
        &mut self,
        entries: impl IntoIterator<Item = PropertyEntry>,
    ) -> PropsResult<()> {
        for entry in entries {
            self.register(PropertyDefinition::try_from(entry)?);
        }
        Ok(())
    }

    /// Register a definition, replacing any existing one with the same name
    pub fn register(&mut self, def: PropertyDefinition) {
        match self.index.get(&def.name) {
            Some(&pos) => {
                debug!(property = %def.name, "Replacing property definition");
                self.definitions[pos] = def;
            }
            None => {
                self.index.insert(def.name.clone(), self.definitions.len());
                self.definitions.push(def);
            }
        }
    }

    /// Merge another registry into this one; its definitions win
    pub fn merge(&mut self, other: PropertyRegistry) {
        for def in other.definitions {
            self.register(def);
        }
    }

    /// Look up a property, failing for unknown names
    pub fn lookup(&self, name: &str) -> PropsResult<&PropertyDefinition> {
        self.get(name)
            .ok_or_else(|| PropsError::UnknownProperty(name.to_string()))
    }

    /// Get a property definition by name
    pub fn get(&self, name: &str) -> Option<&PropertyDefinition> {
        self.index.get(name).map(|&pos| &self.definitions[pos])
    }

    /// Whether a property is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.definitions.iter()
    }

    /// All property names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    /// Number of registered properties
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Permission scopes needed to read `names`, deduplicated in first-seen order
    pub fn required_permissions<S: AsRef<str>>(&self, names: &[S]) -> PropsResult<Vec<String>> {
        let mut permissions: Vec<String> = Vec::new();
        for name in names {
            let def = self.lookup(name.as_ref())?;
            if let Some(permission) = &def.permission {
                if !permissions.contains(permission) {
                    permissions.push(permission.clone());
                }
            }
        }
        Ok(permissions)
    }
}
