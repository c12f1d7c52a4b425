//! The mutable scaffolding context shared by every hook.

use indexmap::IndexMap;
use log::warn;
use std::path::{Path, PathBuf};

/// Variables collected while answering questions and running hooks.
pub type Variables = IndexMap<String, serde_json::Value>;

/// State threaded through the question, render and cleanup phases.
#[derive(Debug, Clone)]
pub struct Configurator {
    /// Directory the package is generated into. Its final path segment is
    /// the package name, e.g. `collective.myaddon`.
    pub target_directory: PathBuf,
    pub variables: Variables,
}

impl Configurator {
    /// Creates a context with no variables.
    ///
    /// # Arguments
    /// * `target_directory` - Directory the package is generated into
    pub fn new<P: AsRef<Path>>(target_directory: P) -> Self {
        Self { target_directory: target_directory.as_ref().to_path_buf(), variables: Variables::new() }
    }

    pub fn with_variables<P: AsRef<Path>>(target_directory: P, variables: Variables) -> Self {
        Self { target_directory: target_directory.as_ref().to_path_buf(), variables }
    }

    /// Final path segment of the target directory.
    pub fn package_dir(&self) -> String {
        self.target_directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.variables.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.variables.get(key).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.variables.get(key).and_then(|v| v.as_bool())
    }

    /// Sets a variable, replacing any previous value.
    ///
    /// # Arguments
    /// * `key` - Dotted variable name, e.g. `package.name`
    /// * `value` - Anything convertible to a JSON value (string, bool, number)
    pub fn set<K: Into<String>, V: Into<serde_json::Value>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builds the template context. Dotted keys become nested objects so
    /// `package.name` is reachable as `{{ package.name }}`.
    pub fn to_context(&self) -> serde_json::Value {
        to_context(&self.variables)
    }
}

pub fn to_context(variables: &Variables) -> serde_json::Value {
    let mut root = serde_json::Map::new();

    for (key, value) in variables {
        let mut parts: Vec<&str> = key.split('.').collect();
        let leaf = parts.pop().unwrap_or_default();
        let mut node = &mut root;

        for part in parts {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if !entry.is_object() {
                warn!("Variable '{key}' shadows the scalar '{part}', keeping the object");
                *entry = serde_json::Value::Object(serde_json::Map::new());
            }
            let serde_json::Value::Object(map) = entry else {
                unreachable!("entry was just replaced with an object");
            };
            node = map;
        }

        match node.get(leaf) {
            Some(existing) if existing.is_object() => {
                warn!("Variable '{key}' is also a prefix of other variables, skipping it");
            }
            _ => {
                node.insert(leaf.to_string(), value.clone());
            }
        }
    }

    serde_json::Value::Object(root)
}
