//! Template manifest handling.
//! Loads `bake.json`, `bake.yml` or `bake.yaml` from a template directory and
//! describes the questions to ask and the hooks to run at each stage.

use crate::error::{Error, Result};
use crate::hooks::{QuestionHook, TemplateHook};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported manifest file names
pub const CONFIG_FILES: [&str; 3] = ["bake.json", "bake.yml", "bake.yaml"];

/// A single question from the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Prompt shown to the user
    #[serde(default)]
    pub help: String,
    /// Default answer. String defaults may reference earlier answers, e.g.
    /// `"{{ author.name }}"`.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub pre_ask_question: Option<QuestionHook>,
    #[serde(default)]
    pub post_ask_question: Option<QuestionHook>,
}

/// Hooks attached to the template lifecycle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateHooks {
    /// Run once after every question has been answered
    #[serde(default)]
    pub post_ask: Vec<TemplateHook>,
    /// Run before any file is rendered
    #[serde(default)]
    pub pre_render: Vec<TemplateHook>,
    /// Run after all files have been rendered
    #[serde(default)]
    pub post_render: Vec<TemplateHook>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cleanup {
    /// Paths relative to the target directory removed by `cleanup_package`
    #[serde(default)]
    pub delete: Vec<PathBuf>,
}

/// Parsed template manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub questions: IndexMap<String, Question>,
    #[serde(default)]
    pub hooks: TemplateHooks,
    #[serde(default)]
    pub cleanup: Cleanup,
}

impl Manifest {
    /// Parses manifest content, trying JSON first and falling back to YAML.
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(manifest) => Ok(manifest),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid manifest format: {e}"))),
        }
    }

    /// Loads the first manifest file found in `template_dir`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no manifest exists or it cannot be parsed
    pub fn load<P: AsRef<Path>>(template_dir: P) -> Result<Self> {
        let template_dir = template_dir.as_ref();
        for file in CONFIG_FILES {
            let config_path = template_dir.join(file);
            if config_path.exists() {
                debug!("Loading manifest from {}", config_path.display());
                let content = std::fs::read_to_string(&config_path)?;
                return Self::parse(&content);
            }
        }

        Err(Error::ConfigError(format!(
            "No manifest found in '{}' (tried: {})",
            template_dir.display(),
            CONFIG_FILES.join(", ")
        )))
    }
}

/// Loads preloaded answers from a YAML or JSON mapping file.
///
/// Nested mappings are flattened to dotted keys, so
/// `package: {description: Foo}` and `package.description: Foo` are
/// equivalent.
pub fn load_answers<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, serde_json::Value>> {
    let path = path.as_ref();
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str(&content)?,
    };

    let mut answers = IndexMap::new();
    match value {
        serde_json::Value::Object(map) => flatten_into("", map, &mut answers),
        serde_json::Value::Null => {}
        other => {
            return Err(Error::ConfigError(format!(
                "Answers file '{}' must contain a mapping, got: {other}",
                path.display()
            )))
        }
    }
    Ok(answers)
}

fn flatten_into(
    prefix: &str,
    map: serde_json::Map<String, serde_json::Value>,
    answers: &mut IndexMap<String, serde_json::Value>,
) {
    for (key, value) in map {
        let key = if prefix.is_empty() { key } else { format!("{prefix}.{key}") };
        match value {
            serde_json::Value::Object(inner) => flatten_into(&key, inner, answers),
            value => {
                answers.insert(key, value);
            }
        }
    }
}
