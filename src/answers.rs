//! Hooks run around individual questions.
//!
//! Pre-ask hooks fill in defaults (from the user's git configuration) and
//! validate the package name before anything is asked. Post-ask hooks coerce
//! or post-process a single answer.

use crate::config::Question;
use crate::context::Configurator;
use crate::derive::PackageName;
use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Looks up values in the user's version-control configuration.
pub trait GitConfigLookup {
    /// Returns the configured value for `key` (e.g. `user.name`), or `None`
    /// when it is not available for any reason.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads git configuration through libgit2.
///
/// Like `git config --get`, the configuration of the repository containing
/// `start_dir` takes precedence over the global, XDG and system files. Outside
/// a repository only the latter are read.
#[derive(Debug, Default)]
pub struct Git2Config {
    start_dir: Option<PathBuf>,
}

impl Git2Config {
    /// Looks up values as seen from the current working directory.
    pub fn new() -> Self {
        Self { start_dir: std::env::current_dir().ok() }
    }

    /// Looks up values as seen from `start_dir`.
    pub fn discover_from<P: AsRef<Path>>(start_dir: P) -> Self {
        Self { start_dir: Some(start_dir.as_ref().to_path_buf()) }
    }

    fn open(&self) -> std::result::Result<git2::Config, git2::Error> {
        if let Some(start_dir) = &self.start_dir {
            match git2::Repository::discover(start_dir) {
                Ok(repo) => return repo.config(),
                Err(e) => debug!("No git repository at {}: {e}", start_dir.display()),
            }
        }
        git2::Config::open_default()
    }
}

impl GitConfigLookup for Git2Config {
    fn get(&self, key: &str) -> Option<String> {
        let config = match self.open() {
            Ok(config) => config,
            Err(e) => {
                debug!("Cannot open git configuration: {e}");
                return None;
            }
        };
        match config.get_string(key) {
            Ok(value) => {
                let value = value.trim().to_string();
                (!value.is_empty()).then_some(value)
            }
            Err(e) => {
                debug!("No git configuration value for '{key}': {e}");
                None
            }
        }
    }
}

/// Converts an answer to a boolean.
///
/// Accepts `y`, `yes`, `true`, `1` and `n`, `no`, `false`, `0` in any case.
/// JSON booleans pass through unchanged.
///
/// # Errors
/// * `Error::ValidationError` for anything else
pub fn to_boolean(answer: &serde_json::Value) -> Result<bool> {
    let invalid = || Error::ValidationError("Value must be a boolean (y/n)".to_string());
    match answer {
        serde_json::Value::Bool(value) => Ok(*value),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(invalid()),
        },
        serde_json::Value::String(value) => match value.to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(true),
            "n" | "no" | "false" | "0" => Ok(false),
            _ => Err(invalid()),
        },
        _ => Err(invalid()),
    }
}

/// Checks that the target directory name can be used as a package name.
///
/// # Arguments
/// * `configurator` - Context whose `target_directory` names the package
///
/// # Returns
/// * `Result<PackageName>` - The parsed package name
///
/// # Errors
/// * `Error::InvalidPackageName` if the final path segment is not a valid
///   package name
pub fn validate_packagename(configurator: &Configurator) -> Result<PackageName> {
    PackageName::parse(&configurator.package_dir())
}

/// Validates the package name, then defaults the question to the git user name.
///
/// # Arguments
/// * `configurator` - Context whose `target_directory` names the package
/// * `question` - Question whose `default` is replaced when git knows the name
/// * `lookup` - Source of the `user.name` git configuration value
///
/// # Errors
/// * `Error::InvalidPackageName` if the target directory is not a valid
///   package name. The question default is left untouched then.
pub fn pre_username(
    configurator: &Configurator,
    question: &mut Question,
    lookup: &dyn GitConfigLookup,
) -> Result<()> {
    // Runs before the first question, so an invalid name stops the run early.
    validate_packagename(configurator)?;

    if let Some(default) = lookup.get("user.name") {
        question.default = Some(serde_json::Value::String(default));
    }
    Ok(())
}

/// Defaults the question to the git user email.
///
/// # Arguments
/// * `_configurator` - Unused, kept so every pre-ask hook has the same shape
/// * `question` - Question whose `default` is replaced when git knows the email
/// * `lookup` - Source of the `user.email` git configuration value
///
/// # Returns
/// * `Result<()>` - Always succeeds; a missing value leaves the default as is
pub fn pre_email(
    _configurator: &Configurator,
    question: &mut Question,
    lookup: &dyn GitConfigLookup,
) -> Result<()> {
    if let Some(default) = lookup.get("user.email") {
        question.default = Some(serde_json::Value::String(default));
    }
    Ok(())
}

/// Records the Plone version flags and returns the answer unchanged.
///
/// # Arguments
/// * `configurator` - Context receiving `plone.is_plone5` and `plone.minor_version`
/// * `answer` - The answer to the Plone version question, e.g. `"5.1"`
///
/// # Returns
/// * `Result<serde_json::Value>` - The answer as given
pub fn post_plone_version(
    configurator: &mut Configurator,
    answer: serde_json::Value,
) -> Result<serde_json::Value> {
    let version = match &answer {
        serde_json::Value::String(version) => version.clone(),
        other => other.to_string(),
    };
    set_plone_version_variables(configurator, &version);
    Ok(answer)
}

/// Sets `plone.is_plone5` and `plone.minor_version` unless already present.
///
/// # Arguments
/// * `configurator` - Context receiving the variables
/// * `version` - Plone version string; `5.1.2` gives `true` and `5.1`
pub fn set_plone_version_variables(configurator: &mut Configurator, version: &str) {
    if !configurator.contains("plone.is_plone5") {
        configurator.set("plone.is_plone5", version.starts_with('5'));
    }
    if !configurator.contains("plone.minor_version") {
        // e.g. 4.3 from 4.3.18, used for the trove classifiers
        let minor_version = version.split('.').take(2).collect::<Vec<_>>().join(".");
        configurator.set("plone.minor_version", minor_version);
    }
    debug!(
        "Plone version '{version}': is_plone5={:?}, minor_version={:?}",
        configurator.get("plone.is_plone5"),
        configurator.get("plone.minor_version")
    );
}

/// Makes sure derived variables exist after all questions were answered,
/// including non-interactive runs where the version question was skipped.
///
/// # Arguments
/// * `configurator` - Context receiving `year` and the version flags
/// * `year` - Value stored as `year`
pub fn post_ask(configurator: &mut Configurator, year: i32) {
    configurator.set("year", year);

    let version = match configurator.get("plone.version") {
        Some(serde_json::Value::String(version)) => version.clone(),
        Some(serde_json::Value::Number(number)) => number.to_string(),
        _ => return,
    };
    if version.is_empty() {
        return;
    }
    set_plone_version_variables(configurator, &version);
}
