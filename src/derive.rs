//! Template variables derived from the package name.
//!
//! A package name is the final segment of the target directory, made of two
//! (`collective.myaddon`) or three (`plone.app.myaddon`) dot-separated parts.
//! Everything the templates need to name modules, classes and paths is
//! computed from it here.

use crate::context::Configurator;
use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static PACKAGE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid package name pattern"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// A validated dotted package identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    pub namespace: String,
    pub namespace2: Option<String>,
    pub name: String,
}

impl PackageName {
    /// Parses and validates a package name.
    ///
    /// # Errors
    /// * `Error::InvalidPackageName` if the name contains characters other
    ///   than ASCII letters, digits, `.`, `-` and `_`, starts or ends with a
    ///   dot, has an empty segment (`collective..task`), or does not have two
    ///   or three segments
    pub fn parse(package_dir: &str) -> Result<Self> {
        let invalid = || Error::InvalidPackageName { name: package_dir.to_string() };

        if !PACKAGE_CHARS.is_match(package_dir) {
            return Err(invalid());
        }
        if package_dir.starts_with('.') || package_dir.ends_with('.') {
            return Err(invalid());
        }

        let parts: Vec<&str> = package_dir.split('.').collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(invalid());
        }
        match parts.as_slice() {
            [namespace, name] => Ok(Self {
                namespace: namespace.to_string(),
                namespace2: None,
                name: name.to_string(),
            }),
            [namespace, namespace2, name] => Ok(Self {
                namespace: namespace.to_string(),
                namespace2: Some(namespace2.to_string()),
                name: name.to_string(),
            }),
            _ => Err(invalid()),
        }
    }

    pub fn is_nested(&self) -> bool {
        self.namespace2.is_some()
    }

    pub fn dotted_name(&self) -> String {
        match &self.namespace2 {
            Some(namespace2) => format!("{}.{}.{}", self.namespace, namespace2, self.name),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }
}

/// Names derived from a [`PackageName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingSet {
    pub nested: bool,
    pub namespace: String,
    /// Empty for flat packages.
    pub namespace2: String,
    pub name: String,
    /// `collective.foo.something`
    pub dotted_name: String,
    /// `COLLECTIVE_FOO_SOMETHING`
    pub uppercase_name: String,
    /// `CollectiveFooSomething`
    pub camelcase_name: String,
    /// `CollectiveFooSomethingLayer`
    pub browser_layer: String,
    /// `collectivefoosomething`
    pub long_name: String,
    /// `collective/foo/something`
    pub directories: String,
    /// `'collective', 'collective.foo'`
    pub namespace_packages: String,
}

impl NamingSet {
    pub fn new(package: &PackageName) -> Self {
        let dotted_name = package.dotted_name();
        let uppercase_name = dotted_name.replace('.', "_").to_uppercase();
        let camelcase_name = title_case(&dotted_name.replace(['.', '_'], " ")).replace(' ', "");
        let browser_layer = format!("{camelcase_name}Layer");
        let long_name = camelcase_name.to_lowercase();
        let directories = dotted_name.replace('.', "/");
        let namespace_packages = match &package.namespace2 {
            Some(namespace2) => format!("'{0}', '{0}.{1}'", package.namespace, namespace2),
            None => format!("'{}'", package.namespace),
        };

        Self {
            nested: package.is_nested(),
            namespace: package.namespace.clone(),
            namespace2: package.namespace2.clone().unwrap_or_default(),
            name: package.name.clone(),
            dotted_name,
            uppercase_name,
            camelcase_name,
            browser_layer,
            long_name,
            directories,
            namespace_packages,
        }
    }
}

/// Upper-cases every letter that follows a non-letter and lower-cases the
/// rest: `"collective foo 3d"` becomes `"Collective Foo 3D"`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}

/// `My_Theme Name` becomes `my-theme-name`.
pub fn normalize_theme_name(value: &str) -> String {
    let value = value.split('_').collect::<Vec<_>>().join("-");
    WHITESPACE.replace_all(value.trim(), "-").to_lowercase()
}

/// Stores the derived naming set and the normalized theme name in the
/// configurator variables.
///
/// # Arguments
/// * `configurator` - Context whose `target_directory` names the package;
///   `theme.name` is read from its variables when present
///
/// # Returns
/// * `Result<NamingSet>` - The names that were stored
///
/// # Errors
/// * `Error::InvalidPackageName` if the target directory name is not a valid
///   package name
pub fn prepare_render(configurator: &mut Configurator) -> Result<NamingSet> {
    let package = PackageName::parse(&configurator.package_dir())?;
    let names = NamingSet::new(&package);

    debug!("Deriving variables for package '{}'", names.dotted_name);

    configurator.set("package.nested", names.nested);
    configurator.set("package.namespace", names.namespace.as_str());
    configurator.set("package.namespace2", names.namespace2.as_str());
    configurator.set("package.name", names.name.as_str());
    configurator.set("package.dottedname", names.dotted_name.as_str());
    configurator.set("package.uppercasename", names.uppercase_name.as_str());
    configurator.set("package.browserlayer", names.browser_layer.as_str());
    configurator.set("package.longname", names.long_name.as_str());
    configurator.set("jenkins.directories", names.directories.as_str());
    configurator.set("package.namespace_packages", names.namespace_packages.as_str());

    let theme_name = match configurator.get_str("theme.name") {
        Some(theme) if !theme.is_empty() => normalize_theme_name(theme),
        _ => String::new(),
    };
    configurator.set("theme.normalized_name", theme_name);

    Ok(names)
}
