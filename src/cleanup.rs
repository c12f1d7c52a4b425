//! Post-render restructuring of the generated package.
//!
//! Templates only know a single namespace level, so a package named
//! `collective.behavior.myaddon` is rendered as `src/collective/myaddon`.
//! `cleanup_package` inserts the second namespace directory, giving
//! `src/collective/behavior/myaddon`, and then removes unwanted paths.

use crate::context::Configurator;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Namespace package marker copied into the inserted directory
pub const NAMESPACE_INIT: &str = "__init__.py";

fn required_str<'a>(configurator: &'a Configurator, key: &str) -> Result<&'a str> {
    configurator.get_str(key).ok_or_else(|| {
        Error::ConfigError(format!("'{key}' is not set, run prepare_render before cleanup_package"))
    })
}

/// Turns the rendered package into a nested package when needed, then
/// removes unwanted paths.
///
/// # Arguments
/// * `configurator` - Context holding the variables set by `prepare_render`
/// * `to_delete` - Paths relative to the target directory, removed when present
///
/// # Returns
/// * `Result<()>` - Success once the tree has its final layout
///
/// # Errors
/// * `Error::ConfigError` if the derived package variables are missing
/// * `Error::IoError` on any filesystem failure, including a namespace marker
///   that would be copied onto itself or a destination package that already
///   exists. Nothing is rolled back.
pub fn cleanup_package(configurator: &Configurator, to_delete: &[PathBuf]) -> Result<()> {
    let nested = configurator.get_bool("package.nested").unwrap_or(false);
    let namespace = required_str(configurator, "package.namespace")?;
    let name = required_str(configurator, "package.name")?;

    // .../src/collective
    let start_path = configurator.target_directory.join("src").join(namespace);
    // .../src/collective/myaddon
    let base_path = start_path.join(name);

    if nested {
        let namespace2 = required_str(configurator, "package.namespace2")?;

        // .../src/collective/behavior
        let new_path = start_path.join(namespace2);
        if !new_path.exists() {
            debug!("Creating namespace directory {}", new_path.display());
            fs::create_dir_all(&new_path)?;
        }

        copy_file(&start_path.join(NAMESPACE_INIT), &new_path.join(NAMESPACE_INIT))?;

        // .../src/collective/behavior/myaddon
        let nested_path = new_path.join(name);
        debug!("Moving {} to {}", base_path.display(), nested_path.display());
        move_dir(&base_path, &nested_path)?;
    }

    for path in to_delete {
        let path = configurator.target_directory.join(path);
        if path.is_dir() {
            debug!("Removing directory {}", path.display());
            fs::remove_dir_all(&path)?;
        } else if path.exists() {
            debug!("Removing file {}", path.display());
            fs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// Copies `source` to `dest`. Copying a file onto itself would truncate it,
/// so that is an error.
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if dest.exists() && fs::canonicalize(source)? == fs::canonicalize(dest)? {
        return Err(Error::IoError(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' and '{}' are the same file", source.display(), dest.display()),
        )));
    }
    fs::copy(source, dest)?;
    Ok(())
}

/// Renames `source` to `dest`. Only a rename across filesystems falls back
/// to copy and remove; every other failure is returned.
fn move_dir(source: &Path, dest: &Path) -> Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Cannot rename across filesystems ({e}), copying instead");
        }
        Err(e) => return Err(Error::IoError(e)),
    }

    if dest.exists() {
        return Err(Error::IoError(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", dest.display()),
        )));
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    fs::remove_dir_all(source)?;
    Ok(())
}
