//! Maps template entries to files in the target directory.

use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    prompt::Prompter,
    renderer::TemplateRenderer,
};

/// Suffix marking files whose content is rendered
pub const TEMPLATE_SUFFIX: &str = ".j2";

#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Copy the source file unchanged
    Copy { target: PathBuf },
    /// Write rendered content
    Write { target: PathBuf, content: String },
    /// Create a directory
    CreateDirectory { target: PathBuf },
}

#[derive(Debug)]
pub struct ProcessResult {
    pub source: PathBuf,
    /// `None` when the entry needs no work (ignored or declined overwrite)
    pub operation: Option<FileOperation>,
    pub action: &'static str,
}

/// Checks whether `output_dir` can be generated into.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if it exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError { output_dir: output_dir.display().to_string() });
    }
    Ok(output_dir.to_path_buf())
}

/// Template files have at least two extensions, the last one being `j2`,
/// e.g. `setup.py.j2`.
pub fn is_jinja_template(filename: &str) -> bool {
    let parts: Vec<&str> = filename.split('.').collect();
    parts.len() > 2 && parts.last() == Some(&"j2")
}

/// Rendered paths with empty components come from conditional names that
/// evaluated to nothing (`{% if x %}name{% endif %}/file`) and are skipped.
pub fn is_rendered_path_valid(rendered: &str) -> bool {
    !rendered.trim().is_empty() && rendered.split(['/', '\\']).all(|part| !part.trim().is_empty())
}

/// Joins `rendered` onto `target_dir`, stripping the template suffix.
/// Returns the path and whether the content must be rendered.
pub fn resolve_target_path<P: AsRef<Path>>(rendered: &str, target_dir: P) -> (PathBuf, bool) {
    let target_dir = target_dir.as_ref();
    let rendered_path = Path::new(rendered);

    match rendered_path.file_name().and_then(|n| n.to_str()) {
        Some(filename) if is_jinja_template(filename) => {
            let new_name = filename.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(filename);
            (target_dir.join(rendered_path.with_file_name(new_name)), true)
        }
        _ => (target_dir.join(rendered_path), false),
    }
}

pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    template_root: &'a Path,
    output_root: &'a Path,
    skip_overwrite_check: bool,
    context: &'a serde_json::Value,
    ignored_patterns: &'a GlobSet,
}

impl<'a> Processor<'a> {
    /// Creates a processor for one generation run.
    ///
    /// # Arguments
    /// * `engine` - Renderer for paths and `.j2` contents
    /// * `prompt` - Asks before overwriting existing files
    /// * `template_root` - Template directory being walked
    /// * `output_root` - Target directory receiving the files
    /// * `skip_overwrite_check` - Overwrite existing files without asking
    /// * `context` - Template context built from the variables
    /// * `ignored_patterns` - Template-relative paths to skip
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        prompt: &'a dyn Prompter,
        template_root: &'a Path,
        output_root: &'a Path,
        skip_overwrite_check: bool,
        context: &'a serde_json::Value,
        ignored_patterns: &'a GlobSet,
    ) -> Self {
        Self { engine, prompt, template_root, output_root, skip_overwrite_check, context, ignored_patterns }
    }

    fn process_error(&self, source: &Path, e: impl std::fmt::Display) -> Error {
        Error::ProcessError { source_path: source.display().to_string(), e: e.to_string() }
    }

    /// Decides what to do with one entry of the template directory.
    ///
    /// # Errors
    /// * `Error::ProcessError` for entries that are skipped with a warning
    /// * Rendering and IO errors otherwise
    pub fn process(&self, template_entry: &Path) -> Result<ProcessResult> {
        let skipped = ProcessResult { source: template_entry.to_path_buf(), operation: None, action: "Skipping" };

        let relative = template_entry
            .strip_prefix(self.template_root)
            .map_err(|e| self.process_error(template_entry, e))?;
        if relative.as_os_str().is_empty() {
            return Ok(skipped);
        }
        let relative = relative
            .to_str()
            .ok_or_else(|| self.process_error(template_entry, "path is not valid UTF-8"))?;

        if self.ignored_patterns.is_match(relative) {
            debug!("Skipping '{relative}', matched an ignore pattern");
            return Ok(skipped);
        }

        let rendered = self.engine.render(relative, self.context)?;
        if !is_rendered_path_valid(&rendered) {
            return Err(self.process_error(template_entry, format!("rendered path '{rendered}' is empty")));
        }

        let (target, is_template) = resolve_target_path(&rendered, self.output_root);

        if template_entry.is_dir() {
            debug!("Creating directory {}", target.display());
            return Ok(ProcessResult {
                source: template_entry.to_path_buf(),
                operation: Some(FileOperation::CreateDirectory { target }),
                action: "Creating",
            });
        }

        if target.exists() {
            let overwrite = self.prompt.confirm(
                self.skip_overwrite_check,
                format!("'{}' already exists. Overwrite?", target.display()),
            )?;
            if !overwrite {
                return Ok(skipped);
            }
        }

        if is_template {
            debug!("Writing file {}", target.display());
            let content = fs::read_to_string(template_entry)?;
            let content = self.engine.render(&content, self.context)?;
            Ok(ProcessResult {
                source: template_entry.to_path_buf(),
                operation: Some(FileOperation::Write { target, content }),
                action: "Writing",
            })
        } else {
            debug!("Copying file {}", target.display());
            Ok(ProcessResult {
                source: template_entry.to_path_buf(),
                operation: Some(FileOperation::Copy { target }),
                action: "Copying",
            })
        }
    }
}

/// Performs a file operation produced by [`Processor::process`].
pub fn apply_operation(source: &Path, operation: &FileOperation) -> Result<PathBuf> {
    match operation {
        FileOperation::CreateDirectory { target } => {
            fs::create_dir_all(target)?;
            Ok(target.clone())
        }
        FileOperation::Copy { target } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, target)?;
            Ok(target.clone())
        }
        FileOperation::Write { target, content } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, content)?;
            Ok(target.clone())
        }
    }
}
