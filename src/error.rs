//! Error handling for plonebake.
//! Defines the error type and result alias used throughout the application.

use thiserror::Error;

/// Errors that can occur while scaffolding a package.
///
/// `ValidationError` is the only recoverable variant: the question runner
/// re-asks the question when it sees one in interactive mode. Everything else
/// aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Errors that occur while rendering templates
    #[error("Template error: {0}.")]
    TemplateError(String),

    #[error(transparent)]
    MinijinjaError(#[from] minijinja::Error),

    /// Errors in the template manifest or the answers file
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Failed to parse YAML: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// An answer was rejected by a post-ask hook
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The target directory name cannot be used as a package name
    #[error(
        "Error: '{name}' is not a valid packagename.\nPlease use a valid name (like collective.myaddon or plone.app.myaddon)"
    )]
    InvalidPackageName { name: String },

    /// A hook was misconfigured or misused
    #[error("Hook execution error: {0}.")]
    HookError(String),

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// A single template entry could not be processed; the run continues
    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: String, e: String },

    #[error("Failed to parse .bakeignore file. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
