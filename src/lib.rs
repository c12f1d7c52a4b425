//! plonebake generates boilerplate packages for Plone add-ons.
//! It asks a handful of questions, derives naming variables from the
//! package name, renders a template directory and reshapes the result into a
//! nested-namespace package when needed.

/// Hooks run before and after individual questions
pub mod answers;

/// Post-render restructuring of the generated package
pub mod cleanup;

/// Command-line interface module
pub mod cli;

/// Template manifest (bake.json, bake.yml, bake.yaml) and answers files
pub mod config;

/// Mutable context shared by all hooks
pub mod context;

/// Naming variables derived from the package name
pub mod derive;

/// Error types and handling
pub mod error;

/// Hook registry and dispatch
pub mod hooks;

/// .bakeignore processing
pub mod ignore;

/// Question runner
pub mod parser;

/// Mapping of template entries to target files
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering
pub mod renderer;

use std::path::Path;

use log::{error, warn};
use walkdir::WalkDir;

use crate::config::Manifest;
use crate::context::Configurator;
use crate::error::{Error, Result};
use crate::hooks::HookRunner;
use crate::processor::{apply_operation, Processor};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;

/// Options for a single generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub non_interactive: bool,
    pub skip_overwrite_check: bool,
}

/// Runs the whole scaffolding lifecycle: questions, `post_ask` hooks,
/// `pre_render` hooks, rendering and `post_render` hooks.
///
/// `configurator` carries the target directory and any preloaded answers;
/// it holds every variable once this returns.
///
/// # Flow
/// 1. Loads the template manifest
/// 2. Asks questions (with pre/post question hooks)
/// 3. Runs `post_ask` and `pre_render` hooks
/// 4. Renders template files into the target directory
/// 5. Runs `post_render` hooks
pub fn generate(
    template_root: &Path,
    configurator: &mut Configurator,
    hooks: HookRunner,
    engine: &dyn TemplateRenderer,
    prompt: &dyn Prompter,
    options: &GenerateOptions,
) -> Result<()> {
    if !template_root.is_dir() {
        return Err(Error::TemplateDoesNotExistsError { template_dir: template_root.display().to_string() });
    }
    let manifest = Manifest::load(template_root)?;
    let hooks = hooks.with_deletions(manifest.cleanup.delete.clone());

    parser::ask_questions(
        configurator,
        &manifest.questions,
        &hooks,
        engine,
        prompt,
        options.non_interactive,
    )?;

    hooks.run_template_hooks(&manifest.hooks.post_ask, configurator)?;
    hooks.run_template_hooks(&manifest.hooks.pre_render, configurator)?;

    let ignored_patterns = ignore::parse_bakeignore_file(template_root)?;
    let context = configurator.to_context();
    let output_root = configurator.target_directory.clone();
    let processor = Processor::new(
        engine,
        prompt,
        template_root,
        &output_root,
        options.skip_overwrite_check,
        &context,
        &ignored_patterns,
    );

    for dir_entry in WalkDir::new(template_root).sort_by_file_name() {
        let raw_entry = dir_entry.map_err(|e| Error::TemplateError(e.to_string()))?;
        match processor.process(raw_entry.path()) {
            Ok(result) => {
                if let Some(operation) = &result.operation {
                    let target = apply_operation(&result.source, operation)?;
                    println!("{}: '{}'", result.action, target.display());
                }
            }
            Err(e @ Error::ProcessError { .. }) => warn!("{e}"),
            Err(e) => {
                error!("{e}");
                return Err(e);
            }
        }
    }

    hooks.run_template_hooks(&manifest.hooks.post_render, configurator)?;
    Ok(())
}
