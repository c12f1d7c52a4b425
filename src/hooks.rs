//! Hook registry and dispatch.
//!
//! Templates name the hooks they want in their manifest. Question hooks run
//! before (`pre_ask_question`) or after (`post_ask_question`) a single
//! question; template hooks run at the `post_ask`, `pre_render` and
//! `post_render` stages.

use crate::answers::{self, GitConfigLookup};
use crate::cleanup::cleanup_package;
use crate::config::Question;
use crate::context::Configurator;
use crate::derive::prepare_render;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::PathBuf;

/// Hooks attached to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionHook {
    /// Validates the package name and defaults to the git `user.name`
    PreUsername,
    /// Defaults to the git `user.email`
    PreEmail,
    /// Coerces the answer to a boolean
    ToBoolean,
    /// Derives `plone.is_plone5` and `plone.minor_version`
    PostPloneVersion,
}

impl QuestionHook {
    pub fn is_pre_ask(&self) -> bool {
        matches!(self, QuestionHook::PreUsername | QuestionHook::PreEmail)
    }
}

/// Hooks attached to a template lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateHook {
    PostAsk,
    PrepareRender,
    CleanupPackage,
}

/// Runs hooks against a configurator.
pub struct HookRunner<'a> {
    lookup: &'a dyn GitConfigLookup,
    year: i32,
    to_delete: Vec<PathBuf>,
}

impl<'a> HookRunner<'a> {
    /// Creates a runner with nothing to delete during cleanup.
    ///
    /// # Arguments
    /// * `lookup` - Git configuration used by the pre-ask hooks
    /// * `year` - Value `post_ask` stores as `year`
    pub fn new(lookup: &'a dyn GitConfigLookup, year: i32) -> Self {
        Self { lookup, year, to_delete: Vec::new() }
    }

    /// Paths, relative to the target directory, removed by `cleanup_package`.
    pub fn with_deletions(mut self, to_delete: Vec<PathBuf>) -> Self {
        self.to_delete = to_delete;
        self
    }

    /// Runs a hook before a question is asked.
    ///
    /// # Errors
    /// * `Error::HookError` if `hook` is a post-ask hook
    /// * Any error of the hook itself, e.g. `Error::InvalidPackageName`
    pub fn run_pre_ask(
        &self,
        hook: QuestionHook,
        configurator: &Configurator,
        question: &mut Question,
    ) -> Result<()> {
        debug!("Running pre-ask hook {hook:?}");
        match hook {
            QuestionHook::PreUsername => answers::pre_username(configurator, question, self.lookup),
            QuestionHook::PreEmail => answers::pre_email(configurator, question, self.lookup),
            other => Err(Error::HookError(format!("{other:?} cannot run before a question"))),
        }
    }

    /// Runs a hook on an answer and returns the (possibly converted) answer.
    ///
    /// # Errors
    /// * `Error::HookError` if `hook` is a pre-ask hook
    /// * `Error::ValidationError` if the answer is rejected
    pub fn run_post_ask(
        &self,
        hook: QuestionHook,
        configurator: &mut Configurator,
        answer: serde_json::Value,
    ) -> Result<serde_json::Value> {
        debug!("Running post-ask hook {hook:?}");
        match hook {
            QuestionHook::ToBoolean => answers::to_boolean(&answer).map(serde_json::Value::Bool),
            QuestionHook::PostPloneVersion => answers::post_plone_version(configurator, answer),
            other => Err(Error::HookError(format!("{other:?} cannot run after a question"))),
        }
    }

    /// Runs a single template hook.
    ///
    /// # Errors
    /// * `Error::InvalidPackageName` from `prepare_render`
    /// * `Error::ConfigError` and `Error::IoError` from `cleanup_package`
    pub fn run_template_hook(&self, hook: TemplateHook, configurator: &mut Configurator) -> Result<()> {
        debug!("Running template hook {hook:?}");
        match hook {
            TemplateHook::PostAsk => {
                answers::post_ask(configurator, self.year);
                Ok(())
            }
            TemplateHook::PrepareRender => prepare_render(configurator).map(|_| ()),
            TemplateHook::CleanupPackage => cleanup_package(configurator, &self.to_delete),
        }
    }

    /// Runs template hooks in order, stopping at the first error.
    pub fn run_template_hooks(&self, hooks: &[TemplateHook], configurator: &mut Configurator) -> Result<()> {
        for hook in hooks {
            self.run_template_hook(*hook, configurator)?;
        }
        Ok(())
    }
}
