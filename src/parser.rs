use crate::config::Question;
use crate::context::Configurator;
use crate::error::{Error, Result};
use crate::hooks::HookRunner;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use indexmap::IndexMap;
use log::debug;

/// Renders a question's default against the answers collected so far.
/// Non-string defaults are used as-is.
pub fn get_default(
    question: &Question,
    configurator: &Configurator,
    engine: &dyn TemplateRenderer,
) -> serde_json::Value {
    match &question.default {
        Some(serde_json::Value::String(s)) => {
            let rendered = engine.render(s, &configurator.to_context()).unwrap_or_else(|e| {
                debug!("Cannot render default '{s}': {e}");
                s.clone()
            });
            serde_json::Value::String(rendered)
        }
        Some(value) => value.clone(),
        None => serde_json::Value::String(String::new()),
    }
}

fn default_as_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(true) => "y".to_string(),
        serde_json::Value::Bool(false) => "n".to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_empty_answer(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Asks every question in order and stores the answers in the configurator.
///
/// Questions whose variable is already set (e.g. from an answers file) are
/// skipped together with their hooks. In non-interactive mode every question
/// takes its default; a rejected answer is then fatal instead of re-asked.
///
/// # Arguments
/// * `configurator` - Context receiving the answers under each question's `name`
/// * `questions` - Questions in the order they are asked
/// * `hooks` - Runs the pre and post-ask hooks named by each question
/// * `engine` - Renders defaults against the answers so far
/// * `prompt` - Reads answers from the user
/// * `non_interactive` - Take every default without asking
///
/// # Returns
/// * `Result<()>` - Success once every question has an answer
///
/// # Errors
/// * Any error from a pre-ask hook, e.g. `Error::InvalidPackageName`
/// * `Error::ValidationError` in non-interactive mode
pub fn ask_questions(
    configurator: &mut Configurator,
    questions: &IndexMap<String, Question>,
    hooks: &HookRunner,
    engine: &dyn TemplateRenderer,
    prompt: &dyn Prompter,
    non_interactive: bool,
) -> Result<()> {
    for (key, question) in questions {
        if configurator.contains(key) {
            debug!("Skipping question '{key}', answer already provided");
            continue;
        }

        let mut question = question.clone();
        if let Some(hook) = question.pre_ask_question {
            hooks.run_pre_ask(hook, configurator, &mut question)?;
        }

        let answer = ask_question(key, &question, configurator, hooks, engine, prompt, non_interactive)?;
        debug!("Answer for '{key}': {answer}");
        configurator.set(key.as_str(), answer);
    }
    Ok(())
}

fn ask_question(
    key: &str,
    question: &Question,
    configurator: &mut Configurator,
    hooks: &HookRunner,
    engine: &dyn TemplateRenderer,
    prompt: &dyn Prompter,
    non_interactive: bool,
) -> Result<serde_json::Value> {
    let help = engine
        .render(&question.help, &configurator.to_context())
        .unwrap_or_else(|_| question.help.clone());
    let help = if help.is_empty() { key.to_string() } else { help };

    loop {
        let default = get_default(question, configurator, engine);
        let answer = if non_interactive {
            default
        } else {
            let input = prompt.ask(&help, &default_as_text(&default))?;
            if input.is_empty() { default } else { serde_json::Value::String(input) }
        };

        let result = if question.required && is_empty_answer(&answer) {
            Err(Error::ValidationError(format!("'{key}' is required")))
        } else {
            match question.post_ask_question {
                Some(hook) => hooks.run_post_ask(hook, configurator, answer),
                None => Ok(answer),
            }
        };

        match result {
            Err(Error::ValidationError(message)) if !non_interactive => {
                prompt.report(&format!("Validation error: {message}."));
            }
            Err(Error::ValidationError(message)) => {
                return Err(Error::ValidationError(format!("{key}: {message}")));
            }
            other => return other,
        }
    }
}
