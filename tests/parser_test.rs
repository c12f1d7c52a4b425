mod common;

use common::{MapLookup, ScriptedPrompter};
use indexmap::IndexMap;
use plonebake::config::{Manifest, Question};
use plonebake::context::Configurator;
use plonebake::error::Error;
use plonebake::hooks::HookRunner;
use plonebake::parser::{ask_questions, get_default};
use plonebake::renderer::MiniJinjaRenderer;
use serde_json::json;

fn questions() -> IndexMap<String, Question> {
    Manifest::parse(
        r#"
questions:
  author.name:
    help: Author's name
    default: Plone Collective
    pre_ask_question: pre_username
  author.email:
    help: Author's email
    pre_ask_question: pre_email
  package.description:
    help: Description of {{ author.name }}'s package
    default: Made by {{ author.name }}
  plone.version:
    help: Plone version
    default: "5.1"
    required: true
    post_ask_question: post_plone_version
  package.example:
    help: Include example content?
    default: true
    post_ask_question: to_boolean
"#,
    )
    .unwrap()
    .questions
}

#[test]
fn test_non_interactive_uses_defaults() {
    let lookup = MapLookup::with(&[("user.email", "jane@example.org")]);
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&[]);
    let mut configurator = Configurator::new("/tmp/collective.task");

    ask_questions(&mut configurator, &questions(), &hooks, &engine, &prompt, true).unwrap();

    assert!(prompt.asked.borrow().is_empty());
    assert_eq!(configurator.get_str("author.name"), Some("Plone Collective"));
    assert_eq!(configurator.get_str("author.email"), Some("jane@example.org"));
    assert_eq!(configurator.get_str("package.description"), Some("Made by Plone Collective"));
    assert_eq!(configurator.get_str("plone.version"), Some("5.1"));
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(true));
    assert_eq!(configurator.get_bool("package.example"), Some(true));
}

#[test]
fn test_interactive_answers_and_git_defaults() {
    let lookup = MapLookup::with(&[("user.name", "Jane Doe")]);
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&["", "jane@example.org", "", "4.3.18", "no"]);
    let mut configurator = Configurator::new("/tmp/collective.task");

    ask_questions(&mut configurator, &questions(), &hooks, &engine, &prompt, false).unwrap();

    let asked = prompt.asked.borrow();
    assert_eq!(asked[0], ("Author's name".to_string(), "Jane Doe".to_string()));
    assert_eq!(asked[2].0, "Description of Jane Doe's package");
    assert_eq!(asked[4].1, "y");

    assert_eq!(configurator.get_str("author.name"), Some("Jane Doe"));
    assert_eq!(configurator.get_str("author.email"), Some("jane@example.org"));
    assert_eq!(configurator.get_str("package.description"), Some("Made by Jane Doe"));
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(false));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("4.3"));
    assert_eq!(configurator.get_bool("package.example"), Some(false));
}

#[test]
fn test_invalid_boolean_is_asked_again() {
    let lookup = MapLookup::default();
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&["", "", "", "", "maybe", "Y"]);
    let mut configurator = Configurator::new("/tmp/collective.task");

    ask_questions(&mut configurator, &questions(), &hooks, &engine, &prompt, false).unwrap();

    assert_eq!(prompt.asked.borrow().len(), 6);
    assert_eq!(prompt.reports.borrow().len(), 1);
    assert!(prompt.reports.borrow()[0].contains("Value must be a boolean (y/n)"));
    assert_eq!(configurator.get_bool("package.example"), Some(true));
}

#[test]
fn test_invalid_boolean_is_fatal_when_non_interactive() {
    let lookup = MapLookup::default();
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&[]);
    let mut questions = questions();
    questions["package.example"].default = Some(json!("maybe"));
    let mut configurator = Configurator::new("/tmp/collective.task");

    let result = ask_questions(&mut configurator, &questions, &hooks, &engine, &prompt, true);
    match result {
        Err(Error::ValidationError(message)) => assert!(message.starts_with("package.example")),
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_required_question_without_answer_fails() {
    let lookup = MapLookup::default();
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&[]);
    let mut questions = questions();
    questions["plone.version"].default = None;
    let mut configurator = Configurator::new("/tmp/collective.task");

    let result = ask_questions(&mut configurator, &questions, &hooks, &engine, &prompt, true);
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[test]
fn test_preloaded_answers_skip_questions_and_hooks() {
    let lookup = MapLookup::with(&[("user.name", "Jane Doe")]);
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&[]);
    let mut configurator = Configurator::new("/tmp/collective.task");
    configurator.set("author.name", "The Plone Collective");
    configurator.set("plone.version", "5.1");

    ask_questions(&mut configurator, &questions(), &hooks, &engine, &prompt, true).unwrap();

    assert_eq!(configurator.get_str("author.name"), Some("The Plone Collective"));
    assert!(!configurator.contains("plone.is_plone5"));
}

#[test]
fn test_invalid_package_name_stops_before_first_question() {
    let lookup = MapLookup::default();
    let hooks = HookRunner::new(&lookup, 2026);
    let engine = MiniJinjaRenderer::new();
    let prompt = ScriptedPrompter::new(&["x"]);
    let mut configurator = Configurator::new("/tmp/not-a-package");

    let result = ask_questions(&mut configurator, &questions(), &hooks, &engine, &prompt, false);

    assert!(matches!(result, Err(Error::InvalidPackageName { .. })));
    assert!(prompt.asked.borrow().is_empty());
}

#[test]
fn test_get_default_renders_templates() {
    let engine = MiniJinjaRenderer::new();
    let mut configurator = Configurator::new("collective.task");
    configurator.set("author.name", "Jane");
    let mut question = questions()["package.description"].clone();

    assert_eq!(get_default(&question, &configurator, &engine), json!("Made by Jane"));

    question.default = Some(json!(false));
    assert_eq!(get_default(&question, &configurator, &engine), json!(false));

    question.default = None;
    assert_eq!(get_default(&question, &configurator, &engine), json!(""));
}
