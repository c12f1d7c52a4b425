mod common;

use common::MapLookup;
use plonebake::answers::{
    post_ask, post_plone_version, pre_email, pre_username, to_boolean, validate_packagename,
};
use plonebake::config::Question;
use plonebake::context::Configurator;
use plonebake::error::Error;
use plonebake::hooks::{HookRunner, QuestionHook, TemplateHook};
use serde_json::json;

fn question() -> Question {
    Question {
        help: "Author's name".to_string(),
        default: None,
        required: false,
        pre_ask_question: None,
        post_ask_question: None,
    }
}

#[test]
fn test_to_boolean_true_values() {
    for value in ["y", "Y", "yes", "YES", "true", "1"] {
        assert!(to_boolean(&json!(value)).unwrap(), "{value} should be true");
    }
    assert!(to_boolean(&json!(true)).unwrap());
}

#[test]
fn test_to_boolean_false_values() {
    for value in ["n", "N", "no", "false", "0"] {
        assert!(!to_boolean(&json!(value)).unwrap(), "{value} should be false");
    }
    assert!(!to_boolean(&json!(false)).unwrap());
}

#[test]
fn test_to_boolean_rejects_other_values() {
    for value in ["", "maybe", "yess", "2", "on"] {
        assert!(matches!(to_boolean(&json!(value)), Err(Error::ValidationError(_))), "{value}");
    }
}

#[test]
fn test_validate_packagename_accepts_two_and_three_segments() {
    for name in ["collective.task", "plone.app.myaddon", "my-org.my_addon2"] {
        let configurator = Configurator::new(format!("/tmp/{name}"));
        assert!(validate_packagename(&configurator).is_ok(), "{name}");
    }
}

#[test]
fn test_validate_packagename_rejects_invalid_names() {
    for name in ["collective", "a.b.c.d", ".collective.task", "collective.task.", "collective..task", "collective.t@sk", "collective.tâsk"] {
        let configurator = Configurator::new(format!("/tmp/{name}"));
        match validate_packagename(&configurator) {
            Err(Error::InvalidPackageName { name: reported }) => assert_eq!(reported, name),
            other => panic!("expected InvalidPackageName for {name}, got {other:?}"),
        }
    }
}

#[test]
fn test_pre_username_sets_default_from_git() {
    let configurator = Configurator::new("collective.task");
    let lookup = MapLookup::with(&[("user.name", "Jane Doe")]);
    let mut question = question();

    pre_username(&configurator, &mut question, &lookup).unwrap();
    assert_eq!(question.default, Some(json!("Jane Doe")));
}

#[test]
fn test_pre_username_keeps_default_without_git() {
    let configurator = Configurator::new("collective.task");
    let mut question = question();
    question.default = Some(json!("Plone Collective"));

    pre_username(&configurator, &mut question, &MapLookup::default()).unwrap();
    assert_eq!(question.default, Some(json!("Plone Collective")));
}

#[test]
fn test_pre_username_validates_package_name() {
    let configurator = Configurator::new("invalid");
    let lookup = MapLookup::with(&[("user.name", "Jane Doe")]);
    let mut question = question();

    let result = pre_username(&configurator, &mut question, &lookup);
    assert!(matches!(result, Err(Error::InvalidPackageName { .. })));
    assert_eq!(question.default, None);
}

#[test]
fn test_pre_email_sets_default_from_git() {
    let configurator = Configurator::new("collective.task");
    let lookup = MapLookup::with(&[("user.email", "jane@example.org")]);
    let mut question = question();

    pre_email(&configurator, &mut question, &lookup).unwrap();
    assert_eq!(question.default, Some(json!("jane@example.org")));
}

#[test]
fn test_post_plone_version() {
    let mut configurator = Configurator::new("collective.task");
    let answer = post_plone_version(&mut configurator, json!("5.0.8")).unwrap();

    assert_eq!(answer, json!("5.0.8"));
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(true));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("5.0"));

    let mut configurator = Configurator::new("collective.task");
    post_plone_version(&mut configurator, json!("4.3.18")).unwrap();
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(false));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("4.3"));
}

#[test]
fn test_version_flags_are_never_overwritten() {
    let mut configurator = Configurator::new("collective.task");
    configurator.set("plone.is_plone5", false);
    configurator.set("plone.minor_version", "4.3");

    post_plone_version(&mut configurator, json!("5.1")).unwrap();
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(false));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("4.3"));

    configurator.set("plone.version", "5.1");
    post_ask(&mut configurator, 2026);
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(false));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("4.3"));
}

#[test]
fn test_post_ask_sets_year_and_version_flags() {
    let mut configurator = Configurator::new("collective.task");
    post_ask(&mut configurator, 2026);
    assert_eq!(configurator.get("year"), Some(&json!(2026)));
    assert!(!configurator.contains("plone.is_plone5"));

    configurator.set("plone.version", "5.1.2");
    post_ask(&mut configurator, 2026);
    assert_eq!(configurator.get_bool("plone.is_plone5"), Some(true));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("5.1"));
}

#[test]
fn test_post_ask_ignores_empty_version() {
    let mut configurator = Configurator::new("collective.task");
    configurator.set("plone.version", "");
    post_ask(&mut configurator, 2026);
    assert!(!configurator.contains("plone.is_plone5"));
    assert!(!configurator.contains("plone.minor_version"));
}

#[test]
fn test_runner_rejects_hooks_in_wrong_position() {
    let lookup = MapLookup::default();
    let runner = HookRunner::new(&lookup, 2026);
    let mut configurator = Configurator::new("collective.task");
    let mut question = question();

    assert!(QuestionHook::PreEmail.is_pre_ask());
    assert!(!QuestionHook::ToBoolean.is_pre_ask());
    assert!(matches!(
        runner.run_pre_ask(QuestionHook::ToBoolean, &configurator, &mut question),
        Err(Error::HookError(_))
    ));
    assert!(matches!(
        runner.run_post_ask(QuestionHook::PreUsername, &mut configurator, json!("x")),
        Err(Error::HookError(_))
    ));
}

#[test]
fn test_runner_dispatches_template_hooks() {
    let lookup = MapLookup::default();
    let runner = HookRunner::new(&lookup, 2030);
    let mut configurator = Configurator::new("/tmp/collective.task");
    configurator.set("plone.version", "6.0");

    runner
        .run_template_hooks(&[TemplateHook::PostAsk, TemplateHook::PrepareRender], &mut configurator)
        .unwrap();

    assert_eq!(configurator.get("year"), Some(&json!(2030)));
    assert_eq!(configurator.get_str("plone.minor_version"), Some("6.0"));
    assert_eq!(configurator.get_str("package.dottedname"), Some("collective.task"));
}

#[test]
fn test_runner_post_ask_to_boolean() {
    let lookup = MapLookup::default();
    let runner = HookRunner::new(&lookup, 2026);
    let mut configurator = Configurator::new("collective.task");

    let answer = runner.run_post_ask(QuestionHook::ToBoolean, &mut configurator, json!("Yes")).unwrap();
    assert_eq!(answer, json!(true));
}
