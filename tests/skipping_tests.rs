mod common;

use common::fixtures::{BadBeginAction, BadEndAction, HelloAction, NopAction, RecordingAction, SkipAction, TouchAction};
use common::{TestResult, calls, configure, new_trace};
use joran::{ErrorLevel, Flow, RuleStore};
use std::sync::Arc;

fn base_rules() -> RuleStore {
    let mut rules = RuleStore::new();
    rules.add_rule("test", Arc::new(NopAction));
    rules.add_rule("test/hello", Arc::new(HelloAction));
    rules
}

#[test]
fn test_children_skipping() -> TestResult {
    let mut rules = base_rules();
    rules.add_rule("test/badBegin", Arc::new(BadBeginAction));
    rules.add_rule("test/badBegin/touch", Arc::new(TouchAction));

    let (ctx, outcome) = configure(
        rules,
        r#"<test>
  <badBegin>
    <touch/>
    <touch/>
  </badBegin>
  <hello name="John Doe"/>
</test>"#,
    );
    outcome?;

    assert_eq!(ctx.get_object::<String>(HelloAction::KEY).map(String::as_str), Some("Hello John Doe."));
    assert_eq!(TouchAction::count(&ctx), 0);

    let errors = ctx.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, ErrorLevel::Error);
    assert_eq!(errors[0].message, "Exception in Action for tag <badBegin>");
    assert_eq!(errors[0].location.map(|l| l.line), Some(2));
    Ok(())
}

#[test]
fn test_skip_siblings() -> TestResult {
    let mut rules = base_rules();
    rules.add_rule("test/badEnd", Arc::new(BadEndAction));
    rules.add_rule("test/badEnd/touch", Arc::new(TouchAction));

    let (ctx, outcome) = configure(
        rules,
        r#"<test>
  <badEnd>
    <touch/>
    <touch/>
  </badEnd>
  <hello name="John Doe"/>
</test>"#,
    );
    outcome?;

    assert!(!ctx.contains_object(HelloAction::KEY));
    assert_eq!(TouchAction::count(&ctx), 2);
    assert!(ctx.has_errors());
    Ok(())
}

#[test]
fn test_skip_siblings_is_confined_to_the_parent() -> TestResult {
    let mut rules = base_rules();
    rules.add_rule("test/isolate", Arc::new(NopAction));
    rules.add_rule("*/badEnd", Arc::new(BadEndAction));
    rules.add_rule("test/isolate/hello", Arc::new(HelloAction));
    rules.add_rule("*/touch", Arc::new(TouchAction));

    let (ctx, outcome) = configure(
        rules,
        r#"<test>
  <isolate>
    <badEnd/>
    <touch/>
    <hello name="Jane Doe"/>
  </isolate>
  <touch/>
  <hello name="John Doe"/>
</test>"#,
    );
    outcome?;

    assert_eq!(ctx.get_object::<String>(HelloAction::KEY).map(String::as_str), Some("Hello John Doe."));
    assert_eq!(TouchAction::count(&ctx), 1);
    Ok(())
}

#[test]
fn test_skip_children_suppresses_only_the_subtree() -> TestResult {
    let trace = new_trace();
    let mut rules = RuleStore::new();
    rules.add_rule("cfg", RecordingAction::shared("C", &trace));
    rules.add_rule("cfg/appender", Arc::new(SkipAction(Flow::SkipChildren)));
    rules.add_rule("cfg/appender", RecordingAction::shared("A", &trace));
    rules.add_rule("*/param", RecordingAction::shared("P", &trace));

    let (_ctx, outcome) = configure(
        rules,
        r#"<cfg>
  <param name="before"/>
  <appender>
    <param name="inside"/>
    <layout><param name="deep"/></layout>
  </appender>
  <param name="after"/>
</cfg>"#,
    );
    outcome?;

    assert_eq!(
        calls(&trace),
        [
            "C.begin(cfg)",
            "P.begin(param)",
            "P.end(param)",
            "P.begin(param)",
            "P.end(param)",
            "C.end(cfg)",
            "C.finish",
            "A.finish",
            "P.finish",
        ]
    );
    Ok(())
}

#[test]
fn test_skip_at_document_root() -> TestResult {
    let trace = new_trace();
    let mut rules = RuleStore::new();
    rules.add_rule("cfg", Arc::new(SkipAction(Flow::SkipSiblings)));
    rules.add_rule("cfg/logger", RecordingAction::shared("L", &trace));

    let (ctx, outcome) = configure(rules, "<cfg><logger/><logger/></cfg>");
    outcome?;

    // The parent of the root is the empty pattern, which never closes.
    assert_eq!(calls(&trace), ["L.finish"]);
    assert!(ctx.errors().is_empty());
    Ok(())
}

#[test]
fn test_unmatched_elements_warn_and_descend() -> TestResult {
    let trace = new_trace();
    let mut rules = RuleStore::new();
    rules.add_rule("cfg", RecordingAction::shared("C", &trace));
    rules.add_rule("cfg/unknown/inner", RecordingAction::shared("I", &trace));

    let (ctx, outcome) = configure(rules, "<cfg>\n<unknown>\n<inner/>\n</unknown>\n</cfg>");
    outcome?;

    assert_eq!(
        calls(&trace),
        ["C.begin(cfg)", "I.begin(inner)", "I.end(inner)", "C.end(cfg)", "C.finish", "I.finish"]
    );
    let errors = ctx.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].level, ErrorLevel::Warning);
    assert_eq!(
        errors[0].message,
        "no applicable action for <unknown>, current pattern is [/cfg/unknown]"
    );
    assert_eq!(errors[0].location.map(|l| l.line), Some(2));
    Ok(())
}
