//! Integration tests for plainview selectors over a store snapshot

use plainview::prelude::*;
use plainview::SelectorError;
use serde_json::json;
use std::sync::Arc;

fn initial_state() -> Value {
    Value::from(json!({
        "todos": [
            {"id": 1, "title": "write selectors", "done": false},
            {"id": 2, "title": "test selectors", "done": true}
        ],
        "filter": "all",
        "user": {"name": "ada", "admin": false},
        "drafts": null
    }))
}

fn field(name: &'static str) -> Selector<Value, Value> {
    Selector::new(move |s: &Value| s.get_in(&[Key::from(name)]))
}

#[test]
fn test_full_pipeline() {
    let todos = field("todos");
    let first_title = create_get_selector(create_get_selector(todos.clone(), 0), "title");
    let view = create_props_selector([
        ("todos", todos),
        ("first_title", first_title),
        ("filter", field("filter")),
        ("drafts", field("drafts")),
    ]);

    let props = view.select(&initial_state()).unwrap();

    assert_eq!(
        props["todos"].as_plain(),
        Some(&json!([
            {"id": 1, "title": "write selectors", "done": false},
            {"id": 2, "title": "test selectors", "done": true}
        ]))
    );
    assert_eq!(props["first_title"], Value::from("write selectors"));
    assert_eq!(props["filter"], Value::from("all"));
    assert_eq!(props["drafts"], Value::Null);

    insta::assert_snapshot!(
        serde_json::to_string(&*props).unwrap(),
        @r#"{"drafts":null,"filter":"all","first_title":"write selectors","todos":[{"done":false,"id":1,"title":"write selectors"},{"done":true,"id":2,"title":"test selectors"}]}"#
    );
}

#[test]
fn test_reference_stability_across_rebuilt_state() {
    let todos = to_plain_selector(field("todos"));

    let first = todos.select(&initial_state()).unwrap();
    let second = todos.select(&initial_state()).unwrap();

    assert!(first.is_same(&second));
    assert_eq!(todos.recomputations(), 1);
}

#[test]
fn test_unrelated_update_keeps_props() {
    let view = create_props_selector([("todos", field("todos")), ("user", field("user"))]);
    let state = initial_state();

    let before = view.select(&state).unwrap();
    let after = view
        .select(&state.set("filter".into(), "done".into()).unwrap())
        .unwrap();

    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_relevant_update_replaces_only_changed_entry() {
    let view = create_props_selector([("todos", field("todos")), ("user", field("user"))]);
    let state = initial_state();
    let before = view.select(&state).unwrap();

    let user = state.get_in(&["user".into()]);
    let promoted = state
        .set("user".into(), user.set("admin".into(), true.into()).unwrap())
        .unwrap();
    let after = view.select(&promoted).unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(before["todos"].is_same(&after["todos"]));
    assert!(!before["user"].is_same(&after["user"]));
    assert_eq!(after["user"].as_plain(), Some(&json!({"name": "ada", "admin": true})));
}

#[test]
fn test_conversion_runs_once_per_distinct_value() {
    let todos = to_plain_selector(field("todos"));
    let state = initial_state();

    for _ in 0..5 {
        todos.select(&state).unwrap();
        todos.select(&initial_state()).unwrap();
    }
    assert_eq!(todos.recomputations(), 1);

    let extended = state
        .set(
            "todos".into(),
            state
                .get_in(&["todos".into()])
                .set(2.into(), Value::from(json!({"id": 3, "title": "ship", "done": false})))
                .unwrap(),
        )
        .unwrap();
    let result = todos.select(&extended).unwrap();

    assert_eq!(todos.recomputations(), 2);
    assert_eq!(result.as_plain().and_then(|p| p.as_array()).map(Vec::len), Some(3));
}

#[test]
fn test_absent_states_share_canonical_null() {
    let drafts = to_plain_selector(field("drafts"));
    let missing = to_plain_selector(field("missing"));
    let admin = to_plain_selector(create_get_selector(field("user"), "admin"));

    let state = initial_state();
    assert_eq!(drafts.select(&state).unwrap(), Value::Null);
    assert_eq!(missing.select(&state).unwrap(), Value::Null);
    assert_eq!(admin.select(&state).unwrap(), Value::Null);
}

#[test]
fn test_derived_key_lookup() {
    let selected = Selector::new(|s: &Value| {
        Key::Index(s.get_in(&["cursor".into()]).as_f64().unwrap_or_default() as isize)
    });
    let current = create_get_selector(field("todos"), selected.clone());
    let title = create_get_selector_or(current.clone(), "title", "untitled".into());
    let in_range = create_has_selector(field("todos"), selected);

    let state = initial_state().set("cursor".into(), 1.into()).unwrap();
    assert_eq!(title.select(&state).unwrap(), Value::from("test selectors"));
    assert!(in_range.select(&state).unwrap());

    let past_end = state.set("cursor".into(), 4.into()).unwrap();
    assert_eq!(current.select(&past_end).unwrap(), Value::Null);
    assert!(!in_range.select(&past_end).unwrap());

    // Looking further into the absent todo is a lookup on null
    assert!(matches!(title.select(&past_end), Err(SelectorError::Lookup(_))));
}

#[test]
fn test_lookup_misuse_surfaces_through_props() {
    let view = create_props_selector([("name", create_get_selector(field("filter"), "name"))]);

    let err = view.select(&initial_state()).unwrap_err();
    assert!(matches!(err, SelectorError::Lookup(_)));
}

#[test]
fn test_inverted_flag() {
    let admin = Selector::try_new(|s: &Value| {
        Ok(s.get_in(&["user".into(), "admin".into()]).is_truthy())
    });
    let regular = invert_selector(admin.clone());

    let state = initial_state();
    assert!(!admin.select(&state).unwrap());
    assert!(regular.select(&state).unwrap());
    assert!(invert_selector(regular).select(&state).unwrap() == admin.select(&state).unwrap());
}

#[test]
fn test_custom_factory() {
    let factory = SelectorFactory::new(StructuralEquality);
    let title_count = factory.create(field("todos"), |todos: &Value| {
        Ok(todos.to_plain().as_array().map_or(0, Vec::len))
    });

    assert_eq!(title_count.select(&initial_state()).unwrap(), 2);
    assert_eq!(title_count.select(&initial_state()).unwrap(), 2);
    assert_eq!(title_count.recomputations(), 1);
    assert_eq!(title_count.memo_snapshot().map(|s| s.hits), Some(1));
}

#[test]
fn test_selectors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Selector<Value, Value>>();
    assert_send_sync::<Selector<Value, Props>>();
}
