//! Unit tests for layered resolution and copy-on-write writes.

use std::collections::BTreeSet;

use anyhow::{Result, anyhow};
use rstest::{fixture, rstest};

use super::{LayeredView, layered};
use crate::key_path::FlatMap;
use crate::lookup::{Entry, Lookup, Reserved};
use crate::{ConfigError, FlatStore, Nested, Node, Value};

fn store<const N: usize>(pairs: [(&str, Value); N]) -> FlatStore {
    FlatStore::from_flat(
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect(),
        false,
    )
}

fn flat<const N: usize>(pairs: [(&str, Value); N]) -> FlatMap {
    store(pairs).into_flat()
}

fn view_of(layers: Vec<FlatStore>) -> Result<LayeredView> {
    LayeredView::new(layers).map_err(|err| anyhow!(err.to_string()))
}

#[fixture]
fn overrides() -> FlatStore {
    store([("a.b", Value::from(1)), ("a.c", Value::from(2))])
}

#[fixture]
fn defaults() -> FlatStore {
    store([
        ("a.b", Value::from(9)),
        ("a.d", Value::from(4)),
        ("name", Value::from("base")),
    ])
}

#[rstest]
fn higher_layers_override_within_sections(
    overrides: FlatStore,
    defaults: FlatStore,
) -> Result<()> {
    let view = view_of(vec![overrides, defaults])?;
    let section = view
        .get("a")
        .map_err(|err| anyhow!(err.to_string()))?
        .into_section()
        .ok_or_else(|| anyhow!("expected a section"))?;
    assert_eq!(
        section.as_dict(),
        flat([
            ("b", Value::from(1)),
            ("c", Value::from(2)),
            ("d", Value::from(4)),
        ])
    );
    Ok(())
}

#[rstest]
fn scalars_come_from_first_matching_layer(
    overrides: FlatStore,
    defaults: FlatStore,
) -> Result<()> {
    let view = view_of(vec![overrides, defaults])?;
    assert_eq!(view.get_int("a.b").ok(), Some(1));
    assert_eq!(view.get_int("a.d").ok(), Some(4));
    assert_eq!(view.get_str("name", "{}").ok().as_deref(), Some("base"));
    let err = view
        .get("missing")
        .err()
        .ok_or_else(|| anyhow!("expected a miss"))?;
    assert!(err.is_key_not_found());
    Ok(())
}

#[rstest]
fn top_scalar_shadows_lower_sections() -> Result<()> {
    let view = view_of(vec![
        store([("a", Value::from("flat"))]),
        store([("a.b", Value::from(1))]),
    ])?;
    assert_eq!(view.get("a").ok(), Some(Entry::Value(Value::from("flat"))));
    let section = view.section("a").map_err(|err| anyhow!(err.to_string()))?;
    assert_eq!(section.value("b"), Some(&Value::from(1)));
    Ok(())
}

#[rstest]
fn top_section_ignores_lower_scalars() -> Result<()> {
    let view = view_of(vec![
        store([("a.b", Value::from(1))]),
        store([("a", Value::from("flat"))]),
        store([("a.c", Value::from(3))]),
    ])?;
    let section = view
        .get("a")
        .map_err(|err| anyhow!(err.to_string()))?
        .into_section()
        .ok_or_else(|| anyhow!("expected a section"))?;
    assert_eq!(
        section.into_flat(),
        flat([("b", Value::from(1)), ("c", Value::from(3))])
    );
    Ok(())
}

#[rstest]
fn as_dict_applies_lowest_priority_first(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let view = view_of(vec![overrides, defaults])?;
    assert_eq!(
        view.as_dict(),
        flat([
            ("a.b", Value::from(1)),
            ("a.c", Value::from(2)),
            ("a.d", Value::from(4)),
            ("name", Value::from("base")),
        ])
    );
    Ok(())
}

#[rstest]
fn empty_layer_list_is_rejected() {
    let result = layered(Vec::new());
    assert!(matches!(result, Err(err) if matches!(&*err, ConfigError::Construction { .. })));
}

#[rstest]
fn writes_create_one_writable_layer(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let mut view = view_of(vec![overrides.clone(), defaults])?;
    assert!(!view.has_writable_layer());

    view.set("a.b", 100);
    view.set("fresh", true);
    assert!(view.has_writable_layer());
    assert_eq!(view.layer_count(), 3);
    assert_eq!(view.get_int("a.b").ok(), Some(100));
    assert_eq!(
        view.layers().first().map(FlatStore::as_dict),
        Some(flat([("a.b", Value::from(100)), ("fresh", Value::from(true))]))
    );
    // The original top layer is untouched.
    assert_eq!(view.layers().get(1), Some(&overrides));
    Ok(())
}

#[rstest]
fn writable_layer_inherits_case_folding() -> Result<()> {
    let mut view = view_of(vec![FlatStore::from_flat(
        flat([("Db.Host", Value::from("h"))]),
        true,
    )])?;
    view.set("DB.PORT", 1);
    assert_eq!(
        view.layers().first().and_then(|l| l.value("db.port")),
        Some(&Value::from(1))
    );
    assert_eq!(view.get_int("Db.Port").ok(), Some(1));
    Ok(())
}

#[rstest]
fn update_writes_nested_input_on_top(defaults: FlatStore) -> Result<()> {
    let mut view = view_of(vec![defaults])?;
    let mut nested = Nested::new();
    nested.insert("a".into(), Node::table([("d", Node::from(40))]));
    view.update(&nested);
    assert_eq!(view.get_int("a.d").ok(), Some(40));
    assert_eq!(view.get_int("a.b").ok(), Some(9));
    Ok(())
}

#[rstest]
fn delete_reaches_every_layer(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let mut view = view_of(vec![overrides, defaults])?;
    view.delete("a.b").map_err(|err| anyhow!(err.to_string()))?;
    assert!(!view.contains("a.b"));
    assert!(view.contains("a.c"));
    let err = view
        .delete("a.b")
        .err()
        .ok_or_else(|| anyhow!("second delete should fail"))?;
    assert!(err.is_key_not_found());
    Ok(())
}

#[rstest]
fn pop_and_set_default_use_resolved_view(defaults: FlatStore) -> Result<()> {
    let mut view = view_of(vec![defaults])?;
    let popped = view.pop("name").map_err(|err| anyhow!(err.to_string()))?;
    assert_eq!(popped, Entry::Value(Value::from("base")));
    assert!(!view.contains("name"));

    let kept = view
        .set_default("a.d", 0)
        .map_err(|err| anyhow!(err.to_string()))?;
    assert_eq!(kept, Entry::Value(Value::from(4)));
    assert!(!view.has_writable_layer());

    let added = view
        .set_default("name", "restored")
        .map_err(|err| anyhow!(err.to_string()))?;
    assert_eq!(added, Entry::Value(Value::from("restored")));
    assert!(view.has_writable_layer());
    Ok(())
}

#[rstest]
fn keys_cover_resolved_dictionary(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let view = view_of(vec![overrides, defaults])?;
    let keys = view
        .keys(Some(1))
        .map_err(|err| anyhow!(err.to_string()))?
        .computed()
        .ok_or_else(|| anyhow!("expected computed keys"))?;
    let expected: BTreeSet<String> = ["a", "name"].iter().map(|k| (*k).to_owned()).collect();
    assert_eq!(keys, expected);
    assert_eq!(view.len(), 4);
    Ok(())
}

#[rstest]
fn reserved_key_in_any_layer_shadows_listing(overrides: FlatStore) -> Result<()> {
    let view = view_of(vec![overrides, store([("items.first", Value::from(1))])])?;
    let listing = view.items(None).map_err(|err| anyhow!(err.to_string()))?;
    assert!(matches!(listing, Reserved::Literal(Entry::Section(_))));
    Ok(())
}

#[rstest]
fn equality_uses_resolved_dictionaries(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let view = view_of(vec![overrides.clone(), defaults.clone()])?;
    let collapsed = FlatStore::from(&view);
    assert_eq!(view, collapsed);
    assert_eq!(collapsed, view);

    let reordered = view_of(vec![defaults, overrides])?;
    assert_ne!(view, reordered);
    Ok(())
}

#[rstest]
fn clear_empties_every_layer(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let mut view = view_of(vec![overrides, defaults])?;
    view.clear();
    assert!(view.is_empty());
    assert_eq!(view.layer_count(), 2);
    Ok(())
}

#[rstest]
fn serialises_resolved_entries(overrides: FlatStore, defaults: FlatStore) -> Result<()> {
    let view = view_of(vec![overrides, defaults])?;
    let json = serde_json::to_value(&view)?;
    assert_eq!(json.get("a.b"), Some(&serde_json::json!(1)));
    assert_eq!(view.to_string(), "{a.b: 1, a.c: 2, a.d: 4, name: base}");
    Ok(())
}
