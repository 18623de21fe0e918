//! Tests for the source adapters.

use rstest::rstest;
use serial_test::serial;

use super::env::{from_process, from_snapshot};
use crate::{FlatStore, Lookup, Value};

fn store(nested: &crate::Nested) -> FlatStore {
    FlatStore::from_nested(nested, false)
}

#[rstest]
#[case::double_underscore("__", "APP__DB__HOST", "DB.HOST")]
#[case::single_underscore("_", "APP_DB_HOST", "DB.HOST")]
#[case::trailing_separator("__", "APP__DB__", "DB")]
fn env_names_map_to_key_paths(#[case] sep: &str, #[case] name: &str, #[case] key: &str) {
    let nested = from_snapshot([(name, "v")], "APP", sep);
    assert_eq!(
        store(&nested).get_value(key).expect("key present"),
        Value::from("v")
    );
}

#[test]
fn env_ignores_unprefixed_and_empty_names() {
    let vars = [
        ("APP__", "empty"),
        ("APPLE__X", "lookalike"),
        ("OTHER__X", "other"),
        ("APP__KEEP", "yes"),
    ];
    let flat = store(&from_snapshot(vars, "APP", "__"));
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.get_str("KEEP", "{}").expect("kept"), "yes");
}

#[test]
fn env_values_stay_text() {
    let flat = store(&from_snapshot([("APP__PORT", "8080")], "APP", "__"));
    assert_eq!(flat.get_value("PORT").expect("port"), Value::from("8080"));
    assert_eq!(flat.get_int("PORT").expect("cast"), 8080);
}

#[test]
#[serial]
fn process_environment_is_scanned() {
    let mut scope = test_helpers::env::PrefixScope::new("STRATA_SRC_TEST");
    scope
        .set("STRATA_SRC_TEST__LOG__LEVEL", "debug")
        .set("STRATA_SRC_TEST__NAME", "svc");
    let flat = store(&from_process("STRATA_SRC_TEST", "__"));
    assert_eq!(flat.get_str("LOG.LEVEL", "{}").expect("level"), "debug");
    assert_eq!(flat.get_str("NAME", "{}").expect("name"), "svc");
    assert_eq!(flat.len(), 2);
}

#[cfg(feature = "serde_json")]
mod json {
    use serde_json::json;

    use crate::sources::json::from_json;
    use crate::{FlatStore, Lookup, Value};

    #[test]
    fn objects_flatten_and_scalars_keep_their_kind() {
        let nested = from_json(&json!({
            "db": {"host": "h", "port": 5432, "ratio": 0.5, "tls": true, "opt": null},
            "tags": ["a", 1],
        }))
        .expect("valid object");
        let flat = FlatStore::from_nested(&nested, false);
        assert_eq!(flat.get_value("db.host").expect("host"), Value::from("h"));
        assert_eq!(flat.get_value("db.port").expect("port"), Value::Integer(5432));
        assert_eq!(flat.get_value("db.ratio").expect("ratio"), Value::Float(0.5));
        assert_eq!(flat.get_value("db.tls").expect("tls"), Value::Bool(true));
        assert_eq!(flat.get_value("db.opt").expect("opt"), Value::Null);
        assert_eq!(
            flat.get_value("tags").expect("tags"),
            Value::List(vec![Value::from("a"), Value::Integer(1)])
        );
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        let err = from_json(&json!([1, 2])).expect_err("array root");
        assert!(matches!(&*err, crate::ConfigError::Construction { .. }));
    }

    #[test]
    fn tables_in_arrays_are_rejected() {
        let err = from_json(&json!({"servers": [{"host": "a"}]})).expect_err("table in array");
        assert!(err.to_string().contains("servers.0"));
    }
}

#[cfg(feature = "toml")]
mod toml_source {
    use crate::sources::toml_table::from_toml;
    use crate::{FlatStore, Lookup, Value};

    fn parse(text: &str) -> toml::Table {
        toml::from_str(text).expect("valid toml")
    }

    #[test]
    fn nested_tables_become_key_paths() {
        let table = parse(
            "name = \"svc\"\n[db]\nport = 5432\n[db.pool]\nsize = 4\nratio = 0.25\n",
        );
        let flat = FlatStore::from_nested(&from_toml(&table).expect("convert"), false);
        assert_eq!(flat.get_str("name", "{}").expect("name"), "svc");
        assert_eq!(flat.get_int("db.port").expect("port"), 5432);
        assert_eq!(flat.get_int("db.pool.size").expect("size"), 4);
        assert_eq!(flat.get_value("db.pool.ratio").expect("ratio"), Value::Float(0.25));
    }

    #[test]
    fn datetimes_become_text() {
        let table = parse("at = 1979-05-27T07:32:00Z\n");
        let flat = FlatStore::from_nested(&from_toml(&table).expect("convert"), false);
        assert_eq!(flat.get_str("at", "{}").expect("at"), "1979-05-27T07:32:00Z");
    }

    #[test]
    fn arrays_of_tables_are_rejected() {
        let table = parse("[[servers]]\nhost = \"a\"\n");
        assert!(from_toml(&table).is_err());
    }
}
