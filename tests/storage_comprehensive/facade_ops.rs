//! Facade Operation Tests
//!
//! - set_default: first default wins, never overrides explicit values
//! - set / get / has_key: explicit values through both facades
//! - isolation: config and session never see each other's keys
//! - custom partitions: `KeyValueFacade` on any index

use super::*;
use hostkv::{KeyValueFacade, KeyValueStorage, Partition, StorageError, Value};

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_volume_scenario() {
    let (_, storages) = quick_setup();
    let config = storages.config();

    config.set_default("volume", Value::Int(80)).unwrap();
    assert_eq!(config.get("volume").unwrap(), Some(Value::Int(80)));

    config.set("volume", Value::Int(50)).unwrap();
    assert_eq!(config.get("volume").unwrap(), Some(Value::Int(50)));

    assert!(!storages.session().has_key("volume").unwrap());
}

#[test]
fn test_default_counts_for_has_key() {
    let (_, storages) = quick_setup();
    storages.config().set_default("theme", Value::from("light")).unwrap();
    assert!(storages.config().has_key("theme").unwrap());
}

#[test]
fn test_second_default_ignored() {
    let (_, storages) = quick_setup();
    let config = storages.config();
    config.set_default("theme", Value::from("light")).unwrap();
    config.set_default("theme", Value::from("dark")).unwrap();
    assert_eq!(config.get("theme").unwrap(), Some(Value::from("light")));
}

#[test]
fn test_default_does_not_override_explicit_value() {
    let (_, storages) = quick_setup();
    let session = storages.session();
    session.set("muted", Value::Bool(true)).unwrap();
    session.set_default("muted", Value::Bool(false)).unwrap();
    assert_eq!(session.get("muted").unwrap(), Some(Value::Bool(true)));
}

#[test]
fn test_removing_explicit_value_reveals_default() {
    let (backend, storages) = quick_setup();
    let config = storages.config();
    config.set_default("volume", Value::Int(80)).unwrap();
    config.set("volume", Value::Int(10)).unwrap();

    assert!(backend.remove(Partition::CONFIG, "volume").unwrap());
    assert_eq!(config.get("volume").unwrap(), Some(Value::Int(80)));
}

// =============================================================================
// GET / SET
// =============================================================================

#[test]
fn test_absent_key_reads_none() {
    let (_, storages) = quick_setup();
    assert_eq!(storages.config().get("missing").unwrap(), None);
    assert!(!storages.config().has_key("missing").unwrap());
}

#[test]
fn test_overwrite_changes_type() {
    let (_, storages) = quick_setup();
    let config = storages.config();
    config.set("k", Value::Int(1)).unwrap();
    config.set("k", Value::from("one")).unwrap();
    assert_eq!(config.get("k").unwrap(), Some(Value::from("one")));
}

#[test]
fn test_all_scalar_types_stored() {
    let (_, storages) = quick_setup();
    let session = storages.session();
    let cases = [
        ("null", Value::Null),
        ("bool", Value::Bool(true)),
        ("int", Value::Int(-3)),
        ("float", Value::Float(2.5)),
        ("string", Value::from("text")),
    ];
    for (key, value) in cases.iter().cloned() {
        session.set(key, value).unwrap();
    }
    for (key, value) in cases {
        assert_eq!(session.get(key).unwrap(), Some(value));
    }
}

#[test]
fn test_backend_validation_errors_reach_caller() {
    let (_, storages) = quick_setup();
    let err = storages.config().set("", Value::Null).unwrap_err();
    assert!(matches!(err, StorageError::InvalidKey { .. }));
}

// =============================================================================
// ISOLATION
// =============================================================================

#[test]
fn test_partitions_isolated_both_ways() {
    let (_, storages) = quick_setup();
    storages.config().set("shared_name", Value::Int(1)).unwrap();
    assert!(!storages.session().has_key("shared_name").unwrap());

    storages.session().set("shared_name", Value::Int(2)).unwrap();
    assert_eq!(storages.config().get("shared_name").unwrap(), Some(Value::Int(1)));
    assert_eq!(storages.session().get("shared_name").unwrap(), Some(Value::Int(2)));
}

#[test]
fn test_custom_partition_facade() {
    let (backend, storages) = quick_setup();
    let plugin = KeyValueFacade::new(backend.clone(), Partition::new(42));

    plugin.set("volume", Value::Int(3)).unwrap();
    assert_eq!(plugin.partition().index(), 42);
    assert!(!storages.config().has_key("volume").unwrap());
    assert_eq!(backend.keys(Partition::new(42)), vec!["volume"]);
}

#[test]
fn test_facades_usable_as_trait_objects() {
    let (_, storages) = quick_setup();
    let facades: Vec<&dyn KeyValueStorage> = vec![&**storages.config(), &**storages.session()];
    for (i, facade) in facades.iter().enumerate() {
        facade.set("index", Value::Int(i as i64)).unwrap();
    }
    assert_eq!(storages.config().get("index").unwrap(), Some(Value::Int(0)));
    assert_eq!(storages.session().get("index").unwrap(), Some(Value::Int(1)));
}
