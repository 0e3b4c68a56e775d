//! ConfigChanged Signal Tests
//!
//! - one delivery per listener per change, in subscription order
//! - unsubscribed listeners receive nothing further
//! - only changes to the effective value in partition 0 count

use super::*;
use hostkv::{Backend, KeyValueStorage, Partition, Value, CONFIG_CHANGED};

#[test]
fn test_delivery_in_subscription_order() {
    let (_, storages) = quick_setup();
    let config = storages.config();
    let log = Arc::new(Mutex::new(Vec::new()));

    config.on_config_changed(recording_listener("a", &log)).unwrap();
    config.on_config_changed(recording_listener("b", &log)).unwrap();
    config.on_config_changed(recording_listener("c", &log)).unwrap();

    config.set("volume", Value::Int(50)).unwrap();
    assert_eq!(*log.lock(), vec!["a:volume", "b:volume", "c:volume"]);
}

#[test]
fn test_write_from_another_handle_notifies() {
    let (backend, storages) = quick_setup();
    let log = Arc::new(Mutex::new(Vec::new()));
    storages
        .config()
        .on_config_changed(recording_listener("ui", &log))
        .unwrap();

    backend
        .set_value(Partition::CONFIG, "theme", Value::from("dark"))
        .unwrap();
    assert_eq!(*log.lock(), vec!["ui:theme"]);
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let (_, storages) = quick_setup();
    let config = storages.config();
    let log = Arc::new(Mutex::new(Vec::new()));

    let a = config.on_config_changed(recording_listener("a", &log)).unwrap();
    config.on_config_changed(recording_listener("b", &log)).unwrap();

    config.set("k", Value::Int(1)).unwrap();
    assert!(config.disconnect(CONFIG_CHANGED, a).unwrap());
    assert!(!config.disconnect(CONFIG_CHANGED, a).unwrap());
    config.set("k", Value::Int(2)).unwrap();

    assert_eq!(*log.lock(), vec!["a:k", "b:k", "b:k"]);
}

#[test]
fn test_unchanged_value_is_silent() {
    let (_, storages) = quick_setup();
    let config = storages.config();
    let log = Arc::new(Mutex::new(Vec::new()));
    config.on_config_changed(recording_listener("a", &log)).unwrap();

    config.set_default("volume", Value::Int(80)).unwrap();
    config.set("volume", Value::Int(80)).unwrap();
    assert!(log.lock().is_empty());
}

#[test]
fn test_session_writes_are_silent() {
    let (_, storages) = quick_setup();
    let log = Arc::new(Mutex::new(Vec::new()));
    storages
        .config()
        .on_config_changed(recording_listener("a", &log))
        .unwrap();

    storages.session().set("volume", Value::Int(1)).unwrap();
    assert!(log.lock().is_empty());
}

#[test]
fn test_listener_can_read_new_value() {
    let (_, storages) = quick_setup();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let config = Arc::clone(storages.config());
    let reader = Arc::downgrade(&config);
    let seen_ref = Arc::clone(&seen);
    config
        .on_config_changed(move |change| {
            if let Some(config) = reader.upgrade() {
                seen_ref.lock().push(config.get(&change.key).unwrap());
            }
        })
        .unwrap();

    config.set("volume", Value::Int(65)).unwrap();
    assert_eq!(*seen.lock(), vec![Some(Value::Int(65))]);
}

#[test]
fn test_clearing_config_partition_notifies_removed_keys() {
    let (backend, storages) = quick_setup();
    let config = storages.config();
    let log = Arc::new(Mutex::new(Vec::new()));
    config.on_config_changed(recording_listener("a", &log)).unwrap();

    config.set("volume", Value::Int(50)).unwrap();
    assert_eq!(backend.clear_partition(Partition::CONFIG), 1);

    assert_eq!(config.get("volume").unwrap(), None);
    assert_eq!(*log.lock(), vec!["a:volume", "a:volume"]);
}

#[test]
fn test_float_writes_notify_on_bit_changes() {
    let (_, storages) = quick_setup();
    let config = storages.config();
    let log = Arc::new(Mutex::new(Vec::new()));
    config.on_config_changed(recording_listener("a", &log)).unwrap();

    config.set("r", Value::Float(f64::NAN)).unwrap();
    config.set("r", Value::Float(f64::NAN)).unwrap();
    config.set("z", Value::Float(0.0)).unwrap();
    config.set("z", Value::Float(-0.0)).unwrap();

    assert_eq!(*log.lock(), vec!["a:r", "a:z", "a:z"]);
}

#[test]
fn test_reconnecting_storages_does_not_accumulate_sinks() {
    let backend = Arc::new(MemoryBackend::new());
    for _ in 0..100 {
        let storages = Storages::connect(backend.clone()).unwrap();
        assert_eq!(backend.sink_count(Partition::CONFIG), 1);
        drop(storages);
    }
    assert_eq!(backend.sink_count(Partition::CONFIG), 0);
}
