//! Concurrency Tests
//!
//! Facades are shared across threads by reference; each call is one
//! synchronous backend call.

use super::*;
use hostkv::{KeyValueStorage, Value};
use std::sync::Barrier;
use std::thread;

#[test]
fn test_shared_facades_across_threads() {
    const THREADS: usize = 8;
    const WRITES: i64 = 100;

    let (_, storages) = quick_setup();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let storages = storages.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..WRITES {
                    let key = format!("t{}_{}", t, i);
                    storages.session().set(&key, Value::Int(i)).unwrap();
                    assert_eq!(storages.session().get(&key).unwrap(), Some(Value::Int(i)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(storages.session().has_key("t7_99").unwrap());
    assert!(!storages.config().has_key("t7_99").unwrap());
}

#[test]
fn test_every_change_notified_exactly_once_under_contention() {
    const THREADS: usize = 4;
    const WRITES: usize = 50;

    let (_, storages) = quick_setup();
    let count = Arc::new(Mutex::new(0usize));
    let count_ref = Arc::clone(&count);
    storages
        .config()
        .on_config_changed(move |_| *count_ref.lock() += 1)
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let storages = storages.clone();
            thread::spawn(move || {
                for i in 0..WRITES {
                    // Distinct keys: every write is a change
                    let key = format!("t{}_{}", t, i);
                    storages.config().set(&key, Value::Int(1)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*count.lock(), THREADS * WRITES);
}
