//! Unit tests for environment helpers.

use std::sync::{Arc, Barrier};
use std::thread;

use super::*;

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn set_var_restores_original() {
    let key = "TEST_HELPERS_SET_VAR";
    let _base = set_var(key, "orig");
    {
        let _guard = set_var(key, "temp");
        assert_eq!(env_value(key).as_deref(), Some("temp"));
    }
    assert_eq!(env_value(key).as_deref(), Some("orig"));
}

#[test]
fn remove_var_restores_value() {
    let key = "TEST_HELPERS_REMOVE_VAR";
    let _base = set_var(key, "to-be-removed");
    {
        let _guard = remove_var(key);
        assert_eq!(env_value(key), None);
    }
    assert_eq!(env_value(key).as_deref(), Some("to-be-removed"));
}

#[test]
fn set_var_unsets_when_absent() {
    let key = "TEST_HELPERS_UNSET";
    drop(remove_var(key));
    {
        let _guard = set_var(key, "tmp");
        assert_eq!(env_value(key).as_deref(), Some("tmp"));
    }
    assert_eq!(env_value(key), None);
}

#[test]
fn stacking_restores_in_lifo() {
    let key = "TEST_HELPERS_STACKING";
    let first = set_var(key, "v1");
    let second = set_var(key, "v2");
    assert_eq!(env_value(key).as_deref(), Some("v2"));
    drop(second);
    assert_eq!(env_value(key).as_deref(), Some("v1"));
    drop(first);
    assert_eq!(env_value(key), None);
}

#[test]
fn scope_stages_and_restores_many_keys() {
    let host = "TEST_HELPERS_SCOPE_HOST";
    let port = "TEST_HELPERS_SCOPE_PORT";
    let _base = set_var(port, "1");
    {
        let scope = EnvScope::new()
            .set(host, "example.org")
            .unset(port)
            .set(host, "override");
        assert_eq!(scope.keys().collect::<Vec<_>>(), [host, port, host]);
        assert_eq!(env_value(host).as_deref(), Some("override"));
        assert_eq!(env_value(port), None);
    }
    assert_eq!(env_value(host), None);
    assert_eq!(env_value(port).as_deref(), Some("1"));
}

#[test]
fn scope_blocks_other_threads_until_dropped() {
    let key = "TEST_HELPERS_SCOPE_LOCK";
    let scope = scope([(key, "held")]);
    let barrier = Arc::new(Barrier::new(2));
    let worker_barrier = Arc::clone(&barrier);
    let handle = thread::spawn(move || {
        worker_barrier.wait();
        let _guard = set_var(key, "worker");
        env_value(key)
    });
    barrier.wait();
    assert_eq!(env_value(key).as_deref(), Some("held"));
    drop(scope);
    let seen = handle.join().expect("worker thread panicked");
    assert_eq!(seen.as_deref(), Some("worker"));
    assert_eq!(env_value(key), None);
}
