//! Flat key-value sources read by the loader.
//!
//! A missing key and a key set to the empty string are indistinguishable:
//! both read as `""`, so an explicitly empty variable still triggers a
//! `default` option.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A flat, string-keyed source of raw values.
pub trait Environment {
    /// The raw value for `key`, or the empty string when it is unset.
    fn get(&self, key: &str) -> String;
}

/// Reads the process environment.
///
/// Values that are not valid Unicode read as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> String {
        std::env::var(key).unwrap_or_default()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn get(&self, key: &str) -> String {
        (**self).get(key)
    }
}

impl<K, V, S> Environment for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn get(&self, key: &str) -> String {
        Self::get(self, key)
            .map(|value| value.as_ref().to_owned())
            .unwrap_or_default()
    }
}

impl<K, V> Environment for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn get(&self, key: &str) -> String {
        Self::get(self, key)
            .map(|value| value.as_ref().to_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the environment providers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn maps_read_present_and_absent_keys() {
        let hash = HashMap::from([("HOST", "localhost"), ("EMPTY", "")]);
        let tree = BTreeMap::from([("HOST".to_owned(), "localhost".to_owned())]);
        assert_eq!(Environment::get(&hash, "HOST"), "localhost");
        assert_eq!(Environment::get(&hash, "EMPTY"), "");
        assert_eq!(Environment::get(&hash, "MISSING"), "");
        assert_eq!(Environment::get(&tree, "HOST"), "localhost");
        assert_eq!(Environment::get(&&tree, "MISSING"), "");
    }

    #[rstest]
    fn process_env_reads_unset_as_empty() {
        assert_eq!(
            ProcessEnv.get("ENV_CONFIG_TEST_SURELY_UNSET_9F1C2B"),
            ""
        );
    }
}
