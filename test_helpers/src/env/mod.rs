//! Scoped mutation of process environment variables.
//!
//! Every mutation takes a global re-entrant lock and returns an RAII guard
//! that restores the prior state on drop, removing the variable if it was
//! previously absent. [`EnvScope`] holds the lock for its whole lifetime so
//! a test can stage several keys and run a load without another test
//! observing a half-written environment.
//!
//! # Examples
//!
//! ```
//! use env_config_test_helpers::env::EnvScope;
//!
//! let scope = EnvScope::new()
//!     .set("APP_HOST", "example.org")
//!     .unset("APP_PORT");
//! assert_eq!(std::env::var("APP_HOST").as_deref(), Ok("example.org"));
//! drop(scope);
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

/// Apply `mutation` to `key` under the lock, remembering the prior value.
fn mutate(key: String, mutation: Mutation<'_>) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    match mutation {
        // SAFETY: `ENV_MUTEX` is held for the duration of the write.
        Mutation::Set(value) => unsafe { env_set_var(&key, value) },
        // SAFETY: `ENV_MUTEX` is held for the duration of the write.
        Mutation::Remove => unsafe { env_remove_var(&key) },
    }
    EnvVarGuard { key, original }
}

enum Mutation<'a> {
    Set(&'a OsStr),
    Remove,
}

/// RAII guard restoring one environment variable on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// The variable this guard restores.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(value) = self.original.take() {
            // SAFETY: `ENV_MUTEX` is held during restoration.
            unsafe { env_set_var(&self.key, &value) };
        } else {
            // SAFETY: `ENV_MUTEX` is held during restoration.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// Set `key` to `value` until the returned guard is dropped.
///
/// ```
/// use env_config_test_helpers::env;
///
/// let guard = env::set_var("HELPERS_DOC_SET", "on");
/// assert_eq!(std::env::var("HELPERS_DOC_SET").as_deref(), Ok("on"));
/// drop(guard);
/// assert!(std::env::var("HELPERS_DOC_SET").is_err());
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), Mutation::Set(value.as_ref()))
}

/// Remove `key` until the returned guard is dropped.
pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
    mutate(key.into(), Mutation::Remove)
}

/// Several staged variables restored together.
///
/// The scope owns the global lock, so other threads cannot mutate the
/// environment until it is dropped. Guards restore in reverse order of
/// staging, so staging the same key twice unwinds correctly.
#[must_use = "dropping releases the environment lock and restores variables"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Acquire the environment lock with nothing staged yet.
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            _lock: ENV_MUTEX.lock(),
        }
    }

    /// Stage `key=value`.
    pub fn set<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        self.guards.push(set_var(key, value));
        self
    }

    /// Stage the removal of `key`.
    pub fn unset<K: Into<String>>(mut self, key: K) -> Self {
        self.guards.push(remove_var(key));
        self
    }

    /// Stage every pair from `vars`.
    pub fn set_all<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        vars.into_iter()
            .fold(self, |scope, (key, value)| scope.set(key, value))
    }

    /// Keys staged so far, in staging order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.guards.iter().map(EnvVarGuard::key)
    }
}

impl Default for EnvScope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore while the lock field is still alive, newest first.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Stage every pair from `vars` in a fresh [`EnvScope`].
///
/// ```
/// use env_config_test_helpers::env;
///
/// let _scope = env::scope([("HELPERS_DOC_A", "1"), ("HELPERS_DOC_B", "2")]);
/// assert_eq!(std::env::var("HELPERS_DOC_B").as_deref(), Ok("2"));
/// ```
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    EnvScope::new().set_all(vars)
}

#[cfg(test)]
mod tests;
