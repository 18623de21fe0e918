//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns an RAII guard
//! that restores the previous state on drop. Guards for the same key restore
//! in LIFO order.
//!
//! [`PrefixScope`] holds the lock for its whole lifetime, which suits tests
//! that snapshot the environment while their variables are set.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("STRATA_DOC_KEY", "VALUE");
//! assert_eq!(std::env::var("STRATA_DOC_KEY").ok().as_deref(), Some("VALUE"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Exclusive view of the variables sharing one name prefix.
///
/// Creating the scope removes every variable whose name starts with the
/// prefix; [`PrefixScope::set`] adds new ones. Everything is restored when
/// the scope drops, and no other guard can touch the environment meanwhile.
///
/// # Examples
///
/// ```
/// use test_helpers::env::PrefixScope;
///
/// let mut scope = PrefixScope::new("STRATA_DOC");
/// scope.set("STRATA_DOC__A", "1");
/// assert_eq!(std::env::var("STRATA_DOC__A").ok().as_deref(), Some("1"));
/// ```
#[must_use = "dropping releases the environment lock and restores variables"]
pub struct PrefixScope {
    guards: Vec<EnvVarGuard>,
    prefix: String,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl PrefixScope {
    /// Take the environment lock and clear every variable starting with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        let lock = ENV_MUTEX.lock();
        let prefix = prefix.into();
        let stale: Vec<String> = env::vars_os()
            .filter_map(|(name, _)| name.into_string().ok())
            .filter(|name| name.starts_with(&prefix))
            .collect();
        let guards = stale.into_iter().map(remove_var).collect();
        Self {
            guards,
            prefix,
            _lock: lock,
        }
    }

    /// Set `key` for the lifetime of the scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> &mut Self {
        self.guards.push(set_var(key, value));
        self
    }

    /// The prefix this scope owns.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Drop for PrefixScope {
    fn drop(&mut self) {
        // Restore newest first while the lock is still held.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}
