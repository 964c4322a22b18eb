//! Entry points that load a record from an [`Environment`].

use std::any::type_name;

use crate::env::{Environment, ProcessEnv};
use crate::error::{LoadError, LoadResult};
use crate::field::{EnvField, Shape};
use crate::strategy::ListPolicy;
use crate::tree;

/// Configurable loader.
///
/// ```
/// use std::collections::HashMap;
///
/// use env_config::{EnvConfig, Loader};
///
/// #[derive(Debug, Default, EnvConfig)]
/// struct Server {
///     #[env("HOST;default=localhost")]
///     host: String,
///     #[env("PORT")]
///     port: u16,
/// }
///
/// let env = HashMap::from([("APP_PORT", "8080")]);
/// let mut server = Server::default();
/// Loader::new().with_env(&env).with_prefix("APP").load(&mut server)?;
/// assert_eq!(server.host, "localhost");
/// assert_eq!(server.port, 8080);
/// # Ok::<(), env_config::LoadError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Loader<E = ProcessEnv> {
    env: E,
    prefix: String,
    policy: ListPolicy,
}

impl Loader {
    /// A loader reading the process environment without a prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Environment> Loader<E> {
    /// Read values from `env` instead.
    #[must_use]
    pub fn with_env<F: Environment>(self, env: F) -> Loader<F> {
        Loader {
            env,
            prefix: self.prefix,
            policy: self.policy,
        }
    }

    /// Prefix every top-level key with `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Choose how malformed collection elements are handled.
    #[must_use]
    pub const fn list_policy(mut self, policy: ListPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Populate `target` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotAStruct`] without writing anything when
    /// `target` is not a record, possibly behind `Option` or `Box`.
    /// Otherwise returns the first field failure; fields loaded before it
    /// keep their new values.
    pub fn load<T: EnvField>(&self, target: &mut T) -> LoadResult<()> {
        if !T::IS_RECORD {
            return Err(LoadError::NotAStruct {
                type_name: type_name::<T>(),
            });
        }
        let Shape::Record(record) = target.shape() else {
            return Err(LoadError::NotAStruct {
                type_name: type_name::<T>(),
            });
        };
        let root = tree::build(record, &self.prefix)?;
        tracing::debug!(
            record = root.record_name(),
            prefix = %self.prefix,
            fields = root.leaf_count(),
            "loading configuration"
        );
        root.load(&self.env, self.policy)?;
        tracing::debug!(config = type_name::<T>(), "configuration loaded");
        Ok(())
    }
}

/// Populate `target` from the process environment.
///
/// Equivalent to `Loader::new().load(target)`.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load_config<T: EnvField>(target: &mut T) -> LoadResult<()> {
    Loader::new().load(target)
}
