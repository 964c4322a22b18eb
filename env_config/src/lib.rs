//! Declarative configuration loading from environment variables.
//!
//! Annotate a struct with `#[derive(EnvConfig)]` and an `#[env("KEY")]`
//! attribute per field, then call [`load_config`]. Nested structs extend the
//! key prefix with their own key, optional fields are allocated on demand,
//! and every field is coerced by a [`Strategy`] chosen from a process-wide
//! table: the exact field type first, then its structural [`Kind`].
//!
//! Annotation options follow the key, separated by `;`:
//!
//! - `default=VALUE` substitutes `VALUE` when the variable is empty or unset.
//! - `delimiter=SEP` splits a collection value on `SEP` (comma by default).
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use env_config::{EnvConfig, Loader};
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Scheduler {
//!     #[env("INTERVAL;default=1m")]
//!     interval: Duration,
//!     #[env("QUEUES;default=low,high")]
//!     queues: Vec<String>,
//! }
//!
//! #[derive(Debug, Default, EnvConfig)]
//! struct Config {
//!     #[env("NAME")]
//!     name: String,
//!     #[env("SCHEDULER")]
//!     scheduler: Scheduler,
//! }
//!
//! let env = HashMap::from([("NAME", "worker"), ("SCHEDULER_INTERVAL", "5m")]);
//! let mut config = Config::default();
//! Loader::new().with_env(&env).load(&mut config)?;
//! assert_eq!(config.name, "worker");
//! assert_eq!(config.scheduler.interval, Duration::from_secs(300));
//! assert_eq!(config.scheduler.queues, ["low", "high"]);
//! # Ok::<(), env_config::LoadError>(())
//! ```

pub use env_config_macros::EnvConfig;

mod duration;
mod env;
mod error;
mod field;
mod loader;
pub mod strategy;
pub mod tag;
pub mod tree;

pub use duration::{DurationError, parse_duration};
pub use env::{Environment, ProcessEnv};
pub use error::{CoerceError, LoadError, LoadResult, OptionError};
pub use field::{
    EnvField, FieldEntry, FieldHandle, FieldSlot, FloatSlot, IntSlot, Kind, ListElement, ListSlot,
    Record, Shape, Target, UintSlot,
};
pub use loader::{Loader, load_config};
pub use strategy::{
    Input, ListPolicy, Strategy, StrategyRegistry, has_strategy, register_kind_strategy,
    register_strategy,
};
pub use tag::{Modifier, TagOption};
pub use tree::combine_key_prefix;
