//! Coercion strategies and the process-wide strategy table.
//!
//! A [`Strategy`] turns the raw environment string, after it has passed
//! through the field's option chain, into a typed value and writes it through
//! a [`FieldHandle`]. Strategies are looked up first by exact type and then
//! by structural [`crate::Kind`]; see [`registry`].

mod list;
pub mod registry;
mod scalar;
mod time;

pub use list::{ListPolicy, ListStrategy};
pub use registry::{StrategyRegistry, has_strategy, register_kind_strategy, register_strategy};
pub use scalar::{
    BoolStrategy, ByteSliceStrategy, FloatStrategy, IntStrategy, InvalidBool, StringStrategy,
    UintStrategy, parse_bool,
};
pub use time::{DurationStrategy, TimestampStrategy};

use crate::error::CoerceError;
use crate::field::FieldHandle;
use crate::tag::{Applied, DEFAULT_DELIMITER, TagOption};

/// Converts a raw string into a field value.
///
/// Implementations are stateless and shared across loads, hence the
/// `Send + Sync` bound.
pub trait Strategy: Send + Sync {
    /// Write `input` into `field`.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::TypeMismatch`] when `field` is not a type the
    /// strategy writes, [`CoerceError::Parse`] when the resolved value is
    /// malformed, and propagates option chain failures.
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError>;
}

/// Raw value and options handed to a [`Strategy`].
#[derive(Debug, Clone, Copy)]
pub struct Input<'a> {
    raw: &'a str,
    options: Option<&'a TagOption>,
    policy: ListPolicy,
}

impl<'a> Input<'a> {
    /// Wrap a raw value and its option chain.
    #[must_use]
    pub const fn new(raw: &'a str, options: Option<&'a TagOption>) -> Self {
        Self {
            raw,
            options,
            policy: ListPolicy::Lenient,
        }
    }

    /// Set the collection element policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ListPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The value read from the environment.
    #[must_use]
    pub const fn raw(&self) -> &'a str {
        self.raw
    }

    /// The option chain, if any.
    #[must_use]
    pub const fn options(&self) -> Option<&'a TagOption> {
        self.options
    }

    /// The collection element policy.
    #[must_use]
    pub const fn policy(&self) -> ListPolicy {
        self.policy
    }

    fn apply(&self) -> Result<Applied, CoerceError> {
        let raw = self.raw.to_owned();
        match self.options {
            Some(chain) => Ok(chain.apply(raw)?),
            None => Ok(Applied::Single(raw)),
        }
    }

    /// Run the option chain for a scalar field.
    ///
    /// # Errors
    ///
    /// Propagates option failures and rejects a chain that split the value.
    pub fn resolve(&self) -> Result<String, CoerceError> {
        match self.apply()? {
            Applied::Single(value) => Ok(value),
            Applied::List(_) => Err(CoerceError::mismatch("single value", "delimited list")),
        }
    }

    /// Run the option chain for a collection field.
    ///
    /// A chain without a delimiter is split on a comma afterwards. An empty
    /// value yields no elements.
    ///
    /// # Errors
    ///
    /// Propagates option failures.
    pub fn resolve_list(&self) -> Result<Vec<String>, CoerceError> {
        match self.apply()? {
            Applied::List(items) => Ok(items),
            Applied::Single(value) => match TagOption::delimiter(DEFAULT_DELIMITER).apply(value)? {
                Applied::List(items) => Ok(items),
                Applied::Single(value) => Ok(vec![value]),
            },
        }
    }
}
