//! Primary error enums for tree construction, coercion and loading.

use thiserror::Error;

/// Convenience alias for results returned by the loader.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that abort a load.
///
/// Every variant except [`LoadError::NotAStruct`] names the fully resolved
/// environment key of the field that failed. Fields written before the
/// failure keep their new values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The load target is not a record after dereferencing.
    #[error("expected struct, got {type_name}")]
    NotAStruct {
        /// Type name of the rejected target.
        type_name: &'static str,
    },

    /// No coercion strategy can write the field.
    ///
    /// Such a field is never skipped silently: the whole load stops here
    /// rather than leaving the field at its prior value. Only hand-written
    /// [`crate::EnvField`] impls using [`crate::FieldHandle::composite`]
    /// without a matching [`crate::register_strategy`] call reach it.
    #[error("cannot set value for key {key}: no strategy registered for {type_name}")]
    Unsettable {
        /// Resolved environment key.
        key: String,
        /// Type name of the field that could not be written.
        type_name: &'static str,
    },

    /// The resolved value could not be parsed into the field type.
    #[error("failed to parse {key}={value:?} as {expected}: {reason}")]
    Parse {
        /// Resolved environment key.
        key: String,
        /// Value after the option chain ran.
        value: String,
        /// Name of the target type.
        expected: &'static str,
        /// Parser message.
        reason: String,
    },

    /// A strategy was applied to a field of a different kind.
    #[error("invalid type for {key}, expected {expected} but got {found}")]
    TypeMismatch {
        /// Resolved environment key.
        key: String,
        /// What the strategy can write.
        expected: &'static str,
        /// What the field actually holds.
        found: &'static str,
    },

    /// An option in the field's chain rejected the value.
    #[error("option chain failed for {key}: {source}")]
    OptionChain {
        /// Resolved environment key.
        key: String,
        /// Error reported by the option.
        #[source]
        source: OptionError,
    },

    /// A collection element failed under [`crate::ListPolicy::Strict`].
    #[error("failed to parse element {index} of {key} ({value:?}) as {expected}: {reason}")]
    Element {
        /// Resolved environment key.
        key: String,
        /// Zero-based position of the element.
        index: usize,
        /// The element text.
        value: String,
        /// Name of the element type.
        expected: &'static str,
        /// Parser message.
        reason: String,
    },
}

/// Keyless failures reported by a [`crate::Strategy`].
///
/// The leaf that invoked the strategy attaches its key with
/// [`CoerceError::at_key`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoerceError {
    /// The value could not be parsed into the target type.
    #[error("cannot parse {value:?} as {expected}: {reason}")]
    Parse {
        /// Offending value.
        value: String,
        /// Name of the target type.
        expected: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The field kind does not match the strategy.
    #[error("invalid type, expected {expected} but got {found}")]
    TypeMismatch {
        /// What the strategy can write.
        expected: &'static str,
        /// What the field actually holds.
        found: &'static str,
    },

    /// A collection element failed under strict parsing.
    #[error("cannot parse element {index} ({value:?}) as {expected}: {reason}")]
    Element {
        /// Zero-based position of the element.
        index: usize,
        /// The element text.
        value: String,
        /// Name of the element type.
        expected: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The option chain failed.
    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Failure raised by a custom option while transforming a value.
#[derive(Debug, Error)]
#[error("option `{option}` failed: {source}")]
pub struct OptionError {
    /// Name of the failing option.
    pub option: String,
    /// Underlying error.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}
