//! Constructors and conversions between the error layers.

use std::fmt::Display;

use super::{CoerceError, LoadError, OptionError};

impl CoerceError {
    /// Build a parse failure from any displayable parser error.
    #[must_use]
    pub fn parse(value: impl Into<String>, expected: &'static str, reason: impl Display) -> Self {
        Self::Parse {
            value: value.into(),
            expected,
            reason: reason.to_string(),
        }
    }

    /// Build a type mismatch between a strategy and a field.
    #[must_use]
    pub const fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Attach the resolved environment key, producing a [`LoadError`].
    #[must_use]
    pub fn at_key(self, key: &str) -> LoadError {
        let key = key.to_owned();
        match self {
            Self::Parse {
                value,
                expected,
                reason,
            } => LoadError::Parse {
                key,
                value,
                expected,
                reason,
            },
            Self::TypeMismatch { expected, found } => LoadError::TypeMismatch {
                key,
                expected,
                found,
            },
            Self::Element {
                index,
                value,
                expected,
                reason,
            } => LoadError::Element {
                key,
                index,
                value,
                expected,
                reason,
            },
            Self::Option(source) => LoadError::OptionChain { key, source },
        }
    }
}

impl OptionError {
    /// Wrap an error raised by the option called `option`.
    #[must_use]
    pub fn new<E>(option: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            option: option.into(),
            source: source.into(),
        }
    }
}

impl LoadError {
    /// Resolved environment key of the failing field, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::NotAStruct { .. } => None,
            Self::Unsettable { key, .. }
            | Self::Parse { key, .. }
            | Self::TypeMismatch { key, .. }
            | Self::OptionChain { key, .. }
            | Self::Element { key, .. } => Some(key),
        }
    }
}
