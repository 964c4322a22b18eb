//! Error types produced by the environment loader.

mod conversions;
mod types;

pub use types::{CoerceError, LoadError, LoadResult, OptionError};
