//! Strategies for strings, numbers, booleans and byte sequences.
//!
//! Numeric and boolean strategies leave the field untouched when the
//! resolved value is empty. String and byte strategies always assign.

use thiserror::Error;

use super::{Input, Strategy};
use crate::error::CoerceError;
use crate::field::{FieldHandle, Target};

/// Rejected boolean text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean {0:?}")]
pub struct InvalidBool(pub String);

/// Parse the conventional textual boolean forms.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts `0`, `f`, `F`, `FALSE`, `false`, `False`.
///
/// # Errors
///
/// Returns [`InvalidBool`] for anything else.
pub fn parse_bool(raw: &str) -> Result<bool, InvalidBool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(InvalidBool(other.to_owned())),
    }
}

/// Assigns the resolved string verbatim, including the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringStrategy;

impl Strategy for StringStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::Str(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("String", found));
        };
        **slot = input.resolve()?;
        Ok(())
    }
}

/// Parses base-10 signed integers and narrows them into the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntStrategy;

impl Strategy for IntStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::Int(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("signed integer", found));
        };
        let value = input.resolve()?;
        if value.is_empty() {
            return Ok(());
        }
        let parsed: i64 = value
            .parse()
            .map_err(|err| CoerceError::parse(&value, found, err))?;
        slot.set_i64(parsed)
            .map_err(|err| CoerceError::parse(value, found, err))
    }
}

/// Parses base-10 unsigned integers and narrows them into the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct UintStrategy;

impl Strategy for UintStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::Uint(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("unsigned integer", found));
        };
        let value = input.resolve()?;
        if value.is_empty() {
            return Ok(());
        }
        let parsed: u64 = value
            .parse()
            .map_err(|err| CoerceError::parse(&value, found, err))?;
        slot.set_u64(parsed)
            .map_err(|err| CoerceError::parse(value, found, err))
    }
}

/// Parses a double precision float and narrows it for `f32` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatStrategy;

impl Strategy for FloatStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::Float(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("float", found));
        };
        let value = input.resolve()?;
        if value.is_empty() {
            return Ok(());
        }
        let parsed: f64 = value
            .parse()
            .map_err(|err| CoerceError::parse(&value, found, err))?;
        slot.set_f64(parsed);
        Ok(())
    }
}

/// Parses booleans with [`parse_bool`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolStrategy;

impl Strategy for BoolStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::Bool(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("bool", found));
        };
        let value = input.resolve()?;
        if value.is_empty() {
            return Ok(());
        }
        **slot = parse_bool(&value).map_err(|err| CoerceError::parse(&value, found, err))?;
        Ok(())
    }
}

/// Assigns the UTF-8 bytes of the resolved string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteSliceStrategy;

impl Strategy for ByteSliceStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::Bytes(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("Vec<u8>", found));
        };
        **slot = input.resolve()?.into_bytes();
        Ok(())
    }
}
