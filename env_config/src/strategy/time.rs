//! Strategies for durations and RFC 3339 timestamps.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};

use super::{Input, Strategy};
use crate::duration::parse_duration;
use crate::error::CoerceError;
use crate::field::FieldHandle;

/// Parses [`Duration`] fields with [`crate::parse_duration`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationStrategy;

impl Strategy for DurationStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Some(slot) = field.downcast_mut::<Duration>() else {
            return Err(CoerceError::mismatch("Duration", found));
        };
        let value = input.resolve()?;
        if value.is_empty() {
            return Ok(());
        }
        *slot = parse_duration(&value).map_err(|err| CoerceError::parse(&value, found, err))?;
        Ok(())
    }
}

/// Parses RFC 3339 timestamps into `DateTime<Utc>` or
/// `DateTime<FixedOffset>` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampStrategy;

impl TimestampStrategy {
    fn parse(value: &str, found: &'static str) -> Result<DateTime<FixedOffset>, CoerceError> {
        DateTime::parse_from_rfc3339(value).map_err(|err| CoerceError::parse(value, found, err))
    }
}

impl Strategy for TimestampStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let value = input.resolve()?;
        if let Some(slot) = field.downcast_mut::<DateTime<FixedOffset>>() {
            if !value.is_empty() {
                *slot = Self::parse(&value, found)?;
            }
            return Ok(());
        }
        if let Some(slot) = field.downcast_mut::<DateTime<Utc>>() {
            if !value.is_empty() {
                *slot = Self::parse(&value, found)?.with_timezone(&Utc);
            }
            return Ok(());
        }
        Err(CoerceError::mismatch("RFC 3339 timestamp", found))
    }
}
