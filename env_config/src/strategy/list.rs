//! Strategy for delimited collections.

use super::{Input, Strategy};
use crate::error::CoerceError;
use crate::field::{FieldHandle, Target};

/// How list strategies treat elements that fail to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListPolicy {
    /// Keep the element's position with its default value.
    #[default]
    Lenient,
    /// Fail the field on the first bad element.
    Strict,
}

/// Splits the resolved value and parses each element.
///
/// An empty value leaves the field untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListStrategy;

impl Strategy for ListStrategy {
    fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
        let found = field.type_name();
        let Target::List(slot) = field.target_mut() else {
            return Err(CoerceError::mismatch("list", found));
        };
        let items = input.resolve_list()?;
        if items.is_empty() {
            return Ok(());
        }
        slot.replace(&items, input.policy())
    }
}
