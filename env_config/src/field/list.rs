//! Collection fields split from a single delimited value.

use std::any::type_name;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CoerceError;
use crate::strategy::{ListPolicy, parse_bool};

/// A type that can be an element of a list field.
///
/// `u8` is deliberately absent: `Vec<u8>` is a byte sequence, not a list.
pub trait ListElement: Default + Sized + 'static {
    /// Parse one element.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `raw` is not a valid element.
    fn parse_element(raw: &str) -> Result<Self, String>;
}

/// Object-safe view of a `Vec<T: ListElement>`.
pub trait ListSlot {
    /// Name of the element type.
    fn element_type(&self) -> &'static str;

    /// Replace the list with `items` parsed one by one.
    ///
    /// Under [`ListPolicy::Lenient`] an element that fails to parse keeps
    /// its position with the element type's default value. Under
    /// [`ListPolicy::Strict`] the first failure is returned and the field is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::Element`] in strict mode.
    fn replace(&mut self, items: &[String], policy: ListPolicy) -> Result<(), CoerceError>;
}

impl<T: ListElement> ListSlot for Vec<T> {
    fn element_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn replace(&mut self, items: &[String], policy: ListPolicy) -> Result<(), CoerceError> {
        let mut parsed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::parse_element(item) {
                Ok(value) => parsed.push(value),
                Err(reason) if policy == ListPolicy::Strict => {
                    return Err(CoerceError::Element {
                        index,
                        value: item.clone(),
                        expected: type_name::<T>(),
                        reason,
                    });
                }
                Err(reason) => {
                    tracing::trace!(index, %reason, "list element left at default");
                    parsed.push(T::default());
                }
            }
        }
        *self = parsed;
        Ok(())
    }
}

fn parse_std<T>(raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.parse().map_err(|err: T::Err| err.to_string())
}

macro_rules! from_str_elements {
    ($($ty:ty),* $(,)?) => {$(
        impl ListElement for $ty {
            fn parse_element(raw: &str) -> Result<Self, String> {
                parse_std(raw)
            }
        }
    )*};
}

from_str_elements!(
    i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64
);

impl ListElement for String {
    fn parse_element(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }
}

impl ListElement for bool {
    fn parse_element(raw: &str) -> Result<Self, String> {
        parse_bool(raw).map_err(|err| err.to_string())
    }
}

impl ListElement for Duration {
    fn parse_element(raw: &str) -> Result<Self, String> {
        crate::duration::parse_duration(raw).map_err(|err| err.to_string())
    }
}
