//! Numeric slots.
//!
//! Integers are parsed at the widest width of their family and narrowed into
//! the field with a checked conversion, so each width keeps its own range.

use std::num::TryFromIntError;

use super::{EnvField, FieldHandle, Shape};

/// A signed integer field of any width.
pub trait IntSlot {
    /// Store `value`, failing when it does not fit the field's width.
    ///
    /// # Errors
    ///
    /// Returns [`TryFromIntError`] when `value` is out of range.
    fn set_i64(&mut self, value: i64) -> Result<(), TryFromIntError>;
}

/// An unsigned integer field of any width.
pub trait UintSlot {
    /// Store `value`, failing when it does not fit the field's width.
    ///
    /// # Errors
    ///
    /// Returns [`TryFromIntError`] when `value` is out of range.
    fn set_u64(&mut self, value: u64) -> Result<(), TryFromIntError>;
}

/// A floating point field.
pub trait FloatSlot {
    /// Store `value`, narrowing to the field's precision.
    fn set_f64(&mut self, value: f64);
}

macro_rules! int_fields {
    ($($ty:ty),* $(,)?) => {$(
        impl IntSlot for $ty {
            fn set_i64(&mut self, value: i64) -> Result<(), TryFromIntError> {
                *self = <$ty>::try_from(value)?;
                Ok(())
            }
        }

        impl EnvField for $ty {
            fn shape(&mut self) -> Shape<'_> {
                Shape::Value(FieldHandle::int(self))
            }
        }
    )*};
}

macro_rules! uint_fields {
    ($($ty:ty),* $(,)?) => {$(
        impl UintSlot for $ty {
            fn set_u64(&mut self, value: u64) -> Result<(), TryFromIntError> {
                *self = <$ty>::try_from(value)?;
                Ok(())
            }
        }

        impl EnvField for $ty {
            fn shape(&mut self) -> Shape<'_> {
                Shape::Value(FieldHandle::uint(self))
            }
        }
    )*};
}

int_fields!(i8, i16, i32, i64, isize);
uint_fields!(u8, u16, u32, u64, usize);

impl FloatSlot for f64 {
    fn set_f64(&mut self, value: f64) {
        *self = value;
    }
}

impl FloatSlot for f32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "32-bit float fields take the nearest representable value"
    )]
    fn set_f64(&mut self, value: f64) {
        *self = value as f32;
    }
}

impl EnvField for f32 {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::float(self))
    }
}

impl EnvField for f64 {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::float(self))
    }
}
