//! Writable field handles generated for annotated records.
//!
//! `#[derive(EnvConfig)]` implements [`Record`] and [`EnvField`] for a
//! struct. Every annotated field type must implement [`EnvField`], which
//! either exposes a nested [`Record`] or a [`FieldHandle`] that a
//! [`crate::Strategy`] can write through.

use std::any::{Any, TypeId, type_name};
use std::fmt;

mod list;
mod scalar;

pub use list::{ListElement, ListSlot};
pub use scalar::{FloatSlot, IntSlot, UintSlot};

/// A type that can appear as an annotated field.
pub trait EnvField {
    /// Whether values of this type are walked as nested records.
    const IS_RECORD: bool = false;

    /// Expose the value for tree construction.
    ///
    /// Optional wrappers allocate their contents here, so calling this on an
    /// empty `Option` leaves it populated with the inner default.
    fn shape(&mut self) -> Shape<'_>;
}

/// How a field participates in the load tree.
pub enum Shape<'a> {
    /// A nested record, walked recursively.
    Record(&'a mut dyn Record),
    /// A terminal value written by a strategy.
    Value(FieldHandle<'a>),
}

/// A struct whose annotated fields can be enumerated.
///
/// Implemented by `#[derive(EnvConfig)]`; hand-written implementations must
/// list fields in declaration order.
pub trait Record: Any {
    /// Name of the record type, used in diagnostics.
    fn record_name(&self) -> &'static str;

    /// The annotated fields in declaration order.
    fn fields(&mut self) -> Vec<FieldEntry<'_>>;
}

/// Object-safe view of an [`EnvField`].
pub trait FieldSlot {
    /// Resolve the slot into its [`Shape`].
    fn resolve(&mut self) -> Shape<'_>;
}

impl<T: EnvField> FieldSlot for T {
    fn resolve(&mut self) -> Shape<'_> {
        self.shape()
    }
}

/// An annotated field of a [`Record`].
pub struct FieldEntry<'a> {
    name: &'static str,
    annotation: &'static str,
    slot: &'a mut dyn FieldSlot,
}

impl<'a> FieldEntry<'a> {
    /// Describe field `name` carrying `annotation`.
    pub fn new<T: EnvField>(name: &'static str, annotation: &'static str, slot: &'a mut T) -> Self {
        Self {
            name,
            annotation,
            slot,
        }
    }

    /// Rust field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Raw annotation text, key first.
    #[must_use]
    pub const fn annotation(&self) -> &'static str {
        self.annotation
    }

    /// Consume the entry, yielding the field's shape.
    #[must_use]
    pub fn into_shape(self) -> Shape<'a> {
        let slot = self.slot;
        slot.resolve()
    }
}

impl fmt::Debug for FieldEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("name", &self.name)
            .field("annotation", &self.annotation)
            .finish_non_exhaustive()
    }
}

/// Structural kind of a value field, used for fallback strategy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Kind {
    /// `String`.
    String,
    /// Signed integers of any width.
    Int,
    /// Unsigned integers of any width.
    Uint,
    /// `f32` and `f64`.
    Float,
    /// `bool`.
    Bool,
    /// `Vec<u8>`.
    Bytes,
    /// `Vec<T>` of a [`ListElement`].
    List,
    /// Any other type; only exact-type strategies apply.
    Composite,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Uint => "unsigned integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Composite => "composite",
        })
    }
}

/// Typed access to the storage behind a [`FieldHandle`].
pub enum Target<'a> {
    /// A `String`.
    Str(&'a mut String),
    /// A signed integer of any width.
    Int(&'a mut dyn IntSlot),
    /// An unsigned integer of any width.
    Uint(&'a mut dyn UintSlot),
    /// An `f32` or `f64`.
    Float(&'a mut dyn FloatSlot),
    /// A `bool`.
    Bool(&'a mut bool),
    /// A byte vector.
    Bytes(&'a mut Vec<u8>),
    /// A vector of [`ListElement`]s.
    List(&'a mut dyn ListSlot),
    /// Any other `'static` type.
    Composite(&'a mut dyn Any),
}

impl Target<'_> {
    /// The structural kind of the target.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Str(_) => Kind::String,
            Self::Int(_) => Kind::Int,
            Self::Uint(_) => Kind::Uint,
            Self::Float(_) => Kind::Float,
            Self::Bool(_) => Kind::Bool,
            Self::Bytes(_) => Kind::Bytes,
            Self::List(_) => Kind::List,
            Self::Composite(_) => Kind::Composite,
        }
    }
}

/// Write-through handle to one field of a record.
pub struct FieldHandle<'a> {
    type_id: TypeId,
    type_name: &'static str,
    target: Target<'a>,
}

impl<'a> FieldHandle<'a> {
    fn of<T: Any>(target: Target<'a>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            target,
        }
    }

    /// Handle to a `String` field.
    pub fn string(value: &'a mut String) -> Self {
        Self::of::<String>(Target::Str(value))
    }

    /// Handle to a signed integer field.
    pub fn int<T: IntSlot + Any>(value: &'a mut T) -> Self {
        Self::of::<T>(Target::Int(value))
    }

    /// Handle to an unsigned integer field.
    pub fn uint<T: UintSlot + Any>(value: &'a mut T) -> Self {
        Self::of::<T>(Target::Uint(value))
    }

    /// Handle to a floating point field.
    pub fn float<T: FloatSlot + Any>(value: &'a mut T) -> Self {
        Self::of::<T>(Target::Float(value))
    }

    /// Handle to a `bool` field.
    pub fn bool(value: &'a mut bool) -> Self {
        Self::of::<bool>(Target::Bool(value))
    }

    /// Handle to a byte vector field.
    pub fn bytes(value: &'a mut Vec<u8>) -> Self {
        Self::of::<Vec<u8>>(Target::Bytes(value))
    }

    /// Handle to a list field.
    pub fn list<T: ListElement>(value: &'a mut Vec<T>) -> Self {
        Self::of::<Vec<T>>(Target::List(value))
    }

    /// Handle to a field written only by an exact-type strategy.
    ///
    /// Use this from a custom [`EnvField`] implementation, then register a
    /// strategy with [`crate::register_strategy`].
    pub fn composite<T: Any>(value: &'a mut T) -> Self {
        Self::of::<T>(Target::Composite(value))
    }

    /// Handle to a record treated as a single value.
    pub(crate) fn record(record: &'a mut dyn Record) -> Self {
        let type_name = record.record_name();
        let value: &'a mut dyn Any = record;
        Self {
            type_id: (*value).type_id(),
            type_name,
            target: Target::Composite(value),
        }
    }

    /// `TypeId` of the field type.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the field type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Structural kind of the field.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.target.kind()
    }

    /// Typed storage for writing.
    pub const fn target_mut(&mut self) -> &mut Target<'a> {
        &mut self.target
    }

    /// Downcast a composite field to `T`.
    ///
    /// Returns `None` for non-composite handles or a different type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        match &mut self.target {
            Target::Composite(value) => value.downcast_mut::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandle")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

impl<T: EnvField + Default> EnvField for Option<T> {
    const IS_RECORD: bool = T::IS_RECORD;

    fn shape(&mut self) -> Shape<'_> {
        self.get_or_insert_with(T::default).shape()
    }
}

impl<T: EnvField> EnvField for Box<T> {
    const IS_RECORD: bool = T::IS_RECORD;

    fn shape(&mut self) -> Shape<'_> {
        (**self).shape()
    }
}

impl EnvField for String {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::string(self))
    }
}

impl EnvField for bool {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::bool(self))
    }
}

impl EnvField for Vec<u8> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::bytes(self))
    }
}

impl<T: ListElement> EnvField for Vec<T> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::list(self))
    }
}

impl EnvField for std::time::Duration {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::composite(self))
    }
}

impl EnvField for chrono::DateTime<chrono::Utc> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::composite(self))
    }
}

impl EnvField for chrono::DateTime<chrono::FixedOffset> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Value(FieldHandle::composite(self))
    }
}
