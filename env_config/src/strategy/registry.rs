//! The process-wide strategy table.
//!
//! Lookups try the exact field type first and fall back to the field's
//! structural [`Kind`]. Register custom strategies during start-up, before
//! the first load that relies on them: registration takes a write lock, so
//! it is memory safe at any time, but a load running concurrently may or may
//! not observe the new entry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use parking_lot::RwLock;

use super::{
    BoolStrategy, ByteSliceStrategy, DurationStrategy, FloatStrategy, IntStrategy, ListStrategy,
    Strategy, StringStrategy, TimestampStrategy, UintStrategy,
};
use crate::field::{FieldHandle, Kind};

static GLOBAL: LazyLock<RwLock<StrategyRegistry>> =
    LazyLock::new(|| RwLock::new(StrategyRegistry::with_builtins()));

/// Strategy lookup table keyed by exact type, then by [`Kind`].
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    exact: HashMap<TypeId, Arc<dyn Strategy>>,
    by_kind: HashMap<Kind, Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// A table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table holding the built-in scalar, list, duration and timestamp
    /// strategies.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register_kind(Kind::String, StringStrategy);
        registry.register_kind(Kind::Int, IntStrategy);
        registry.register_kind(Kind::Uint, UintStrategy);
        registry.register_kind(Kind::Float, FloatStrategy);
        registry.register_kind(Kind::Bool, BoolStrategy);
        registry.register_kind(Kind::Bytes, ByteSliceStrategy);
        registry.register_kind(Kind::List, ListStrategy);
        registry.register::<Duration>(DurationStrategy);
        registry.register::<DateTime<Utc>>(TimestampStrategy);
        registry.register::<DateTime<FixedOffset>>(TimestampStrategy);
        registry
    }

    /// Associate `strategy` with the exact type `T`, replacing any entry.
    pub fn register<T: Any>(&mut self, strategy: impl Strategy + 'static) {
        self.exact.insert(TypeId::of::<T>(), Arc::new(strategy));
    }

    /// Associate `strategy` with every field of `kind` that has no exact
    /// entry, replacing any previous fallback.
    pub fn register_kind(&mut self, kind: Kind, strategy: impl Strategy + 'static) {
        self.by_kind.insert(kind, Arc::new(strategy));
    }

    /// Whether an exact-type entry exists for `type_id`.
    #[must_use]
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.exact.contains_key(&type_id)
    }

    /// Find the strategy for `field`.
    #[must_use]
    pub fn lookup(&self, field: &FieldHandle<'_>) -> Option<Arc<dyn Strategy>> {
        self.exact
            .get(&field.type_id())
            .or_else(|| self.by_kind.get(&field.kind()))
            .cloned()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("exact", &self.exact.len())
            .field("by_kind", &self.by_kind.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Register a process-wide strategy for the exact type `T`.
///
/// A derived record registered here is loaded as a single value instead of
/// being walked field by field.
///
/// ```
/// use env_config::{CoerceError, FieldHandle, Input, Strategy, register_strategy};
///
/// #[derive(Debug, Default)]
/// struct Celsius(f64);
///
/// struct CelsiusStrategy;
///
/// impl Strategy for CelsiusStrategy {
///     fn set_value(&self, field: &mut FieldHandle<'_>, input: &Input<'_>) -> Result<(), CoerceError> {
///         let found = field.type_name();
///         let value = input.resolve()?;
///         let Some(slot) = field.downcast_mut::<Celsius>() else {
///             return Err(CoerceError::mismatch("Celsius", found));
///         };
///         let degrees = value.trim_end_matches('C');
///         slot.0 = degrees
///             .parse()
///             .map_err(|err| CoerceError::parse(&value, found, err))?;
///         Ok(())
///     }
/// }
///
/// register_strategy::<Celsius>(CelsiusStrategy);
/// assert!(env_config::has_strategy::<Celsius>());
/// ```
pub fn register_strategy<T: Any>(strategy: impl Strategy + 'static) {
    GLOBAL.write().register::<T>(strategy);
}

/// Replace the process-wide fallback strategy for `kind`.
pub fn register_kind_strategy(kind: Kind, strategy: impl Strategy + 'static) {
    GLOBAL.write().register_kind(kind, strategy);
}

/// Whether the process-wide table has an exact entry for `T`.
#[must_use]
pub fn has_strategy<T: Any>() -> bool {
    GLOBAL.read().contains_type(TypeId::of::<T>())
}

pub(crate) fn contains_type(type_id: TypeId) -> bool {
    GLOBAL.read().contains_type(type_id)
}

/// Clone the strategy out so the lock is released before coercion runs.
pub(crate) fn lookup(field: &FieldHandle<'_>) -> Option<Arc<dyn Strategy>> {
    GLOBAL.read().lookup(field)
}
