use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a widget stored in the Ui arena.
    pub struct WidgetId;
    /// Opaque identifier for an animatable parameter.
    pub struct ParamId;
    /// Identifier for a registered change listener.
    pub struct ListenerId;
    /// Identifier for a timer, updater or frame hook.
    pub struct TimerId;
}

/// Type-safe wrapper around a widget identifier tied to a widget type.
pub struct TypedId<T> {
    /// Untyped widget identifier.
    id: WidgetId,
    /// Marker for the widget type.
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedId<T> {
    /// Wrap an untyped widget identifier.
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The untyped identifier.
    pub fn id(&self) -> WidgetId {
        self.id
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for TypedId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedId").field(&self.id).finish()
    }
}

impl<T> From<TypedId<T>> for WidgetId {
    fn from(value: TypedId<T>) -> Self {
        value.id
    }
}
