use std::{fmt, marker::PhantomData};

///
/// Persisted
/// Contract for owner entities that carry a surrogate id once stored.
/// The persistence layer that understands `#[entity]` provides the
/// implementation; generated setters only read it.
///

pub trait Persisted {
    fn persistent_id(&self) -> Option<i64>;
}

///
/// ParentRef
/// Typed back-reference from a translation row to its owning entity.
/// Holds the owner's surrogate id, never a borrow of the owner, so a
/// translation can outlive the value it was created from.
///

pub struct ParentRef<E> {
    id: Option<i64>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> ParentRef<E> {
    /// Reference that does not point at a stored row yet.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            id: None,
            _marker: PhantomData,
        }
    }

    /// Capture `owner` as it is persisted right now; unsaved owners
    /// yield a detached reference.
    #[must_use]
    pub fn to(owner: &E) -> Self
    where
        E: Persisted,
    {
        Self {
            id: owner.persistent_id(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.id.is_some()
    }
}

impl<E> Clone for ParentRef<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ParentRef<E> {}

impl<E> Default for ParentRef<E> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<E> fmt::Debug for ParentRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentRef").field("id", &self.id).finish()
    }
}

impl<E> PartialEq for ParentRef<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for ParentRef<E> {}
