use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::iter::FusedIterator;

use crate::node::{Link, NodeArena, NodeId};


/// A borrowed handle to an entry of a [`Skiplist`].
///
/// Following [`Entry::next`] from [`Skiplist::first`] visits every entry in the comparator's
/// order. Since the handle borrows the list, the list cannot be mutated while it is held; use
/// [`Entry::id`] to refer to the entry across mutations.
///
/// [`Skiplist`]: crate::Skiplist
/// [`Skiplist::first`]: crate::Skiplist::first
pub struct Entry<'a, V> {
    arena: &'a NodeArena<V>,
    slot:  usize,
    value: &'a V,
}

impl<'a, V> Entry<'a, V> {
    /// Returns `None` if `slot` does not hold a linked node.
    #[must_use]
    pub(crate) fn new(arena: &'a NodeArena<V>, slot: usize) -> Option<Self> {
        let value = arena.value(slot)?;
        Some(Self { arena, slot, value })
    }

    #[must_use]
    pub(crate) fn from_link(arena: &'a NodeArena<V>, link: Link) -> Option<Self> {
        Self::new(arena, link?)
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> &'a V {
        self.value
    }

    /// The stable identity of this entry, valid until it is deleted.
    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.arena.id_of(self.slot)
    }

    /// The entry after this one, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::from_link(self.arena, self.arena.skip(self.slot, 0))
    }

    /// The number of levels this entry's tower is linked into.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.arena.height(self.slot)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn slot(&self) -> usize {
        self.slot
    }
}

impl<V> Clone for Entry<'_, V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Entry<'_, V> {}

impl<V: Debug> Debug for Entry<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Entry")
            .field("id",    &self.id())
            .field("value", self.value)
            .finish()
    }
}

/// An iterator over the values of a [`Skiplist`], in the comparator's order.
///
/// [`Skiplist`]: crate::Skiplist
pub struct Iter<'a, V> {
    arena:     &'a NodeArena<V>,
    next:      Link,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(arena: &'a NodeArena<V>, first: Link, len: usize) -> Self {
        Self {
            arena,
            next:      first,
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = Entry::from_link(self.arena, self.next)?;
        self.next = self.arena.skip(entry.slot(), 0);
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry.value())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            arena:     self.arena,
            next:      self.next,
            remaining: self.remaining,
        }
    }
}

impl<V> Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// An entry which has been deleted from a [`Skiplist`], along with its former identity.
///
/// [`Skiplist`]: crate::Skiplist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed<V> {
    id:    NodeId,
    value: V,
}

impl<V> Removed<V> {
    #[inline]
    #[must_use]
    pub(crate) const fn new(id: NodeId, value: V) -> Self {
        Self { id, value }
    }

    /// The identity the entry had before it was deleted. It is now stale, unless the list
    /// does not auto-recycle, in which case it can be passed to [`Skiplist::recycle`].
    ///
    /// [`Skiplist::recycle`]: crate::Skiplist::recycle
    #[inline]
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (NodeId, V) {
        (self.id, self.value)
    }
}
