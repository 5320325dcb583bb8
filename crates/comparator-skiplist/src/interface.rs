/// Interface for ordering the values of a [`Skiplist`].
///
/// A comparator only answers whether one value strictly precedes another; it must describe a
/// total preorder (a strict weak ordering). Equality is never supplied separately: two values
/// are *equivalent* when neither precedes the other, which is what [`Comparator::equivalent`]
/// computes. In particular, distinct values which are mutually non-preceding are treated as the
/// same key by [`Skiplist::put`] and [`Skiplist::get_or_put`], regardless of any other notion of
/// identity they may have.
///
/// Any `Fn(&V, &V) -> bool` closure or function is a comparator, with the closure's return value
/// used as [`precedes`].
///
/// [`Skiplist`]: crate::Skiplist
/// [`Skiplist::put`]: crate::Skiplist::put
/// [`Skiplist::get_or_put`]: crate::Skiplist::get_or_put
/// [`precedes`]: Comparator::precedes
pub trait Comparator<V: ?Sized> {
    /// Whether `lhs` sorts strictly before `rhs`.
    #[must_use]
    fn precedes(&self, lhs: &V, rhs: &V) -> bool;

    /// Whether `lhs` and `rhs` are equivalent, meaning that neither precedes the other.
    #[inline]
    #[must_use]
    fn equivalent(&self, lhs: &V, rhs: &V) -> bool {
        !self.precedes(lhs, rhs) && !self.precedes(rhs, lhs)
    }
}

impl<V: ?Sized, F: Fn(&V, &V) -> bool> Comparator<V> for F {
    #[inline]
    fn precedes(&self, lhs: &V, rhs: &V) -> bool {
        self(lhs, rhs)
    }
}
