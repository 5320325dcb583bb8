use crate::interface::Comparator;


/// A [`Comparator`] which sorts values in increasing order of their [`Ord`] implementation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ascending;

impl<V: ?Sized + Ord> Comparator<V> for Ascending {
    /// Equivalent to `lhs < rhs`.
    #[inline]
    fn precedes(&self, lhs: &V, rhs: &V) -> bool {
        lhs < rhs
    }
}

/// A [`Comparator`] which sorts values in decreasing order of their [`Ord`] implementation.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Descending;

impl<V: ?Sized + Ord> Comparator<V> for Descending {
    /// Equivalent to `lhs > rhs`.
    #[inline]
    fn precedes(&self, lhs: &V, rhs: &V) -> bool {
        lhs > rhs
    }
}
