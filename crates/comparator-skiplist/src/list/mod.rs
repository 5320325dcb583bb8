mod iter;
mod list_inner;


use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::{
    default_comparator::Ascending,
    error::SkiplistError,
    interface::Comparator,
    node::NodeId,
    node_heights::random_seed,
    options::SkiplistOptions,
};
use self::list_inner::ListInner;

pub use self::iter::{Entry, Iter, Removed};


/// An ordered collection of values, sorted by a caller-supplied [`Comparator`].
///
/// Lookups, insertions and deletions take `O(log n)` expected time. Each inserted entry receives
/// a [`NodeId`], which remains a stable identity for that entry until it is deleted, and which
/// allows an entry to be deleted precisely even among equivalent duplicates (see
/// [`Skiplist::delete_by_identity`]).
///
/// If duplicates are allowed, entries which compare as equivalent form a *run*, ordered by how
/// they were inserted: [`Skiplist::put`] appends to the end of a run, and
/// [`Skiplist::put_front`] prepends to its start.
///
/// Deleted nodes are recycled through a pool owned by the list. By default this happens
/// immediately; see [`Skiplist::set_auto_recycle`].
pub struct Skiplist<V, Cmp = Ascending> {
    inner: ListInner<V, Cmp>,
}

impl<V, Cmp: Comparator<V>> Skiplist<V, Cmp> {
    /// Create an empty skiplist which does not allow duplicates, seeded from the operating
    /// system's randomness source.
    #[inline]
    #[must_use]
    pub fn new(cmp: Cmp) -> Self {
        Self::build(cmp, SkiplistOptions::new(), random_seed())
    }

    /// Create an empty skiplist which does not allow duplicates, and whose node heights are
    /// sampled deterministically from `seed`.
    #[inline]
    #[must_use]
    pub fn new_seeded(cmp: Cmp, seed: u64) -> Self {
        Self::build(cmp, SkiplistOptions::new(), seed)
    }

    /// Create an empty skiplist which stores every inserted value, including values
    /// equivalent to existing entries.
    #[inline]
    #[must_use]
    pub fn new_allowing_duplicates(cmp: Cmp) -> Self {
        Self::build(cmp, SkiplistOptions::new().allow_duplicates(true), random_seed())
    }

    /// Create an empty skiplist with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the `options` are invalid; see [`SkiplistOptions::validate`].
    pub fn with_options(cmp: Cmp, options: SkiplistOptions) -> Result<Self, SkiplistError> {
        options.validate()?;
        let seed = options.seed.unwrap_or_else(random_seed);
        Ok(Self::build(cmp, options, seed))
    }

    /// `options` must have been validated.
    #[must_use]
    fn build(cmp: Cmp, options: SkiplistOptions, seed: u64) -> Self {
        Self {
            inner: ListInner::new(cmp, options, seed),
        }
    }
}

impl<V, Cmp: Comparator<V> + Default> Default for Skiplist<V, Cmp> {
    #[inline]
    fn default() -> Self {
        Self::new(Cmp::default())
    }
}

// Configuration and statistics, which do not need the comparator.
impl<V, Cmp> Skiplist<V, Cmp> {
    /// Choose whether deleted nodes are returned to the node pool immediately.
    ///
    /// While this is `false`, each deleted node is left detached: its storage is not reused
    /// until it is passed to [`Skiplist::recycle`]. Nodes deleted while this was `true` are
    /// unaffected by later changes.
    #[inline]
    pub const fn set_auto_recycle(&mut self, auto_recycle: bool) {
        self.inner.set_auto_recycle(auto_recycle);
    }

    #[inline]
    #[must_use]
    pub const fn auto_recycle(&self) -> bool {
        self.inner.auto_recycle()
    }

    #[inline]
    #[must_use]
    pub const fn allows_duplicates(&self) -> bool {
        self.inner.allows_duplicates()
    }

    /// The maximum height of a node's tower.
    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> usize {
        self.inner.max_height()
    }

    /// The number of entries in the skiplist.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Get the first entry of the skiplist, if it is nonempty.
    ///
    /// Following [`Entry::next`] from the first entry visits every entry in order.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<Entry<'_, V>> {
        Entry::from_link(self.inner.arena(), self.inner.first())
    }

    /// Get the last entry of the skiplist, if it is nonempty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<Entry<'_, V>> {
        Entry::from_link(self.inner.arena(), self.inner.last())
    }

    /// Get the entry identified by `id`, if it is still in this skiplist.
    #[must_use]
    pub fn entry(&self, id: NodeId) -> Option<Entry<'_, V>> {
        let slot = self.inner.resolve_linked(id)?;
        Entry::new(self.inner.arena(), slot)
    }

    /// Get the value of the entry identified by `id`, if it is still in this skiplist.
    #[inline]
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.entry(id).map(|entry| entry.value())
    }

    /// Whether `id` identifies an entry currently in this skiplist.
    ///
    /// Identities of deleted entries, and of entries in other skiplists, are never linked.
    #[inline]
    #[must_use]
    pub fn is_linked(&self, id: NodeId) -> bool {
        self.inner.resolve_linked(id).is_some()
    }

    /// Iterate over the values of the skiplist, in order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.inner.arena(), self.inner.first(), self.inner.len())
    }

    /// Return the storage of a deleted, detached node to the node pool, so that a later
    /// insertion may reuse it.
    ///
    /// `id` should be the [`Removed::id`] of a node deleted while auto-recycling was off.
    /// Returns `false`, and does nothing, if `id` does not identify a detached node of this
    /// skiplist; in particular, each node can be recycled only once.
    #[inline]
    pub fn recycle(&mut self, id: NodeId) -> bool {
        self.inner.recycle(id)
    }

    /// The number of deleted nodes available for reuse by later insertions.
    #[inline]
    #[must_use]
    pub fn pooled_nodes(&self) -> usize {
        self.inner.arena().pooled_nodes()
    }

    /// The number of deleted nodes which are waiting for [`Skiplist::recycle`].
    #[inline]
    #[must_use]
    pub const fn detached_nodes(&self) -> usize {
        self.inner.arena().detached_nodes()
    }

    /// Free the tower storage held by all but `max_pooled` of the pooled nodes.
    #[inline]
    pub fn shrink_pool(&mut self, max_pooled: usize) {
        self.inner.shrink_pool(max_pooled);
    }
}

// Searching and mutating operations
impl<V, Cmp: Comparator<V>> Skiplist<V, Cmp> {
    /// Get the first entry equivalent to `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &V) -> Option<Entry<'_, V>> {
        Entry::from_link(self.inner.arena(), self.inner.get(key))
    }

    /// Get the last entry equivalent to `key`.
    ///
    /// In a skiplist without duplicates, this is the same as [`Skiplist::get`].
    #[inline]
    #[must_use]
    pub fn get_last(&self, key: &V) -> Option<Entry<'_, V>> {
        Entry::from_link(self.inner.arena(), self.inner.get_last(key))
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: &V) -> bool {
        self.inner.get(key).is_some()
    }

    /// Get the first entry which `key` does not precede, that is, the first entry at or after
    /// where `key` would be inserted.
    #[inline]
    #[must_use]
    pub fn lower_bound(&self, key: &V) -> Option<Entry<'_, V>> {
        Entry::from_link(self.inner.arena(), self.inner.lower_bound(key))
    }

    /// Insert `value` into the skiplist.
    ///
    /// If duplicates are allowed, `value` is placed after every equivalent entry. Otherwise, if an
    /// equivalent entry exists, its value is overwritten and its identity is kept.
    ///
    /// Returns the identity of the inserted or overwritten entry, and whether a new entry was
    /// inserted.
    #[inline]
    pub fn put(&mut self, value: V) -> (NodeId, bool) {
        self.inner.put(value)
    }

    /// Insert `value` into the skiplist, placing it before every equivalent entry if duplicates
    /// are allowed.
    ///
    /// Otherwise, behaves the same as [`Skiplist::put`].
    #[inline]
    pub fn put_front(&mut self, value: V) -> (NodeId, bool) {
        self.inner.put_front(value)
    }

    /// Get the first entry equivalent to `value`, or insert `value` if there is no such entry.
    ///
    /// An existing entry is never modified; if one is found, `value` is dropped. Returns the
    /// identity of the found or inserted entry, and whether a new entry was inserted.
    #[inline]
    pub fn get_or_put(&mut self, value: V) -> (NodeId, bool) {
        self.inner.get_or_put(value)
    }

    /// Delete the first entry equivalent to `key`.
    ///
    /// In a skiplist with duplicates, repeated calls delete the equivalent entries in order,
    /// starting from the front of their run.
    #[inline]
    pub fn delete(&mut self, key: &V) -> Option<Removed<V>> {
        self.inner.delete_if(key, |_| true)
    }

    /// Delete the first entry equivalent to `key` which `predicate` accepts.
    ///
    /// The `predicate` is called on equivalent entries in order, and is not called again after it
    /// accepts one.
    #[inline]
    pub fn delete_if<P>(&mut self, key: &V, predicate: P) -> Option<Removed<V>>
    where
        P: FnMut(Entry<'_, V>) -> bool,
    {
        self.inner.delete_if(key, predicate)
    }

    /// Delete precisely the entry identified by `id`.
    ///
    /// Returns `None`, without modifying the skiplist, if `id` does not identify an entry
    /// currently in this skiplist.
    #[inline]
    pub fn delete_by_identity(&mut self, id: NodeId) -> Option<Removed<V>> {
        self.inner.delete_by_identity(id)
    }
}

impl<'a, V, Cmp> IntoIterator for &'a Skiplist<V, Cmp> {
    type Item     = &'a V;
    type IntoIter = Iter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, Cmp: Comparator<V>> Extend<V> for Skiplist<V, Cmp> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.put(value);
        }
    }
}

impl<V: Debug, Cmp> Debug for Skiplist<V, Cmp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Skiplist")
            .field("len",              &self.len())
            .field("allow_duplicates", &self.allows_duplicates())
            .field("auto_recycle",     &self.auto_recycle())
            .field("values",           &Values(self.iter()))
            .finish_non_exhaustive()
    }
}

/// Prints the values of an [`Iter`] as a list.
struct Values<'a, V>(Iter<'a, V>);

impl<V: Debug> Debug for Values<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.0.clone()).finish()
    }
}
