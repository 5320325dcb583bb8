use tracing::Level as LogLevel;

use crate::{
    interface::Comparator,
    node_heights::HeightGenerator,
    options::SkiplistOptions,
};
use crate::node::{HEAD, Link, NodeArena, NodeId, NodeState};
use super::iter::{Entry, Removed};


/// Which end of a run of equivalent entries a search lands next to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SearchMode {
    /// Stop before the first node which does not precede the key.
    First,
    /// Stop at the last node which the key does not precede.
    Last,
}

impl SearchMode {
    /// Whether a search should advance past a node holding `value`.
    fn short_of<V, Cmp: Comparator<V>>(self, cmp: &Cmp, value: &V, key: &V) -> bool {
        match self {
            Self::First => cmp.precedes(value, key),
            Self::Last  => !cmp.precedes(key, value),
        }
    }
}

/// For each level, the slot of the node whose link on that level a splice or unlink
/// would rewrite.
#[derive(Debug)]
pub(super) struct Frontier(Box<[usize]>);

impl Frontier {
    #[must_use]
    fn new(max_height: usize) -> Self {
        Self(vec![HEAD; max_height].into_boxed_slice())
    }

    fn record(&mut self, level: usize, slot: usize) {
        if let Some(recorded) = self.0.get_mut(level) {
            *recorded = slot;
        }
    }

    /// Record `slot` as the predecessor on every level of its tower.
    fn record_tower(&mut self, slot: usize, height: usize) {
        for recorded in self.0.iter_mut().take(height) {
            *recorded = slot;
        }
    }

    #[must_use]
    fn predecessor(&self, level: usize) -> usize {
        self.0.get(level).copied().unwrap_or(HEAD)
    }
}

/// Walk from the head towards `key`, top level first, and return the slot the search stopped
/// at: the last node which is short of `key` under `mode`, or [`HEAD`] if there is none.
///
/// If a `frontier` is provided, the node where the search descended from each level below
/// `current_height` is recorded as that level's predecessor. Each level is recorded exactly once.
fn search<V, Cmp: Comparator<V>>(
    cmp:            &Cmp,
    arena:          &NodeArena<V>,
    current_height: usize,
    key:            &V,
    mode:           SearchMode,
    mut frontier:   Option<&mut Frontier>,
) -> usize {
    let mut current = HEAD;

    for level in (0..current_height).rev() {
        while let Some(next) = arena.skip(current, level) {
            let Some(value) = arena.value(next) else {
                debug_assert!(false, "a linked node should have a value");
                break;
            };

            if mode.short_of(cmp, value, key) {
                // We should search further ahead since `next` was too small.
                current = next;
            } else {
                break;
            }
        }

        if let Some(frontier) = frontier.as_deref_mut() {
            frontier.record(level, current);
        }
    }

    current
}

/// Starting from `prev`, the result of a [`SearchMode::First`] search for `key`, scan the run of
/// entries equivalent to `key` and return the first one accepted by `predicate`.
///
/// Rejected entries of the run are recorded in the `frontier`, since they stand between the
/// search's predecessors and the returned entry.
fn find_in_run<V, Cmp, P>(
    cmp:           &Cmp,
    arena:         &NodeArena<V>,
    frontier:      &mut Frontier,
    prev:          usize,
    key:           &V,
    mut predicate: P,
) -> Option<usize>
where
    Cmp: Comparator<V>,
    P:   FnMut(Entry<'_, V>) -> bool,
{
    let mut candidate = arena.skip(prev, 0);

    loop {
        let entry = Entry::from_link(arena, candidate)?;

        // Every candidate is not preceded by the key; once the key precedes one,
        // the run is over.
        if cmp.precedes(key, entry.value()) {
            return None;
        }
        if predicate(entry) {
            return Some(entry.slot());
        }

        frontier.record_tower(entry.slot(), entry.height());
        candidate = arena.skip(entry.slot(), 0);
    }
}

/// Struct that implements the searching and mutating logic of [`Skiplist`].
///
/// [`Skiplist`]: crate::Skiplist
#[derive(Debug)]
pub(super) struct ListInner<V, Cmp> {
    cmp:              Cmp,
    arena:            NodeArena<V>,
    heights:          HeightGenerator,
    /// Scratch space for mutating operations; only meaningful during a single call.
    frontier:         Frontier,
    /// The tallest tower linked since the list was created. Levels at or above this height
    /// have no links from the head.
    current_height:   usize,
    len:              usize,
    allow_duplicates: bool,
    auto_recycle:     bool,
}

// Short utility functions
#[expect(unreachable_pub, reason = "control visibility at type definition")]
impl<V, Cmp> ListInner<V, Cmp> {
    /// `options` must have been validated.
    #[must_use]
    pub fn new(cmp: Cmp, options: SkiplistOptions, seed: u64) -> Self {
        Self {
            cmp,
            arena:            NodeArena::new(options.max_height),
            heights:          HeightGenerator::new_seeded(seed, options.max_height),
            frontier:         Frontier::new(options.max_height),
            current_height:   0,
            len:              0,
            allow_duplicates: options.allow_duplicates,
            auto_recycle:     options.auto_recycle,
        }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    #[inline]
    #[must_use]
    pub const fn auto_recycle(&self) -> bool {
        self.auto_recycle
    }

    #[inline]
    pub const fn set_auto_recycle(&mut self, auto_recycle: bool) {
        self.auto_recycle = auto_recycle;
    }

    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> usize {
        self.heights.max_height()
    }

    #[inline]
    #[must_use]
    pub const fn arena(&self) -> &NodeArena<V> {
        &self.arena
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Link {
        self.arena.skip(HEAD, 0)
    }

    /// Return the last node in the skiplist, if the skiplist is nonempty.
    #[must_use]
    pub fn last(&self) -> Link {
        let mut current = HEAD;

        for level in (0..self.current_height).rev() {
            while let Some(next) = self.arena.skip(current, level) {
                current = next;
            }
        }

        (current != HEAD).then_some(current)
    }

    /// Return the slot of the linked node identified by `id`.
    #[inline]
    #[must_use]
    pub fn resolve_linked(&self, id: NodeId) -> Option<usize> {
        self.arena.resolve(id, NodeState::Linked)
    }

    /// Hand a detached node back to the pool.
    pub fn recycle(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.arena.resolve(id, NodeState::Detached) else {
            return false;
        };

        tracing::event!(LogLevel::TRACE, "recycling detached skiplist node in slot {slot}");
        self.arena.recycle(slot)
    }

    pub fn shrink_pool(&mut self, max_pooled: usize) {
        self.arena.shrink_pool(max_pooled);
    }

    /// Splice a new node holding `value` in after the nodes recorded in the frontier.
    ///
    /// The frontier must have been recorded by a search, and must not have been disturbed since.
    fn splice(&mut self, value: V) -> usize {
        let height = self.heights.random_height();

        // Only increase the current height after we're sure that we're inserting something.
        if height > self.current_height {
            tracing::event!(
                LogLevel::TRACE,
                "skiplist grew from {} to {height} levels",
                self.current_height,
            );
            // The search did not record these levels, since nothing was linked on them.
            for level in self.current_height..height {
                self.frontier.record(level, HEAD);
            }
            self.current_height = height;
        }

        let slot = self.arena.allocate(value, height);

        for level in 0..height {
            // On level `level`, put `node` between the predecessor and its skip on the level.
            let prev = self.frontier.predecessor(level);
            let next = self.arena.skip(prev, level);
            self.arena.set_skip(slot, level, next);
            self.arena.set_skip(prev, level, Some(slot));
        }

        self.len += 1;
        slot
    }

    /// Unlink the node in `target` from every level of its tower, using the predecessors
    /// recorded in the frontier.
    fn unlink(&mut self, target: usize) -> Option<Removed<V>> {
        for level in 0..self.arena.height(target) {
            let prev = self.frontier.predecessor(level);
            debug_assert_eq!(
                self.arena.skip(prev, level),
                Some(target),
                "the frontier should hold the target's predecessors",
            );

            let next = self.arena.skip(target, level);
            self.arena.set_skip(prev, level, next);
        }

        let id = self.arena.id_of(target);
        let value = self.arena.detach(target)?;
        self.len -= 1;

        if self.auto_recycle {
            self.arena.recycle(target);
        }

        Some(Removed::new(id, value))
    }
}

// Searching and mutating operations, which need the comparator.
#[expect(unreachable_pub, reason = "control visibility at type definition")]
impl<V, Cmp: Comparator<V>> ListInner<V, Cmp> {
    #[must_use]
    fn search(&self, key: &V, mode: SearchMode) -> usize {
        search(&self.cmp, &self.arena, self.current_height, key, mode, None)
    }

    /// Search for `key`, recording the frontier, and return the landing node.
    fn search_recording(&mut self, key: &V, mode: SearchMode) -> usize {
        search(
            &self.cmp,
            &self.arena,
            self.current_height,
            key,
            mode,
            Some(&mut self.frontier),
        )
    }

    /// Whether the node after `prev` exists and is equivalent to `key`, given that `prev` is the
    /// result of a [`SearchMode::First`] search for `key`.
    #[must_use]
    fn equivalent_after(&self, prev: usize, key: &V) -> Link {
        let next = self.arena.skip(prev, 0)?;
        let value = self.arena.value(next)?;

        // `value` does not precede `key`, so they're equivalent iff `key` doesn't precede `value`.
        (!self.cmp.precedes(key, value)).then_some(next)
    }

    /// Return the first node which does not precede `key`, if there is such a node.
    #[must_use]
    pub fn lower_bound(&self, key: &V) -> Link {
        let prev = self.search(key, SearchMode::First);
        self.arena.skip(prev, 0)
    }

    /// Return the first node equivalent to `key`.
    #[must_use]
    pub fn get(&self, key: &V) -> Link {
        let prev = self.search(key, SearchMode::First);
        self.equivalent_after(prev, key)
    }

    /// Return the last node equivalent to `key`.
    #[must_use]
    pub fn get_last(&self, key: &V) -> Link {
        let last = self.search(key, SearchMode::Last);
        let value = self.arena.value(last)?;

        // The head has no value, so `last` is a node which `key` does not precede.
        (!self.cmp.precedes(value, key)).then_some(last)
    }

    /// Insert `value` after any run of equivalent entries, or overwrite the first equivalent
    /// entry if duplicates are not allowed.
    pub fn put(&mut self, value: V) -> (NodeId, bool) {
        if self.allow_duplicates {
            self.search_recording(&value, SearchMode::Last);
            let slot = self.splice(value);
            (self.arena.id_of(slot), true)
        } else {
            self.put_unique(value)
        }
    }

    /// Insert `value` before any run of equivalent entries, or overwrite the first equivalent
    /// entry if duplicates are not allowed.
    pub fn put_front(&mut self, value: V) -> (NodeId, bool) {
        if self.allow_duplicates {
            self.search_recording(&value, SearchMode::First);
            let slot = self.splice(value);
            (self.arena.id_of(slot), true)
        } else {
            self.put_unique(value)
        }
    }

    fn put_unique(&mut self, value: V) -> (NodeId, bool) {
        let prev = self.search_recording(&value, SearchMode::First);

        if let Some(existing) = self.equivalent_after(prev, &value) {
            // The old value is dropped; the node keeps its identity and its place.
            self.arena.replace_value(existing, value);
            (self.arena.id_of(existing), false)
        } else {
            let slot = self.splice(value);
            (self.arena.id_of(slot), true)
        }
    }

    /// Return the first entry equivalent to `value`, or insert `value` if there is none.
    ///
    /// If an equivalent entry exists, it is left untouched and `value` is dropped.
    pub fn get_or_put(&mut self, value: V) -> (NodeId, bool) {
        let prev = self.search_recording(&value, SearchMode::First);

        if let Some(existing) = self.equivalent_after(prev, &value) {
            (self.arena.id_of(existing), false)
        } else {
            let slot = self.splice(value);
            (self.arena.id_of(slot), true)
        }
    }

    /// Delete the first entry equivalent to `key` which `predicate` accepts.
    pub fn delete_if<P>(&mut self, key: &V, predicate: P) -> Option<Removed<V>>
    where
        P: FnMut(Entry<'_, V>) -> bool,
    {
        let prev = self.search_recording(key, SearchMode::First);
        let target = find_in_run(&self.cmp, &self.arena, &mut self.frontier, prev, key, predicate)?;

        self.unlink(target)
    }

    /// Delete the entry identified by `id`, if it is linked in this list.
    pub fn delete_by_identity(&mut self, id: NodeId) -> Option<Removed<V>> {
        let slot = self.resolve_linked(id)?;
        let key = self.arena.value(slot)?;

        let prev = search(
            &self.cmp,
            &self.arena,
            self.current_height,
            key,
            SearchMode::First,
            Some(&mut self.frontier),
        );
        let target = find_in_run(
            &self.cmp,
            &self.arena,
            &mut self.frontier,
            prev,
            key,
            |entry| entry.slot() == slot,
        );

        // A linked node is always in the run of its own value, unless the comparator is
        // inconsistent. In that case, nothing is unlinked.
        debug_assert_eq!(target, Some(slot), "a linked node should be found by its value");
        self.unlink(target?)
    }
}
