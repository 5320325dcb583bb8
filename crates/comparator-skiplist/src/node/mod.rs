mod arena;


pub(crate) use self::arena::NodeArena;


/// A forward link to the node in the given arena slot, or `None` at the end of a level.
pub(crate) type Link = Option<usize>;

/// The arena slot of the head sentinel. No link ever refers to it.
pub(crate) const HEAD: usize = 0;


/// A stable identity for an entry of a [`Skiplist`].
///
/// A `NodeId` is returned when an entry is inserted, and refers to that entry until it is
/// deleted. After deletion it is stale: the list rejects it, even after the entry's storage has
/// been reused for another entry. `NodeId`s from one list are likewise rejected by every other
/// list.
///
/// [`Skiplist`]: crate::Skiplist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) owner:      u64,
    pub(crate) generation: u32,
    pub(crate) slot:       usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    Head,
    /// Spliced into every level of its tower.
    Linked,
    /// Unlinked, but not yet returned to the pool.
    Detached,
    /// Unlinked, cleared, and available for a future insertion.
    Pooled,
    /// Unlinked and cleared, but never reused, since its generation is exhausted.
    Retired,
}

/// A slot of a [`NodeArena`].
///
/// Invariants:
/// - `value` is `Some` if and only if `state` is [`NodeState::Linked`].
/// - While linked, `skips.len()` is the node's height, and does not change.
/// - Pooled nodes have an empty `skips`; their storage is held by the pool.
#[derive(Debug)]
pub(crate) struct Node<V> {
    value:      Option<V>,
    skips:      Vec<Link>,
    generation: u32,
    state:      NodeState,
}

#[expect(unreachable_pub, reason = "control Node's visibility from one site, its definition")]
impl<V> Node<V> {
    #[must_use]
    pub fn new_head(max_height: usize) -> Self {
        Self {
            value:      None,
            skips:      vec![None; max_height],
            generation: 0,
            state:      NodeState::Head,
        }
    }

    #[must_use]
    pub const fn new_linked(value: V, tower: Vec<Link>) -> Self {
        Self {
            value:      Some(value),
            skips:      tower,
            generation: 0,
            state:      NodeState::Linked,
        }
    }

    /// Reuse a pooled slot for a newly-inserted value.
    ///
    /// # Panics
    /// May panic if the node's generation is exhausted; such nodes must be retired instead.
    pub fn reuse(&mut self, value: V, tower: Vec<Link>) {
        debug_assert_eq!(self.state, NodeState::Pooled, "only pooled nodes may be reused");

        self.value = Some(value);
        self.skips = tower;
        self.generation += 1;
        self.state = NodeState::Linked;
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Overwrite the value of a linked node, returning the previous value.
    pub fn replace_value(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.skips.len()
    }

    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether reusing this node would wrap its generation around, letting stale identities
    /// resolve to the new occupant.
    #[inline]
    #[must_use]
    pub const fn generation_exhausted(&self) -> bool {
        self.generation == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> NodeState {
        self.state
    }

    #[must_use]
    pub fn skip(&self, level: usize) -> Link {
        // Using too high of a level is still useful in searching algorithms.
        self.skips.get(level).copied().flatten()
    }

    /// # Panics
    /// May or may not panic if `level >= self.height()`, that is, if there is no skip at the
    /// indicated `level` of this node.
    pub fn set_skip(&mut self, level: usize, link: Link) {
        debug_assert!(level < self.height(), "should not try to set a nonexistent skip of a node");

        if let Some(skip) = self.skips.get_mut(level) {
            *skip = link;
        }
    }

    /// Take the value out of a node which has just been unlinked from every level.
    pub fn detach(&mut self) -> Option<V> {
        debug_assert_eq!(self.state, NodeState::Linked, "only linked nodes may be detached");

        self.skips.fill(None);
        self.state = NodeState::Detached;
        self.value.take()
    }

    /// Move the tower out of a detached node, marking the node as pooled.
    pub fn take_tower(&mut self) -> Vec<Link> {
        debug_assert_eq!(self.state, NodeState::Detached, "only detached nodes may be pooled");

        self.state = NodeState::Pooled;
        std::mem::take(&mut self.skips)
    }

    /// Mark a pooled node as never to be reused.
    pub fn retire(&mut self) {
        debug_assert_eq!(self.state, NodeState::Pooled, "only pooled nodes may be retired");

        self.state = NodeState::Retired;
    }
}
