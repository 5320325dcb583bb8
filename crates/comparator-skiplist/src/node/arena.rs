use std::sync::atomic::{AtomicU64, Ordering};

use tracing::Level as LogLevel;

use crate::node_pool::NodePool;
use super::{HEAD, Link, Node, NodeId, NodeState};


/// Hands out the `owner` tag of each arena, so that a [`NodeId`] of one list is never mistaken
/// for a node of another. A `u64` counter cannot be exhausted by constructing lists.
static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);


/// Index-addressable storage for the nodes of one skiplist.
///
/// Slot [`HEAD`] holds the head sentinel. Every other slot holds a node which is linked,
/// detached, pooled, or retired (see [`NodeState`]). Slots are never removed, so a slot index is a stable
/// address for as long as the arena lives; a slot's generation distinguishes its successive
/// occupants.
#[derive(Debug)]
pub(crate) struct NodeArena<V> {
    owner:      u64,
    nodes:      Vec<Node<V>>,
    /// Pooled slots, available for reuse. Their tower storage is in `pool`.
    free_slots: Vec<usize>,
    pool:       NodePool,
    detached:   usize,
}

#[expect(unreachable_pub, reason = "control visibility at type definition")]
impl<V> NodeArena<V> {
    #[must_use]
    pub fn new(max_height: usize) -> Self {
        Self {
            owner:      NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            nodes:      vec![Node::new_head(max_height)],
            free_slots: Vec::new(),
            pool:       NodePool::new(),
            detached:   0,
        }
    }

    /// Allocate a linked node holding `value`, with a tower of `height` empty links.
    ///
    /// The caller must splice the node into every level of its tower before anything else
    /// reads the arena.
    #[must_use]
    pub fn allocate(&mut self, value: V, height: usize) -> usize {
        let tower = self.pool.get(height);

        if let Some(slot) = self.free_slots.pop() {
            if let Some(node) = self.nodes.get_mut(slot) {
                node.reuse(value, tower);
                return slot;
            }
        }

        self.nodes.push(Node::new_linked(value, tower));
        self.nodes.len() - 1
    }

    /// Take the value out of a linked node which has been unlinked from every level.
    /// The node is detached until [`NodeArena::recycle`] is called on it.
    pub fn detach(&mut self, slot: usize) -> Option<V> {
        let value = self.nodes.get_mut(slot)?.detach();
        self.detached += 1;
        value
    }

    /// Return a detached node to the pool, returning `false` if the node was not detached.
    ///
    /// The tower storage is always pooled, but a slot whose generation is exhausted is retired
    /// rather than made available for reuse.
    pub fn recycle(&mut self, slot: usize) -> bool {
        let Some(node) = self.nodes.get_mut(slot) else {
            return false;
        };
        if node.state() != NodeState::Detached {
            return false;
        }

        let tower = node.take_tower();
        if node.generation_exhausted() {
            node.retire();
            tracing::event!(
                LogLevel::DEBUG,
                "retiring skiplist slot {slot}, whose generation is exhausted",
            );
        } else {
            self.free_slots.push(slot);
        }

        self.pool.return_tower(tower);
        self.detached -= 1;
        true
    }

    #[inline]
    #[must_use]
    pub fn skip(&self, slot: usize, level: usize) -> Link {
        self.nodes.get(slot)?.skip(level)
    }

    pub fn set_skip(&mut self, slot: usize, level: usize, link: Link) {
        debug_assert_ne!(link, Some(HEAD), "no link may refer to the head");

        if let Some(node) = self.nodes.get_mut(slot) {
            node.set_skip(level, link);
        }
    }

    #[inline]
    #[must_use]
    pub fn height(&self, slot: usize) -> usize {
        self.nodes.get(slot).map(Node::height).unwrap_or(0)
    }

    /// The value of the node in `slot`, if it is linked.
    #[inline]
    #[must_use]
    pub fn value(&self, slot: usize) -> Option<&V> {
        self.nodes.get(slot)?.value()
    }

    /// Overwrite the value of the linked node in `slot`, returning the previous value.
    pub fn replace_value(&mut self, slot: usize, value: V) -> Option<V> {
        self.nodes.get_mut(slot)?.replace_value(value)
    }

    /// The identity of the current occupant of `slot`.
    #[must_use]
    pub fn id_of(&self, slot: usize) -> NodeId {
        NodeId {
            owner:      self.owner,
            generation: self.nodes.get(slot).map(Node::generation).unwrap_or(0),
            slot,
        }
    }

    /// Get the slot of the node identified by `id`, if that node belongs to this arena,
    /// has not been succeeded by another occupant of its slot, and is in the given `state`.
    #[must_use]
    pub fn resolve(&self, id: NodeId, state: NodeState) -> Option<usize> {
        if id.owner != self.owner {
            return None;
        }

        let node = self.nodes.get(id.slot)?;
        (node.generation() == id.generation && node.state() == state).then_some(id.slot)
    }

    /// The number of slots, including the head, which have ever been allocated.
    #[cfg(test)]
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn pooled_nodes(&self) -> usize {
        self.free_slots.len()
    }

    #[inline]
    #[must_use]
    pub const fn detached_nodes(&self) -> usize {
        self.detached
    }

    /// Drop the tower storage of all but `max_pooled` pooled nodes.
    ///
    /// The pooled slots themselves remain available for reuse.
    pub fn shrink_pool(&mut self, max_pooled: usize) {
        self.pool.trim_unused(max_pooled);
        tracing::event!(
            LogLevel::TRACE,
            "skiplist arena has {} slots, {} pooled ({} with towers) and {} detached",
            self.nodes.len(),
            self.free_slots.len(),
            self.pool.available_towers(),
            self.detached,
        );
    }
}
