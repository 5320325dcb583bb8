use tracing::Level as LogLevel;

use crate::node::Link;


/// Towers returned to a [`NodePool`] keep at most this many links of capacity. Taller towers are
/// trimmed down, so a pool full of recycled towers does not pin the memory of rare tall nodes.
pub(crate) const INLINE_TOWER_CAPACITY: usize = 4;


/// A pool of tower storage released by deleted nodes, owned by a single skiplist.
///
/// Every tower in the pool has been reset: it has no links, and at most
/// [`INLINE_TOWER_CAPACITY`] of capacity.
#[derive(Debug, Default)]
pub(crate) struct NodePool {
    towers: Vec<Vec<Link>>,
}

#[expect(unreachable_pub, reason = "control visibility at type definition")]
impl NodePool {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            towers: Vec::new(),
        }
    }

    /// Get a tower of `height` empty links, reusing pooled storage if any is available.
    #[must_use]
    pub fn get(&mut self, height: usize) -> Vec<Link> {
        let mut tower = self.towers.pop().unwrap_or_default();
        tower.resize(height, None);
        tower
    }

    /// Reset a tower and return it to the pool.
    pub fn return_tower(&mut self, mut tower: Vec<Link>) {
        tower.clear();
        tower.shrink_to(INLINE_TOWER_CAPACITY);
        self.towers.push(tower);
    }

    /// Get the number of towers in the pool.
    #[inline]
    #[must_use]
    pub fn available_towers(&self) -> usize {
        self.towers.len()
    }

    /// Discard extra unused towers, keeping only the first `max_unused` of them.
    pub fn trim_unused(&mut self, max_unused: usize) {
        if self.towers.len() > max_unused {
            tracing::event!(
                LogLevel::DEBUG,
                "trimming skiplist node pool from {} to {max_unused} towers",
                self.towers.len(),
            );
            self.towers.truncate(max_unused);
            self.towers.shrink_to_fit();
        }
    }
}
