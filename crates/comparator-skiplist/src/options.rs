use crate::error::SkiplistError;
use crate::node_heights::{DEFAULT_MAX_HEIGHT, MAX_SUPPORTED_HEIGHT};


/// Configuration for constructing a [`Skiplist`] with [`Skiplist::with_options`].
///
/// [`Skiplist`]: crate::Skiplist
/// [`Skiplist::with_options`]: crate::Skiplist::with_options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkiplistOptions {
    /// Whether multiple entries which compare as equivalent may be stored.
    ///
    /// If `false`, putting a value equivalent to an existing entry overwrites that entry.
    pub allow_duplicates: bool,
    /// Whether deleted nodes are returned to the list's node pool immediately.
    ///
    /// If `false`, each deleted node stays detached until it is handed back with
    /// [`Skiplist::recycle`].
    ///
    /// [`Skiplist::recycle`]: crate::Skiplist::recycle
    pub auto_recycle:     bool,
    /// The maximum height of a node's tower, in `1..=MAX_SUPPORTED_HEIGHT`.
    ///
    /// A good choice is roughly `log2` of the largest expected number of entries, plus a margin.
    pub max_height:       usize,
    /// Seed for the PRNG which samples tower heights. If `None`, a seed is obtained from the
    /// operating system.
    pub seed:             Option<u64>,
}

impl SkiplistOptions {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_duplicates: false,
            auto_recycle:     true,
            max_height:       DEFAULT_MAX_HEIGHT,
            seed:             None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn allow_duplicates(mut self, allow_duplicates: bool) -> Self {
        self.allow_duplicates = allow_duplicates;
        self
    }

    #[inline]
    #[must_use]
    pub const fn auto_recycle(mut self, auto_recycle: bool) -> Self {
        self.auto_recycle = auto_recycle;
        self
    }

    #[inline]
    #[must_use]
    pub const fn max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    #[inline]
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Confirm that these options describe a usable skiplist.
    pub const fn validate(&self) -> Result<(), SkiplistError> {
        if self.max_height == 0 || self.max_height > MAX_SUPPORTED_HEIGHT {
            Err(SkiplistError::InvalidMaxHeight {
                requested: self.max_height,
                supported: MAX_SUPPORTED_HEIGHT,
            })
        } else {
            Ok(())
        }
    }
}

impl Default for SkiplistOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
