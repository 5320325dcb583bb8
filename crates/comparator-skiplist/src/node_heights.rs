use oorandom::Rand32;
use tracing::Level as LogLevel;


/// The greatest maximum height which a skiplist in this crate may be configured to use.
///
/// Each coin flip consumes one bit of a `u32` draw, so a tower of this height can be sampled
/// from a single draw.
pub const MAX_SUPPORTED_HEIGHT: usize = 32;

/// The maximum height used when none is configured.
///
/// Since each additional level is reached with probability `1/2`, one node is generated with
/// this maximum height per approximately 8 million entries inserted into the skiplist
/// (on average). Lists of up to tens of millions of entries keep their expected logarithmic
/// search cost.
pub const DEFAULT_MAX_HEIGHT: usize = 24;

/// Seed used if the operating system's randomness source is unavailable.
const FALLBACK_SEED: u64 = 0x_5EED_5EED_1234_5678;


/// A simple PRNG trait, used for generating random heights for nodes in a skiplist.
pub(crate) trait Prng32 {
    /// Produces a random `u32` in the range `[0, u32::MAX]`.
    ///
    /// (See [`oorandom::Rand32::rand_u32`]; this function is the same interface.)
    #[must_use]
    fn rand_u32(&mut self) -> u32;
}

impl Prng32 for Rand32 {
    #[inline]
    fn rand_u32(&mut self) -> u32 {
        // Inherent impls take priority over traits, so this is the inherent method
        // of `Rand32` a.k.a. `Self`
        Self::rand_u32(self)
    }
}

/// Get a seed for a skiplist's PRNG from the operating system, falling back to a fixed seed
/// if that fails.
#[must_use]
pub(crate) fn random_seed() -> u64 {
    match getrandom::u64() {
        Ok(seed) => seed,
        Err(err) => {
            tracing::event!(
                LogLevel::DEBUG,
                "could not seed skiplist from the OS, using a fixed seed: {err}",
            );
            FALLBACK_SEED
        }
    }
}

/// Samples node heights from a geometric distribution with parameter `1/2`, truncated
/// to `1..=max_height`.
///
/// Every coin flip consumes a single bit of a buffered random `u32`, so on average one random
/// draw serves sixteen nodes.
#[derive(Debug, Clone)]
pub(crate) struct HeightGenerator<P = Rand32> {
    prng:       P,
    /// Unconsumed random bits, least significant bit first.
    bits:       u32,
    /// How many of the low bits of `bits` are still unconsumed.
    bits_left:  u32,
    max_height: usize,
}

#[expect(unreachable_pub, reason = "control visibility at type definition")]
impl HeightGenerator<Rand32> {
    #[inline]
    #[must_use]
    pub fn new_seeded(seed: u64, max_height: usize) -> Self {
        Self::new(Rand32::new(seed), max_height)
    }
}

#[expect(unreachable_pub, reason = "control visibility at type definition")]
impl<P: Prng32> HeightGenerator<P> {
    /// # Panics
    /// May or may not panic if `max_height` is zero or greater than [`MAX_SUPPORTED_HEIGHT`].
    #[must_use]
    pub fn new(prng: P, max_height: usize) -> Self {
        debug_assert!(
            (1..=MAX_SUPPORTED_HEIGHT).contains(&max_height),
            "options are validated before a height generator is made",
        );

        Self {
            prng,
            bits:      0,
            bits_left: 0,
            max_height,
        }
    }

    #[inline]
    #[must_use]
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Flip a fair coin, returning `true` for heads.
    fn coin_flip(&mut self) -> bool {
        if self.bits_left == 0 {
            self.bits = self.prng.rand_u32();
            self.bits_left = u32::BITS;
        }

        let heads = self.bits & 1 == 1;
        self.bits >>= 1;
        self.bits_left -= 1;
        heads
    }

    /// Return a random value in `1..=self.max_height()`, where each height `h` below the maximum
    /// has probability `2^-h`.
    ///
    /// Technically, the maximum height is twice as likely as it would be in an exact and
    /// unbounded geometric distribution, since what would be higher values are capped to it.
    pub fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_height && self.coin_flip() {
            height += 1;
        }
        height
    }
}
