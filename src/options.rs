/// Construction options for a [`SkipSet`](crate::SkipSet).
///
/// ```
/// use skipset::{Options, SkipSet};
///
/// let set: SkipSet<u32> = SkipSet::with_options(Options::new().with_seed(7).with_shrink_levels(true));
/// assert!(set.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    seed: Option<u64>,
    shrink_levels: bool,
    capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options::new()
    }
}

impl Options {
    /// Entropy-seeded levels, no shrinking, no reserved capacity.
    pub const fn new() -> Self {
        Options {
            seed: None,
            shrink_levels: false,
            capacity: 0,
        }
    }

    /// Seed the level oracle so that level draws are reproducible.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Drop empty top levels of the sentinel spine after removals.
    ///
    /// Off by default: the spine only ever wastes O(log n) slots.
    pub const fn with_shrink_levels(mut self, shrink: bool) -> Self {
        self.shrink_levels = shrink;
        self
    }

    /// Reserve room for `capacity` elements up front.
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub const fn shrink_levels(&self) -> bool {
        self.shrink_levels
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
