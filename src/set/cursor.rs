use crate::error::Result;
use crate::set::SkipSet;

/// A position in a [`SkipSet`]: an element, or `end()`.
///
/// Cursors are small copyable handles, not borrows, so they stay usable
/// while the set is mutated. A cursor is invalidated only when the element
/// it addresses is erased; every operation that takes one reports
/// [`Error::StaleCursor`](crate::Error::StaleCursor) for it instead of
/// reading a recycled node. Two cursors are equal when they address the
/// same node of the same set.
///
/// Stepping only follows level-0 links, so it does not depend on how many
/// levels the node spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) owner: u64,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl Cursor {
    /// Move to the next element (`++it`). Returns the new position.
    ///
    /// Fails with `OutOfRange` when already at `end()`.
    pub fn increment<T, L>(&mut self, set: &SkipSet<T, L>) -> Result<Cursor> {
        *self = set.successor(*self)?;
        Ok(*self)
    }

    /// Move to the next element (`it++`). Returns the old position.
    pub fn post_increment<T, L>(&mut self, set: &SkipSet<T, L>) -> Result<Cursor> {
        let old = *self;
        *self = set.successor(old)?;
        Ok(old)
    }

    /// Move to the previous element (`--it`). Returns the new position.
    ///
    /// Fails with `OutOfRange` when already at `begin()`.
    pub fn decrement<T, L>(&mut self, set: &SkipSet<T, L>) -> Result<Cursor> {
        *self = set.predecessor(*self)?;
        Ok(*self)
    }

    /// Move to the previous element (`it--`). Returns the old position.
    pub fn post_decrement<T, L>(&mut self, set: &SkipSet<T, L>) -> Result<Cursor> {
        let old = *self;
        *self = set.predecessor(old)?;
        Ok(old)
    }
}
