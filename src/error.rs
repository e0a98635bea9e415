use thiserror::Error;

/// Unified error type for the set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cursor sits at `end()`, which holds no element.
    #[error("cannot dereference or erase the end cursor")]
    EndCursor,
    /// The cursor's node was erased, or the cursor came from another set.
    #[error("cursor does not refer to a live node of this set")]
    StaleCursor,
    /// The cursor was stepped past `end()` or before `begin()`.
    #[error("cursor moved outside the bounds of the set")]
    OutOfRange,
    /// Link structure is inconsistent. Never expected outside of bugs.
    #[error("corruption: {0}")]
    Corruption(String),
}

impl Error {
    /// Whether this error is one of the invalid-cursor conditions.
    pub fn is_invalid_cursor(&self) -> bool {
        matches!(self, Error::EndCursor | Error::StaleCursor | Error::OutOfRange)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
