//! # skipset
//!
//! An ordered set built on a skip list: a sorted, doubly-linked chain of
//! nodes where each node also joins a random number of sparser "express"
//! levels above it. Searches start on the top level and drop down a level
//! whenever the next step would overshoot, which gives expected O(log n)
//! lookups, insertions and removals with no rebalancing.
//!
//! ## Layout
//! Nodes live in a slot vector and refer to each other by index, so links
//! can never dangle. Positions are exposed as [`Cursor`] handles that
//! detect when the element they point to has been erased.
//!
//! Level counts come from a [`LevelOracle`]; the default
//! [`GeometricLevels`] draws level `L` with probability `2^-L` and can be
//! seeded for reproducible runs.
//!
//! ```
//! use skipset::SkipSet;
//!
//! let mut set = SkipSet::with_seed(7);
//! let (_, inserted) = set.insert("pear");
//! assert!(inserted);
//! set.insert("apple");
//! assert!(!set.insert("pear").1);
//!
//! let mut cursor = set.begin();
//! assert_eq!(set.get(cursor), Ok(&"apple"));
//! cursor.increment(&set).unwrap();
//! assert_eq!(set.get(cursor), Ok(&"pear"));
//! cursor.increment(&set).unwrap();
//! assert_eq!(cursor, set.end());
//! ```

pub mod error;
pub mod level;
pub mod options;
pub mod render;
pub mod set;

pub use error::{Error, Result};
pub use level::{GeometricLevels, LevelOracle};
pub use options::Options;
pub use render::{Label, Levels, render};
pub use set::{Cursor, IntoIter, Iter, SkipSet};
