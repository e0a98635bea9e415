//! The ordered set and its skip-list engine.
//!
//! ```text
//! Level 2:  HEAD ─────────────────────► 50 ──────────► TAIL
//! Level 1:  HEAD ──────────► 20 ──────► 50 ──────────► TAIL
//! Level 0:  HEAD ──► 10 ──► 20 ──► 35 ► 50 ──► 60 ───► TAIL
//! ```
//!
//! Every level is a doubly-linked chain running from the head sentinel to
//! the tail sentinel. Level 0 holds every element; a node on level `i` is
//! also on every level below `i`. The sentinels always span the same number
//! of levels, and that number is the height of the whole structure.

pub mod cursor;
pub mod iter;
pub(crate) mod node;

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::level::{GeometricLevels, LevelOracle};
use crate::options::Options;

pub use cursor::Cursor;
pub use iter::{IntoIter, Iter};
use node::{HEAD, Node, NodeStore, Slot, TAIL};

/// Source of set identities, so a cursor from one set is rejected by another.
static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

fn next_set_id() -> u64 {
    NEXT_SET_ID.fetch_add(1, Ordering::Relaxed)
}

/// An ordered set backed by a skip list.
///
/// Expected O(log n) `insert`, `find` and `erase`, no rebalancing. Each
/// element occurs at most once. Positions are handed out as [`Cursor`]s,
/// which survive every mutation except erasing the element they address.
///
/// ```
/// use skipset::SkipSet;
///
/// let mut set = SkipSet::with_seed(1);
/// for v in [5, 3, 8, 1] {
///     set.insert(v);
/// }
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
/// assert_eq!(set.erase(&3), 1);
/// assert_eq!(set.find(&3), set.end());
/// ```
pub struct SkipSet<T, L = GeometricLevels> {
    id: u64,
    store: NodeStore<T>,
    len: usize,
    oracle: L,
    shrink_levels: bool,
}

impl<T> SkipSet<T> {
    /// Empty set with an entropy-seeded level oracle.
    pub fn new() -> Self {
        SkipSet::with_options(Options::new())
    }

    /// Empty set whose level draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        SkipSet::with_options(Options::new().with_seed(seed))
    }

    pub fn with_options(options: Options) -> Self {
        let oracle = match options.seed() {
            Some(seed) => GeometricLevels::seed_from_u64(seed),
            None => GeometricLevels::from_entropy(),
        };
        SkipSet::from_parts(oracle, options)
    }
}

impl<T> Default for SkipSet<T> {
    fn default() -> Self {
        SkipSet::new()
    }
}

impl<T, L> SkipSet<T, L> {
    /// Empty set drawing levels from `oracle`.
    pub fn with_oracle(oracle: L) -> Self {
        SkipSet::from_parts(oracle, Options::new())
    }

    /// Empty set drawing levels from `oracle`. The seed in `options` is
    /// ignored.
    pub fn with_oracle_and_options(oracle: L, options: Options) -> Self {
        SkipSet::from_parts(oracle, options)
    }

    fn from_parts(oracle: L, options: Options) -> Self {
        SkipSet {
            id: next_set_id(),
            store: NodeStore::with_capacity(options.capacity()),
            len: 0,
            oracle,
            shrink_levels: options.shrink_levels(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels the sentinels currently span.
    pub fn levels(&self) -> usize {
        self.store.node(HEAD).levels()
    }

    /// The level oracle this set draws node heights from.
    pub fn oracle(&self) -> &L {
        &self.oracle
    }

    /// Cursor to the smallest element, or `end()` when empty.
    pub fn begin(&self) -> Cursor {
        self.cursor(self.store.node(HEAD).forward[0])
    }

    /// Cursor one past the largest element.
    pub fn end(&self) -> Cursor {
        self.cursor(TAIL)
    }

    /// The element at `cursor`.
    pub fn get(&self, cursor: Cursor) -> Result<&T> {
        let index = self.resolve(cursor)?;
        match &self.store.node(index).slot {
            Slot::Element(value) => Ok(value),
            Slot::Tail => Err(Error::EndCursor),
            Slot::Head => Err(Error::StaleCursor),
        }
    }

    /// How many levels the node at `cursor` spans. `end()` reports the
    /// sentinel height.
    pub fn node_levels(&self, cursor: Cursor) -> Result<usize> {
        let index = self.resolve(cursor)?;
        Ok(self.store.node(index).levels())
    }

    /// Cursor to the element after `cursor`, possibly `end()`.
    pub fn successor(&self, cursor: Cursor) -> Result<Cursor> {
        let index = self.resolve(cursor)?;
        if index == TAIL {
            return Err(Error::OutOfRange);
        }
        Ok(self.cursor(self.store.node(index).forward[0]))
    }

    /// Cursor to the element before `cursor`.
    pub fn predecessor(&self, cursor: Cursor) -> Result<Cursor> {
        let index = self.resolve(cursor)?;
        let prev = self.store.node(index).backward[0];
        if prev == HEAD {
            return Err(Error::OutOfRange);
        }
        Ok(self.cursor(prev))
    }

    pub fn first(&self) -> Option<&T> {
        let first = self.store.node(HEAD).forward[0];
        self.store.node(first).value()
    }

    pub fn last(&self) -> Option<&T> {
        let last = self.store.node(TAIL).backward[0];
        self.store.node(last).value()
    }

    /// Remove and return the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.store.node(HEAD).forward[0];
        if first == TAIL {
            return None;
        }
        Some(self.unlink(first).1)
    }

    /// Remove and return the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.store.node(TAIL).backward[0];
        if last == HEAD {
            return None;
        }
        Some(self.unlink(last).1)
    }

    /// Remove the element at `cursor`, returning a cursor to the element
    /// that followed it.
    ///
    /// Fails with `EndCursor` for `end()` and `StaleCursor` for a cursor
    /// whose element is already gone. Nothing is modified on failure.
    pub fn erase_at(&mut self, cursor: Cursor) -> Result<Cursor> {
        let index = self.resolve(cursor)?;
        if index == TAIL {
            return Err(Error::EndCursor);
        }
        let (next, _) = self.unlink(index);
        Ok(self.cursor(next))
    }

    /// Remove every element in O(n) and reset the sentinels to one level.
    ///
    /// Outstanding cursors to elements become stale; `end()` stays valid.
    pub fn clear(&mut self) {
        let mut current = self.store.node(HEAD).forward[0];
        while current != TAIL {
            let node = self.store.release(current);
            current = node.forward[0];
        }
        debug!(removed = self.len, "cleared set");
        self.len = 0;

        let head = self.store.node_mut(HEAD);
        head.forward = vec![TAIL];
        head.backward = vec![HEAD];
        let tail = self.store.node_mut(TAIL);
        tail.forward = vec![TAIL];
        tail.backward = vec![HEAD];
    }

    /// Exchange the contents of two sets in O(1).
    ///
    /// Cursors follow their elements: a cursor taken from `self` before the
    /// swap is valid on `other` afterwards.
    pub fn swap(&mut self, other: &mut SkipSet<T, L>) {
        std::mem::swap(self, other);
    }

    /// Iterate over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.store, self.len)
    }

    /// Verify the link structure: every level is a consistent, strictly
    /// ascending doubly-linked chain from head to tail, nodes on a level are
    /// present on all lower levels, and the element count matches.
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        let corrupt = |msg: String| Err(Error::Corruption(msg));
        let levels = self.levels();
        if levels == 0 || self.store.node(TAIL).levels() != levels {
            return corrupt(format!(
                "sentinel heights differ: head {levels}, tail {}",
                self.store.node(TAIL).levels()
            ));
        }

        let limit = self.store.slots();
        // expected[l]: level-0 nodes tall enough to sit on level l
        let mut expected = vec![0usize; levels];
        for level in 0..levels {
            let mut prev = HEAD;
            let mut current = self.store.node(HEAD).forward[level];
            let mut steps = 0;
            while current != TAIL {
                steps += 1;
                if steps > limit {
                    return corrupt(format!("cycle on level {level}"));
                }
                let node = self.store.node(current);
                if node.forward.len() != node.backward.len() {
                    return corrupt(format!("slot {current} has uneven link arrays"));
                }
                if node.levels() <= level {
                    return corrupt(format!("slot {current} linked above its height on level {level}"));
                }
                if node.levels() > levels {
                    return corrupt(format!("slot {current} is taller than the sentinels"));
                }
                if level == 0 {
                    for count in &mut expected[..node.levels()] {
                        *count += 1;
                    }
                }
                if node.backward[level] != prev {
                    return corrupt(format!("slot {current} has a bad back link on level {level}"));
                }
                let Some(value) = node.value() else {
                    return corrupt(format!("sentinel reached mid-chain on level {level}"));
                };
                if let Some(prev_value) = self.store.node(prev).value() {
                    if prev_value >= value {
                        return corrupt(format!("level {level} is not strictly ascending"));
                    }
                }
                prev = current;
                current = node.forward[level];
            }
            if self.store.node(TAIL).backward[level] != prev {
                return corrupt(format!("tail has a bad back link on level {level}"));
            }
            if level == 0 && steps != self.len {
                return corrupt(format!("level 0 holds {steps} nodes, len is {}", self.len));
            }
            if steps != expected[level] {
                return corrupt(format!(
                    "level {level} links {steps} nodes, {} are tall enough for it",
                    expected[level]
                ));
            }
        }

        if self.store.live_elements() != self.len {
            return corrupt(format!(
                "{} live nodes, len is {}",
                self.store.live_elements(),
                self.len
            ));
        }
        Ok(())
    }

    fn cursor(&self, index: usize) -> Cursor {
        Cursor {
            owner: self.id,
            index,
            generation: self.store.generation(index),
        }
    }

    /// Slot index addressed by `cursor`, if it is live in this set.
    fn resolve(&self, cursor: Cursor) -> Result<usize> {
        if cursor.owner != self.id {
            return Err(Error::StaleCursor);
        }
        match self.store.get(cursor.index, cursor.generation) {
            Some(node) if !matches!(node.slot, Slot::Head) => Ok(cursor.index),
            _ => Err(Error::StaleCursor),
        }
    }

    /// Append empty levels to both sentinels until they span `levels`.
    fn grow(&mut self, levels: usize) {
        let current = self.levels();
        if levels <= current {
            return;
        }
        let head = self.store.node_mut(HEAD);
        head.forward.resize(levels, TAIL);
        head.backward.resize(levels, HEAD);
        let tail = self.store.node_mut(TAIL);
        tail.forward.resize(levels, TAIL);
        tail.backward.resize(levels, HEAD);
        trace!(from = current, to = levels, "grew sentinel levels");
    }

    /// Drop top levels that no element occupies, keeping at least one.
    fn shrink(&mut self) {
        let current = self.levels();
        let mut levels = current;
        while levels > 1 && self.store.node(HEAD).forward[levels - 1] == TAIL {
            levels -= 1;
        }
        if levels == current {
            return;
        }
        let head = self.store.node_mut(HEAD);
        head.forward.truncate(levels);
        head.backward.truncate(levels);
        let tail = self.store.node_mut(TAIL);
        tail.forward.truncate(levels);
        tail.backward.truncate(levels);
        trace!(from = current, to = levels, "shrank sentinel levels");
    }

    /// Splice `value` in on levels `0..preds.len()`, after `preds[i]` on
    /// each level. The sentinels must already span that many levels.
    fn link(&mut self, value: T, preds: &[usize]) -> usize {
        let index = self.store.alloc(Node::element(value, preds.len()));
        for (level, &pred) in preds.iter().enumerate() {
            let succ = self.store.node(pred).forward[level];
            let node = self.store.node_mut(index);
            node.forward[level] = succ;
            node.backward[level] = pred;
            self.store.node_mut(pred).forward[level] = index;
            self.store.node_mut(succ).backward[level] = index;
        }
        self.len += 1;
        index
    }

    /// Unsplice the element in slot `index` from every level it spans.
    /// Returns its level-0 successor and the owned value.
    fn unlink(&mut self, index: usize) -> (usize, T) {
        let node = self.store.release(index);
        for level in 0..node.levels() {
            let pred = node.backward[level];
            let succ = node.forward[level];
            self.store.node_mut(pred).forward[level] = succ;
            self.store.node_mut(succ).backward[level] = pred;
        }
        self.len -= 1;
        if self.shrink_levels {
            self.shrink();
        }
        let next = node.forward[0];
        match node.into_value() {
            Some(value) => (next, value),
            None => unreachable!("sentinel in slot {index} was unlinked"),
        }
    }

    /// Predecessors of a node to be spliced after `pred` on level 0, found
    /// by climbing back links until a node tall enough for each level.
    fn climb(&self, pred: usize, levels: usize) -> Vec<usize> {
        let mut preds = Vec::with_capacity(levels);
        let mut current = pred;
        for level in 0..levels {
            loop {
                let node = self.store.node(current);
                if node.levels() > level {
                    break;
                }
                current = node.backward[node.levels() - 1];
            }
            preds.push(current);
        }
        preds
    }
}

impl<T: Ord, L> SkipSet<T, L> {
    /// Top-down descent. Returns the slot of the first node not less than
    /// `key` (the tail when there is none). When `preds` is given it is
    /// filled with the last node before `key` on every level.
    fn search<Q>(&self, key: &Q, mut preds: Option<&mut Vec<usize>>) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let levels = self.levels();
        if let Some(preds) = preds.as_deref_mut() {
            preds.clear();
            preds.resize(levels, HEAD);
        }
        let mut current = HEAD;
        for level in (0..levels).rev() {
            loop {
                let next = self.store.node(current).forward[level];
                match self.store.node(next).value() {
                    Some(value) if Borrow::<Q>::borrow(value) < key => current = next,
                    _ => break,
                }
            }
            if let Some(preds) = preds.as_deref_mut() {
                preds[level] = current;
            }
        }
        self.store.node(current).forward[0]
    }

    /// Slot holding an element equal to `key`, if any.
    fn locate<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.search(key, None);
        match self.store.node(index).value() {
            Some(value) if Borrow::<Q>::borrow(value) == key => Some(index),
            _ => None,
        }
    }

    /// Cursor to the first element not less than `key`, or `end()`.
    pub fn lower_bound<Q>(&self, key: &Q) -> Cursor
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor(self.search(key, None))
    }

    /// Cursor to the first element greater than `key`, or `end()`.
    pub fn upper_bound<Q>(&self, key: &Q) -> Cursor
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.search(key, None);
        let node = self.store.node(index);
        match node.value() {
            Some(value) if Borrow::<Q>::borrow(value) == key => self.cursor(node.forward[0]),
            _ => self.cursor(index),
        }
    }

    /// Cursor to the element equal to `key`, or `end()`.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Some(index) => self.cursor(index),
            None => self.end(),
        }
    }

    /// `1` if `key` is present, else `0`.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        usize::from(self.contains(key))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Remove `key`. Returns how many elements were removed (0 or 1).
    pub fn erase<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        usize::from(self.take(key).is_some())
    }

    /// Remove `key` and hand back the owned element.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.locate(key)?;
        Some(self.unlink(index).1)
    }
}

impl<T: Ord, L: LevelOracle> SkipSet<T, L> {
    fn sample_levels(&mut self) -> usize {
        self.oracle.sample_level().max(1)
    }

    /// Insert `value`. Returns a cursor to the element equal to `value` and
    /// whether it was newly inserted; an equal element already present is
    /// left untouched and `value` is dropped.
    pub fn insert(&mut self, value: T) -> (Cursor, bool) {
        let mut preds = Vec::new();
        let index = self.search(&value, Some(&mut preds));
        if self.store.node(index).value() == Some(&value) {
            return (self.cursor(index), false);
        }

        let levels = self.sample_levels();
        self.grow(levels);
        preds.resize(levels, HEAD);
        let index = self.link(value, &preds);
        (self.cursor(index), true)
    }

    /// Insert `value` just before `hint` when that keeps the order, without
    /// searching from the top. Any other hint, including a stale or foreign
    /// cursor, falls back to [`insert`](Self::insert). Returns a cursor to
    /// the element equal to `value`.
    pub fn insert_hint(&mut self, hint: Cursor, value: T) -> Cursor {
        let Ok(after) = self.resolve(hint) else {
            debug!("stale hint, falling back to search");
            return self.insert(value).0;
        };
        let before = self.store.node(after).backward[0];
        let fits_after = self.store.node(after).value().is_none_or(|next| value < *next);
        let fits_before = self.store.node(before).value().is_none_or(|prev| *prev < value);
        if !(fits_after && fits_before) {
            debug!("hint does not bracket value, falling back to search");
            return self.insert(value).0;
        }

        let levels = self.sample_levels();
        self.grow(levels);
        let preds = self.climb(before, levels);
        let index = self.link(value, &preds);
        self.cursor(index)
    }
}

impl<T: Ord + Clone, L: LevelOracle + Clone> Clone for SkipSet<T, L> {
    fn clone(&self) -> Self {
        let mut copy = SkipSet::from_parts(
            self.oracle.clone(),
            Options::new()
                .with_shrink_levels(self.shrink_levels)
                .with_capacity(self.len),
        );
        for value in self.iter() {
            let end = copy.end();
            copy.insert_hint(end, value.clone());
        }
        copy
    }

    /// Copy assignment: keeps this set's identity and oracle.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for value in source.iter() {
            let end = self.end();
            self.insert_hint(end, value.clone());
        }
    }
}

impl<T: fmt::Debug, L> fmt::Debug for SkipSet<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, L> PartialEq for SkipSet<T, L> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, L> Eq for SkipSet<T, L> {}

impl<T: Ord, L: LevelOracle> Extend<T> for SkipSet<T, L> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SkipSet::new();
        set.extend(iter);
        set
    }
}
