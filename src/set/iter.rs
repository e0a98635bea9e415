use std::iter::FusedIterator;

use crate::set::SkipSet;
use crate::set::node::{HEAD, NodeStore, TAIL};

/// Borrowing iterator over a set in ascending order.
///
/// Walks the level-0 chain from both ends; `front` and `back` are the next
/// node to yield from each side, and `remaining` keeps them from crossing.
pub struct Iter<'a, T> {
    store: &'a NodeStore<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(store: &'a NodeStore<T>, len: usize) -> Self {
        Iter {
            store,
            front: store.node(HEAD).forward[0],
            back: store.node(TAIL).backward[0],
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            store: self.store,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.store.node(self.front);
        self.front = node.forward[0];
        self.remaining -= 1;
        node.value()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.store.node(self.back);
        self.back = node.backward[0];
        self.remaining -= 1;
        node.value()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator, yields elements in ascending order.
pub struct IntoIter<T, L> {
    set: SkipSet<T, L>,
}

impl<T, L> IntoIter<T, L> {
    pub(crate) fn new(set: SkipSet<T, L>) -> Self {
        IntoIter { set }
    }
}

impl<T, L> Iterator for IntoIter<T, L> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.set.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.set.len(), Some(self.set.len()))
    }
}

impl<T, L> DoubleEndedIterator for IntoIter<T, L> {
    fn next_back(&mut self) -> Option<T> {
        self.set.pop_last()
    }
}

impl<T, L> ExactSizeIterator for IntoIter<T, L> {}

impl<T, L> FusedIterator for IntoIter<T, L> {}

impl<'a, T, L> IntoIterator for &'a SkipSet<T, L> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, L> IntoIterator for SkipSet<T, L> {
    type Item = T;
    type IntoIter = IntoIter<T, L>;

    fn into_iter(self) -> IntoIter<T, L> {
        IntoIter::new(self)
    }
}
