//! Node store: every node of a set lives in one slot vector and links are
//! plain slot indices.
//!
//! Slots `0` and `1` permanently hold the head and tail sentinels. Freed
//! slots are recycled through a free list; each slot carries a generation
//! counter that is bumped on release so that cursors into a recycled slot
//! can be told apart from cursors to its new occupant.

/// Slot index of the head sentinel.
pub(crate) const HEAD: usize = 0;
/// Slot index of the tail sentinel.
pub(crate) const TAIL: usize = 1;

/// What a node holds: one of the two boundaries, or an owned element.
#[derive(Debug, Clone)]
pub(crate) enum Slot<T> {
    Head,
    Tail,
    Element(T),
}

/// A node and its per-level links.
///
/// `forward[i]` and `backward[i]` are the neighbours at level `i`. Both
/// vectors always have the same length, which is the node's level count.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) slot: Slot<T>,
    pub(crate) forward: Vec<usize>,
    pub(crate) backward: Vec<usize>,
}

impl<T> Node<T> {
    fn head() -> Self {
        Node {
            slot: Slot::Head,
            forward: vec![TAIL],
            backward: vec![HEAD],
        }
    }

    fn tail() -> Self {
        Node {
            slot: Slot::Tail,
            forward: vec![TAIL],
            backward: vec![HEAD],
        }
    }

    /// An unlinked element node spanning `levels` levels.
    pub(crate) fn element(value: T, levels: usize) -> Self {
        Node {
            slot: Slot::Element(value),
            forward: vec![TAIL; levels],
            backward: vec![HEAD; levels],
        }
    }

    pub(crate) fn levels(&self) -> usize {
        self.forward.len()
    }

    pub(crate) fn value(&self) -> Option<&T> {
        match &self.slot {
            Slot::Element(value) => Some(value),
            Slot::Head | Slot::Tail => None,
        }
    }

    pub(crate) fn into_value(self) -> Option<T> {
        match self.slot {
            Slot::Element(value) => Some(value),
            Slot::Head | Slot::Tail => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Cell<T> {
    generation: u32,
    node: Option<Node<T>>,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeStore<T> {
    cells: Vec<Cell<T>>,
    free: Vec<usize>,
}

impl<T> NodeStore<T> {
    /// A store holding only the two sentinels, linked to each other at level 0.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut cells = Vec::with_capacity(capacity + 2);
        cells.push(Cell {
            generation: 0,
            node: Some(Node::head()),
        });
        cells.push(Cell {
            generation: 0,
            node: Some(Node::tail()),
        });
        NodeStore {
            cells,
            free: Vec::new(),
        }
    }

    /// The node in slot `index`.
    ///
    /// Links only ever point at live slots, so a vacant slot here means the
    /// structure is corrupted.
    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        match self.cells[index].node.as_ref() {
            Some(node) => node,
            None => unreachable!("link into vacant slot {index}"),
        }
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match self.cells[index].node.as_mut() {
            Some(node) => node,
            None => unreachable!("link into vacant slot {index}"),
        }
    }

    /// The node in slot `index`, if it is live and still of `generation`.
    pub(crate) fn get(&self, index: usize, generation: u32) -> Option<&Node<T>> {
        let cell = self.cells.get(index)?;
        if cell.generation != generation {
            return None;
        }
        cell.node.as_ref()
    }

    pub(crate) fn generation(&self, index: usize) -> u32 {
        self.cells[index].generation
    }

    /// Place `node` in a free slot and return its index.
    pub(crate) fn alloc(&mut self, node: Node<T>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.cells[index].node = Some(node);
                index
            }
            None => {
                self.cells.push(Cell {
                    generation: 0,
                    node: Some(node),
                });
                self.cells.len() - 1
            }
        }
    }

    /// Take the node out of slot `index` and recycle the slot.
    pub(crate) fn release(&mut self, index: usize) -> Node<T> {
        debug_assert!(index != HEAD && index != TAIL, "sentinels are never released");
        let cell = &mut self.cells[index];
        let node = match cell.node.take() {
            Some(node) => node,
            None => unreachable!("double release of slot {index}"),
        };
        cell.generation = cell.generation.wrapping_add(1);
        self.free.push(index);
        node
    }

    /// Number of live element nodes (sentinels excluded).
    pub(crate) fn live_elements(&self) -> usize {
        self.cells.len() - self.free.len() - 2
    }

    /// Number of slots, live or free.
    pub(crate) fn slots(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{HEAD, Node, NodeStore, TAIL};

    #[test]
    fn empty_store_links_sentinels() {
        let store: NodeStore<u32> = NodeStore::with_capacity(0);
        assert_eq!(store.node(HEAD).forward, vec![TAIL]);
        assert_eq!(store.node(TAIL).backward, vec![HEAD]);
        assert_eq!(store.node(HEAD).value(), None);
        assert_eq!(store.live_elements(), 0);
    }

    #[test]
    fn release_bumps_generation_and_recycles() {
        let mut store = NodeStore::with_capacity(4);
        let a = store.alloc(Node::element(10u32, 2));
        assert_eq!(store.node(a).levels(), 2);
        assert_eq!(store.live_elements(), 1);

        let generation = store.generation(a);
        let node = store.release(a);
        assert_eq!(node.into_value(), Some(10));
        assert!(store.get(a, generation).is_none());
        assert_eq!(store.live_elements(), 0);

        let b = store.alloc(Node::element(20u32, 1));
        assert_eq!(a, b, "freed slot is reused");
        assert!(store.get(b, generation).is_none(), "old generation stays stale");
        assert_eq!(store.get(b, generation + 1).and_then(|n| n.value()), Some(&20));
        assert_eq!(store.slots(), 3);
    }
}
