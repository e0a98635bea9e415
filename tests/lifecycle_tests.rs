// Copy, clear, swap and ownership transfer.

use skipset::{LevelOracle, Options, SkipSet};

// =============================================================================
// Test 1: Clone is a deep, independent copy
// =============================================================================
#[test]
fn clone_is_independent() {
    let mut original = SkipSet::with_seed(1);
    original.extend([3, 1, 4, 5, 9, 2, 6]);

    let mut copy = original.clone();
    assert_eq!(copy, original);
    copy.check_invariants().unwrap();

    copy.erase(&4);
    copy.insert(100);
    assert_eq!(original.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 9]);
    assert_eq!(copy.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 9, 100]);

    original.clear();
    assert_eq!(copy.len(), 7);
}

// =============================================================================
// Test 2: Cursors do not cross between a set and its clone
// =============================================================================
#[test]
fn clone_has_its_own_cursors() {
    let original: SkipSet<i32> = (0..10).collect();
    let copy = original.clone();
    assert_ne!(original.begin(), copy.begin());
    assert!(copy.get(original.find(&5)).is_err());
}

// =============================================================================
// Test 3: clone_from replaces contents
// =============================================================================
#[test]
fn clone_from_overwrites() {
    let source: SkipSet<i32> = [7, 8, 9].into_iter().collect();
    let mut target: SkipSet<i32> = (0..50).collect();
    let stale = target.find(&3);

    target.clone_from(&source);
    assert_eq!(target, source);
    assert!(target.get(stale).is_err());
    target.check_invariants().unwrap();
}

// =============================================================================
// Test 4: clear empties and resets the levels
// =============================================================================
#[test]
fn clear_resets_structure() {
    let mut set = SkipSet::with_seed(4);
    set.extend(0..1_000);
    assert!(set.levels() > 1);
    let end = set.end();
    let some = set.find(&500);

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.levels(), 1);
    assert_eq!(set.begin(), set.end());
    assert_eq!(set.end(), end);
    assert!(set.get(some).is_err());
    set.check_invariants().unwrap();

    // reusable afterwards
    set.extend([2, 1]);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    set.check_invariants().unwrap();
}

// =============================================================================
// Test 5: swap exchanges contents and cursors follow
// =============================================================================
#[test]
fn swap_moves_cursors_with_contents() {
    let mut a: SkipSet<i32> = [1, 2, 3].into_iter().collect();
    let mut b: SkipSet<i32> = [10, 20].into_iter().collect();
    let two = a.find(&2);

    a.swap(&mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
    assert_eq!(b.get(two), Ok(&2));
    assert!(a.get(two).is_err());
}

// =============================================================================
// Test 6: Owning iteration
// =============================================================================
#[test]
fn into_iter_yields_owned_values_in_order() {
    let set: SkipSet<String> = ["b", "c", "a"].into_iter().map(String::from).collect();
    let mut iter = set.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back().as_deref(), Some("c"));
    assert_eq!(iter.collect::<Vec<_>>(), vec!["a", "b"]);
}

// =============================================================================
// Test 7: Debug prints as a set
// =============================================================================
#[test]
fn debug_formats_like_a_set() {
    let set: SkipSet<i32> = [2, 1].into_iter().collect();
    assert_eq!(format!("{set:?}"), "{1, 2}");
}

// =============================================================================
// Test 8: Custom oracle with options
// =============================================================================
#[derive(Clone)]
struct Constant(usize);

impl LevelOracle for Constant {
    fn sample_level(&mut self) -> usize {
        self.0
    }
}

#[test]
fn custom_oracle_controls_heights() {
    let mut set = SkipSet::with_oracle_and_options(Constant(3), Options::new().with_capacity(16));
    set.extend(0..10);
    assert_eq!(set.levels(), 3);
    let mut cursor = set.begin();
    while cursor != set.end() {
        assert_eq!(set.node_levels(cursor), Ok(3));
        cursor.increment(&set).unwrap();
    }

    let copy = set.clone();
    assert_eq!(copy.levels(), 3);
    assert_eq!(copy.oracle().0, 3);
    assert_eq!(copy, set);
}

// =============================================================================
// Test 9: Values are dropped exactly once
// =============================================================================
#[test]
fn values_dropped_on_erase_and_clear() {
    use std::rc::Rc;

    let token = Rc::new(());
    let mut set = SkipSet::with_seed(9);
    for i in 0..20 {
        set.insert((i, Rc::clone(&token)));
    }
    assert_eq!(Rc::strong_count(&token), 21);

    set.erase(&(3, Rc::clone(&token)));
    assert_eq!(Rc::strong_count(&token), 20);

    set.clear();
    assert_eq!(Rc::strong_count(&token), 1);

    set.insert((1, Rc::clone(&token)));
    drop(set);
    assert_eq!(Rc::strong_count(&token), 1);
}
