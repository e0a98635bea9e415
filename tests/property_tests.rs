// Randomized checks: sorted traversal, size accounting, copy independence,
// and a large insert/erase stress run.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use skipset::SkipSet;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Erase(i16),
    EraseFirst,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(Op::Insert),
        2 => any::<i16>().prop_map(Op::Erase),
        1 => Just(Op::EraseFirst),
    ]
}

proptest! {
    #[test]
    fn traversal_is_sorted_and_deduplicated(values in prop::collection::vec(any::<i32>(), 0..300), seed in any::<u64>()) {
        let mut set = SkipSet::with_seed(seed);
        set.extend(values.iter().copied());

        let expected: Vec<i32> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(set.iter().copied().collect::<Vec<_>>(), expected.clone());
        prop_assert_eq!(set.len(), expected.len());
        prop_assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn matches_btreeset_under_mixed_ops(ops in prop::collection::vec(op(), 0..400), seed in any::<u64>()) {
        let mut set = SkipSet::with_seed(seed);
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    let (cursor, inserted) = set.insert(v);
                    prop_assert_eq!(inserted, model.insert(v));
                    prop_assert_eq!(set.get(cursor), Ok(&v));
                }
                Op::Erase(v) => {
                    prop_assert_eq!(set.erase(&v), usize::from(model.remove(&v)));
                    prop_assert_eq!(set.find(&v), set.end());
                }
                Op::EraseFirst => {
                    let begin = set.begin();
                    match model.pop_first() {
                        Some(v) => {
                            prop_assert_eq!(set.get(begin), Ok(&v));
                            prop_assert!(set.erase_at(begin).is_ok());
                        }
                        None => prop_assert!(set.erase_at(begin).is_err()),
                    }
                }
            }
            prop_assert_eq!(set.len(), model.len());
        }
        prop_assert!(set.iter().eq(model.iter()));
        prop_assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn bounds_agree_with_btreeset(values in prop::collection::vec(-50i32..50, 0..60), key in -60i32..60) {
        let set: SkipSet<i32> = values.iter().copied().collect();
        let model: BTreeSet<i32> = values.iter().copied().collect();

        let lower = model.range(key..).next();
        let upper = model.range(key + 1..).next();
        prop_assert_eq!(set.get(set.lower_bound(&key)).ok(), lower);
        prop_assert_eq!(set.get(set.upper_bound(&key)).ok(), upper);
        prop_assert_eq!(set.count(&key), usize::from(model.contains(&key)));
    }

    #[test]
    fn mutating_a_copy_leaves_original_alone(values in prop::collection::vec(any::<u16>(), 1..100), extra in any::<u16>()) {
        let original: SkipSet<u16> = values.iter().copied().collect();
        let snapshot: Vec<u16> = original.iter().copied().collect();

        let mut copy = original.clone();
        copy.erase(&values[0]);
        copy.insert(extra);
        copy.pop_last();

        prop_assert_eq!(original.iter().copied().collect::<Vec<_>>(), snapshot);
        prop_assert!(original.check_invariants().is_ok());
        prop_assert!(copy.check_invariants().is_ok());
    }
}

#[test]
fn stress_ten_thousand_random_values() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut values = BTreeSet::new();
    while values.len() < 10_000 {
        values.insert(rng.gen_range(-1_000_000i64..1_000_000));
    }
    let mut shuffled: Vec<i64> = values.iter().copied().collect();
    shuffled.shuffle(&mut rng);

    let mut set = SkipSet::with_seed(42);
    for &v in &shuffled {
        assert!(set.insert(v).1);
    }
    assert_eq!(set.len(), 10_000);
    assert!(set.iter().eq(values.iter()));
    set.check_invariants().unwrap();

    let (erased, kept) = shuffled.split_at(5_000);
    for v in erased {
        assert_eq!(set.erase(v), 1);
    }
    let expected: BTreeSet<i64> = kept.iter().copied().collect();
    assert_eq!(set.len(), 5_000);
    assert!(set.iter().eq(expected.iter()));
    set.check_invariants().unwrap();
}
