#![cfg(test)]

// Property tests for OrderedMap kept inside the crate so they can look at
// node colors and links directly.

use crate::error::MapError;
use crate::ordered_map::OrderedMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, i32),
    Get(u16),
    Bump(u16, i32),
    Keys,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    // Narrow key range so duplicates and hits are common.
    let op = prop_oneof![
        4 => (0u16..200, any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0u16..200).prop_map(Op::Get),
        1 => (0u16..200, -100i32..100).prop_map(|(k, d)| Op::Bump(k, d)),
        1 => Just(Op::Keys),
    ];
    proptest::collection::vec(op, 1..200)
}

// Property: state-machine equivalence against std::collections::BTreeMap.
// After every operation:
// - `validate` succeeds: black root, no red-red edge, equal black heights,
//   consistent parent links, strictly ascending keys.
// - len and lookups agree with the model; duplicates are rejected.
// - `keys()` equals the model's ascending key order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: OrderedMap<u16, i32> = OrderedMap::new();
        let mut model: BTreeMap<u16, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let already = model.contains_key(&k);
                    match sut.insert(k, v) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            model.insert(k, v);
                        }
                        Err(MapError::DuplicateKey) => prop_assert!(already),
                        Err(e) => prop_assert!(false, "unexpected error {e}"),
                    }
                }
                Op::Get(k) => {
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
                Op::Bump(k, d) => {
                    if let Some(v) = sut.get_mut(&k) {
                        *v = v.wrapping_add(d);
                    }
                    if let Some(v) = model.get_mut(&k) {
                        *v = v.wrapping_add(d);
                    }
                }
                Op::Keys => {
                    let keys: Vec<u16> = sut.keys().collect();
                    let expected: Vec<u16> = model.keys().copied().collect();
                    prop_assert_eq!(keys, expected);
                }
            }
            prop_assert!(sut.validate().is_ok(), "{:?}", sut.validate());
            prop_assert_eq!(sut.len(), model.len());
        }

        let pairs: Vec<(u16, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, i32)> = model.into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }
}

// Property: height stays within the red-black bound 2 * log2(n + 1) for
// any insertion order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_height_is_logarithmic(keys in proptest::collection::hash_set(any::<u32>(), 1..600)) {
        let mut m = OrderedMap::new();
        for k in &keys {
            m.insert(*k, ()).unwrap();
        }
        let bound = 2.0 * ((keys.len() + 1) as f64).log2();
        prop_assert!((m.height() as f64) <= bound, "height {} over bound {}", m.height(), bound);
        let bh = m.black_height().expect("valid tree");
        // Every path holds at least bh black nodes, so height + 1 >= bh.
        prop_assert!(m.height() + 1 >= bh);
    }
}

// Property: repeated lookups without mutation give identical answers.
proptest! {
    #[test]
    fn prop_lookup_idempotent(
        keys in proptest::collection::vec(0i64..1000, 0..100),
        probe in 0i64..1000,
    ) {
        let mut m = OrderedMap::new();
        for k in keys {
            let _ = m.insert(k, k * 2);
        }
        let first = (m.contains_key(&probe), m.get(&probe).copied());
        for _ in 0..3 {
            prop_assert_eq!((m.contains_key(&probe), m.get(&probe).copied()), first);
        }
    }
}
