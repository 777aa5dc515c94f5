#![cfg(test)]

// Property tests for HashedMap kept inside the crate so they can check
// bucket placement after every step.

use crate::config::HashedMapConfig;
use crate::error::MapError;
use crate::hashed_map::HashedMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Change(usize, i32),
    Resize(usize),
    Max,
    Keys,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            3 => idx.clone().prop_map(OpI::Get),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Change(i, v)),
            1 => (0usize..40).prop_map(OpI::Resize),
            1 => Just(OpI::Max),
            1 => Just(OpI::Keys),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// After every operation:
// - len equals the sum of chain lengths and every entry sits in bucket
//   `hash % capacity` with its true hash.
// - Duplicate inserts are rejected; removal of an absent key is a no-op.
// - A successful remove shrinks len by exactly one.
// - Resize keeps the full key/value content.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(
        (pool, ops) in arb_scenario(),
        initial in 1usize..8,
        factor in prop_oneof![Just(0.75f64), Just(0.5), Just(2.0)],
    ) {
        let config = HashedMapConfig::default()
            .with_initial_capacity(initial)
            .with_max_load_factor(factor);
        let mut sut: HashedMap<String, i32> = HashedMap::with_config(config).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].clone();
                    let already = model.contains_key(&k);
                    match sut.insert(k.clone(), v) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            model.insert(k, v);
                        }
                        Err(MapError::DuplicateKey) => prop_assert!(already),
                        Err(e) => prop_assert!(false, "unexpected error {e}"),
                    }
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let before = sut.len();
                    let got = sut.remove(k.as_str());
                    prop_assert_eq!(got, model.remove(k));
                    if got.is_some() {
                        prop_assert_eq!(sut.len(), before - 1);
                        prop_assert!(!sut.contains_key(k.as_str()));
                    } else {
                        prop_assert_eq!(sut.len(), before);
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                    prop_assert_eq!(sut.contains_key(k.as_str()), model.contains_key(k));
                }
                OpI::Change(i, v) => {
                    let k = &pool[i];
                    let old = model.get_mut(k).map(|slot| std::mem::replace(slot, v));
                    prop_assert_eq!(sut.change_value(k.as_str(), v), old);
                }
                OpI::Resize(cap) => {
                    if cap == 0 {
                        prop_assert_eq!(sut.resize(0), Err(MapError::ZeroCapacity));
                    } else {
                        sut.resize(cap).unwrap();
                        prop_assert_eq!(sut.capacity(), cap);
                    }
                    for (k, v) in &model {
                        prop_assert_eq!(sut.get(k.as_str()), Some(v));
                    }
                }
                OpI::Max => match model.values().max() {
                    Some(m) => prop_assert_eq!(sut.max_value(), Ok(m)),
                    None => prop_assert_eq!(sut.max_value(), Err(MapError::Empty)),
                },
                OpI::Keys => {
                    let keys: Vec<String> = sut.keys().collect();
                    prop_assert_eq!(keys.len(), model.len());
                    let seen: BTreeSet<String> = keys.into_iter().collect();
                    let expected: BTreeSet<String> = model.keys().cloned().collect();
                    prop_assert_eq!(seen, expected);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }
            sut.assert_consistent();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}
