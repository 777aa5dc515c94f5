// HashedMap integration tests against the public API.
//
// Core invariants exercised:
// - Growth: the table doubles before an insert would exceed the maximum
//   load factor.
// - Removal: removing a present key drops len by one; absent is a no-op.
// - Resize: contents survive any explicit capacity change.
// - Snapshots: `keys()` is unaffected by later mutation.
use rb_chain_maps::{HashedMap, HashedMapConfig, MapError};
use std::collections::BTreeSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Test: the capacity-4 growth scenario.
// Verifies: three adds keep capacity 4; the fourth grows to 8; load 0.5.
#[test]
fn growth_from_four_to_eight() {
    init_tracing();
    let config = HashedMapConfig::default()
        .with_initial_capacity(4)
        .with_max_load_factor(0.75);
    let mut m = HashedMap::with_config(config).unwrap();
    for k in [1, 2, 3] {
        m.insert(k, k * 10).unwrap();
    }
    assert_eq!(m.capacity(), 4);
    m.insert(4, 40).unwrap();
    assert_eq!(m.capacity(), 8);
    assert_eq!(m.load_factor(), 0.5);
    for k in 1..=4 {
        assert_eq!(m.get(&k), Some(&(k * 10)));
    }
}

// Test: many inserts from a tiny table.
// Verifies: repeated doubling keeps every key reachable.
#[test]
fn repeated_growth_keeps_contents() {
    init_tracing();
    let mut m = HashedMap::with_capacity(1).unwrap();
    for i in 0..5_000u32 {
        m.insert(format!("key-{i}"), i).unwrap();
    }
    assert_eq!(m.len(), 5_000);
    assert!(m.load_factor() <= m.max_load_factor());
    for i in 0..5_000u32 {
        assert_eq!(m.get(format!("key-{i}").as_str()), Some(&i));
    }
}

// Test: remove semantics.
// Verifies: present key removed once; second remove and absent key are no-ops.
#[test]
fn remove_then_contains_is_false() {
    let mut m = HashedMap::with_capacity(32).unwrap();
    for k in ["a", "b", "c"] {
        m.insert(k.to_string(), k.len()).unwrap();
    }
    assert_eq!(m.remove("b"), Some(1));
    assert_eq!(m.len(), 2);
    assert!(!m.contains_key("b"));
    assert_eq!(m.remove("b"), None);
    assert_eq!(m.remove("zzz"), None);
    assert_eq!(m.len(), 2);

    // Re-adding after removal is a fresh insert, not a duplicate.
    m.insert("b".to_string(), 7).unwrap();
    assert_eq!(m.get("b"), Some(&7));
}

// Test: explicit resize.
// Verifies: every key keeps its value across grow and shrink.
#[test]
fn resize_round_trip_preserves_pairs() {
    init_tracing();
    let mut m = HashedMap::with_capacity(16).unwrap();
    for i in 0..12 {
        m.insert(i, i * 3).unwrap();
    }
    let before: Vec<(i32, i32)> = {
        let mut v: Vec<_> = m.iter().map(|(k, v)| (*k, *v)).collect();
        v.sort();
        v
    };
    m.resize(1_000).unwrap();
    m.resize(2).unwrap();
    let mut after: Vec<(i32, i32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
    after.sort();
    assert_eq!(before, after);
    assert_eq!(m.capacity(), 2);
}

#[test]
fn change_value_and_max_value() {
    let mut m: HashedMap<&str, i32> = HashedMap::with_capacity(8).unwrap();
    assert_eq!(m.max_value(), Err(MapError::Empty));
    m.insert("low", 1).unwrap();
    m.insert("high", 50).unwrap();
    assert_eq!(m.max_value(), Ok(&50));
    assert_eq!(m.change_value(&"low", 100), Some(1));
    assert_eq!(m.max_value(), Ok(&100));
    assert_eq!(m.change_value(&"none", 5), None);
}

// Test: snapshot iteration.
// Verifies: mutation while consuming a snapshot is allowed and unseen.
#[test]
fn keys_snapshot_survives_mutation() {
    let mut m = HashedMap::with_capacity(4).unwrap();
    for i in 0..3 {
        m.insert(i, ()).unwrap();
    }
    let mut seen = BTreeSet::new();
    for k in m.keys() {
        seen.insert(k);
        m.remove(&k);
        m.insert(k + 100, ()).unwrap();
    }
    assert_eq!(seen, (0..3).collect());
    assert_eq!(m.keys().collect::<BTreeSet<_>>(), (100..103).collect());
}

// Test: repeated lookups.
// Verifies: no hidden mutation on read paths.
#[test]
fn lookups_are_idempotent() {
    let mut m = HashedMap::with_capacity(8).unwrap();
    m.insert(1u8, "one").unwrap();
    for _ in 0..3 {
        assert!(m.contains_key(&1));
        assert_eq!(m.get(&1), Some(&"one"));
        assert!(!m.contains_key(&2));
    }
}

#[test]
fn invalid_configs_are_rejected() {
    let zero = HashedMapConfig::default().with_initial_capacity(0);
    assert!(matches!(
        HashedMap::<u8, u8>::with_config(zero),
        Err(MapError::ZeroCapacity)
    ));
    let bad = HashedMapConfig::default().with_max_load_factor(0.0);
    assert!(matches!(
        HashedMap::<u8, u8>::with_config(bad),
        Err(MapError::InvalidLoadFactor(_))
    ));
}

#[test]
fn debug_format_lists_entries() {
    let mut m = HashedMap::with_capacity(1).unwrap();
    m.insert("k", 1).unwrap();
    assert_eq!(format!("{:?}", m), r#"{"k": 1}"#);
}
