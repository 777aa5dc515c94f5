// OrderedMap integration tests against the public API.
//
// Each test names the behavior it checks. Core invariants exercised:
// - Balance: every insertion sequence leaves a valid red-black tree.
// - Lookup: every inserted key is found with its value; others are not.
// - Order: `iter`/`keys` yield strictly ascending keys.
// - Uniqueness: duplicates are rejected without side effects.
use rb_chain_maps::{MapError, OrderedMap};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Test: the three-key example.
// Verifies: ascending keys rotate to a middle root; iterator is in order.
#[test]
fn ten_twenty_thirty() {
    let mut m = OrderedMap::new();
    for k in [10, 20, 30] {
        m.insert(k, format!("v{k}")).unwrap();
    }
    assert_eq!(m.keys().collect::<Vec<_>>(), vec![10, 20, 30]);
    assert_eq!(m.height(), 1);
    assert_eq!(m.validate(), Ok(1));
    assert_eq!(m.to_string(), ".10 : red\n20 : black (root)\n.30 : red\n");
}

// Test: pseudo-random insertion order.
// Verifies: tree stays valid after each insert and every key is found.
#[test]
fn random_inserts_keep_invariants() {
    let mut m = OrderedMap::new();
    let keys: Vec<u64> = lcg(42).take(2_000).map(|x| x >> 40).collect();
    let mut inserted = Vec::new();
    for (i, k) in keys.iter().enumerate() {
        match m.insert(*k, i) {
            Ok(()) => inserted.push((*k, i)),
            Err(MapError::DuplicateKey) => assert!(inserted.iter().any(|(x, _)| x == k)),
            Err(e) => panic!("unexpected error {e}"),
        }
        if i % 97 == 0 {
            assert!(m.validate().is_ok());
        }
    }
    assert!(m.validate().is_ok());
    assert_eq!(m.len(), inserted.len());
    for (k, v) in &inserted {
        assert!(m.contains_key(k));
        assert_eq!(m.get(k), Some(v));
    }
    assert!(!m.contains_key(&u64::MAX));
}

// Test: descending insertion is the mirror of ascending.
// Verifies: in-order walk matches an independently sorted copy.
#[test]
fn iteration_matches_sorted_input() {
    let mut m = OrderedMap::new();
    for k in (0..500).rev() {
        m.insert(k, k % 7).unwrap();
    }
    let walked: Vec<i32> = m.iter().map(|(k, _)| *k).collect();
    let mut sorted: Vec<i32> = (0..500).collect();
    sorted.sort_unstable();
    assert_eq!(walked, sorted);
    assert!(walked.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(m.keys().len(), 500);
}

// Test: borrowed lookup.
// Verifies: `String` keys are queried with `&str`.
#[test]
fn borrowed_lookup_with_str() {
    let mut m = OrderedMap::new();
    m.insert("hello".to_string(), 1).unwrap();
    assert!(m.contains_key("hello"));
    assert!(!m.contains_key("world"));
    assert_eq!(m.get("hello"), Some(&1));
}

// Test: duplicate insert.
// Verifies: error returned, len and value unchanged, tree still valid.
#[test]
fn duplicate_insert_rejected() {
    let mut m = OrderedMap::new();
    for k in [5, 3, 8] {
        m.insert(k, k).unwrap();
    }
    assert_eq!(m.insert(3, 99), Err(MapError::DuplicateKey));
    assert_eq!(m.len(), 3);
    assert_eq!(m.get(&3), Some(&3));
    assert!(m.validate().is_ok());
}

#[test]
fn empty_map_queries() {
    let m: OrderedMap<String, ()> = OrderedMap::default();
    assert!(m.is_empty());
    assert_eq!(m.len(), 0);
    assert_eq!(m.height(), 0);
    assert_eq!(m.keys().next(), None);
    assert_eq!(m.iter().next(), None);
    assert!(!m.contains_key("x"));
}
