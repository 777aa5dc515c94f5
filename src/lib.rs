//! rb-chain-maps: a red-black ordered map and a separately-chained hash
//! map, both single-owner and in-memory.
//!
//! Internal Design:
//!
//! Summary
//! - `OrderedMap<K, V>`: red-black tree. Nodes live in a `SlotMap` arena
//!   and refer to each other by key, including the parent back-link used
//!   while rebalancing upward after an insert.
//! - `HashedMap<K, V, S>`: array of `Chain` buckets. Grows by doubling
//!   with a full, stop-the-world rehash.
//! - `Chain<T>`: singly-linked sequence on its own `SlotMap` arena; used as
//!   the hash bucket and as the backing store of `Stack` and `Queue`.
//!
//! Constraints
//! - Single-threaded: every operation runs to completion; exclusive
//!   mutation is enforced by `&mut self`, nothing is locked.
//! - Unique keys in both maps; a duplicate insert returns
//!   `MapError::DuplicateKey` and leaves the map unchanged.
//! - No deletion from `OrderedMap`, so only insertion rebalances.
//! - Traversals (height, in-order walk, validation, display) use explicit
//!   stacks, never recursion.
//!
//! Iteration
//! - `iter()` borrows the map and is lazy.
//! - `keys()` copies keys out up front. The returned `KeySnapshot` holds
//!   no reference to the map, so the map may be mutated while it is being
//!   consumed; the snapshot does not see those changes.
//!
//! Hashing
//! - Entries store the `u64` hash computed at insertion, and a key's bucket
//!   is always `hash % capacity`. Resize rehomes by the stored hash and
//!   never calls `K: Hash` again.
//! - The default hasher is hashbrown's `DefaultHashBuilder`, which is
//!   deterministic across runs.
//! - Every bucket is its own `Chain`, and a `Chain`'s slotmap allocates a
//!   sentinel slot on creation. Building or rehashing a table therefore
//!   costs one small allocation per bucket (50 000 for `HashedMap::new()`).
//!
//! Diagnostics
//! - Growth, resize and clear emit `tracing` debug events; rotations and
//!   recolors emit trace events. No subscriber is installed here.

pub mod chain;
pub mod config;
mod error;
pub mod hashed_map;
mod hashed_map_proptest;
pub mod ordered_map;
mod ordered_map_proptest;
mod queue;
mod snapshot;
mod stack;

// Public surface
pub use chain::Chain;
pub use config::{HashedMapConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
pub use error::{MapError, RbViolation};
pub use hashed_map::HashedMap;
pub use ordered_map::OrderedMap;
pub use queue::Queue;
pub use snapshot::KeySnapshot;
pub use stack::Stack;
