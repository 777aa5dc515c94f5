//! HashedMap: separately-chained hash table with stop-the-world doubling.
//!
//! Each bucket is a [`Chain`] of entries. An entry lives in bucket
//! `hash % capacity`, where `hash` is computed once at insertion and stored
//! alongside the entry, so resizing never calls back into `K: Hash`.

use crate::chain::{self, Chain};
use crate::config::{
    validate_load_factor, HashedMapConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR,
};
use crate::error::MapError;
use crate::snapshot::KeySnapshot;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

#[derive(Clone)]
pub struct HashedMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Chain<Entry<K, V>>>,
    len: usize,
    max_load_factor: f64,
}

fn empty_buckets<T>(capacity: usize) -> Vec<Chain<T>> {
    (0..capacity).map(|_| Chain::new()).collect()
}

#[inline]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<K, V> HashedMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty map with the default configuration and hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        Self::with_config(HashedMapConfig::default().with_initial_capacity(capacity))
    }

    pub fn with_config(config: HashedMapConfig) -> Result<Self, MapError> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for HashedMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> HashedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    pub fn with_config_and_hasher(config: HashedMapConfig, hasher: S) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self {
            hasher,
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            max_load_factor: config.max_load_factor,
        })
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn bucket_for<Q>(&self, q: &Q) -> (u64, usize)
    where
        Q: ?Sized + Hash,
    {
        let hash = self.make_hash(q);
        (hash, bucket_index(hash, self.buckets.len()))
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Takes effect on the next insertion; does not resize by itself.
    pub fn set_max_load_factor(&mut self, factor: f64) -> Result<(), MapError> {
        validate_load_factor(factor)?;
        self.max_load_factor = factor;
        Ok(())
    }

    /// Adds a new entry, doubling the table first if the insertion would
    /// push the load factor past the maximum. An equal key already present
    /// is rejected before any growth happens.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), MapError> {
        let (hash, idx) = self.bucket_for(&key);
        if self.buckets[idx]
            .find(|e| e.hash == hash && e.key == key)
            .is_some()
        {
            return Err(MapError::DuplicateKey);
        }

        let projected = (self.len + 1) as f64 / self.buckets.len() as f64;
        if projected > self.max_load_factor {
            let to = self.buckets.len().saturating_mul(2);
            debug!(from = self.buckets.len(), to, len = self.len, "growing hashed map");
            self.rehash(to);
        }

        let idx = bucket_index(hash, self.buckets.len());
        self.buckets[idx].append(Entry { key, value, hash });
        self.len += 1;
        Ok(())
    }

    /// Rebuilds the table with `new_capacity` buckets. Any capacity above
    /// zero is accepted, including one below the current length.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), MapError> {
        if new_capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        debug!(from = self.buckets.len(), to = new_capacity, len = self.len, "resizing hashed map");
        self.rehash(new_capacity);
        Ok(())
    }

    fn rehash(&mut self, new_capacity: usize) {
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let idx = bucket_index(entry.hash, new_capacity);
            self.buckets[idx].append(entry);
        }
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (hash, idx) = self.bucket_for(q);
        let entry = self.buckets[idx].remove_first(|e| e.hash == hash && e.key.borrow() == q)?;
        self.len -= 1;
        Some(entry.value)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (hash, idx) = self.bucket_for(q);
        self.buckets[idx]
            .find(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (hash, idx) = self.bucket_for(q);
        self.buckets[idx]
            .find_mut(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }

    /// Overwrites the value of an existing key and returns the old one.
    pub fn change_value<Q>(&mut self, q: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(q).map(|slot| std::mem::replace(slot, value))
    }

    /// Largest stored value; on ties the first one in iteration order wins.
    pub fn max_value(&self) -> Result<&V, MapError>
    where
        V: Ord,
    {
        self.iter()
            .map(|(_, v)| v)
            .reduce(|best, v| if v > best { v } else { best })
            .ok_or(MapError::Empty)
    }

    /// Drops every entry. Capacity is kept.
    pub fn clear(&mut self) {
        debug!(len = self.len, capacity = self.buckets.len(), "clearing hashed map");
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Keys copied out now, in bucket order and then chain order.
    pub fn keys(&self) -> KeySnapshot<K>
    where
        K: Clone,
    {
        KeySnapshot::new(self.iter().map(|(k, _)| k.clone()).collect())
    }
}

impl<K, V, S> HashedMap<K, V, S> {
    /// Borrowing iterator in bucket order and then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<Entry<K, V>>>,
    chain: Option<chain::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some(e) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, V, S> HashedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Panics unless every entry sits in its home bucket with its true hash
    /// and the stored length matches the chains.
    pub(crate) fn assert_consistent(&self) {
        let capacity = self.buckets.len();
        let mut total = 0;
        for (i, bucket) in self.buckets.iter().enumerate() {
            for e in bucket.iter() {
                assert_eq!(e.hash, self.make_hash(&e.key), "stale stored hash");
                assert_eq!(bucket_index(e.hash, capacity), i, "entry outside home bucket");
            }
            total += bucket.len();
        }
        assert_eq!(total, self.len, "len disagrees with chain lengths");
    }

    pub(crate) fn bucket_len(&self, idx: usize) -> usize {
        self.buckets[idx].len()
    }
}
