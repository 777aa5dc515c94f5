//! Chain: singly-linked sequence used for hash buckets and the stack/queue
//! adapters.
//!
//! Links live in a `SlotMap` arena and point forward by key, so appending
//! at the tail is O(1) without shared mutable pointers. Every other
//! operation is a forward walk from the head.

use core::fmt;
use slotmap::{new_key_type, SlotMap};

new_key_type! { struct LinkKey; }

#[derive(Debug, Clone)]
struct Link<T> {
    value: T,
    next: Option<LinkKey>,
}

#[derive(Clone)]
pub struct Chain<T> {
    links: SlotMap<LinkKey, Link<T>>,
    head: Option<LinkKey>,
    tail: Option<LinkKey>,
}

impl<T> Chain<T> {
    pub fn new() -> Self {
        Self {
            links: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Adds `value` after the current last element.
    pub fn append(&mut self, value: T) {
        let k = self.links.insert(Link { value, next: None });
        match self.tail {
            Some(t) => self.links[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    pub fn push_front(&mut self, value: T) {
        let k = self.links.insert(Link {
            value,
            next: self.head,
        });
        if self.tail.is_none() {
            self.tail = Some(k);
        }
        self.head = Some(k);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let k = self.head?;
        let link = self.links.remove(k)?;
        self.head = link.next;
        if self.head.is_none() {
            self.tail = None;
        }
        Some(link.value)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|k| &self.links[k].value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|k| &self.links[k].value)
    }

    /// Element at `index` counting from the head; `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Unlinks and returns the first element matching `pred`.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut prev: Option<LinkKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let link = &self.links[k];
            if pred(&link.value) {
                let next = link.next;
                match prev {
                    Some(p) => self.links[p].next = next,
                    None => self.head = next,
                }
                if self.tail == Some(k) {
                    self.tail = prev;
                }
                return self.links.remove(k).map(|l| l.value);
            }
            prev = cur;
            cur = link.next;
        }
        None
    }

    fn position<F>(&self, mut pred: F) -> Option<LinkKey>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let link = &self.links[k];
            if pred(&link.value) {
                return Some(k);
            }
            cur = link.next;
        }
        None
    }

    pub fn find<F>(&self, pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.position(pred).map(|k| &self.links[k].value)
    }

    pub fn find_mut<F>(&mut self, pred: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let k = self.position(pred)?;
        self.links.get_mut(k).map(|l| &mut l.value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(|v| v == value).is_some()
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    /// Walks the chain from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            links: &self.links,
            cur: self.head,
            remaining: self.links.len(),
        }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Head-to-tail iterator over a [`Chain`].
pub struct Iter<'a, T> {
    links: &'a SlotMap<LinkKey, Link<T>>,
    cur: Option<LinkKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let link = self.links.get(self.cur?)?;
        self.cur = link.next;
        self.remaining -= 1;
        Some(&link.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator; drains the chain from the head.
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    #[inline]
    fn next(&mut self) -> Option<T> {
        self.chain.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.chain.len();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { chain: self }
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Extend<T> for Chain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.append(v);
        }
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut c = Chain::new();
        c.extend(iter);
        c
    }
}
