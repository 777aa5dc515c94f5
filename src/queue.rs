//! First-in first-out adapter over [`Chain`].

use crate::chain::{self, Chain};

#[derive(Debug, Clone)]
pub struct Queue<T> {
    items: Chain<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self { items: Chain::new() }
    }

    pub fn enqueue(&mut self, value: T) {
        self.items.append(value);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Next element `dequeue` would return.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Front to back.
    pub fn iter(&self) -> chain::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
