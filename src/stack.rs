//! Last-in first-out adapter over [`Chain`].

use crate::chain::{self, Chain};

#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Chain<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Chain::new() }
    }

    pub fn push(&mut self, value: T) {
        self.items.push_front(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

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

    /// Top to bottom.
    pub fn iter(&self) -> chain::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut s = Stack::new();
        for i in 1..=3 {
            s.push(i);
        }
        assert_eq!(s.peek(), Some(&3));
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(s.pop(), Some(3));
        assert_eq!(s.pop(), Some(2));
        assert_eq!(s.len(), 1);
        assert!(s.contains(&1));
        assert!(!s.contains(&3));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.pop(), None);
        assert_eq!(s.peek(), None);
    }
}
