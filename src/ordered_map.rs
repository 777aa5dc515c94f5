//! OrderedMap: red-black tree over a slotmap node arena.
//!
//! Parent and child links are arena keys, so rotations relink nodes by
//! rewriting a handful of `Option<NodeKey>` fields. Parent links are only
//! followed upward during rebalancing; the arena owns every node and drops
//! them all together.
//!
//! Only insertion rebalances. There is no removal.

use crate::error::{MapError, RbViolation};
use crate::snapshot::KeySnapshot;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use tracing::trace;

new_key_type! { struct NodeKey; }

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
    parent: Option<NodeKey>,
    color: Color,
    // Meaningless on the root.
    is_left: bool,
}

pub struct OrderedMap<K, V> {
    nodes: SlotMap<NodeKey, Node<K, V>>,
    root: Option<NodeKey>,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Edges on the longest root-to-leaf path. Both an empty tree and a
    /// lone root report 0.
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut deepest = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((k, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let n = &self.nodes[k];
            stack.extend(n.left.map(|c| (c, depth + 1)));
            stack.extend(n.right.map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// Ascending-key iterator borrowing the map.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut it = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.nodes.len(),
        };
        it.push_left_spine(self.root);
        it
    }

    /// Ascending keys copied out now; later inserts are not observed.
    pub fn keys(&self) -> KeySnapshot<K>
    where
        K: Clone,
    {
        KeySnapshot::new(self.iter().map(|(k, _)| k.clone()).collect())
    }

    fn is_red(&self, k: Option<NodeKey>) -> bool {
        k.is_some_and(|k| self.nodes[k].color == Color::Red)
    }

    fn set_color(&mut self, k: NodeKey, color: Color) {
        self.nodes[k].color = color;
    }

    /// Moves `x`'s right child into `x`'s place; `x` becomes its left child.
    fn rotate_left(&mut self, x: NodeKey) {
        let Some(y) = self.nodes[x].right else {
            debug_assert!(false, "rotation pivot has no right child");
            return;
        };
        let inner = self.nodes[y].left;
        self.nodes[x].right = inner;
        if let Some(c) = inner {
            let n = &mut self.nodes[c];
            n.parent = Some(x);
            n.is_left = false;
        }
        self.replace_child(x, y);
        self.nodes[y].left = Some(x);
        let n = &mut self.nodes[x];
        n.parent = Some(y);
        n.is_left = true;
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, x: NodeKey) {
        let Some(y) = self.nodes[x].left else {
            debug_assert!(false, "rotation pivot has no left child");
            return;
        };
        let inner = self.nodes[y].right;
        self.nodes[x].left = inner;
        if let Some(c) = inner {
            let n = &mut self.nodes[c];
            n.parent = Some(x);
            n.is_left = true;
        }
        self.replace_child(x, y);
        self.nodes[y].right = Some(x);
        let n = &mut self.nodes[x];
        n.parent = Some(y);
        n.is_left = false;
    }

    /// Hangs `new` where `old` currently hangs (or makes it the root).
    fn replace_child(&mut self, old: NodeKey, new: NodeKey) {
        let parent = self.nodes[old].parent;
        let is_left = self.nodes[old].is_left;
        let n = &mut self.nodes[new];
        n.parent = parent;
        n.is_left = parent.is_some() && is_left;
        match parent {
            None => self.root = Some(new),
            Some(p) if is_left => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
    }

    /// Walks from `start` to the root repairing every red node that has a
    /// red parent.
    fn rebalance_from(&mut self, start: NodeKey) {
        let mut cur = start;
        while Some(cur) != self.root {
            let Some(parent) = self.nodes[cur].parent else {
                break;
            };
            if self.is_red(Some(cur)) && self.is_red(Some(parent)) {
                self.repair(cur, parent);
            }
            match self.nodes[cur].parent {
                Some(p) => cur = p,
                None => break,
            }
        }
    }

    fn repair(&mut self, node: NodeKey, parent: NodeKey) {
        // A red parent is never the root, so the grandparent exists.
        let Some(grand) = self.nodes[parent].parent else {
            return;
        };
        let parent_is_left = self.nodes[parent].is_left;
        let uncle = if parent_is_left {
            self.nodes[grand].right
        } else {
            self.nodes[grand].left
        };

        if let Some(u) = uncle.filter(|&u| self.is_red(Some(u))) {
            trace!("rb recolor: pushing red violation to grandparent");
            self.set_color(u, Color::Black);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            return;
        }

        match (self.nodes[node].is_left, parent_is_left) {
            (true, true) => {
                trace!("rb single rotation right");
                self.rotate_right(grand);
                self.set_color(parent, Color::Black);
                self.set_color(node, Color::Red);
                self.set_color(grand, Color::Red);
            }
            (false, false) => {
                trace!("rb single rotation left");
                self.rotate_left(grand);
                self.set_color(parent, Color::Black);
                self.set_color(node, Color::Red);
                self.set_color(grand, Color::Red);
            }
            (true, false) => {
                trace!("rb double rotation right-left");
                self.rotate_right(parent);
                self.rotate_left(grand);
                self.set_color(node, Color::Black);
                self.set_color(parent, Color::Red);
                self.set_color(grand, Color::Red);
            }
            (false, true) => {
                trace!("rb double rotation left-right");
                self.rotate_left(parent);
                self.rotate_right(grand);
                self.set_color(node, Color::Black);
                self.set_color(parent, Color::Red);
                self.set_color(grand, Color::Red);
            }
        }
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a new key. An equal key already present is rejected and the
    /// tree is left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), MapError> {
        let Some(mut cur) = self.root else {
            let k = self.nodes.insert(Node {
                key,
                value,
                left: None,
                right: None,
                parent: None,
                color: Color::Black,
                is_left: false,
            });
            self.root = Some(k);
            return Ok(());
        };

        let is_left = loop {
            let n = &self.nodes[cur];
            let next = match key.cmp(&n.key) {
                Ordering::Less => n.left.ok_or(true),
                Ordering::Greater => n.right.ok_or(false),
                Ordering::Equal => return Err(MapError::DuplicateKey),
            };
            match next {
                Ok(child) => cur = child,
                Err(is_left) => break is_left,
            }
        };

        let k = self.nodes.insert(Node {
            key,
            value,
            left: None,
            right: None,
            parent: Some(cur),
            color: Color::Red,
            is_left,
        });
        if is_left {
            self.nodes[cur].left = Some(k);
        } else {
            self.nodes[cur].right = Some(k);
        }

        self.rebalance_from(k);
        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
        Ok(())
    }

    fn find<Q>(&self, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cur = self.root;
        while let Some(k) = cur {
            let n = &self.nodes[k];
            cur = match q.cmp(n.key.borrow()) {
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
                Ordering::Equal => return Some(k),
            };
        }
        None
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(q).map(|k| &self.nodes[k].value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let k = self.find(q)?;
        self.nodes.get_mut(k).map(|n| &mut n.value)
    }

    /// Black nodes on every root-to-leaf path, or the first violated
    /// invariant.
    pub fn validate(&self) -> Result<usize, RbViolation> {
        let Some(root) = self.root else {
            return Ok(0);
        };
        let root_node = &self.nodes[root];
        if root_node.color == Color::Red {
            return Err(RbViolation::RedRoot);
        }
        if root_node.parent.is_some() {
            return Err(RbViolation::BrokenLink);
        }

        // Post-order: children's black heights are known before the parent.
        let mut heights: SecondaryMap<NodeKey, usize> = SecondaryMap::new();
        let mut stack = vec![(root, false)];
        while let Some((k, expanded)) = stack.pop() {
            let n = &self.nodes[k];
            if !expanded {
                stack.push((k, true));
                for (child, side_left) in [(n.left, true), (n.right, false)] {
                    let Some(c) = child else { continue };
                    let cn = &self.nodes[c];
                    if cn.parent != Some(k) || cn.is_left != side_left {
                        return Err(RbViolation::BrokenLink);
                    }
                    if n.color == Color::Red && cn.color == Color::Red {
                        return Err(RbViolation::RedRedEdge);
                    }
                    stack.push((c, false));
                }
                continue;
            }
            let left = n.left.map_or(0, |c| heights[c]);
            let right = n.right.map_or(0, |c| heights[c]);
            if left != right {
                return Err(RbViolation::BlackHeightMismatch { left, right });
            }
            heights.insert(k, left + usize::from(n.color == Color::Black));
        }

        let mut prev: Option<&K> = None;
        for (k, _) in self.iter() {
            if prev.is_some_and(|p| p >= k) {
                return Err(RbViolation::OutOfOrder);
            }
            prev = Some(k);
        }
        Ok(heights[root])
    }

    /// Black height of the tree, `None` when it is not a valid red-black tree.
    pub fn black_height(&self) -> Option<usize> {
        self.validate().ok()
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// One node per line in key order, indented with one `.` per level.
impl<K: fmt::Display, V> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(NodeKey, usize)> = Vec::new();
        let mut cur = self.root.map(|k| (k, 0usize));
        loop {
            while let Some((k, depth)) = cur {
                stack.push((k, depth));
                cur = self.nodes[k].left.map(|c| (c, depth + 1));
            }
            let Some((k, depth)) = stack.pop() else {
                return Ok(());
            };
            let n = &self.nodes[k];
            let color = match n.color {
                Color::Black => "black",
                Color::Red => "red",
            };
            for _ in 0..depth {
                f.write_str(".")?;
            }
            write!(f, "{} : {}", n.key, color)?;
            if Some(k) == self.root {
                f.write_str(" (root)")?;
            }
            writeln!(f)?;
            cur = n.right.map(|c| (c, depth + 1));
        }
    }
}

/// In-order iterator over `(&K, &V)`, driven by an explicit stack.
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    stack: Vec<NodeKey>,
    remaining: usize,
}

impl<K, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut cur: Option<NodeKey>) {
        while let Some(k) = cur {
            self.stack.push(k);
            cur = self.nodes[k].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.stack.pop()?;
        let n = &self.nodes[k];
        self.push_left_spine(n.right);
        self.remaining -= 1;
        Some((&n.key, &n.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
