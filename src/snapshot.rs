//! Frozen key sequences.

/// Keys copied out of a map when the iterator was created.
///
/// Holds no reference to its source, so the map can be mutated freely
/// while this is alive; later mutations are simply not observed.
#[derive(Debug, Clone)]
pub struct KeySnapshot<K> {
    it: std::vec::IntoIter<K>,
}

impl<K> KeySnapshot<K> {
    pub(crate) fn new(keys: Vec<K>) -> Self {
        Self {
            it: keys.into_iter(),
        }
    }
}

impl<K> Iterator for KeySnapshot<K> {
    type Item = K;
    #[inline]
    fn next(&mut self) -> Option<K> {
        self.it.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K> ExactSizeIterator for KeySnapshot<K> {}

impl<K> core::iter::FusedIterator for KeySnapshot<K> {}
