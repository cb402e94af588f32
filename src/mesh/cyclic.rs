//! Wraparound indexing over fixed-length sequences.
//!
//! The rings of edges and faces around a vertex are cyclic: the edge before
//! the first one is the last one. [`CyclicIndex`] is the one place that
//! modulo arithmetic lives.

/// Indexing with wraparound in both directions.
pub trait CyclicIndex {
    /// The element type.
    type Item;

    /// Get the element at `index` taken modulo the length.
    ///
    /// Negative indices count back from the end, so `at_cyclic(-1)` is the
    /// last element.
    ///
    /// # Panics
    /// Panics if the sequence is empty.
    fn at_cyclic(&self, index: isize) -> &Self::Item;
}

impl<T> CyclicIndex for [T] {
    type Item = T;

    #[inline]
    fn at_cyclic(&self, index: isize) -> &T {
        let len = self.len() as isize;
        assert!(len > 0, "cyclic index into an empty sequence");
        &self[index.rem_euclid(len) as usize]
    }
}

/// Index of the element before `index` in a cycle of length `len`.
#[inline]
pub fn prev_cyclic(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Index of the element after `index` in a cycle of length `len`.
#[inline]
pub fn next_cyclic(index: usize, len: usize) -> usize {
    (index + 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_cyclic_wraps() {
        let ring = [10, 20, 30];
        assert_eq!(*ring.at_cyclic(0), 10);
        assert_eq!(*ring.at_cyclic(3), 10);
        assert_eq!(*ring.at_cyclic(-1), 30);
        assert_eq!(*ring.at_cyclic(-4), 30);
        assert_eq!(*ring.at_cyclic(7), 20);
    }

    #[test]
    fn test_prev_next() {
        assert_eq!(prev_cyclic(0, 5), 4);
        assert_eq!(prev_cyclic(3, 5), 2);
        assert_eq!(next_cyclic(4, 5), 0);
        assert_eq!(next_cyclic(1, 5), 2);
    }

    #[test]
    #[should_panic]
    fn test_empty_panics() {
        let ring: [u8; 0] = [];
        ring.at_cyclic(0);
    }
}
