//! Frequency-ordered binary min-heap.
//!
//! Items are ordered by weight ascending. Items of equal weight come out in
//! the order they were inserted.

use crate::error::{CodingError, Result};

#[derive(Debug, Clone)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (u64, u64) {
        (self.weight, self.seq)
    }
}

#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            elements: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.elements[a].key() < self.elements[b].key()
    }

    /// Adds `item` and moves it up until its parent is not larger.
    pub fn insert(&mut self, weight: u64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.elements.push(Entry { weight, seq, item });

        let mut i = self.elements.len() - 1;
        while i > 0 {
            let p = Self::parent(i);
            if !self.less(i, p) {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    /// Returns the smallest item and its weight without removing it.
    pub fn peek_min(&self) -> Result<(u64, &T)> {
        self.elements
            .first()
            .map(|entry| (entry.weight, &entry.item))
            .ok_or(CodingError::EmptyQueue)
    }

    /// Removes the smallest item: the last element takes the root slot and
    /// sinks back down.
    pub fn extract_min(&mut self) -> Result<(u64, T)> {
        if self.elements.is_empty() {
            return Err(CodingError::EmptyQueue);
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop().ok_or(CodingError::EmptyQueue)?;
        self.sift_down(0);
        Ok((min.weight, min.item))
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.less(l, smallest) {
                smallest = l;
            }
            if r < n && self.less(r, smallest) {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    #[cfg(test)]
    fn valid_min_heap(&self) -> bool {
        (1..self.len()).all(|i| !self.less(i, Self::parent(i)))
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_weight_order() {
        let mut heap = MinHeap::new();
        for (w, name) in [(5, "e"), (1, "a"), (4, "d"), (2, "b"), (3, "c")] {
            heap.insert(w, name);
            assert!(heap.valid_min_heap());
        }

        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.extract_min().unwrap().1);
            assert!(heap.valid_min_heap());
        }
        assert_eq!(out, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn ties_come_out_in_insertion_order() {
        let mut heap = MinHeap::new();
        heap.insert(3, 'x');
        heap.insert(1, 'y');
        heap.insert(3, 'z');
        heap.insert(3, 'w');

        assert_eq!(heap.extract_min().unwrap(), (1, 'y'));
        assert_eq!(heap.extract_min().unwrap(), (3, 'x'));
        assert_eq!(heap.extract_min().unwrap(), (3, 'z'));
        assert_eq!(heap.extract_min().unwrap(), (3, 'w'));
    }

    #[test]
    fn peek_does_not_remove() {
        let mut heap = MinHeap::new();
        heap.insert(7, "late");
        heap.insert(2, "early");
        assert_eq!(heap.peek_min().unwrap(), (2, &"early"));
        assert_eq!(heap.len(), 2);
    }

    // Shifting the front slot off a heap array leaves it out of order; make
    // sure interleaved inserts and removals still yield the true minimum.
    #[test]
    fn interleaved_operations_keep_order() {
        let mut heap = MinHeap::new();
        for w in [1, 9, 2, 8, 3, 7] {
            heap.insert(w, w);
        }
        assert_eq!(heap.extract_min().unwrap().0, 1);
        assert_eq!(heap.extract_min().unwrap().0, 2);
        heap.insert(4, 4);
        heap.insert(1, 1);
        let rest: Vec<u64> = std::iter::from_fn(|| heap.extract_min().ok().map(|(w, _)| w)).collect();
        assert_eq!(rest, vec![1, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn empty_heap_errors() {
        let mut heap: MinHeap<u8> = MinHeap::new();
        assert_eq!(heap.peek_min(), Err(CodingError::EmptyQueue));
        assert_eq!(heap.extract_min(), Err(CodingError::EmptyQueue));
    }
}
