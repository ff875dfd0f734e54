//! An indexed binary min-heap with decrease-key.
//!
//! Entries are ordered by `(priority, insertion sequence)`: lower
//! priorities pop first, ties go to the earlier-inserted element (FIFO).
//! A side map from element to its current array slot lets
//! [`decrease_priority`](IndexedMinHeap::decrease_priority) locate any
//! element in O(1) and restore heap order in O(log n).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Errors raised by [`IndexedMinHeap`] operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeapError {
    /// `pop` or `peek` on an empty heap.
    Empty,
    /// `push` of an element already present in the heap.
    DuplicateElement,
    /// `decrease_priority` with a priority above the current one.
    PriorityIncrease { current: f64, requested: f64 },
    /// `decrease_priority` of an element not in the heap.
    UnknownElement,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "heap is empty"),
            Self::DuplicateElement => write!(f, "element is already in the heap"),
            Self::PriorityIncrease { current, requested } => {
                write!(
                    f,
                    "new priority {requested} is greater than current priority {current}"
                )
            }
            Self::UnknownElement => write!(f, "element is not in the heap"),
        }
    }
}

impl std::error::Error for HeapError {}

#[derive(Debug, Clone)]
struct Entry<T> {
    priority: f64,
    /// Monotonically increasing counter used to break priority ties.
    /// Lower = inserted earlier = pops first.
    seq: u64,
    element: T,
}

impl<T> Entry<T> {
    #[inline]
    fn sorts_before(&self, other: &Self) -> bool {
        match self.priority.partial_cmp(&other.priority) {
            Some(std::cmp::Ordering::Less) => true,
            Some(std::cmp::Ordering::Greater) => false,
            _ => self.seq < other.seq,
        }
    }
}

/// A binary min-heap keyed by an element handle, supporting decrease-key.
///
/// Elements must be unique within one heap instance.
#[derive(Debug, Clone, Default)]
pub struct IndexedMinHeap<T> {
    entries: Vec<Entry<T>>,
    slots: HashMap<T, usize>,
    seq: u64,
}

impl<T: Copy + Eq + Hash> IndexedMinHeap<T> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
            seq: 0,
        }
    }

    /// Number of elements in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `element` with the given priority.
    pub fn push(&mut self, element: T, priority: f64) -> Result<(), HeapError> {
        if self.slots.contains_key(&element) {
            return Err(HeapError::DuplicateElement);
        }
        let seq = self.seq;
        self.seq += 1;
        self.entries.push(Entry {
            priority,
            seq,
            element,
        });
        let idx = self.entries.len() - 1;
        self.slots.insert(element, idx);
        self.sift_up(idx);
        Ok(())
    }

    /// Return the minimum element without removing it.
    pub fn peek(&self) -> Result<T, HeapError> {
        self.entries
            .first()
            .map(|e| e.element)
            .ok_or(HeapError::Empty)
    }

    /// Remove and return the minimum element.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        let popped = self.peek()?;
        self.slots.remove(&popped);
        let last = self.entries.pop().filter(|_| !self.entries.is_empty());
        if let Some(last) = last {
            self.slots.insert(last.element, 0);
            self.entries[0] = last;
            self.sift_down(0);
        }
        Ok(popped)
    }

    /// Lower the priority of an element already in the heap.
    ///
    /// Raising a priority is not supported; the heap only sifts up.
    pub fn decrease_priority(&mut self, element: T, new_priority: f64) -> Result<(), HeapError> {
        let &idx = self.slots.get(&element).ok_or(HeapError::UnknownElement)?;
        let current = self.entries[idx].priority;
        if new_priority > current {
            return Err(HeapError::PriorityIncrease {
                current,
                requested: new_priority,
            });
        }
        self.entries[idx].priority = new_priority;
        self.sift_up(idx);
        Ok(())
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = idx.div_ceil(2) - 1;
            if !self.entries[idx].sorts_before(&self.entries[parent]) {
                break;
            }
            self.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            if left >= self.entries.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.entries.len() && self.entries[right].sorts_before(&self.entries[left]) {
                child = right;
            }
            if !self.entries[child].sorts_before(&self.entries[idx]) {
                break;
            }
            self.swap(idx, child);
            idx = child;
        }
    }

    /// Swap two slots, keeping the element→slot map in sync. The map must
    /// agree with the array after every mutating operation.
    fn swap(&mut self, i1: usize, i2: usize) {
        self.entries.swap(i1, i2);
        self.slots.insert(self.entries[i1].element, i1);
        self.slots.insert(self.entries[i2].element, i2);
    }

    /// Check that the slot map and the heap order invariant both hold.
    #[cfg(test)]
    fn check_invariants(&self) {
        assert_eq!(self.slots.len(), self.entries.len());
        for (idx, entry) in self.entries.iter().enumerate() {
            assert_eq!(self.slots.get(&entry.element), Some(&idx));
            if idx > 0 {
                // Written differently from sift_up on purpose, so the
                // checker does not share a mistake with the code under test.
                let parent = (idx - 1) / 2;
                assert!(
                    !entry.sorts_before(&self.entries[parent]),
                    "heap order violated at slot {idx}"
                );
            }
        }
    }
}
