//! Frontier of route nodes awaiting expansion.
//!
//! Entries are stored in a min-heap keyed by `(total, touched, seq)`.
//! Lower totals are popped first. `touched` only participates under
//! [`TieBreak::LeastTouched`]; otherwise ties fall through to the insertion
//! counter (FIFO).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::options::{Cost, TieBreak};

#[derive(Debug)]
struct Entry<E> {
    item: E,
    total: Cost,
    /// Touch count of the entry's last cell when it was inserted.
    touched: u32,
    /// Monotonically increasing insertion counter.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in `Reverse`.
        self.total
            .cmp(&other.total)
            .then(self.touched.cmp(&other.touched))
            .then(self.seq.cmp(&other.seq))
    }
}

/// Priority queue of frontier items.
#[derive(Debug)]
pub(crate) struct Frontier<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
    tie_break: TieBreak,
}

impl<E> Frontier<E> {
    pub(crate) fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
            tie_break,
        }
    }

    /// Insert `item` with priority `total`. `touched` is ignored unless the
    /// tie-break is [`TieBreak::LeastTouched`].
    pub(crate) fn push(&mut self, item: E, total: Cost, touched: u32) {
        let seq = self.seq;
        self.seq += 1;
        let touched = match self.tie_break {
            TieBreak::InsertionOrder => 0,
            TieBreak::LeastTouched => touched,
        };
        self.heap.push(Reverse(Entry {
            item,
            total,
            touched,
            seq,
        }));
    }

    /// Pop the entry with the lowest total, also returning the total.
    pub(crate) fn pop(&mut self) -> Option<(E, Cost)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.total))
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
