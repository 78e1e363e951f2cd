//! Min-priority frontier with insertion-order tie-breaking.
//!
//! There is no decrease-key. A cheaper rediscovery of a queued node is a new
//! entry; the older, costlier entry stays in the heap and is recognised as
//! stale by the search loop when it is eventually popped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, SearchNode};

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier.
///
/// Every push is stamped with a strictly increasing sequence number, so two
/// entries never compare equal and pop order is fully determined by
/// `(f_cost, push order)`.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
    high_water: u64,
}

impl Frontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node, stamping it with the next sequence number.
    ///
    /// Returns the assigned sequence.
    pub fn push(&mut self, mut node: SearchNode) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        node.sequence = sequence;
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        sequence
    }

    /// Pop the entry with the lowest `(f_cost, sequence)`.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|e| e.node)
    }

    /// Current frontier size, stale entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Total pushes so far.
    #[must_use]
    pub fn pushes(&self) -> u64 {
        self.next_sequence
    }
}
