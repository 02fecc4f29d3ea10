//! Indexed binary min-heap with in-place priority updates.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct Entry<T> {
    item: T,
    priority: i32,
}

/// Min-priority queue keyed by `i32`, supporting decrease/increase-key.
///
/// The heap lives in a dense `Vec`; a side map records where each item
/// sits so membership checks and [`update_priority`](Self::update_priority)
/// need no linear scan. Equal priorities come out in no particular order.
#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<T> {
    heap: Vec<Entry<T>>,
    index: HashMap<T, usize>,
}

impl<T: Copy + Eq + Hash> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> IndexedPriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Current priority of a queued item.
    pub fn priority(&self, item: &T) -> Option<i32> {
        self.index.get(item).map(|&i| self.heap[i].priority)
    }

    /// Insert a new item.
    ///
    /// # Panics
    ///
    /// If `item` is already queued; use [`update_priority`](Self::update_priority).
    pub fn enqueue(&mut self, item: T, priority: i32) {
        assert!(
            !self.index.contains_key(&item),
            "enqueue: item is already in the priority queue"
        );
        let pos = self.heap.len();
        self.heap.push(Entry { item, priority });
        self.index.insert(item, pos);
        self.sift_up(pos);
    }

    /// Remove and return the lowest-priority item.
    ///
    /// # Panics
    ///
    /// If the queue is empty.
    pub fn dequeue(&mut self) -> T {
        assert!(!self.heap.is_empty(), "dequeue on an empty priority queue");
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let Some(top) = self.heap.pop() else {
            unreachable!("heap checked non-empty above");
        };
        self.index.remove(&top.item);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        top.item
    }

    /// The lowest-priority item, without removing it.
    ///
    /// # Panics
    ///
    /// If the queue is empty.
    pub fn peek(&self) -> &T {
        match self.heap.first() {
            Some(e) => &e.item,
            None => panic!("peek on an empty priority queue"),
        }
    }

    /// Change the priority of a queued item, moving it up or down the heap.
    /// Returns `false` if the item is not queued.
    pub fn update_priority(&mut self, item: &T, priority: i32) -> bool {
        let Some(&pos) = self.index.get(item) else {
            return false;
        };
        let old = self.heap[pos].priority;
        self.heap[pos].priority = priority;
        if priority < old {
            self.sift_up(pos);
        } else if priority > old {
            self.sift_down(pos);
        }
        true
    }

    /// Remove every item, keeping allocated storage.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].item, a);
        self.index.insert(self.heap[b].item, b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos].priority >= self.heap[parent].priority {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert_eq!(self.heap.len(), self.index.len());
        for (i, e) in self.heap.iter().enumerate() {
            assert_eq!(self.index.get(&e.item), Some(&i), "index map out of sync");
            for child in [2 * i + 1, 2 * i + 2] {
                if child < self.heap.len() {
                    assert!(e.priority <= self.heap[child].priority, "heap order broken");
                }
            }
        }
    }
}
