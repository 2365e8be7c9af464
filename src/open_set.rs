use std::cmp::Ordering;

const NOT_QUEUED: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f_cost: i32,
    seq: u64,
    node: usize,
}

impl OpenEntry {
    /// Orders per f cost first and breaks ties by which node entered the open set first, which
    /// keeps the search independent of heap layout.
    fn cmp_priority(&self, other: &Self) -> Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Binary min-heap over node indices that tracks where each node sits, allowing its key to be
/// lowered in place.
#[derive(Clone, Debug, Default)]
pub(crate) struct OpenSet {
    heap: Vec<OpenEntry>,
    positions: Vec<usize>,
    next_seq: u64,
}

impl OpenSet {
    /// Empties the set and sizes the position table for `len` nodes.
    pub fn clear(&mut self, len: usize) {
        if self.positions.len() != len {
            self.positions = vec![NOT_QUEUED; len];
        } else {
            for entry in &self.heap {
                self.positions[entry.node] = NOT_QUEUED;
            }
        }
        self.heap.clear();
        self.next_seq = 0;
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.positions[node] != NOT_QUEUED
    }

    /// Inserts a node that is not yet queued.
    pub fn push(&mut self, node: usize, f_cost: i32) {
        debug_assert!(!self.contains(node));
        let pos = self.heap.len();
        self.heap.push(OpenEntry {
            f_cost,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
        self.positions[node] = pos;
        self.sift_up(pos);
    }

    /// Lowers the key of a queued node. Its insertion rank is kept.
    pub fn decrease(&mut self, node: usize, f_cost: i32) {
        let pos = self.positions[node];
        debug_assert!(pos != NOT_QUEUED);
        debug_assert!(f_cost <= self.heap[pos].f_cost);
        self.heap[pos].f_cost = f_cost;
        self.sift_up(pos);
    }

    pub fn pop(&mut self) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        self.positions[top.node] = NOT_QUEUED;
        if !self.heap.is_empty() {
            self.positions[self.heap[0].node] = 0;
            self.sift_down(0);
        }
        Some(top.node)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].cmp_priority(&self.heap[b]) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].node] = a;
        self.positions[self.heap[b].node] = b;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(open: &mut OpenSet) -> Vec<usize> {
        std::iter::from_fn(|| open.pop()).collect()
    }

    #[test]
    fn pops_lowest_cost_first() {
        let mut open = OpenSet::default();
        open.clear(6);
        for (node, f) in [(0, 50), (1, 20), (2, 40), (3, 10), (4, 30)] {
            open.push(node, f);
        }
        assert_eq!(open.len(), 5);
        assert_eq!(drain(&mut open), vec![3, 1, 4, 2, 0]);
        assert!(open.is_empty());
    }

    #[test]
    fn ties_resolve_by_insertion_order() {
        let mut open = OpenSet::default();
        open.clear(8);
        for node in [5, 2, 7, 0, 3] {
            open.push(node, 28);
        }
        assert_eq!(drain(&mut open), vec![5, 2, 7, 0, 3]);
    }

    #[test]
    fn decrease_keeps_insertion_rank() {
        let mut open = OpenSet::default();
        open.clear(4);
        open.push(0, 30);
        open.push(1, 40);
        open.push(2, 50);
        // Node 2 now ties with node 0 but was inserted later
        open.decrease(2, 30);
        assert!(open.contains(2));
        assert_eq!(drain(&mut open), vec![0, 2, 1]);
        assert!(!open.contains(2));
    }

    #[test]
    fn clear_forgets_queued_nodes() {
        let mut open = OpenSet::default();
        open.clear(3);
        open.push(1, 5);
        open.push(2, 6);
        open.clear(3);
        assert!(!open.contains(1));
        assert!(!open.contains(2));
        open.push(2, 1);
        assert_eq!(open.pop(), Some(2));
    }
}
