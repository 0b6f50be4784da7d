/// Binary min-heap of node indices keyed by total estimated cost `f`, with
/// in-place decrease-key.
///
/// Each node's heap position is tracked in `slots`, so `replace` finds the
/// entry in O(1) and restores order in O(log n). The heap never grows past
/// `capacity`; overflowing it means the search cap and the capacity disagree,
/// which is a programming error and panics.
///
/// Ordering among entries with equal `f` is whatever the heap layout yields
/// and carries no meaning.
#[derive(Debug)]
pub struct OpenSet {
    heap: Vec<HeapEntry>,
    slots: Vec<u32>,
    capacity: usize,
}

#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    f: u32,
    node: u32,
}

const ABSENT: u32 = u32::MAX;

impl OpenSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: Vec::new(), slots: Vec::new(), capacity }
    }

    /// Empties the heap and sizes the position table for `nodes` node indices.
    pub fn reset(&mut self, nodes: usize) {
        self.heap.clear();
        self.heap.reserve(self.capacity.min(nodes));
        self.slots.clear();
        self.slots.resize(nodes, ABSENT);
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, node: u32) -> bool {
        self.slots.get(node as usize).is_some_and(|&s| s != ABSENT)
    }

    pub fn insert(&mut self, node: u32, f: u32) {
        assert!(self.heap.len() < self.capacity, "open set overflow (capacity {})", self.capacity);
        let n = node as usize;
        if n >= self.slots.len() {
            self.slots.resize(n + 1, ABSENT);
        }
        debug_assert_eq!(self.slots[n], ABSENT, "node {node} inserted twice");
        let pos = self.heap.len();
        self.heap.push(HeapEntry { f, node });
        self.slots[n] = pos as u32;
        self.sift_up(pos);
    }

    /// Lowers the key of an already-open node.
    pub fn replace(&mut self, node: u32, f: u32) {
        let pos = self.slots[node as usize];
        assert_ne!(pos, ABSENT, "replace on node {node} which is not open");
        let pos = pos as usize;
        debug_assert!(f <= self.heap[pos].f, "replace must not increase the key");
        self.heap[pos].f = f;
        self.sift_up(pos);
    }

    pub fn extract_min(&mut self) -> Option<u32> {
        let top = *self.heap.first()?;
        let last = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.slots[last.node as usize] = 0;
            self.sift_down(0);
        }
        self.slots[top.node as usize] = ABSENT;
        Some(top.node)
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[parent].f <= self.heap[pos].f {
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
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].f < self.heap[left].f { right } else { left };
            if self.heap[pos].f <= self.heap[child].f {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].node as usize] = a as u32;
        self.slots[self.heap[b].node as usize] = b as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    #[test]
    fn test_basic_operations() {
        let mut os = OpenSet::with_capacity(8);
        os.reset(8);
        assert!(os.is_empty());
        os.insert(3, 7);
        assert_eq!(os.len(), 1);
        assert!(os.contains(3));
        assert_eq!(os.extract_min(), Some(3));
        assert!(!os.contains(3));
        assert_eq!(os.extract_min(), None);
    }

    #[test]
    fn test_ordering_by_f_value() {
        let mut os = OpenSet::with_capacity(16);
        os.reset(16);
        for (node, f) in [(0, 10), (1, 5), (2, 8), (3, 1), (4, 9)] {
            os.insert(node, f);
        }
        let order: Vec<u32> = std::iter::from_fn(|| os.extract_min()).collect();
        assert_eq!(order, vec![3, 1, 2, 4, 0]);
    }

    #[test]
    fn test_replace_moves_node_forward() {
        let mut os = OpenSet::with_capacity(16);
        os.reset(16);
        os.insert(1, 4);
        os.insert(2, 6);
        os.insert(3, 9);
        os.replace(3, 2);
        assert_eq!(os.extract_min(), Some(3));
        assert_eq!(os.extract_min(), Some(1));
    }

    #[test]
    fn test_equal_keys_any_order() {
        let mut os = OpenSet::with_capacity(8);
        os.reset(8);
        for node in [5, 2, 7] {
            os.insert(node, 3);
        }
        os.insert(1, 4);
        let mut first_three: Vec<u32> = (0..3).filter_map(|_| os.extract_min()).collect();
        first_three.sort_unstable();
        assert_eq!(first_three, vec![2, 5, 7]);
        assert_eq!(os.extract_min(), Some(1));
    }

    #[test]
    fn test_reset_clears_positions() {
        let mut os = OpenSet::with_capacity(8);
        os.reset(4);
        os.insert(0, 1);
        os.insert(1, 2);
        os.reset(4);
        assert!(os.is_empty());
        assert!(!os.contains(0));
        os.insert(0, 5);
        assert_eq!(os.extract_min(), Some(0));
    }

    #[test]
    #[should_panic(expected = "open set overflow")]
    fn test_overflow_panics() {
        let mut os = OpenSet::with_capacity(2);
        os.reset(4);
        os.insert(0, 1);
        os.insert(1, 1);
        os.insert(2, 1);
    }

    #[test]
    fn test_heap_invariant_under_random_operations() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let nodes = 256u32;
        let mut os = OpenSet::with_capacity(nodes as usize);
        os.reset(nodes as usize);
        let mut model: HashMap<u32, u32> = HashMap::new();

        for _ in 0..5_000 {
            match rng.gen_range(0..3) {
                0 => {
                    let node = rng.gen_range(0..nodes);
                    if !model.contains_key(&node) {
                        let f = rng.gen_range(0..1_000);
                        os.insert(node, f);
                        model.insert(node, f);
                    }
                }
                1 => {
                    let node = rng.gen_range(0..nodes);
                    if let Some(f) = model.get_mut(&node) {
                        let lowered = rng.gen_range(0..=*f);
                        os.replace(node, lowered);
                        *f = lowered;
                    }
                }
                _ => {
                    let min = model.values().min().copied();
                    let got = os.extract_min();
                    match (got, min) {
                        (Some(node), Some(min)) => {
                            let f = model.remove(&node).expect("extracted node must be open");
                            assert_eq!(f, min, "extract_min returned f={f} while min is {min}");
                        }
                        (None, None) => {}
                        other => panic!("open set and model disagree: {other:?}"),
                    }
                }
            }
            assert_eq!(os.len(), model.len());
        }
    }
}
