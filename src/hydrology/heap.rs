//! Array-pair binary min-heap keyed by f32 heights.
//!
//! Keys and cell indices live in two parallel vectors instead of a single
//! vector of structs, so no ordering traits need to be implemented for
//! float keys and sift operations stay branch-light.

/// Binary min-heap over (f32 key, u32 index) pairs.
#[derive(Debug, Default)]
pub struct MinHeap {
    keys: Vec<f32>,
    indices: Vec<u32>,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            indices: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Pushes an entry and restores the heap order.
    pub fn push(&mut self, key: f32, index: u32) {
        self.keys.push(key);
        self.indices.push(index);
        self.sift_up(self.keys.len() - 1);
    }

    /// Pops the entry with the smallest key.
    pub fn pop(&mut self) -> Option<(f32, u32)> {
        if self.keys.is_empty() {
            return None;
        }
        let last = self.keys.len() - 1;
        self.keys.swap(0, last);
        self.indices.swap(0, last);
        let key = self.keys.pop().unwrap();
        let index = self.indices.pop().unwrap();
        if !self.keys.is_empty() {
            self.sift_down(0);
        }
        Some((key, index))
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.keys[child] >= self.keys[parent] {
                break;
            }
            self.keys.swap(child, parent);
            self.indices.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.keys.len();
        loop {
            let left = parent * 2 + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < len && self.keys[right] < self.keys[left] {
                smallest = right;
            }
            if self.keys[smallest] >= self.keys[parent] {
                break;
            }
            self.keys.swap(parent, smallest);
            self.indices.swap(parent, smallest);
            parent = smallest;
        }
    }
}
