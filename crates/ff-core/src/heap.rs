//! Array-backed binary min-heap over an external scoring function.
//!
//! The heap never stores scores itself; ordering is whatever the
//! scoring function currently reports. If an element's score changes
//! while it is stored, the caller must announce it through
//! [`Heap::rescore_element`] to restore the heap property.

/// Binary min-heap parameterized by a scoring function
#[derive(Debug, Clone)]
pub struct Heap<T, F>
where
    F: Fn(&T) -> i32,
{
    items: Vec<T>,
    score: F,
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T) -> i32,
{
    /// Create an empty heap ordered by `score`
    pub fn new(score: F) -> Self {
        Self {
            items: Vec::new(),
            score,
        }
    }

    /// Insert an element, O(log n)
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the minimum-scored element, O(log n)
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// The minimum-scored element, if any
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Current element count
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no elements are stored
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn sift_up(&mut self, mut idx: usize) -> usize {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if (self.score)(&self.items[idx]) < (self.score)(&self.items[parent]) {
                self.items.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
        idx
    }

    fn sift_down(&mut self, mut idx: usize) -> usize {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && (self.score)(&self.items[left]) < (self.score)(&self.items[smallest]) {
                smallest = left;
            }
            if right < len && (self.score)(&self.items[right]) < (self.score)(&self.items[smallest])
            {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
        idx
    }
}

impl<T, F> Heap<T, F>
where
    T: PartialEq,
    F: Fn(&T) -> i32,
{
    /// Re-position an element whose score changed externally.
    ///
    /// Locates it by equality (O(n)), then sifts both ways.
    /// Returns false if the element is not stored.
    pub fn rescore_element(&mut self, elem: &T) -> bool {
        let Some(idx) = self.items.iter().position(|item| item == elem) else {
            return false;
        };
        let idx = self.sift_up(idx);
        self.sift_down(idx);
        true
    }
}
