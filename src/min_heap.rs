use thiserror::Error;

/// Zero-based binary min-heap. The smallest element (by `Ord`) sits at index 0.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapErr {
    #[error("extract from empty heap")]
    HeapUnderflow,
    #[error("expected exactly one element, found {0}")]
    NotSingular(usize),
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
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

    /// Consumes a heap holding exactly one element and returns it.
    pub fn into_single(self) -> Result<T, HeapErr> {
        let n = self.heap_size();
        if n != 1 {
            return Err(HeapErr::NotSingular(n));
        }
        self.elements.into_iter().next().ok_or(HeapErr::HeapUnderflow)
    }
}

impl<T: Ord> MinHeap<T> {
    /// Floyd's bottom-up heap construction, O(n).
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap_size();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if self.elements[i] >= self.elements[p] {
                return;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let last = self.heap_size() - 1;
        self.sift_up(last);
        debug_assert!(self.valid_min_heap());
    }

    pub fn extract_min(&mut self) -> Result<T, HeapErr> {
        if self.is_empty() {
            return Err(HeapErr::HeapUnderflow);
        }
        let result = self.elements.swap_remove(0);
        if !self.is_empty() {
            self.sift_down(0);
        }
        Ok(result)
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_and_drain_sorted() {
        let mut heap = MinHeap::build(vec![9, 3, 7, 1, 8, 2, 2, 5]);
        assert!(heap.valid_min_heap());

        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.extract_min().unwrap());
        }
        assert_eq!(drained, vec![1, 2, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn test_insert_keeps_min_on_top() {
        let mut heap = MinHeap::new();
        for v in [4, 10, 3, 6, 0, 12] {
            heap.insert(v);
            assert!(heap.valid_min_heap());
        }
        assert_eq!(heap.heap_size(), 6);
        assert_eq!(heap.extract_min(), Ok(0));
    }

    #[test]
    fn test_underflow() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert_eq!(heap.extract_min(), Err(HeapErr::HeapUnderflow));
    }

    #[test]
    fn test_into_single() {
        assert_eq!(MinHeap::build(vec![42]).into_single(), Ok(42));
        assert_eq!(
            MinHeap::build(vec![1, 2]).into_single(),
            Err(HeapErr::NotSingular(2))
        );
        assert_eq!(
            MinHeap::<u8>::new().into_single(),
            Err(HeapErr::NotSingular(0))
        );
    }
}
