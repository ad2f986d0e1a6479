//! Indexed Binary Heap implementation
//!
//! A binary min-heap that, next to its array, keeps a [`PositionIndex`] from
//! each stored value to the set of array slots holding it. The index turns
//! two operations that are linear on a plain binary heap into cheap ones:
//!
//! - membership (`contains`) becomes a hash lookup
//! - removal of an arbitrary element (`remove`) becomes a lookup followed by
//!   one logarithmic repair of the heap
//!
//! The price is O(n) extra space and an index update on every swap.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity     |
//! |---------------|----------------|
//! | `push`/`add`  | O(log n)       |
//! | `pop`/`poll`  | O(log n)       |
//! | `peek`        | O(1)           |
//! | `contains`    | O(1) average   |
//! | `remove`      | O(log n)       |
//! | `from_vec`    | O(n)           |
//! | `from_iter`   | O(n log n)     |
//! | `clear`       | O(n)           |
//!
//! # Duplicates
//!
//! Equal elements may be stored any number of times. When removing by value
//! and several slots hold that value, the slot with the largest array index
//! is removed. Equal elements carry no stable order among themselves.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::indexed_binary::IndexedPriorityQueue;
//!
//! let mut queue = IndexedPriorityQueue::from_vec(vec![9, 5, 7, 1, 3]);
//! assert!(queue.is_min_heap(0));
//!
//! assert!(queue.remove(&5));
//! assert!(!queue.contains(&5));
//!
//! assert_eq!(queue.poll(), Some(1));
//! assert_eq!(queue.poll(), Some(3));
//! assert_eq!(queue.poll(), Some(7));
//! assert_eq!(queue.poll(), Some(9));
//! assert_eq!(queue.poll(), None);
//! ```

use crate::position_index::PositionIndex;
use crate::traits::{Heap, HeapError, RemovableHeap};
use std::fmt;
use std::hash::Hash;

const ROOT: usize = 0;

#[inline]
fn parent(index: usize) -> usize {
    (index - 1) / 2
}

#[inline]
fn left_child(index: usize) -> usize {
    2 * index + 1
}

#[inline]
fn right_child(index: usize) -> usize {
    2 * index + 2
}

/// A binary min-heap with O(1) membership and O(log n) removal by value
///
/// Elements are their own priority. `Hash` and `Eq` must agree with `Ord`:
/// two elements that compare `Equal` must be `==` and hash the same, or the
/// index will lose track of them.
///
/// Not synchronized. Wrap the whole queue in a lock to share it between
/// threads.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<T> {
    /// Complete binary tree in array form, root at slot 0
    heap: Vec<T>,
    /// Value -> slots currently holding it
    index: PositionIndex<T>,
}

impl<T: Ord + Hash + Clone> Heap<T> for IndexedPriorityQueue<T> {
    fn new() -> Self {
        Self::with_capacity(1)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push(&mut self, element: T) {
        let last = self.heap.len();
        self.index.insert(&element, last);
        self.heap.push(element);
        self.swim(last);
        self.check_invariants();
    }

    fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    fn pop(&mut self) -> Option<T> {
        self.remove_at(ROOT)
    }
}

impl<T: Ord + Hash + Clone> RemovableHeap<T> for IndexedPriorityQueue<T> {
    fn contains(&self, element: &T) -> bool {
        self.index.contains(element)
    }

    fn remove(&mut self, element: &T) -> bool {
        IndexedPriorityQueue::remove(self, element)
    }

    fn clear(&mut self) {
        IndexedPriorityQueue::clear(self)
    }
}

impl<T: Ord + Hash + Clone> IndexedPriorityQueue<T> {
    /// Creates an empty queue with room for `capacity` elements
    ///
    /// The capacity is only a hint; the queue grows without bound.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: PositionIndex::with_capacity(capacity),
        }
    }

    /// Builds a queue from `elements` in O(n)
    ///
    /// The elements are laid out in the given order and the heap property is
    /// then established bottom-up by sinking every internal node, from the
    /// last one back to the root.
    pub fn from_vec(elements: Vec<T>) -> Self {
        let mut index = PositionIndex::with_capacity(elements.len());
        for (position, element) in elements.iter().enumerate() {
            index.insert(element, position);
        }

        let mut queue = Self {
            heap: elements,
            index,
        };
        let len = queue.heap.len();
        for node in (0..len / 2).rev() {
            queue.sink(node);
        }

        log::debug!("heapified {} elements", len);
        queue.check_invariants();
        queue
    }

    /// Builds a queue by pushing each element in turn, O(n log n)
    pub fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Self {
        let iter = elements.into_iter();
        let mut queue = Self::with_capacity(iter.size_hint().0.max(1));
        for element in iter {
            queue.push(element);
        }
        queue
    }

    /// Inserts an element that may be absent
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::AbsentElement`] for `None`; the queue is left
    /// unchanged.
    ///
    /// ```rust
    /// use indexed_heaps::{Heap, HeapError};
    /// use indexed_heaps::indexed_binary::IndexedPriorityQueue;
    ///
    /// let mut queue: IndexedPriorityQueue<i32> = IndexedPriorityQueue::new();
    /// assert_eq!(queue.add(4), Ok(()));
    /// assert_eq!(queue.add(None), Err(HeapError::AbsentElement));
    /// assert_eq!(queue.len(), 1);
    /// ```
    pub fn add(&mut self, element: impl Into<Option<T>>) -> Result<(), HeapError> {
        match element.into() {
            Some(element) => {
                self.push(element);
                Ok(())
            }
            None => {
                log::debug!("rejected insertion of an absent element");
                Err(HeapError::AbsentElement)
            }
        }
    }

    /// Removes and returns the minimum element
    pub fn poll(&mut self) -> Option<T> {
        self.remove_at(ROOT)
    }

    /// Returns true if an element equal to `element` is present
    ///
    /// An absent argument is never contained.
    pub fn contains<'a>(&self, element: impl Into<Option<&'a T>>) -> bool
    where
        T: 'a,
    {
        element
            .into()
            .is_some_and(|element| self.index.contains(element))
    }

    /// Removes one element equal to `element`
    ///
    /// If the value is stored more than once, the copy at the largest array
    /// slot goes. Returns false if no copy was found or the argument is
    /// absent.
    pub fn remove<'a>(&mut self, element: impl Into<Option<&'a T>>) -> bool
    where
        T: 'a,
    {
        let Some(element) = element.into() else {
            return false;
        };
        match self.index.last_position(element) {
            Some(position) => {
                log::trace!("removing element at slot {}", position);
                self.remove_at(position);
                true
            }
            None => false,
        }
    }

    /// Number of stored elements equal to `element`
    pub fn count(&self, element: &T) -> usize {
        self.index.count(element)
    }

    /// Drops every element and every index entry
    pub fn clear(&mut self) {
        log::debug!("clearing {} elements", self.heap.len());
        self.heap.clear();
        self.index.clear();
    }

    /// Checks the min-heap property for the subtree rooted at `index`
    ///
    /// A slot past the end of the heap is trivially a valid heap. Call with
    /// `0` to check the whole queue.
    pub fn is_min_heap(&self, index: usize) -> bool {
        let len = self.heap.len();
        if index >= len {
            return true;
        }
        let left = left_child(index);
        let right = right_child(index);

        if left < len && self.heap[left] < self.heap[index] {
            return false;
        }
        if right < len && self.heap[right] < self.heap[index] {
            return false;
        }

        self.is_min_heap(left) && self.is_min_heap(right)
    }

    /// Checks that the position index describes the heap array exactly
    pub fn is_index_consistent(&self) -> bool {
        self.index.is_consistent_with(&self.heap)
    }

    /// Iterates over the elements in array order (not sorted)
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// The heap array in array order
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    /// Consumes the queue, returning the heap array in array order
    pub fn into_vec(self) -> Vec<T> {
        self.heap
    }

    /// Consumes the queue, returning its elements in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(element) = self.poll() {
            sorted.push(element);
        }
        sorted
    }

    /// Removes the element at `index`, O(log n)
    ///
    /// The slot is refilled with the last element, which is then moved down
    /// or, if it cannot go down, up.
    fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.heap.len() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(index, last);

        let removed = self.heap.pop()?;
        self.index.remove(&removed, last);

        if index == last {
            self.check_invariants();
            return Some(removed);
        }

        if self.sink(index) == index {
            self.swim(index);
        }

        self.check_invariants();
        Some(removed)
    }

    /// Exchanges two slots in the array and in the index
    fn swap(&mut self, first: usize, second: usize) {
        if first == second {
            return;
        }
        self.heap.swap(first, second);
        // After the exchange the value that was at `first` sits at `second`
        self.index
            .swap(&self.heap[second], &self.heap[first], first, second);
    }

    /// Moves the element at `index` up while it is smaller than its parent
    fn swim(&mut self, mut index: usize) {
        while index > ROOT {
            let up = parent(index);
            if self.heap[index] < self.heap[up] {
                self.swap(index, up);
                index = up;
            } else {
                break;
            }
        }
    }

    /// Moves the element at `index` down while a child is smaller
    ///
    /// Returns the slot where the element came to rest.
    fn sink(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = left_child(index);
            if left >= len {
                break;
            }
            let right = right_child(index);
            let mut smallest = left;
            if right < len && self.heap[right] < self.heap[left] {
                smallest = right;
            }

            if self.heap[smallest] < self.heap[index] {
                self.swap(smallest, index);
                index = smallest;
            } else {
                break;
            }
        }
        index
    }

    #[inline]
    fn check_invariants(&self) {
        #[cfg(feature = "strict-invariants")]
        {
            assert!(self.is_min_heap(ROOT), "min-heap property violated");
            assert!(
                self.is_index_consistent(),
                "position index out of sync with heap array"
            );
        }
        debug_assert_eq!(
            self.heap.is_empty(),
            self.index.distinct_len() == 0,
            "heap array and position index disagree on emptiness"
        );
    }
}

impl<T: Ord + Hash + Clone> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        <Self as Heap<T>>::new()
    }
}

impl<T: Ord + Hash + Clone> From<Vec<T>> for IndexedPriorityQueue<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T: Ord + Hash + Clone, const N: usize> From<[T; N]> for IndexedPriorityQueue<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from_vec(Vec::from(elements))
    }
}

impl<T: Ord + Hash + Clone> FromIterator<T> for IndexedPriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T: Ord + Hash + Clone> Extend<T> for IndexedPriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T: fmt::Display> fmt::Display for IndexedPriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.heap.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut IndexedPriorityQueue<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        while let Some(x) = queue.poll() {
            out.push(x);
        }
        out
    }

    #[test]
    fn test_basic_operations() {
        let mut queue = IndexedPriorityQueue::new();

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);

        queue.push(3);
        queue.push(1);
        queue.push(2);

        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek(), Some(&1));

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_min_extraction_order() {
        let mut queue: IndexedPriorityQueue<i32> = IndexedPriorityQueue::new();
        for x in [5, 3, 8, 1, 9, 2] {
            queue.add(x).unwrap();
        }
        assert_eq!(drain(&mut queue), vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn test_heapify() {
        let mut queue = IndexedPriorityQueue::from_vec(vec![9, 5, 7, 1, 3]);
        assert!(queue.is_min_heap(0));
        assert!(queue.is_index_consistent());
        assert_eq!(drain(&mut queue), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_heapify_layout() {
        // Sinking 5 (slot 1) then 9 (slot 0) gives this exact array
        let queue = IndexedPriorityQueue::from([9, 5, 7, 1, 3]);
        assert_eq!(queue.as_slice(), &[1, 3, 7, 5, 9]);
    }

    #[test]
    fn test_absent_arguments() {
        let mut queue: IndexedPriorityQueue<i32> = IndexedPriorityQueue::new();
        queue.push(1);

        assert_eq!(queue.add(None), Err(HeapError::AbsentElement));
        assert!(!queue.contains(None));
        assert!(!queue.remove(None));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_duplicate_removal() {
        let mut queue: IndexedPriorityQueue<i32> = IndexedPriorityQueue::new();
        queue.push(5);
        queue.push(5);

        assert!(queue.remove(&5));
        assert!(queue.contains(&5));
        assert_eq!(queue.count(&5), 1);

        assert!(queue.remove(&5));
        assert!(!queue.contains(&5));
        assert!(!queue.remove(&5));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_takes_largest_slot() {
        // Array after heapify: [1, 4, 2, 4, 4]; the 4 at slot 4 is the one removed
        let mut queue = IndexedPriorityQueue::from_vec(vec![1, 4, 2, 4, 4]);
        assert_eq!(queue.as_slice(), &[1, 4, 2, 4, 4]);

        assert!(queue.remove(&4));
        assert_eq!(queue.as_slice(), &[1, 4, 2, 4]);
        assert_eq!(queue.count(&4), 2);
        assert!(queue.is_index_consistent());
    }

    #[test]
    fn test_remove_interior_swims_replacement() {
        let mut queue =
            IndexedPriorityQueue::from_vec(vec![1, 10, 2, 11, 12, 4, 5, 13, 14, 15, 16, 3]);
        assert_eq!(
            queue.as_slice(),
            &[1, 10, 2, 11, 12, 3, 5, 13, 14, 15, 16, 4]
        );

        // The tail element 4 lands under 10 and has to move up, not down
        assert!(queue.remove(&12));
        assert_eq!(queue.as_slice(), &[1, 4, 2, 11, 10, 3, 5, 13, 14, 15, 16]);
        assert!(queue.is_min_heap(0));
        assert!(queue.is_index_consistent());
        assert!(!queue.contains(&12));
        assert_eq!(queue.len(), 11);
    }

    #[test]
    fn test_clear() {
        let mut queue = IndexedPriorityQueue::from_vec(vec![4, 2, 6]);
        queue.clear();

        assert!(queue.is_empty());
        assert!(!queue.contains(&2));
        assert_eq!(queue.peek(), None);
        assert!(queue.is_index_consistent());

        queue.push(7);
        assert_eq!(queue.peek(), Some(&7));
    }

    #[test]
    fn test_display_is_array_order() {
        let queue = IndexedPriorityQueue::from_vec(vec![3, 1, 2]);
        assert_eq!(queue.to_string(), "[1, 3, 2]");

        let empty: IndexedPriorityQueue<i32> = IndexedPriorityQueue::new();
        assert_eq!(empty.to_string(), "[]");
    }

    #[test]
    fn test_is_min_heap_out_of_range() {
        let queue = IndexedPriorityQueue::from_vec(vec![1, 2, 3]);
        assert!(queue.is_min_heap(3));
        assert!(queue.is_min_heap(100));
    }

    #[test]
    fn test_into_sorted_vec() {
        let queue: IndexedPriorityQueue<i32> = [8, 3, 3, 1, 9].into_iter().collect();
        assert_eq!(queue.into_sorted_vec(), vec![1, 3, 3, 8, 9]);
    }

    #[test]
    fn test_extend() {
        let mut queue = IndexedPriorityQueue::from_vec(vec![5]);
        queue.extend([4, 6, 1]);
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek(), Some(&1));
        assert!(queue.is_index_consistent());
    }

    #[test]
    fn test_ascending_insertion() {
        let mut queue = IndexedPriorityQueue::new();
        for i in 0..100 {
            queue.push(i);
        }
        for i in 0..100 {
            assert_eq!(queue.pop(), Some(i));
        }
    }

    #[test]
    fn test_descending_insertion() {
        let mut queue = IndexedPriorityQueue::new();
        for i in (0..100).rev() {
            queue.push(i);
        }
        for i in 0..100 {
            assert_eq!(queue.pop(), Some(i));
        }
    }
}
