//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for min-heaps whose elements
//! are their own priority:
//!
//! - [`Heap`]: Base trait for simple heaps (push, peek, pop)
//! - [`RemovableHeap`]: Extended trait adding membership tests and removal of
//!   arbitrary elements by value
//!
//! The base [`Heap`] trait mirrors the shape of Rust's standard heap API,
//! while [`RemovableHeap`] adds the operations that need an auxiliary index
//! from values to their positions.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// An absent (`None`) element was offered for insertion
    AbsentElement,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::AbsentElement => {
                write!(f, "cannot insert an absent element into the heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
///
/// # Example
///
/// ```rust
/// use indexed_heaps::Heap;
/// use indexed_heaps::indexed_binary::IndexedPriorityQueue;
///
/// let mut heap = IndexedPriorityQueue::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<T: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, element: T);

    /// Returns the minimum element without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the minimum element
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<T>;
}

/// Extended heap trait with removal of arbitrary elements
///
/// A plain binary heap can only find an element other than the root by a
/// linear scan. Implementations of this trait keep enough bookkeeping to
/// answer membership in O(1) and remove any element in O(log n).
///
/// # Example
///
/// ```rust
/// use indexed_heaps::{Heap, RemovableHeap};
/// use indexed_heaps::indexed_binary::IndexedPriorityQueue;
///
/// let mut heap = IndexedPriorityQueue::new();
/// heap.push(7);
/// heap.push(4);
/// heap.push(9);
///
/// assert!(RemovableHeap::remove(&mut heap, &4));
/// assert!(!RemovableHeap::contains(&heap, &4));
/// assert_eq!(heap.peek(), Some(&7));
/// ```
pub trait RemovableHeap<T: Ord>: Heap<T> {
    /// Returns true if an element equal to `element` is in the heap
    ///
    /// # Time Complexity
    /// O(1) average
    fn contains(&self, element: &T) -> bool;

    /// Removes one element equal to `element`, returning whether one was found
    ///
    /// When several equal elements are present, which one is removed is an
    /// implementation detail, but it must be deterministic.
    ///
    /// # Time Complexity
    /// O(log n)
    fn remove(&mut self, element: &T) -> bool;

    /// Removes every element
    ///
    /// # Time Complexity
    /// O(n)
    fn clear(&mut self);
}
