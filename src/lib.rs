//! Indexed Heap Data Structures for Rust
//!
//! This crate provides a binary min-heap that keeps a side index from element
//! values to the array slots holding them. With that index the heap supports,
//! on top of the usual priority-queue operations:
//!
//! - **Membership**: O(1) average `contains`
//! - **Arbitrary removal**: O(log n) `remove` of any stored value, not just the minimum
//! - **Duplicates**: equal values may be stored any number of times
//!
//! The heap does not support changing an element's priority in place; remove
//! the old value and insert the new one instead.
//!
//! # Features
//!
//! - `strict-invariants`: audit the heap property and the position index after
//!   every mutation, panicking on the first inconsistency. Useful while
//!   debugging code that supplies an element type with a suspicious
//!   `Ord`/`Hash` pairing.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::Heap;
//! use indexed_heaps::IndexedPriorityQueue;
//!
//! let mut queue = IndexedPriorityQueue::new();
//! for x in [5, 3, 8, 1, 9, 2] {
//!     queue.push(x);
//! }
//!
//! assert!(queue.remove(&8));
//! assert!(queue.contains(&9));
//! assert_eq!(queue.peek(), Some(&1));
//! assert_eq!(queue.into_sorted_vec(), vec![1, 2, 3, 5, 9]);
//! ```

pub mod indexed_binary;
pub mod position_index;
pub mod traits;

// Re-export the main types for convenience
pub use indexed_binary::IndexedPriorityQueue;
pub use traits::{Heap, HeapError, RemovableHeap};
