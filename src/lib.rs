//! Lazyseg - a generic lazy-propagation segment tree.
//!
//! # Quick Start
//!
//! ```
//! use lazyseg::RangeSegmentTree;
//! use lazyseg::ops::SumAdd;
//!
//! // Range sum with range add over six elements
//! let mut tree = RangeSegmentTree::from_preset(&[1, 3, 5, 7, 9, 11], SumAdd).unwrap();
//! assert_eq!(tree.query(1, 3).unwrap(), 15);
//!
//! // Add 10 to indices 1..=4, then overwrite index 1
//! tree.range_update(1, 4, 10).unwrap();
//! tree.point_update(1, 10).unwrap();
//! assert_eq!(tree.query(1, 3).unwrap(), 42);
//! ```
//!
//! Custom operator sets implement [`ops::RangeOps`], or can be passed as
//! closures through [`RangeSegmentTree::from_fns`].

pub mod error;
#[cfg(any(test, feature = "oracle"))]
pub mod fuzz;
pub mod ops;
pub mod segtree;

pub use error::{ErrorKind, Result, SegTreeError};
pub use segtree::RangeSegmentTree;
