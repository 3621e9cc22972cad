//! Lazy-propagation segment tree.
//!
//! # Layout
//!
//! Nodes live in two flat buffers of length `4 * len` with implicit heap
//! addressing: the root is `0` and covers `0..=len - 1`, node `p` covering
//! `l..=r` has children `2p + 1` over `l..=m` and `2p + 2` over
//! `m + 1..=r`, where `m = (l + r) / 2`.
//!
//! # Lazy tags
//!
//! `nodes[p]` is always the resolved aggregate of its range, including
//! every update applied at or above `p`. `lazy[p]` holds the updates that
//! `p`'s children have not seen yet. Before a child is read or written,
//! `push` hands the tag down to both children and clears it. Leaves never
//! hold a tag.

use crate::error::{Result, SegTreeError};
use crate::ops::{FnOps, Neutral, RangeOps};

/// A segment tree over a fixed-length sequence with range queries and
/// range updates in O(log n).
#[derive(Clone)]
pub struct RangeSegmentTree<O: RangeOps> {
    ops: O,
    len: usize,
    nodes: Vec<O::Value>,
    lazy: Vec<O::Update>,
    query_neutral: O::Value,
    lazy_neutral: O::Update,
}

impl<O: RangeOps> RangeSegmentTree<O> {
    /// Builds a tree whose leaves are `initial`.
    ///
    /// `query_neutral` must be an identity for `combine`, and
    /// `lazy_neutral` must never be used as a real update.
    pub fn build(
        initial: &[O::Value],
        ops: O,
        query_neutral: O::Value,
        lazy_neutral: O::Update,
    ) -> Result<Self> {
        if initial.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("rejected build over an empty sequence");
            return Err(SegTreeError::EmptySequence);
        }

        let len = initial.len();
        let mut tree = RangeSegmentTree {
            ops,
            len,
            nodes: vec![query_neutral.clone(); 4 * len],
            lazy: vec![lazy_neutral.clone(); 4 * len],
            query_neutral,
            lazy_neutral,
        };
        tree.build_node(initial, 0, 0, len - 1);

        #[cfg(feature = "tracing")]
        tracing::debug!(len, "built segment tree");
        Ok(tree)
    }

    /// Builds a tree of `len` elements, each starting as `query_neutral`.
    pub fn with_len(
        len: usize,
        ops: O,
        query_neutral: O::Value,
        lazy_neutral: O::Update,
    ) -> Result<Self> {
        let initial = vec![query_neutral.clone(); len];
        Self::build(&initial, ops, query_neutral, lazy_neutral)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a tree cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Aggregate of the whole sequence.
    pub fn total(&self) -> O::Value {
        self.nodes[0].clone()
    }

    /// Aggregate of `left..=right`.
    pub fn query(&mut self, left: usize, right: usize) -> Result<O::Value> {
        self.check_range(left, right)?;
        Ok(self.query_node(0, 0, self.len - 1, left, right))
    }

    /// Current value of a single element.
    pub fn get(&mut self, index: usize) -> Result<O::Value> {
        self.query(index, index)
    }

    /// Applies `update` to every element of `left..=right`.
    ///
    /// Passing the lazy neutral element is a validated no-op.
    pub fn range_update(&mut self, left: usize, right: usize, update: O::Update) -> Result<()> {
        self.check_range(left, right)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(left, right, "range update");

        if update == self.lazy_neutral {
            return Ok(());
        }
        self.update_node(0, 0, self.len - 1, left, right, &update);
        Ok(())
    }

    /// Overwrites the element at `index` with `value`, discarding any
    /// update that was pending for it.
    pub fn point_update(&mut self, index: usize, value: O::Value) -> Result<()> {
        self.check_index(index)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(index, "point update");

        self.assign_node(0, 0, self.len - 1, index, value);
        Ok(())
    }

    /// Resolved values of every element, in order.
    pub fn to_vec(&mut self) -> Vec<O::Value> {
        let mut out = Vec::with_capacity(self.len);
        self.collect_node(0, 0, self.len - 1, &mut out);
        out
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, len = self.len, "rejected index");
            return Err(SegTreeError::OutOfRange { index, len: self.len });
        }
        Ok(())
    }

    fn check_range(&self, left: usize, right: usize) -> Result<()> {
        self.check_index(left)?;
        self.check_index(right)?;
        if left > right {
            #[cfg(feature = "tracing")]
            tracing::debug!(left, right, "rejected inverted range");
            return Err(SegTreeError::InvertedRange { left, right });
        }
        Ok(())
    }

    fn build_node(&mut self, initial: &[O::Value], p: usize, l: usize, r: usize) {
        if l == r {
            self.nodes[p] = initial[l].clone();
            return;
        }
        let m = (l + r) / 2;
        self.build_node(initial, 2 * p + 1, l, m);
        self.build_node(initial, 2 * p + 2, m + 1, r);
        self.pull(p);
    }

    /// Recomputes an internal node from its children.
    fn pull(&mut self, p: usize) {
        self.nodes[p] = self.ops.combine(&self.nodes[2 * p + 1], &self.nodes[2 * p + 2]);
    }

    /// Applies `update` to the node covering `l..=r` and records it for
    /// the node's children.
    fn apply_node(&mut self, p: usize, l: usize, r: usize, update: &O::Update) {
        self.nodes[p] = self.ops.apply(&self.nodes[p], update, r - l + 1);
        if l == r {
            return;
        }
        let tag = &mut self.lazy[p];
        *tag = if *tag == self.lazy_neutral {
            update.clone()
        } else {
            self.ops.compose(tag, update)
        };
    }

    /// Hands the pending tag of `p` to both children.
    fn push(&mut self, p: usize, l: usize, r: usize) {
        if self.lazy[p] == self.lazy_neutral {
            return;
        }
        let tag = std::mem::replace(&mut self.lazy[p], self.lazy_neutral.clone());
        let m = (l + r) / 2;
        self.apply_node(2 * p + 1, l, m, &tag);
        self.apply_node(2 * p + 2, m + 1, r, &tag);
    }

    fn query_node(&mut self, p: usize, l: usize, r: usize, ql: usize, qr: usize) -> O::Value {
        if qr < l || r < ql {
            return self.query_neutral.clone();
        }
        if ql <= l && r <= qr {
            return self.nodes[p].clone();
        }
        self.push(p, l, r);
        let m = (l + r) / 2;
        let left = self.query_node(2 * p + 1, l, m, ql, qr);
        let right = self.query_node(2 * p + 2, m + 1, r, ql, qr);
        self.ops.combine(&left, &right)
    }

    fn update_node(
        &mut self,
        p: usize,
        l: usize,
        r: usize,
        ql: usize,
        qr: usize,
        update: &O::Update,
    ) {
        if qr < l || r < ql {
            return;
        }
        if ql <= l && r <= qr {
            self.apply_node(p, l, r, update);
            return;
        }
        self.push(p, l, r);
        let m = (l + r) / 2;
        self.update_node(2 * p + 1, l, m, ql, qr, update);
        self.update_node(2 * p + 2, m + 1, r, ql, qr, update);
        self.pull(p);
    }

    fn assign_node(&mut self, p: usize, l: usize, r: usize, index: usize, value: O::Value) {
        if l == r {
            self.nodes[p] = value;
            return;
        }
        self.push(p, l, r);
        let m = (l + r) / 2;
        if index <= m {
            self.assign_node(2 * p + 1, l, m, index, value);
        } else {
            self.assign_node(2 * p + 2, m + 1, r, index, value);
        }
        self.pull(p);
    }

    fn collect_node(&mut self, p: usize, l: usize, r: usize, out: &mut Vec<O::Value>) {
        if l == r {
            out.push(self.nodes[p].clone());
            return;
        }
        self.push(p, l, r);
        let m = (l + r) / 2;
        self.collect_node(2 * p + 1, l, m, out);
        self.collect_node(2 * p + 2, m + 1, r, out);
    }
}

impl<O: Neutral> RangeSegmentTree<O> {
    /// Builds a tree using the neutral elements `ops` provides.
    pub fn from_preset(initial: &[O::Value], ops: O) -> Result<Self> {
        let query_neutral = ops.query_neutral();
        let lazy_neutral = ops.lazy_neutral();
        Self::build(initial, ops, query_neutral, lazy_neutral)
    }

    /// Builds a tree of `len` neutral elements using `ops`' own neutrals.
    pub fn preset_with_len(len: usize, ops: O) -> Result<Self> {
        let query_neutral = ops.query_neutral();
        let lazy_neutral = ops.lazy_neutral();
        Self::with_len(len, ops, query_neutral, lazy_neutral)
    }
}

impl<T, U, C, A, P> RangeSegmentTree<FnOps<T, U, C, A, P>>
where
    T: Clone,
    U: Clone + PartialEq,
    C: Fn(&T, &T) -> T,
    A: Fn(&T, &U, usize) -> T,
    P: Fn(&U, &U) -> U,
{
    /// Builds a tree from closures.
    ///
    /// ```
    /// use lazyseg::RangeSegmentTree;
    ///
    /// let mut tree = RangeSegmentTree::from_fns(
    ///     &[1i64, 3, 5, 7, 9, 11],
    ///     |a: &i64, b: &i64| a + b,
    ///     |cur: &i64, val: &i64, len: usize| cur + val * len as i64,
    ///     |pending: &i64, val: &i64| pending + val,
    ///     0,
    ///     0,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(tree.query(1, 3).unwrap(), 15);
    /// tree.range_update(1, 4, 10).unwrap();
    /// assert_eq!(tree.query(1, 3).unwrap(), 45);
    /// ```
    pub fn from_fns(
        initial: &[T],
        combine: C,
        apply: A,
        compose: P,
        query_neutral: T,
        lazy_neutral: U,
    ) -> Result<Self> {
        Self::build(initial, FnOps::new(combine, apply, compose), query_neutral, lazy_neutral)
    }
}
