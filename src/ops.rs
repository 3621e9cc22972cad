//! Operator sets for [`RangeSegmentTree`](crate::RangeSegmentTree).
//!
//! A tree is parameterized by three operations:
//! - `combine` folds the aggregates of two adjacent ranges,
//! - `apply` folds a pending update into the aggregate of a range,
//!   given the number of elements the range covers,
//! - `compose` folds a newer update into an older pending one.
//!
//! The tree trusts the caller on the algebra: `combine` must be
//! associative, and applying an update to `combine(a, b)` must equal
//! `combine` of the update applied to `a` and to `b` (with their own
//! lengths). Neither law is checked at runtime.

use std::marker::PhantomData;

/// The operations a lazy segment tree needs from its element and update
/// types.
pub trait RangeOps {
    /// Aggregate stored in every node.
    type Value: Clone;
    /// Deferred update stored in lazy tags.
    type Update: Clone + PartialEq;

    /// Combine the aggregates of two adjacent ranges, left then right.
    fn combine(&self, left: &Self::Value, right: &Self::Value) -> Self::Value;

    /// Apply `update` to the aggregate of a range covering `len` elements.
    fn apply(&self, value: &Self::Value, update: &Self::Update, len: usize) -> Self::Value;

    /// Compose `incoming` on top of an already pending update.
    fn compose(&self, pending: &Self::Update, incoming: &Self::Update) -> Self::Update;
}

/// Operator sets that know their own neutral elements.
pub trait Neutral: RangeOps {
    /// Identity for [`RangeOps::combine`].
    fn query_neutral(&self) -> Self::Value;

    /// Sentinel meaning "no pending update".
    fn lazy_neutral(&self) -> Self::Update;
}

/// Adapts three closures into a [`RangeOps`].
pub struct FnOps<T, U, C, A, P> {
    combine: C,
    apply: A,
    compose: P,
    _types: PhantomData<fn(&T, &U) -> (T, U)>,
}

impl<T, U, C, A, P> FnOps<T, U, C, A, P>
where
    T: Clone,
    U: Clone + PartialEq,
    C: Fn(&T, &T) -> T,
    A: Fn(&T, &U, usize) -> T,
    P: Fn(&U, &U) -> U,
{
    pub fn new(combine: C, apply: A, compose: P) -> Self {
        FnOps {
            combine,
            apply,
            compose,
            _types: PhantomData,
        }
    }
}

impl<T, U, C, A, P> RangeOps for FnOps<T, U, C, A, P>
where
    T: Clone,
    U: Clone + PartialEq,
    C: Fn(&T, &T) -> T,
    A: Fn(&T, &U, usize) -> T,
    P: Fn(&U, &U) -> U,
{
    type Value = T;
    type Update = U;

    fn combine(&self, left: &T, right: &T) -> T {
        (self.combine)(left, right)
    }

    fn apply(&self, value: &T, update: &U, len: usize) -> T {
        (self.apply)(value, update, len)
    }

    fn compose(&self, pending: &U, incoming: &U) -> U {
        (self.compose)(pending, incoming)
    }
}

/// Range sum with range add. Sums wrap on overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SumAdd;

impl RangeOps for SumAdd {
    type Value = i64;
    type Update = i64;

    fn combine(&self, left: &i64, right: &i64) -> i64 {
        return left.wrapping_add(*right);
    }

    fn apply(&self, value: &i64, update: &i64, len: usize) -> i64 {
        return value.wrapping_add(update.wrapping_mul(len as i64));
    }

    fn compose(&self, pending: &i64, incoming: &i64) -> i64 {
        return pending.wrapping_add(*incoming);
    }
}

impl Neutral for SumAdd {
    fn query_neutral(&self) -> i64 {
        0
    }

    fn lazy_neutral(&self) -> i64 {
        0
    }
}

/// Range minimum with range add.
///
/// `i64::MAX` plays the role of +infinity: it is the query identity and
/// adding to it leaves it unchanged, so untouched padding stays neutral.
/// The value is reserved. An element that lands exactly on `i64::MAX`
/// stays there through later adds. Other values wrap on overflow, and a
/// range minimum is only exact while no element in it has wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinAdd;

impl RangeOps for MinAdd {
    type Value = i64;
    type Update = i64;

    fn combine(&self, left: &i64, right: &i64) -> i64 {
        return *left.min(right);
    }

    fn apply(&self, value: &i64, update: &i64, _len: usize) -> i64 {
        if *value == i64::MAX {
            return i64::MAX;
        }
        return value.wrapping_add(*update);
    }

    fn compose(&self, pending: &i64, incoming: &i64) -> i64 {
        return pending.wrapping_add(*incoming);
    }
}

impl Neutral for MinAdd {
    fn query_neutral(&self) -> i64 {
        i64::MAX
    }

    fn lazy_neutral(&self) -> i64 {
        0
    }
}

/// Range maximum with range add.
///
/// `i64::MIN` is -infinity and is reserved the same way `MinAdd` reserves
/// `i64::MAX`: once an element reaches it, adds leave it fixed. Other
/// values wrap on overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaxAdd;

impl RangeOps for MaxAdd {
    type Value = i64;
    type Update = i64;

    fn combine(&self, left: &i64, right: &i64) -> i64 {
        return *left.max(right);
    }

    fn apply(&self, value: &i64, update: &i64, _len: usize) -> i64 {
        if *value == i64::MIN {
            return i64::MIN;
        }
        return value.wrapping_add(*update);
    }

    fn compose(&self, pending: &i64, incoming: &i64) -> i64 {
        return pending.wrapping_add(*incoming);
    }
}

impl Neutral for MaxAdd {
    fn query_neutral(&self) -> i64 {
        i64::MIN
    }

    fn lazy_neutral(&self) -> i64 {
        0
    }
}

/// Range sum with range assignment. `None` means nothing is pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SumAssign;

impl RangeOps for SumAssign {
    type Value = i64;
    type Update = Option<i64>;

    fn combine(&self, left: &i64, right: &i64) -> i64 {
        return left.wrapping_add(*right);
    }

    fn apply(&self, value: &i64, update: &Option<i64>, len: usize) -> i64 {
        match update {
            Some(assigned) => assigned.wrapping_mul(len as i64),
            None => *value,
        }
    }

    fn compose(&self, pending: &Option<i64>, incoming: &Option<i64>) -> Option<i64> {
        // latest assignment wins
        return incoming.or(*pending);
    }
}

impl Neutral for SumAssign {
    fn query_neutral(&self) -> i64 {
        0
    }

    fn lazy_neutral(&self) -> Option<i64> {
        None
    }
}

/// Range minimum with range assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MinAssign;

impl RangeOps for MinAssign {
    type Value = i64;
    type Update = Option<i64>;

    fn combine(&self, left: &i64, right: &i64) -> i64 {
        return *left.min(right);
    }

    fn apply(&self, value: &i64, update: &Option<i64>, _len: usize) -> i64 {
        return update.unwrap_or(*value);
    }

    fn compose(&self, pending: &Option<i64>, incoming: &Option<i64>) -> Option<i64> {
        return incoming.or(*pending);
    }
}

impl Neutral for MinAssign {
    fn query_neutral(&self) -> i64 {
        i64::MAX
    }

    fn lazy_neutral(&self) -> Option<i64> {
        None
    }
}
