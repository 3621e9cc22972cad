//! Byte-driven operation scripts shared by the AFL harness and the crash
//! reproducer.
//!
//! An input starts with a header byte giving the sequence length, followed
//! by one signed byte per initial value. The remaining bytes decode into
//! [`FuzzOp`]s. Raw indices are reduced modulo `len + 1`, so some operations
//! land one past the end and must be rejected without touching the trees.

use std::fmt;

use naive::NaiveArray;

use crate::ops::{MaxAdd, MinAdd, Neutral, RangeOps, SumAdd};
use crate::{RangeSegmentTree, SegTreeError};

/// Longest sequence an input can describe.
pub const MAX_LEN: usize = 64;

/// Operation types the fuzzer can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzOp {
    /// Aggregate query over `left..=right`
    Query { left: u8, right: u8 },
    /// Add `value` to every element of `left..=right`
    RangeAdd { left: u8, right: u8, value: i8 },
    /// Overwrite one element
    Assign { index: u8, value: i8 },
}

impl FuzzOp {
    pub fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 3;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                let op = FuzzOp::Query {
                    left: rest[0],
                    right: rest[1],
                };
                Some((op, &rest[2..]))
            }
            1 if rest.len() >= 3 => {
                let op = FuzzOp::RangeAdd {
                    left: rest[0],
                    right: rest[1],
                    value: rest[2] as i8,
                };
                Some((op, &rest[3..]))
            }
            2 if rest.len() >= 2 => {
                let op = FuzzOp::Assign {
                    index: rest[0],
                    value: rest[1] as i8,
                };
                Some((op, &rest[2..]))
            }
            _ => None,
        }
    }
}

/// Splits the initial sequence off the front of an input. Returns `None`
/// when the input is too short to hold it.
pub fn initial_values(bytes: &[u8]) -> Option<(Vec<i64>, &[u8])> {
    let (&header, rest) = bytes.split_first()?;
    let len = header as usize % MAX_LEN + 1;
    if rest.len() < len {
        return None;
    }
    let values = rest[..len].iter().map(|&b| b as i8 as i64).collect();
    return Some((values, &rest[len..]));
}

/// A disagreement between one of the trees and the reference model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub step: usize,
    pub op: Option<FuzzOp>,
    pub preset: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Some(op) => write!(f, "step {} ({:?}), {}: ", self.step, op, self.preset)?,
            None => write!(f, "after step {}, {}: ", self.step, self.preset)?,
        }
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

/// Replays operations against sum, min and max trees and a naive model
/// in lockstep.
pub struct Replay {
    sum: RangeSegmentTree<SumAdd>,
    min: RangeSegmentTree<MinAdd>,
    max: RangeSegmentTree<MaxAdd>,
    model: NaiveArray<i64>,
    steps: usize,
}

impl Replay {
    pub fn new(initial: &[i64]) -> Result<Self, SegTreeError> {
        return Ok(Replay {
            sum: RangeSegmentTree::from_preset(initial, SumAdd)?,
            min: RangeSegmentTree::from_preset(initial, MinAdd)?,
            max: RangeSegmentTree::from_preset(initial, MaxAdd)?,
            model: NaiveArray::new(initial.to_vec()),
            steps: 0,
        });
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The model's current values.
    pub fn values(&self) -> &[i64] {
        self.model.values()
    }

    /// Maps a raw fuzz byte onto `0..=len`.
    pub fn index(&self, raw: u8) -> usize {
        raw as usize % (self.model.len() + 1)
    }

    /// Runs one operation on every tree and on the model, checking results
    /// and whole-sequence totals.
    pub fn step(&mut self, op: FuzzOp) -> Result<(), Divergence> {
        self.steps += 1;

        match op {
            FuzzOp::Query { left, right } => {
                let (left, right) = (self.index(left), self.index(right));
                let rejected = self.expected_error(left, right);

                let expected = self.expected_fold(&SumAdd, left, right, &rejected);
                let actual = self.sum.query(left, right);
                self.check(Some(op), "sum", expected, actual)?;
                let expected = self.expected_fold(&MinAdd, left, right, &rejected);
                let actual = self.min.query(left, right);
                self.check(Some(op), "min", expected, actual)?;
                let expected = self.expected_fold(&MaxAdd, left, right, &rejected);
                let actual = self.max.query(left, right);
                self.check(Some(op), "max", expected, actual)?;
            }

            FuzzOp::RangeAdd { left, right, value } => {
                let (left, right) = (self.index(left), self.index(right));
                let value = value as i64;
                let expected = match self.expected_error(left, right) {
                    Some(err) => Err(err),
                    None => {
                        self.model.update_range(left, right, |x| SumAdd.apply(x, &value, 1));
                        Ok(())
                    }
                };

                let actual = self.sum.range_update(left, right, value);
                self.check(Some(op), "sum", expected.clone(), actual)?;
                let actual = self.min.range_update(left, right, value);
                self.check(Some(op), "min", expected.clone(), actual)?;
                let actual = self.max.range_update(left, right, value);
                self.check(Some(op), "max", expected, actual)?;
            }

            FuzzOp::Assign { index, value } => {
                let index = self.index(index);
                let value = value as i64;
                let expected = match self.expected_error(index, index) {
                    Some(err) => Err(err),
                    None => {
                        self.model.set(index, value);
                        Ok(())
                    }
                };

                let actual = self.sum.point_update(index, value);
                self.check(Some(op), "sum", expected.clone(), actual)?;
                let actual = self.min.point_update(index, value);
                self.check(Some(op), "min", expected.clone(), actual)?;
                let actual = self.max.point_update(index, value);
                self.check(Some(op), "max", expected, actual)?;
            }
        }

        self.check_totals()
    }

    /// Compares every element of every tree against the model. This pushes
    /// all pending tags down, so harnesses call it once at the end.
    pub fn verify(&mut self) -> Result<(), Divergence> {
        let expected: Vec<i64> = self.model.values().to_vec();
        let actual = self.sum.to_vec();
        self.check(None, "sum", Ok(expected.clone()), Ok(actual))?;
        let actual = self.min.to_vec();
        self.check(None, "min", Ok(expected.clone()), Ok(actual))?;
        let actual = self.max.to_vec();
        self.check(None, "max", Ok(expected), Ok(actual))?;
        self.check_totals()
    }

    fn check_totals(&self) -> Result<(), Divergence> {
        let last = self.model.len() - 1;
        let sum = self.expected_fold(&SumAdd, 0, last, &None);
        let min = self.expected_fold(&MinAdd, 0, last, &None);
        let max = self.expected_fold(&MaxAdd, 0, last, &None);
        self.check(None, "sum total", sum, Ok(self.sum.total()))?;
        self.check(None, "min total", min, Ok(self.min.total()))?;
        self.check(None, "max total", max, Ok(self.max.total()))
    }

    fn expected_fold<O>(
        &self,
        ops: &O,
        left: usize,
        right: usize,
        rejected: &Option<SegTreeError>,
    ) -> Result<i64, SegTreeError>
    where
        O: Neutral<Value = i64>,
    {
        if let Some(err) = rejected {
            return Err(err.clone());
        }
        return Ok(self.model.fold(left, right, ops.query_neutral(), |a, b| ops.combine(a, b)));
    }

    fn expected_error(&self, left: usize, right: usize) -> Option<SegTreeError> {
        let len = self.model.len();
        if left >= len {
            return Some(SegTreeError::OutOfRange { index: left, len });
        }
        if right >= len {
            return Some(SegTreeError::OutOfRange { index: right, len });
        }
        if left > right {
            return Some(SegTreeError::InvertedRange { left, right });
        }
        return None;
    }

    fn check<T>(
        &self,
        op: Option<FuzzOp>,
        preset: &'static str,
        expected: Result<T, SegTreeError>,
        actual: Result<T, SegTreeError>,
    ) -> Result<(), Divergence>
    where
        T: PartialEq + fmt::Debug,
    {
        if expected == actual {
            return Ok(());
        }
        return Err(Divergence {
            step: self.steps,
            op,
            preset,
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        });
    }
}
