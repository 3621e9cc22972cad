//! Brute-force reference models for range structures.
//!
//! Every operation here is a plain loop over a `Vec`, so the results are
//! easy to trust. The models are used as oracles: tests, the fuzz harness
//! and the benchmarks replay the same operations against a fast structure
//! and against a model, then compare.
//!
//! All ranges are inclusive, `left..=right`, and indices are not validated
//! beyond the usual slice bounds checks.
//!
//! # Example
//!
//! ```
//! use naive::NaiveArray;
//!
//! let mut model = NaiveArray::new(vec![1i64, 3, 5, 7, 9, 11]);
//! assert_eq!(model.fold(1, 3, 0, |a, b| a + b), 15);
//!
//! model.update_range(1, 4, |x| x + 10);
//! assert_eq!(model.fold(1, 3, 0, |a, b| a + b), 45);
//!
//! model.set(1, 10);
//! assert_eq!(model.values(), &[1, 10, 15, 17, 19, 11]);
//! ```

/// A sequence with O(n) range folds and range updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NaiveArray<T> {
    values: Vec<T>,
}

impl<T: Clone> NaiveArray<T> {
    pub fn new(values: Vec<T>) -> Self {
        NaiveArray { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Folds `combine` left to right over `left..=right`, starting from
    /// `init`. Returns `init` for an empty or inverted range.
    pub fn fold<F>(&self, left: usize, right: usize, init: T, combine: F) -> T
    where
        F: Fn(&T, &T) -> T,
    {
        let mut acc = init;
        if left > right {
            return acc;
        }
        for value in &self.values[left..=right] {
            acc = combine(&acc, value);
        }
        return acc;
    }

    /// Replaces every element of `left..=right` with `update(element)`.
    pub fn update_range<F>(&mut self, left: usize, right: usize, update: F)
    where
        F: Fn(&T) -> T,
    {
        if left > right {
            return;
        }
        for value in &mut self.values[left..=right] {
            *value = update(value);
        }
    }

    /// Overwrites a single element.
    pub fn set(&mut self, index: usize, value: T) {
        self.values[index] = value;
    }
}

impl<T> From<Vec<T>> for NaiveArray<T> {
    fn from(values: Vec<T>) -> Self {
        NaiveArray { values }
    }
}
