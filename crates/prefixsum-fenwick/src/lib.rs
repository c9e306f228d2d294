//! Fenwick tree (Binary Indexed Tree) prefix-sum index.
//!
//! [`PrefixSumIndex`] keeps a fixed number of numeric elements, all zero at
//! construction, and supports point updates together with prefix and range
//! sums in O(log n). Positions are 0-indexed. [`OneBased`] exposes the same
//! index through 1-based positions.
//!
//! ```
//! use prefixsum_fenwick::PrefixSumIndex;
//!
//! let mut index = PrefixSumIndex::new(5);
//! for i in 0..5 {
//!     index.set(i, i as i64 + 1).unwrap();
//! }
//! assert_eq!(index.range_sum(1, 3).unwrap(), 9);
//!
//! index.add(2, 2).unwrap();
//! assert_eq!(index.range_sum(1, 3).unwrap(), 11);
//! ```

use std::ops::{Add, Sub};

mod error;
mod one_based;

pub use error::{IndexError, Result};
pub use one_based::OneBased;

/// Lowest set bit of `i`; the span covered by auxiliary slot `i`.
#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// A Fenwick Tree (Binary Indexed Tree) over `len` elements.
///
/// Supports:
/// - Point updates (`add`, `set`): O(log n)
/// - Prefix sum queries: O(log n)
/// - Range sum queries: O(log n)
/// - Single element reads: O(1)
///
/// Auxiliary slot `i` (1-indexed) holds the sum of the elements in
/// `(i - lowbit(i), i]`. The current value of every element is mirrored in a
/// shadow array so that `set` and `get` need no tree walk.
///
/// # Numeric semantics
///
/// `T::default()` is the additive identity. Overflow follows `T`'s own
/// operators: primitive integers panic in debug builds and wrap in release
/// builds. Use [`std::num::Wrapping`] for defined wraparound.
///
/// # Concurrency
///
/// Mutation takes `&mut self`; share across threads behind a `Mutex` or
/// `RwLock`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixSumIndex<T> {
    tree: Vec<T>,
    values: Vec<T>,
}

impl<T> PrefixSumIndex<T> {
    /// Returns the number of elements in the index.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the index has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current element values, in index order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(IndexError::out_of_range(index, self.len()))
        }
    }
}

impl<T: Copy + Default + Add<Output = T> + Sub<Output = T>> PrefixSumIndex<T> {
    /// Creates an index of `len` zero-valued elements.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated, as `vec!` does. Use
    /// [`try_with_len`](Self::try_with_len) for untrusted lengths.
    pub fn new(len: usize) -> Self {
        Self {
            tree: vec![T::default(); len.saturating_add(1)],
            values: vec![T::default(); len],
        }
    }

    /// Creates an index of `len` zero-valued elements, reporting allocation
    /// failure as [`IndexError::InvalidArgument`].
    pub fn try_with_len(len: usize) -> Result<Self> {
        let too_large =
            || IndexError::InvalidArgument(format!("length {len} exceeds addressable size"));
        let slots = len.checked_add(1).ok_or_else(too_large)?;

        let mut tree = Vec::new();
        tree.try_reserve_exact(slots).map_err(|_| too_large())?;
        tree.resize(slots, T::default());

        let mut values = Vec::new();
        values.try_reserve_exact(len).map_err(|_| too_large())?;
        values.resize(len, T::default());

        Ok(Self { tree, values })
    }

    /// Creates an index from a signed length.
    ///
    /// Fails with [`IndexError::InvalidArgument`] when `len` is negative or
    /// too large to allocate.
    pub fn try_new(len: i64) -> Result<Self> {
        if len < 0 {
            return Err(IndexError::InvalidArgument(format!(
                "length must be non-negative, got {len}"
            )));
        }
        let len = usize::try_from(len).map_err(|_| {
            IndexError::InvalidArgument(format!("length {len} exceeds addressable size"))
        })?;
        Self::try_with_len(len)
    }

    /// Builds an index holding `slice` in O(n).
    pub fn from_slice(slice: &[T]) -> Self {
        let size = slice.len();
        let mut tree = vec![T::default(); size + 1];
        tree[1..].copy_from_slice(slice);

        // Push each slot's partial sum into its parent.
        for i in 1..=size {
            let j = i + lowbit(i);
            if j <= size {
                tree[j] = tree[j] + tree[i];
            }
        }

        Self {
            tree,
            values: slice.to_vec(),
        }
    }

    /// Adds `delta` to the element at `index`.
    pub fn add(&mut self, index: usize, delta: T) -> Result<()> {
        self.check(index)?;
        self.values[index] = self.values[index] + delta;

        let size = self.len();
        let mut i = index + 1; // 1-based
        while i <= size {
            self.tree[i] = self.tree[i] + delta;
            i += lowbit(i);
        }
        Ok(())
    }

    /// Sets the element at `index` to `value`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let current = self.get(index)?;
        self.add(index, value - current)
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.check(index)?;
        Ok(self.values[index])
    }

    /// Returns the sum of elements `[0, index]` (inclusive).
    pub fn prefix_sum(&self, index: usize) -> Result<T> {
        self.check(index)?;
        Ok(self.sum_first(index + 1))
    }

    /// Signed form of [`prefix_sum`](Self::prefix_sum).
    ///
    /// A negative `index` names the empty prefix and yields zero.
    pub fn prefix_sum_signed(&self, index: i64) -> Result<T> {
        if index < 0 {
            return Ok(T::default());
        }
        let index = usize::try_from(index).map_err(|_| IndexError::OutOfRange {
            index,
            len: self.len(),
        })?;
        self.prefix_sum(index)
    }

    /// Returns the sum of elements `[low, high]` (inclusive).
    ///
    /// `low > high` is rejected with [`IndexError::InvalidArgument`].
    pub fn range_sum(&self, low: usize, high: usize) -> Result<T> {
        if low > high {
            return Err(IndexError::inverted_range(low, high));
        }
        self.check(high)?;
        Ok(self.sum_first(high + 1) - self.sum_first(low))
    }

    /// Signed form of [`range_sum`](Self::range_sum), computed as
    /// `prefix_sum_signed(high) - prefix_sum_signed(low - 1)`.
    pub fn range_sum_signed(&self, low: i64, high: i64) -> Result<T> {
        if low > high {
            return Err(IndexError::inverted_range(low, high));
        }
        let upper = self.prefix_sum_signed(high)?;
        let lower = self.prefix_sum_signed(low.saturating_sub(1))?;
        Ok(upper - lower)
    }

    /// Returns the sum of every element.
    pub fn total(&self) -> T {
        self.sum_first(self.len())
    }

    /// Sets every element back to zero, keeping the length.
    pub fn reset(&mut self) {
        self.tree.fill(T::default());
        self.values.fill(T::default());
    }

    /// Sum of the first `count` elements; `count` is at most `len`.
    fn sum_first(&self, count: usize) -> T {
        let mut i = count;
        let mut result = T::default();
        while i > 0 {
            result = result + self.tree[i];
            i -= lowbit(i);
        }
        result
    }
}

impl<T: Copy + Default + Add<Output = T> + Sub<Output = T> + PartialOrd> PrefixSumIndex<T> {
    /// Finds the smallest index whose prefix sum is `>= target`.
    ///
    /// Only meaningful when every element is non-negative, so that prefix
    /// sums never decrease. Returns `None` if the index is empty or `target`
    /// is greater than the total.
    pub fn lower_bound(&self, target: T) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        if target <= T::default() {
            return Some(0);
        }
        if target > self.total() {
            return None;
        }

        let size = self.len();
        let mut idx = 0;
        let mut remaining = target;
        let mut bit_mask = size.next_power_of_two();

        while bit_mask > 0 {
            let next = idx + bit_mask;
            if next <= size && self.tree[next] < remaining {
                idx = next;
                remaining = remaining - self.tree[next];
            }
            bit_mask >>= 1;
        }

        Some(idx)
    }
}

impl<T: Copy + Default + Add<Output = T> + Sub<Output = T>> From<Vec<T>> for PrefixSumIndex<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_slice(&values)
    }
}

impl<T: Copy + Default + Add<Output = T> + Sub<Output = T>> FromIterator<T> for PrefixSumIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        Self::from_slice(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::Wrapping;

    const SAMPLE: [i64; 10] = [3, 2, -1, 6, 5, 4, -3, 3, 7, 2];

    fn sample() -> PrefixSumIndex<i64> {
        let mut index = PrefixSumIndex::new(SAMPLE.len());
        for (i, &v) in SAMPLE.iter().enumerate() {
            index.add(i, v).unwrap();
        }
        index
    }

    #[test]
    fn test_new_is_all_zero() {
        let index: PrefixSumIndex<i32> = PrefixSumIndex::new(5);
        assert_eq!(index.len(), 5);
        assert!(!index.is_empty());
        assert_eq!(index.values(), &[0; 5]);
        assert_eq!(index.total(), 0);
        assert_eq!(index.range_sum(0, 4).unwrap(), 0);
    }

    #[test]
    fn test_try_new_rejects_negative_length() {
        let err = PrefixSumIndex::<i64>::try_new(-1).unwrap_err();
        assert!(err.is_invalid_argument());

        let index = PrefixSumIndex::<i64>::try_new(3).unwrap();
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_unallocatable_length_is_invalid() {
        let err = PrefixSumIndex::<i64>::try_with_len(usize::MAX).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("exceeds addressable size"));

        let err = PrefixSumIndex::<i64>::try_new(i64::MAX).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_try_with_len_is_all_zero() {
        let index = PrefixSumIndex::<i64>::try_with_len(4).unwrap();
        assert_eq!(index, PrefixSumIndex::new(4));
        assert_eq!(index.total(), 0);
    }

    #[test]
    fn test_set_then_range_sum() {
        let mut index = PrefixSumIndex::new(5);
        for i in 0..5 {
            index.set(i, i as i64 + 1).unwrap();
        }
        assert_eq!(index.range_sum(1, 3).unwrap(), 9);

        index.add(2, 2).unwrap();
        assert_eq!(index.get(2).unwrap(), 5);
        assert_eq!(index.range_sum(1, 3).unwrap(), 11);
        assert_eq!(index.range_sum(0, 4).unwrap(), 1 + 2 + 5 + 4 + 5);
    }

    #[test]
    fn test_set_replaces_value() {
        let mut index = PrefixSumIndex::new(5);
        index.add(0, 1).unwrap();
        index.add(1, 2).unwrap();
        index.set(1, 10).unwrap();

        assert_eq!(index.get(1).unwrap(), 10);
        assert_eq!(index.prefix_sum(0).unwrap(), 1);
        assert_eq!(index.prefix_sum(1).unwrap(), 11);
    }

    #[test]
    fn test_prefix_sums() {
        let index = sample();
        assert_eq!(index.prefix_sum(0).unwrap(), 3);
        assert_eq!(index.prefix_sum(1).unwrap(), 5);
        assert_eq!(index.prefix_sum(2).unwrap(), 4);
        assert_eq!(index.prefix_sum(4).unwrap(), 15);
        assert_eq!(index.prefix_sum(9).unwrap(), 28);
    }

    #[test]
    fn test_range_sums() {
        let index = sample();
        assert_eq!(index.range_sum(0, 0).unwrap(), 3);
        assert_eq!(index.range_sum(2, 7).unwrap(), 14);
        assert_eq!(index.range_sum(4, 6).unwrap(), 6);
        assert_eq!(index.range_sum(5, 9).unwrap(), 13);
    }

    #[test]
    fn test_negative_prefix_is_zero() {
        let index = sample();
        assert_eq!(index.prefix_sum_signed(-1).unwrap(), 0);
        assert_eq!(index.prefix_sum_signed(-5).unwrap(), 0);
        assert_eq!(index.prefix_sum_signed(4).unwrap(), 15);
        assert_eq!(index.range_sum_signed(-5, 9).unwrap(), 28);
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let index = sample();
        assert!(index.range_sum(3, 1).unwrap_err().is_invalid_argument());
        assert!(index.range_sum_signed(3, 1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_out_of_range() {
        let mut index = sample();
        assert_eq!(
            index.add(10, 1).unwrap_err(),
            IndexError::OutOfRange { index: 10, len: 10 }
        );
        assert!(index.set(10, 1).unwrap_err().is_out_of_range());
        assert!(index.get(10).unwrap_err().is_out_of_range());
        assert!(index.prefix_sum(10).unwrap_err().is_out_of_range());
        assert!(index.prefix_sum_signed(10).unwrap_err().is_out_of_range());
        assert!(index.range_sum(3, 10).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_empty_index_rejects_position_zero() {
        let mut index: PrefixSumIndex<i64> = PrefixSumIndex::new(0);
        assert!(index.is_empty());
        assert!(index.add(0, 1).unwrap_err().is_out_of_range());
        assert!(index.prefix_sum(0).unwrap_err().is_out_of_range());
        assert_eq!(index.total(), 0);
    }

    #[test]
    fn test_from_slice_matches_incremental() {
        let built = PrefixSumIndex::from_slice(&SAMPLE);
        let incremental = sample();
        assert_eq!(built, incremental);
        assert_eq!(built.values(), &SAMPLE);
    }

    #[test]
    fn test_collect() {
        let index: PrefixSumIndex<i32> = (1..=100).collect();
        assert_eq!(index.total(), 5050);
        assert_eq!(index.range_sum(49, 99).unwrap(), 3825);
        assert_eq!(index.range_sum(0, 49).unwrap(), 1275);
    }

    #[test]
    fn test_reset() {
        let mut index = sample();
        index.reset();
        assert_eq!(index.len(), 10);
        assert_eq!(index.total(), 0);
        assert_eq!(index.get(3).unwrap(), 0);
    }

    #[test]
    fn test_lower_bound() {
        let index = PrefixSumIndex::from_slice(&[1, 2, 3, 4, 5]);
        // Prefix sums: [1, 3, 6, 10, 15]

        assert_eq!(index.lower_bound(0), Some(0));
        assert_eq!(index.lower_bound(1), Some(0));
        assert_eq!(index.lower_bound(3), Some(1));
        assert_eq!(index.lower_bound(4), Some(2));
        assert_eq!(index.lower_bound(15), Some(4));
        assert_eq!(index.lower_bound(16), None);
    }

    #[test]
    fn test_lower_bound_empty() {
        let index: PrefixSumIndex<u32> = PrefixSumIndex::new(0);
        assert_eq!(index.lower_bound(0), None);
    }

    #[test]
    fn test_float_elements() {
        let index = PrefixSumIndex::from_slice(&[0.5_f64, 1.25, 2.0]);
        assert!((index.range_sum(1, 2).unwrap() - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wrapping_elements() {
        let mut index = PrefixSumIndex::new(2);
        index.set(0, Wrapping(u8::MAX)).unwrap();
        index.add(1, Wrapping(2u8)).unwrap();
        assert_eq!(index.total(), Wrapping(1u8));
        assert_eq!(index.range_sum(1, 1).unwrap(), Wrapping(2u8));
    }
}
