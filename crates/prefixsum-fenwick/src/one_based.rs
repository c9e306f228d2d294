use std::ops::{Add, Sub};

use crate::{IndexError, PrefixSumIndex, Result};

/// 1-based view over a [`PrefixSumIndex`].
///
/// Positions run `1..=len`. Position 0 is only meaningful to [`query`],
/// where it names the empty prefix.
///
/// [`query`]: OneBased::query
#[derive(Debug, Clone, PartialEq)]
pub struct OneBased<T> {
    index: PrefixSumIndex<T>,
}

impl<T: Copy + Default + Add<Output = T> + Sub<Output = T>> OneBased<T> {
    pub fn new(len: usize) -> Self {
        Self {
            index: PrefixSumIndex::new(len),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Adds `delta` to the element at `position`.
    pub fn update(&mut self, position: usize, delta: T) -> Result<()> {
        let i = self.offset(position)?;
        self.index.add(i, delta)
    }

    pub fn set(&mut self, position: usize, value: T) -> Result<()> {
        let i = self.offset(position)?;
        self.index.set(i, value)
    }

    pub fn get(&self, position: usize) -> Result<T> {
        let i = self.offset(position)?;
        self.index.get(i)
    }

    /// Returns the sum of positions `1..=position`; zero for position 0.
    pub fn query(&self, position: usize) -> Result<T> {
        if position == 0 {
            return Ok(T::default());
        }
        let i = self.offset(position)?;
        self.index.prefix_sum(i)
    }

    /// Returns the sum of positions `l..=r`.
    pub fn range_query(&self, l: usize, r: usize) -> Result<T> {
        if l > r {
            return Err(IndexError::inverted_range(l, r));
        }
        let low = self.offset(l)?;
        let high = self.offset(r)?;
        self.index.range_sum(low, high)
    }

    pub fn as_index(&self) -> &PrefixSumIndex<T> {
        &self.index
    }

    pub fn into_inner(self) -> PrefixSumIndex<T> {
        self.index
    }

    /// Converts a 1-based position into the wrapped index's offset.
    fn offset(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.len() {
            return Err(IndexError::out_of_range(position, self.len()));
        }
        Ok(position - 1)
    }
}

impl<T> From<PrefixSumIndex<T>> for OneBased<T> {
    fn from(index: PrefixSumIndex<T>) -> Self {
        Self { index }
    }
}
