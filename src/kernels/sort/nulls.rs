// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Null Partitioning** - *Grouping Null and NaN Rows Ahead of Sorting*
//!
//! Every sorter begins by moving null rows to the requested end of the index buffer so
//! that only a contiguous run of non-null rows needs ordering. Floating point inputs get
//! a second pass that moves NaN rows next to the nulls, so the final layouts are:
//!
//! - `AtEnd`: `[values][NaNs][nulls]`
//! - `AtStart`: `[nulls][NaNs][values]`
//!
//! NaN rows are reported inside [`NullPartitionResult::nulls`] since they take no part
//! in value ordering either.

use std::ops::Range;

use crate::array::ArrayView;
use crate::kernels::sort::compare::LogicalValues;
use crate::operators::NullPlacement;
use crate::utils::row;

/// Split of an index buffer into the sub-range still to be ordered and the sub-range
/// holding null (and NaN) rows. Ranges are relative to the buffer passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullPartitionResult {
    pub non_nulls: Range<usize>,
    pub nulls: Range<usize>,
}

impl NullPartitionResult {
    /// `[values][nulls]` split for a buffer of `len` rows with `null_count` nulls.
    #[inline]
    pub fn nulls_at_end(len: usize, null_count: usize) -> Self {
        let split = len - null_count;
        Self {
            non_nulls: 0..split,
            nulls: split..len,
        }
    }

    /// `[nulls][values]` split for a buffer of `len` rows with `null_count` nulls.
    #[inline]
    pub fn nulls_at_start(len: usize, null_count: usize) -> Self {
        Self {
            nulls: 0..null_count,
            non_nulls: null_count..len,
        }
    }

    #[inline]
    pub fn with_nulls(len: usize, null_count: usize, placement: NullPlacement) -> Self {
        match placement {
            NullPlacement::AtStart => Self::nulls_at_start(len, null_count),
            NullPlacement::AtEnd => Self::nulls_at_end(len, null_count),
        }
    }

    /// Every row null.
    #[inline]
    pub fn nulls_only(len: usize, placement: NullPlacement) -> Self {
        Self::with_nulls(len, len, placement)
    }

    /// No row null.
    #[inline]
    pub fn no_nulls(len: usize, placement: NullPlacement) -> Self {
        Self::with_nulls(len, 0, placement)
    }

    /// Total number of rows covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.non_nulls.len() + self.nulls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-place two-way partition of an index buffer.
///
/// Both methods return the number of indices for which `keep` held. With
/// `partition_front` those occupy the head of the buffer, with `partition_back` the tail.
/// `rejected_hint` is the expected number of rows failing `keep`, used to size scratch.
pub trait Partitioner {
    fn partition_front<F>(indices: &mut [u64], rejected_hint: usize, keep: F) -> usize
    where
        F: FnMut(u64) -> bool;

    fn partition_back<F>(indices: &mut [u64], rejected_hint: usize, keep: F) -> usize
    where
        F: FnMut(u64) -> bool;
}

/// Order-preserving partition. O(n) time, scratch sized to the rejected rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct StablePartitioner;

impl Partitioner for StablePartitioner {
    fn partition_front<F>(indices: &mut [u64], rejected_hint: usize, mut keep: F) -> usize
    where
        F: FnMut(u64) -> bool,
    {
        let mut rejected = Vec::with_capacity(rejected_hint);
        let mut w = 0;
        for i in 0..indices.len() {
            let idx = indices[i];
            if keep(idx) {
                indices[w] = idx;
                w += 1;
            } else {
                rejected.push(idx);
            }
        }
        indices[w..].copy_from_slice(&rejected);
        w
    }

    fn partition_back<F>(indices: &mut [u64], rejected_hint: usize, mut keep: F) -> usize
    where
        F: FnMut(u64) -> bool,
    {
        let len = indices.len();
        let mut rejected = Vec::with_capacity(rejected_hint);
        let mut w = len;
        for i in (0..len).rev() {
            let idx = indices[i];
            if keep(idx) {
                w -= 1;
                indices[w] = idx;
            } else {
                rejected.push(idx);
            }
        }
        rejected.reverse();
        indices[..w].copy_from_slice(&rejected);
        len - w
    }
}

/// Swap-based partition. O(n) time, O(1) space, relative order not kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonStablePartitioner;

impl Partitioner for NonStablePartitioner {
    fn partition_front<F>(indices: &mut [u64], _rejected_hint: usize, mut keep: F) -> usize
    where
        F: FnMut(u64) -> bool,
    {
        let mut i = 0;
        let mut j = indices.len();
        loop {
            while i < j && keep(indices[i]) {
                i += 1;
            }
            while i < j && !keep(indices[j - 1]) {
                j -= 1;
            }
            if i >= j {
                break;
            }
            indices.swap(i, j - 1);
            i += 1;
            j -= 1;
        }
        i
    }

    fn partition_back<F>(indices: &mut [u64], rejected_hint: usize, mut keep: F) -> usize
    where
        F: FnMut(u64) -> bool,
    {
        let front = Self::partition_front(indices, rejected_hint, |idx| !keep(idx));
        indices.len() - front
    }
}

/// Groups the null rows of `array` (and NaN rows of `values`) at the end chosen by
/// `placement`, leaving the rows to be ordered in `non_nulls`.
pub fn partition_nulls<P, V>(
    indices: &mut [u64],
    array: &ArrayView<'_>,
    values: &V,
    placement: NullPlacement,
) -> NullPartitionResult
where
    P: Partitioner,
    V: LogicalValues,
{
    let len = indices.len();
    let null_count = array.null_count();
    let mut result = if null_count == 0 {
        NullPartitionResult::no_nulls(len, placement)
    } else {
        match placement {
            NullPlacement::AtEnd => {
                let valid = P::partition_front(indices, null_count, |i| array.is_valid(row(i)));
                NullPartitionResult::nulls_at_end(len, len - valid)
            }
            NullPlacement::AtStart => {
                let valid = P::partition_back(indices, null_count, |i| array.is_valid(row(i)));
                NullPartitionResult::nulls_at_start(len, len - valid)
            }
        }
    };

    if V::HAS_NAN {
        let range = result.non_nulls.clone();
        let sub = &mut indices[range.clone()];
        match placement {
            NullPlacement::AtEnd => {
                let finite = P::partition_front(sub, 0, |i| !values.is_nan(i));
                let split = range.start + finite;
                result = NullPartitionResult {
                    non_nulls: range.start..split,
                    nulls: split..result.nulls.end,
                };
            }
            NullPlacement::AtStart => {
                let finite = P::partition_back(sub, 0, |i| !values.is_nan(i));
                let split = range.end - finite;
                result = NullPartitionResult {
                    nulls: result.nulls.start..split,
                    non_nulls: split..range.end,
                };
            }
        }
    }
    result
}
