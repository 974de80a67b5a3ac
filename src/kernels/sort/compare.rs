// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Comparison Sorting** - *Stable Merge Sort and Selection over Array Rows*
//!
//! Orders row indices by comparing the values they point at. The value layouts the
//! comparison sorter understands implement [`LogicalValues`]; the sort itself is a stable
//! merge sort (`slice::sort_by`) over the non-null sub-range left by null partitioning.
//!
//! Floats compare with `partial_cmp` once NaNs are partitioned away, so `-0.0` and `0.0`
//! are equal and keep their input order.

use std::cmp::Ordering;

use minarrow::Bitmask;
use num_traits::AsPrimitive;

use crate::array::{ArrayView, NativeType};
use crate::kernels::sort::ArraySortOptions;
use crate::kernels::sort::nulls::{
    NonStablePartitioner, NullPartitionResult, StablePartitioner, partition_nulls,
};
use crate::operators::{NullPlacement, SortOrder};
use crate::utils::row;

/// Row-addressed access to the values of an array, ordered ascending.
pub trait LogicalValues {
    /// Whether some rows may be NaN.
    const HAS_NAN: bool = false;

    /// Ascending comparison of rows `left` and `right`. Neither row is null or NaN.
    fn compare(&self, left: u64, right: u64) -> Ordering;

    #[inline(always)]
    fn is_nan(&self, _idx: u64) -> bool {
        false
    }
}

/// Fixed-width values, including floats and decimals.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveValues<'a, T> {
    values: &'a [T],
}

impl<'a, T: NativeType> PrimitiveValues<'a, T> {
    #[inline]
    pub fn new(values: &'a [T]) -> Self {
        Self { values }
    }
}

impl<T: NativeType> LogicalValues for PrimitiveValues<'_, T> {
    const HAS_NAN: bool = T::HAS_NAN;

    #[inline(always)]
    fn compare(&self, left: u64, right: u64) -> Ordering {
        self.values[row(left)]
            .partial_cmp(&self.values[row(right)])
            .unwrap_or(Ordering::Equal)
    }

    #[inline(always)]
    fn is_nan(&self, idx: u64) -> bool {
        self.values[row(idx)].is_nan()
    }
}

/// Bit-packed booleans, `false < true`.
#[derive(Debug, Clone, Copy)]
pub struct BooleanValues<'a> {
    bits: &'a Bitmask,
}

impl<'a> BooleanValues<'a> {
    #[inline]
    pub fn new(bits: &'a Bitmask) -> Self {
        Self { bits }
    }
}

impl LogicalValues for BooleanValues<'_> {
    #[inline(always)]
    fn compare(&self, left: u64, right: u64) -> Ordering {
        self.bits.get(row(left)).cmp(&self.bits.get(row(right)))
    }
}

/// Variable-width byte strings addressed through an offsets buffer. Ordered
/// lexicographically by byte.
#[derive(Debug, Clone, Copy)]
pub struct BinaryValues<'a, O> {
    offsets: &'a [O],
    values: &'a [u8],
}

impl<'a, O: AsPrimitive<usize>> BinaryValues<'a, O> {
    #[inline]
    pub fn new(offsets: &'a [O], values: &'a [u8]) -> Self {
        Self { offsets, values }
    }

    #[inline(always)]
    pub fn value(&self, i: usize) -> &'a [u8] {
        let start = self.offsets[i].as_();
        let end = self.offsets[i + 1].as_();
        &self.values[start..end]
    }
}

impl<O: AsPrimitive<usize>> LogicalValues for BinaryValues<'_, O> {
    #[inline(always)]
    fn compare(&self, left: u64, right: u64) -> Ordering {
        self.value(row(left)).cmp(self.value(row(right)))
    }
}

/// Byte strings of one fixed width stored back to back.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeBinaryValues<'a> {
    width: usize,
    values: &'a [u8],
}

impl<'a> FixedSizeBinaryValues<'a> {
    #[inline]
    pub fn new(width: usize, values: &'a [u8]) -> Self {
        Self { width, values }
    }

    #[inline(always)]
    pub fn value(&self, i: usize) -> &'a [u8] {
        &self.values[i * self.width..(i + 1) * self.width]
    }
}

impl LogicalValues for FixedSizeBinaryValues<'_> {
    #[inline(always)]
    fn compare(&self, left: u64, right: u64) -> Ordering {
        self.value(row(left)).cmp(self.value(row(right)))
    }
}

/// Stable sort of `indices` by the values they address.
///
/// Nulls (and NaNs) are partitioned out first, keeping their input order, then the
/// remaining rows are merge sorted. Descending order swaps the comparison operands
/// rather than reversing the output, which keeps ties in input order.
pub fn compare_sort<V: LogicalValues>(
    indices: &mut [u64],
    array: &ArrayView<'_>,
    values: &V,
    options: &ArraySortOptions,
) -> NullPartitionResult {
    let p = partition_nulls::<StablePartitioner, V>(indices, array, values, options.null_placement);
    let sub = &mut indices[p.non_nulls.clone()];
    match options.order {
        SortOrder::Ascending => sub.sort_by(|&l, &r| values.compare(l, r)),
        SortOrder::Descending => sub.sort_by(|&l, &r| values.compare(r, l)),
    }
    p
}

/// Partial sort placing the row of ascending rank `pivot` at `indices[pivot]`, with no
/// greater row before it and no smaller row after it.
///
/// Nulls and NaNs are grouped at the `placement` end without regard to order. When
/// `pivot` falls among them no value comparison is done.
pub fn partition_nth<V: LogicalValues>(
    indices: &mut [u64],
    array: &ArrayView<'_>,
    values: &V,
    pivot: usize,
    placement: NullPlacement,
) -> NullPartitionResult {
    let p = partition_nulls::<NonStablePartitioner, V>(indices, array, values, placement);
    if p.non_nulls.contains(&pivot) {
        let start = p.non_nulls.start;
        indices[p.non_nulls.clone()]
            .select_nth_unstable_by(pivot - start, |&l, &r| values.compare(l, r));
    }
    p
}
