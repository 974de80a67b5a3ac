// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Counting Sort** - *Linear-Time Stable Sorting for Small Integer Domains*
//!
//! Integer and boolean sorters. When the non-null values of an array fall in a narrow
//! range, a bucket count plus prefix sum places every index in two linear passes, and
//! because indices are visited in input order the result is stable without comparisons.
//!
//! ## Sorters
//! - [`CountSorter`]: counting sort over a known `[min, max]` range
//! - [`BooleanSorter`]: three buckets (false, true, null) in one placement pass
//! - [`IntegerSorter`]: per-type policy, a static counting range for one-byte integers
//!   and an adaptive counting/comparison choice for wider ones
//!
//! All sorters here expect the index buffer to hold the identity permutation.

use num_traits::{AsPrimitive, PrimInt};
use tracing::{debug, trace};

use crate::array::{ArrayView, NativeType};
use crate::config::{COUNTSORT_RANGE_LIMIT, SortAlgorithm, SortConfig};
use crate::errors::KernelError;
use crate::kernels::sort::ArraySortOptions;
use crate::kernels::sort::compare::{BooleanValues, PrimitiveValues, compare_sort};
use crate::kernels::sort::nulls::NullPartitionResult;
use crate::operators::SortOrder;
use crate::traits::dense_iter::valid_min_max;

/// Integer types a counting sort can bucket.
pub trait CountKey: NativeType + PrimInt {
    /// Distance from `base` up to `self`, `self >= base`.
    fn offset_from(self, base: Self) -> u64;
}

macro_rules! impl_count_key {
    ($($t:ty),*) => {
        $(
            impl CountKey for $t {
                #[inline(always)]
                fn offset_from(self, base: Self) -> u64 {
                    (self as i128 - base as i128) as u64
                }
            }
        )*
    };
}

impl_count_key!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Counting sort over values known to lie in `[min, min + value_range)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSorter<T> {
    min: T,
    value_range: u64,
}

impl<T: CountKey> CountSorter<T> {
    /// Sorter for values in `[min, max]`. `None` when `max < min` or the range needs more
    /// buckets than [`COUNTSORT_RANGE_LIMIT`].
    pub fn with_range(min: T, max: T) -> Option<Self> {
        if max < min {
            return None;
        }
        let span = max.offset_from(min);
        if span > COUNTSORT_RANGE_LIMIT {
            return None;
        }
        Some(Self {
            min,
            value_range: span + 1,
        })
    }

    /// Sorter covering every value of `T`.
    pub fn full_domain() -> Option<Self> {
        Self::with_range(T::min_value(), T::max_value())
    }

    /// Number of distinct values the buckets cover.
    #[inline]
    pub fn value_range(&self) -> u64 {
        self.value_range
    }

    /// Stable sort of identity-filled `indices` over `values`.
    pub fn sort(
        &self,
        indices: &mut [u64],
        array: &ArrayView<'_>,
        values: &[T],
        options: &ArraySortOptions,
    ) -> NullPartitionResult {
        if (indices.len() as u64) < (1u64 << 32) {
            self.sort_internal::<u32>(indices, array, values, options)
        } else {
            self.sort_internal::<u64>(indices, array, values, options)
        }
    }

    fn sort_internal<C>(
        &self,
        indices: &mut [u64],
        array: &ArrayView<'_>,
        values: &[T],
        options: &ArraySortOptions,
    ) -> NullPartitionResult
    where
        C: PrimInt + AsPrimitive<usize>,
    {
        let len = indices.len();
        let range = self.value_range as usize;
        let p = NullPartitionResult::with_nulls(len, array.null_count(), options.null_placement);

        // Ascending counts land one slot up so the prefix sum yields bucket starts.
        let (count_shift, emit_shift) = match options.order {
            SortOrder::Ascending => (1, 0),
            SortOrder::Descending => (0, 1),
        };
        let mut counts = vec![C::zero(); range + 2];
        for (i, &v) in values.iter().enumerate().take(len) {
            if array.is_valid(i) {
                let b = v.offset_from(self.min) as usize + count_shift;
                counts[b] = counts[b] + C::one();
            }
        }
        match options.order {
            SortOrder::Ascending => {
                for i in 1..=range {
                    counts[i] = counts[i] + counts[i - 1];
                }
            }
            SortOrder::Descending => {
                for i in (1..=range).rev() {
                    counts[i - 1] = counts[i - 1] + counts[i];
                }
            }
        }

        let base = p.non_nulls.start;
        let mut null_pos = p.nulls.start;
        for (i, &v) in values.iter().enumerate().take(len) {
            if array.is_valid(i) {
                let b = v.offset_from(self.min) as usize + emit_shift;
                let slot = counts[b];
                indices[base + slot.as_()] = i as u64;
                counts[b] = slot + C::one();
            } else {
                indices[null_pos] = i as u64;
                null_pos += 1;
            }
        }
        p
    }
}

/// Boolean sorter. Counting places `false`, `true` and null rows in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanSorter {
    counting: bool,
}

impl BooleanSorter {
    pub fn new(config: &SortConfig) -> Self {
        Self {
            counting: config.algorithm != SortAlgorithm::Comparison,
        }
    }

    #[inline]
    pub fn is_counting(&self) -> bool {
        self.counting
    }

    pub fn sort(
        &self,
        indices: &mut [u64],
        array: &ArrayView<'_>,
        options: &ArraySortOptions,
    ) -> Result<NullPartitionResult, KernelError> {
        let bits = array.boolean_values()?;
        if !self.counting {
            return Ok(compare_sort(indices, array, &BooleanValues::new(bits), options));
        }

        let len = indices.len();
        let null_count = array.null_count();
        let ones = array.true_count();
        let zeros = len - null_count - ones;
        let p = NullPartitionResult::with_nulls(len, null_count, options.null_placement);

        // Bucket 0 = false, 1 = true, 2 = null.
        let mut counts = [p.non_nulls.start, p.non_nulls.start, p.nulls.start];
        match options.order {
            SortOrder::Ascending => counts[1] += zeros,
            SortOrder::Descending => counts[0] += ones,
        }
        for i in 0..len {
            let b = if array.is_null(i) {
                2
            } else if bits.get(i) {
                1
            } else {
                0
            };
            indices[counts[b]] = i as u64;
            counts[b] += 1;
        }
        trace!(len, ones, zeros, null_count, "boolean counting sort");
        Ok(p)
    }
}

/// How an [`IntegerSorter`] picks between counting and comparison sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerStrategy<T> {
    /// Counting sort over a range fixed up front.
    Counting(CountSorter<T>),
    /// Counting sort over the observed `[min, max]` when at least `min_len` rows are
    /// non-null and `max - min <= max_range`, comparison sort otherwise.
    Adaptive { min_len: usize, max_range: u64 },
    Comparison,
}

/// Sorter for one integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerSorter<T> {
    strategy: IntegerStrategy<T>,
}

impl<T> IntegerSorter<T> {
    #[inline]
    pub fn strategy(&self) -> &IntegerStrategy<T> {
        &self.strategy
    }
}

impl<T: CountKey> IntegerSorter<T> {
    /// Counting sort over the whole domain of `T`, for one-byte integers.
    pub fn with_static_range(config: &SortConfig) -> Self {
        let strategy = match (config.algorithm, CountSorter::full_domain()) {
            (SortAlgorithm::Comparison, _) => IntegerStrategy::Comparison,
            (_, Some(cs)) => IntegerStrategy::Counting(cs),
            (_, None) => Self::adaptive_strategy(config),
        };
        Self { strategy }
    }

    /// Counting or comparison sort chosen per array from its value range.
    pub fn adaptive(config: &SortConfig) -> Self {
        Self {
            strategy: Self::adaptive_strategy(config),
        }
    }

    fn adaptive_strategy(config: &SortConfig) -> IntegerStrategy<T> {
        match config.algorithm {
            SortAlgorithm::Auto => IntegerStrategy::Adaptive {
                min_len: config.countsort_min_len,
                max_range: config.countsort_max_range,
            },
            SortAlgorithm::Counting => IntegerStrategy::Adaptive {
                min_len: 0,
                max_range: COUNTSORT_RANGE_LIMIT,
            },
            SortAlgorithm::Comparison => IntegerStrategy::Comparison,
        }
    }

    pub fn sort(
        &self,
        indices: &mut [u64],
        array: &ArrayView<'_>,
        options: &ArraySortOptions,
    ) -> Result<NullPartitionResult, KernelError> {
        let values = array.values::<T>()?;
        let p = match self.strategy {
            IntegerStrategy::Counting(cs) => cs.sort(indices, array, values, options),
            IntegerStrategy::Comparison => {
                compare_sort(indices, array, &PrimitiveValues::new(values), options)
            }
            IntegerStrategy::Adaptive { min_len, max_range } => {
                match Self::observed_range(array, values, min_len, max_range) {
                    Some(cs) => {
                        debug!(
                            len = array.len(),
                            value_range = cs.value_range(),
                            "adaptive integer sort: counting"
                        );
                        cs.sort(indices, array, values, options)
                    }
                    None => {
                        debug!(len = array.len(), "adaptive integer sort: comparison");
                        compare_sort(indices, array, &PrimitiveValues::new(values), options)
                    }
                }
            }
        };
        Ok(p)
    }

    fn observed_range(
        array: &ArrayView<'_>,
        values: &[T],
        min_len: usize,
        max_range: u64,
    ) -> Option<CountSorter<T>> {
        let non_null = array.len() - array.null_count();
        if non_null == 0 || non_null < min_len {
            return None;
        }
        let (lo, hi) = valid_min_max(values, array.validity())?;
        if hi.offset_from(lo) > max_range {
            return None;
        }
        CountSorter::with_range(lo, hi)
    }
}
