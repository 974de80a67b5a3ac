// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sort Kernels Module** - *Sort and Partition Index Kernels*
//!
//! Vector kernels returning row permutations rather than reordered data:
//!
//! - [`array_sort_indices`]: stable sort permutation of a whole array
//! - [`partition_nth_indices`]: partial sort placing one rank in its sorted position
//!
//! Nulls compare greater than every value and NaNs sit between values and nulls. The
//! `null_placement` option decides which end of the output they occupy, independent of
//! sort order. The `_to` variants write into a caller buffer of the array's length.
//!
//! Integer and boolean inputs may be counting sorted; see [`count`] and
//! [`SortConfig`] for when. Every algorithm yields the same permutation.

pub mod compare;
pub mod count;
pub mod dispatch;
pub mod nulls;

use minarrow::Vec64;
use tracing::trace;

use crate::array::ArrayView;
use crate::config::SortConfig;
use crate::errors::KernelError;
use crate::operators::{NullPlacement, SortOrder};

pub use dispatch::{ArraySorter, SorterKind};
pub use nulls::NullPartitionResult;

/// Options for [`array_sort_indices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArraySortOptions {
    pub order: SortOrder,
    pub null_placement: NullPlacement,
}

impl ArraySortOptions {
    pub fn new(order: SortOrder, null_placement: NullPlacement) -> Self {
        Self {
            order,
            null_placement,
        }
    }

    /// Ascending, nulls at end.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Set sort order
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Set null placement
    pub fn null_placement(mut self, null_placement: NullPlacement) -> Self {
        self.null_placement = null_placement;
        self
    }
}

/// Options for [`partition_nth_indices`]. `pivot` is an ascending rank in `0..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionNthOptions {
    pub pivot: usize,
    pub null_placement: NullPlacement,
}

impl PartitionNthOptions {
    /// Options for `pivot` with nulls at end.
    pub fn new(pivot: usize) -> Self {
        Self {
            pivot,
            null_placement: NullPlacement::default(),
        }
    }

    /// Set null placement
    pub fn null_placement(mut self, null_placement: NullPlacement) -> Self {
        self.null_placement = null_placement;
        self
    }
}

/// Returns the indices that would stably sort `array`.
///
/// # Errors
/// `UnsupportedType` if no sorter exists for the array's logical type.
///
/// # Example
/// ```
/// use minarrow::Bitmask;
/// use sort_kernels::array::ArrayView;
/// use sort_kernels::kernels::sort::{ArraySortOptions, array_sort_indices};
///
/// let values = [5i32, 0, 1];
/// let validity = Bitmask::from_bools(&[true, false, true]);
/// let arr = ArrayView::primitive(&values, Some(&validity)).unwrap();
/// let idx = array_sort_indices(&arr, &ArraySortOptions::default()).unwrap();
/// assert_eq!(idx.as_slice(), &[2, 0, 1]);
/// ```
pub fn array_sort_indices(
    array: &ArrayView<'_>,
    options: &ArraySortOptions,
) -> Result<Vec64<u64>, KernelError> {
    array_sort_indices_with_config(array, options, &SortConfig::default())
}

/// [`array_sort_indices`] with explicit sorter tuning.
pub fn array_sort_indices_with_config(
    array: &ArrayView<'_>,
    options: &ArraySortOptions,
    config: &SortConfig,
) -> Result<Vec64<u64>, KernelError> {
    let sorter = ArraySorter::with_config(array.data_type(), config)?;
    let mut out = alloc_indices(array.len());
    sorter.sort(&mut out, array, options)?;
    Ok(out)
}

/// [`array_sort_indices`] writing into `out`.
///
/// # Errors
/// `LengthMismatch` if `out.len() != array.len()`, checked before `out` is written.
pub fn array_sort_indices_to(
    array: &ArrayView<'_>,
    options: &ArraySortOptions,
    out: &mut [u64],
) -> Result<(), KernelError> {
    let sorter = ArraySorter::try_new(array.data_type())?;
    let p = sorter.sort(out, array, options)?;
    trace!(
        len = array.len(),
        non_nulls = p.non_nulls.len(),
        "array_sort_indices"
    );
    Ok(())
}

/// Returns indices partially sorting `array` around rank `options.pivot`: the index at
/// position `pivot` is the row that a full ascending sort would put there, no row before
/// it is greater and no row after it is smaller. Nulls and NaNs are grouped at the
/// `null_placement` end. Order within each side is unspecified.
///
/// `pivot == array.len()` returns the identity.
///
/// # Errors
/// - `IndexOutOfRange` if `pivot > array.len()`
/// - `UnsupportedType` if no sorter exists for the array's logical type
pub fn partition_nth_indices(
    array: &ArrayView<'_>,
    options: &PartitionNthOptions,
) -> Result<Vec64<u64>, KernelError> {
    let mut out = alloc_indices(array.len());
    partition_nth_indices_to(array, options, &mut out)?;
    Ok(out)
}

/// [`partition_nth_indices`] writing into `out`.
pub fn partition_nth_indices_to(
    array: &ArrayView<'_>,
    options: &PartitionNthOptions,
    out: &mut [u64],
) -> Result<(), KernelError> {
    let sorter = ArraySorter::try_new(array.data_type())?;
    sorter.partition_nth(out, array, options)?;
    Ok(())
}

#[inline]
fn alloc_indices(len: usize) -> Vec64<u64> {
    let mut out = Vec64::with_capacity(len);
    out.resize(len, 0);
    out
}
