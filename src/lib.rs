// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

//! # **Sort Kernels** - *Null-Aware Sort and Partition Index Kernels*
//!
//! Vector kernels computing sort permutations over Arrow-layout arrays:
//! `array_sort_indices` (stable, full sort) and `partition_nth_indices` (non-stable,
//! partial sort around a rank). Validity uses Minarrow [`Bitmask`](minarrow::Bitmask)
//! and allocated outputs are 64-byte aligned [`Vec64`](minarrow::Vec64) buffers.
//!
//! Input arrays are borrowed through [`array::ArrayView`]; the kernels resolve a sorter
//! from the logical type, choosing counting sort for small integer domains and a stable
//! comparison sort otherwise.

pub mod array;
pub mod datatypes;
pub mod errors;
pub mod operators;
pub mod registry;

pub mod kernels {
    pub mod sort;
}

pub mod traits {
    pub mod dense_iter;
}

pub mod config;

pub mod utils;

pub use array::{ArrayData, ArrayView, NativeType};
pub use config::{SortAlgorithm, SortConfig};
pub use datatypes::{DataType, IntervalUnit, PhysicalType, TimeUnit};
pub use errors::KernelError;
pub use kernels::sort::{
    ArraySortOptions, ArraySorter, NullPartitionResult, PartitionNthOptions, SorterKind,
    array_sort_indices, array_sort_indices_to, array_sort_indices_with_config,
    partition_nth_indices, partition_nth_indices_to,
};
pub use operators::{NullPlacement, SortKernel, SortOrder};
pub use registry::{FunctionDoc, FunctionOptions, FunctionRegistry, RegisteredFunction};
