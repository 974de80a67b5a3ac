// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Contains the ordering enums and kernel operators for matching and routing purposes

use core::fmt;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Smallest values first.
    #[default]
    Ascending,
    /// Largest values first.
    Descending,
}

/// Where null entries are laid out relative to the non-null entries.
///
/// Placement is independent of [`SortOrder`]: nulls always compare greater than every
/// value, this only decides which end of the output they occupy.
/// For floating point inputs NaNs follow the nulls, sitting between them and the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullPlacement {
    /// Nulls (then NaNs) before all values.
    AtStart,
    /// Nulls (after NaNs) after all values.
    #[default]
    AtEnd,
}

/// Vector kernels exposed through the function registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKernel {
    /// Stable sort permutation of a whole array.
    ArraySortIndices,
    /// Non-stable partial sort around a pivot rank.
    PartitionNthIndices,
}

impl SortKernel {
    /// Registry name of the kernel.
    pub fn name(&self) -> &'static str {
        match self {
            SortKernel::ArraySortIndices => "array_sort_indices",
            SortKernel::PartitionNthIndices => "partition_nth_indices",
        }
    }

    /// Resolves a registry name back to its kernel.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "array_sort_indices" => Some(SortKernel::ArraySortIndices),
            "partition_nth_indices" => Some(SortKernel::PartitionNthIndices),
            _ => None,
        }
    }
}

impl fmt::Display for SortKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
        assert_eq!(NullPlacement::default(), NullPlacement::AtEnd);
    }

    #[test]
    fn test_kernel_names_round_trip() {
        for k in [SortKernel::ArraySortIndices, SortKernel::PartitionNthIndices] {
            assert_eq!(SortKernel::from_name(k.name()), Some(k));
        }
        assert_eq!(SortKernel::from_name("sort_indices"), None);
    }
}
