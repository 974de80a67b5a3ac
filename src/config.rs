// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Sort Algorithm Selection Parameters*
//!
//! Tuning constants controlling when integer sorts switch from comparison sorting to
//! counting sort, and the [`SortConfig`] builder that lets callers override them.
//! The constants are performance heuristics only: every setting produces the same
//! permutation.

/// Minimum number of non-null values before the adaptive integer sorter considers
/// counting sort.
///
/// Below this length the merge sort is already cheap and scanning for min/max costs
/// more than it saves.
pub const COUNTSORT_MIN_LEN: usize = 1024;

/// Largest observed value range (`max - min`) the adaptive integer sorter will hand to
/// counting sort.
///
/// Bounds the bucket array to a few pages so it stays cache resident.
pub const COUNTSORT_MAX_RANGE: u64 = 4096;

/// Hard upper bound on the value range a counting sort will allocate buckets for,
/// regardless of configuration. Keeps `range + 2` counters addressable with 32 bits.
pub const COUNTSORT_RANGE_LIMIT: u64 = u32::MAX as u64 - 1;

/// Sort algorithm selection for integer and boolean sorters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    /// Pick per type: counting sort for 1-byte integers and booleans, adaptive
    /// counting/comparison for wider integers.
    #[default]
    Auto,
    /// Always use the stable comparison sort (O(n log n)).
    Comparison,
    /// Use counting sort whenever the observed range fits [`COUNTSORT_RANGE_LIMIT`].
    Counting,
}

/// Configuration for sorter selection.
///
/// Floating point, decimal and binary types always use the comparison sorter and
/// ignore this configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub algorithm: SortAlgorithm,
    pub countsort_min_len: usize,
    pub countsort_max_range: u64,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            algorithm: SortAlgorithm::Auto,
            countsort_min_len: COUNTSORT_MIN_LEN,
            countsort_max_range: COUNTSORT_MAX_RANGE,
        }
    }
}

impl SortConfig {
    /// Create a new config with default settings (auto algorithm, default thresholds)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set algorithm
    pub fn algorithm(mut self, algorithm: SortAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the minimum non-null length for adaptive counting sort
    pub fn countsort_min_len(mut self, min_len: usize) -> Self {
        self.countsort_min_len = min_len;
        self
    }

    /// Set the maximum value range for adaptive counting sort.
    /// Values above [`COUNTSORT_RANGE_LIMIT`] are clamped.
    pub fn countsort_max_range(mut self, max_range: u64) -> Self {
        self.countsort_max_range = max_range.min(COUNTSORT_RANGE_LIMIT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let c = SortConfig::default();
        assert_eq!(c.algorithm, SortAlgorithm::Auto);
        assert_eq!(c.countsort_min_len, 1024);
        assert_eq!(c.countsort_max_range, 4096);
    }

    #[test]
    fn test_builder_clamps_range() {
        let c = SortConfig::new()
            .algorithm(SortAlgorithm::Counting)
            .countsort_min_len(0)
            .countsort_max_range(u64::MAX);
        assert_eq!(c.algorithm, SortAlgorithm::Counting);
        assert_eq!(c.countsort_min_len, 0);
        assert_eq!(c.countsort_max_range, COUNTSORT_RANGE_LIMIT);
    }
}
