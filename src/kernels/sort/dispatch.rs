// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sorter Dispatch** - *Choosing a Sorter from the Logical Type*
//!
//! [`ArraySorter`] is resolved once per call from the array's [`DataType`]. Logical types
//! that share a physical layout share a sorter: dates, times, timestamps and durations
//! sort as integers, strings as binary.

use core::fmt;

use arrow_buffer::i256;
use tracing::debug;

use crate::array::{ArrayData, ArrayView};
use crate::config::SortConfig;
use crate::datatypes::{DataType, PhysicalType};
use crate::errors::KernelError;
use crate::kernels::sort::compare::{
    BinaryValues, BooleanValues, FixedSizeBinaryValues, LogicalValues, PrimitiveValues,
    compare_sort, partition_nth,
};
use crate::kernels::sort::count::{BooleanSorter, IntegerSorter, IntegerStrategy};
use crate::kernels::sort::nulls::NullPartitionResult;
use crate::kernels::sort::{ArraySortOptions, PartitionNthOptions};
use crate::utils::{confirm_equal_len, fill_identity};

/// Broad category of a resolved sorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SorterKind {
    /// Null-typed arrays, no value ordering.
    NullOnly,
    /// Counting sort over a fixed range.
    Counting,
    /// Counting or comparison sort depending on the observed value range.
    Adaptive,
    /// Stable comparison sort.
    Comparison,
}

impl fmt::Display for SorterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SorterKind::NullOnly => "null",
            SorterKind::Counting => "counting",
            SorterKind::Adaptive => "adaptive",
            SorterKind::Comparison => "comparison",
        };
        f.write_str(s)
    }
}

/// Sorter selected for one physical type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySorter {
    Null,
    Boolean(BooleanSorter),
    Int8(IntegerSorter<i8>),
    Int16(IntegerSorter<i16>),
    Int32(IntegerSorter<i32>),
    Int64(IntegerSorter<i64>),
    UInt8(IntegerSorter<u8>),
    UInt16(IntegerSorter<u16>),
    UInt32(IntegerSorter<u32>),
    UInt64(IntegerSorter<u64>),
    Float32,
    Float64,
    Decimal128,
    Decimal256,
    Binary,
    LargeBinary,
    FixedSizeBinary(usize),
}

impl ArraySorter {
    /// Resolves the sorter for `data_type` with the default tuning.
    ///
    /// # Errors
    /// `UnsupportedType` for half floats, intervals, nested and dictionary types.
    pub fn try_new(data_type: &DataType) -> Result<Self, KernelError> {
        Self::with_config(data_type, &SortConfig::default())
    }

    /// Resolves the sorter for `data_type`, with counting sort tuned by `config`.
    pub fn with_config(data_type: &DataType, config: &SortConfig) -> Result<Self, KernelError> {
        let physical = data_type.physical_type().ok_or_else(|| {
            let what = if data_type.is_nested() { "nested type" } else { "type" };
            KernelError::UnsupportedType(format!("Sorting not supported for {} {}", what, data_type))
        })?;
        let sorter = match physical {
            PhysicalType::Null => ArraySorter::Null,
            PhysicalType::Boolean => ArraySorter::Boolean(BooleanSorter::new(config)),
            PhysicalType::Int8 => ArraySorter::Int8(IntegerSorter::with_static_range(config)),
            PhysicalType::UInt8 => ArraySorter::UInt8(IntegerSorter::with_static_range(config)),
            PhysicalType::Int16 => ArraySorter::Int16(IntegerSorter::adaptive(config)),
            PhysicalType::Int32 => ArraySorter::Int32(IntegerSorter::adaptive(config)),
            PhysicalType::Int64 => ArraySorter::Int64(IntegerSorter::adaptive(config)),
            PhysicalType::UInt16 => ArraySorter::UInt16(IntegerSorter::adaptive(config)),
            PhysicalType::UInt32 => ArraySorter::UInt32(IntegerSorter::adaptive(config)),
            PhysicalType::UInt64 => ArraySorter::UInt64(IntegerSorter::adaptive(config)),
            PhysicalType::Float32 => ArraySorter::Float32,
            PhysicalType::Float64 => ArraySorter::Float64,
            PhysicalType::Decimal128 => ArraySorter::Decimal128,
            PhysicalType::Decimal256 => ArraySorter::Decimal256,
            PhysicalType::Binary => ArraySorter::Binary,
            PhysicalType::LargeBinary => ArraySorter::LargeBinary,
            PhysicalType::FixedSizeBinary(w) => ArraySorter::FixedSizeBinary(w),
        };
        debug!(data_type = %data_type, kind = %sorter.kind(), "resolved sorter");
        Ok(sorter)
    }

    /// Physical layout this sorter reads.
    pub fn physical_type(&self) -> PhysicalType {
        match self {
            ArraySorter::Null => PhysicalType::Null,
            ArraySorter::Boolean(_) => PhysicalType::Boolean,
            ArraySorter::Int8(_) => PhysicalType::Int8,
            ArraySorter::Int16(_) => PhysicalType::Int16,
            ArraySorter::Int32(_) => PhysicalType::Int32,
            ArraySorter::Int64(_) => PhysicalType::Int64,
            ArraySorter::UInt8(_) => PhysicalType::UInt8,
            ArraySorter::UInt16(_) => PhysicalType::UInt16,
            ArraySorter::UInt32(_) => PhysicalType::UInt32,
            ArraySorter::UInt64(_) => PhysicalType::UInt64,
            ArraySorter::Float32 => PhysicalType::Float32,
            ArraySorter::Float64 => PhysicalType::Float64,
            ArraySorter::Decimal128 => PhysicalType::Decimal128,
            ArraySorter::Decimal256 => PhysicalType::Decimal256,
            ArraySorter::Binary => PhysicalType::Binary,
            ArraySorter::LargeBinary => PhysicalType::LargeBinary,
            ArraySorter::FixedSizeBinary(w) => PhysicalType::FixedSizeBinary(*w),
        }
    }

    pub fn kind(&self) -> SorterKind {
        fn int_kind<T>(s: &IntegerSorter<T>) -> SorterKind {
            match s.strategy() {
                IntegerStrategy::Counting(_) => SorterKind::Counting,
                IntegerStrategy::Adaptive { .. } => SorterKind::Adaptive,
                IntegerStrategy::Comparison => SorterKind::Comparison,
            }
        }
        match self {
            ArraySorter::Null => SorterKind::NullOnly,
            ArraySorter::Boolean(b) if b.is_counting() => SorterKind::Counting,
            ArraySorter::Boolean(_) => SorterKind::Comparison,
            ArraySorter::Int8(s) => int_kind(s),
            ArraySorter::Int16(s) => int_kind(s),
            ArraySorter::Int32(s) => int_kind(s),
            ArraySorter::Int64(s) => int_kind(s),
            ArraySorter::UInt8(s) => int_kind(s),
            ArraySorter::UInt16(s) => int_kind(s),
            ArraySorter::UInt32(s) => int_kind(s),
            ArraySorter::UInt64(s) => int_kind(s),
            _ => SorterKind::Comparison,
        }
    }

    /// Writes the stable sort permutation of `array` into `indices`.
    ///
    /// # Errors
    /// - `LengthMismatch` if `indices.len() != array.len()`
    /// - `TypeMismatch` if the array is not stored in this sorter's physical layout
    ///
    /// `indices` is untouched on error.
    pub fn sort(
        &self,
        indices: &mut [u64],
        array: &ArrayView<'_>,
        options: &ArraySortOptions,
    ) -> Result<NullPartitionResult, KernelError> {
        self.check_array("sort indices", indices, array)?;
        fill_identity(indices);
        match self {
            ArraySorter::Null => Ok(NullPartitionResult::nulls_only(
                indices.len(),
                options.null_placement,
            )),
            ArraySorter::Boolean(s) => s.sort(indices, array, options),
            ArraySorter::Int8(s) => s.sort(indices, array, options),
            ArraySorter::Int16(s) => s.sort(indices, array, options),
            ArraySorter::Int32(s) => s.sort(indices, array, options),
            ArraySorter::Int64(s) => s.sort(indices, array, options),
            ArraySorter::UInt8(s) => s.sort(indices, array, options),
            ArraySorter::UInt16(s) => s.sort(indices, array, options),
            ArraySorter::UInt32(s) => s.sort(indices, array, options),
            ArraySorter::UInt64(s) => s.sort(indices, array, options),
            _ => self.visit_values(
                array,
                CompareSort {
                    indices,
                    array,
                    options,
                },
            ),
        }
    }

    /// Writes a partial sort of `array` into `indices`, with the row of rank
    /// `options.pivot` in place. Null-typed arrays yield the identity.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `options.pivot > array.len()`
    /// - `LengthMismatch` / `TypeMismatch` as for [`ArraySorter::sort`]
    pub fn partition_nth(
        &self,
        indices: &mut [u64],
        array: &ArrayView<'_>,
        options: &PartitionNthOptions,
    ) -> Result<NullPartitionResult, KernelError> {
        let len = array.len();
        if options.pivot > len {
            return Err(KernelError::IndexOutOfRange(format!(
                "NthToIndices index out of bound: pivot {} > length {}",
                options.pivot, len
            )));
        }
        self.check_array("partition indices", indices, array)?;
        fill_identity(indices);
        if options.pivot == len {
            debug!(len, "partition_nth: pivot at end, identity");
            return Ok(NullPartitionResult::with_nulls(
                len,
                array.null_count(),
                options.null_placement,
            ));
        }
        if let ArraySorter::Null = self {
            return Ok(NullPartitionResult::nulls_only(len, options.null_placement));
        }
        self.visit_values(
            array,
            PartitionNth {
                indices,
                array,
                options,
            },
        )
    }

    fn check_array(
        &self,
        label: &str,
        indices: &[u64],
        array: &ArrayView<'_>,
    ) -> Result<(), KernelError> {
        confirm_equal_len(label, array.len(), indices.len())?;
        let physical = self.physical_type();
        if array.data().physical_type() != Some(physical) {
            return Err(KernelError::TypeMismatch(format!(
                "{:?} sorter cannot read a {} array",
                physical,
                array.data_type()
            )));
        }
        Ok(())
    }

    fn visit_values<F: ValuesVisitor>(
        &self,
        array: &ArrayView<'_>,
        visitor: F,
    ) -> Result<F::Output, KernelError> {
        let out = match (self, *array.data()) {
            (ArraySorter::Boolean(_), ArrayData::Boolean(bits)) => {
                visitor.visit(&BooleanValues::new(bits))
            }
            (ArraySorter::Int8(_), _) => visitor.visit(&PrimitiveValues::new(array.values::<i8>()?)),
            (ArraySorter::Int16(_), _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<i16>()?))
            }
            (ArraySorter::Int32(_), _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<i32>()?))
            }
            (ArraySorter::Int64(_), _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<i64>()?))
            }
            (ArraySorter::UInt8(_), _) => visitor.visit(&PrimitiveValues::new(array.values::<u8>()?)),
            (ArraySorter::UInt16(_), _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<u16>()?))
            }
            (ArraySorter::UInt32(_), _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<u32>()?))
            }
            (ArraySorter::UInt64(_), _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<u64>()?))
            }
            (ArraySorter::Float32, _) => visitor.visit(&PrimitiveValues::new(array.values::<f32>()?)),
            (ArraySorter::Float64, _) => visitor.visit(&PrimitiveValues::new(array.values::<f64>()?)),
            (ArraySorter::Decimal128, _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<i128>()?))
            }
            (ArraySorter::Decimal256, _) => {
                visitor.visit(&PrimitiveValues::new(array.values::<i256>()?))
            }
            (ArraySorter::Binary, ArrayData::Binary { offsets, values }) => {
                visitor.visit(&BinaryValues::new(offsets, values))
            }
            (ArraySorter::LargeBinary, ArrayData::LargeBinary { offsets, values }) => {
                visitor.visit(&BinaryValues::new(offsets, values))
            }
            (ArraySorter::FixedSizeBinary(_), ArrayData::FixedSizeBinary { width, values }) => {
                visitor.visit(&FixedSizeBinaryValues::new(width, values))
            }
            _ => {
                return Err(KernelError::TypeMismatch(format!(
                    "no value access for {} arrays",
                    array.data_type()
                )));
            }
        };
        Ok(out)
    }
}

/// Operation run against the typed values of an array once the layout is known.
trait ValuesVisitor {
    type Output;

    fn visit<V: LogicalValues>(self, values: &V) -> Self::Output;
}

struct CompareSort<'i, 'o, 'a> {
    indices: &'i mut [u64],
    array: &'o ArrayView<'a>,
    options: &'o ArraySortOptions,
}

impl ValuesVisitor for CompareSort<'_, '_, '_> {
    type Output = NullPartitionResult;

    fn visit<V: LogicalValues>(self, values: &V) -> NullPartitionResult {
        compare_sort(self.indices, self.array, values, self.options)
    }
}

struct PartitionNth<'i, 'o, 'a> {
    indices: &'i mut [u64],
    array: &'o ArrayView<'a>,
    options: &'o PartitionNthOptions,
}

impl ValuesVisitor for PartitionNth<'_, '_, '_> {
    type Output = NullPartitionResult;

    fn visit<V: LogicalValues>(self, values: &V) -> NullPartitionResult {
        partition_nth(
            self.indices,
            self.array,
            values,
            self.options.pivot,
            self.options.null_placement,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortAlgorithm;
    use crate::datatypes::{IntervalUnit, TimeUnit};

    #[test]
    fn test_resolution_by_category() {
        assert_eq!(ArraySorter::try_new(&DataType::Null).unwrap().kind(), SorterKind::NullOnly);
        assert_eq!(ArraySorter::try_new(&DataType::Boolean).unwrap().kind(), SorterKind::Counting);
        assert_eq!(ArraySorter::try_new(&DataType::UInt8).unwrap().kind(), SorterKind::Counting);
        assert_eq!(ArraySorter::try_new(&DataType::Int8).unwrap().kind(), SorterKind::Counting);
        assert_eq!(ArraySorter::try_new(&DataType::Int32).unwrap().kind(), SorterKind::Adaptive);
        assert_eq!(ArraySorter::try_new(&DataType::Utf8).unwrap().kind(), SorterKind::Comparison);
        assert_eq!(
            ArraySorter::try_new(&DataType::Decimal128(10, 2)).unwrap().kind(),
            SorterKind::Comparison
        );
    }

    #[test]
    fn test_temporal_types_share_integer_sorters() {
        let s = ArraySorter::try_new(&DataType::Timestamp(TimeUnit::Microseconds, None)).unwrap();
        assert_eq!(s.physical_type(), PhysicalType::Int64);
        let s = ArraySorter::try_new(&DataType::Date32).unwrap();
        assert_eq!(s.physical_type(), PhysicalType::Int32);
    }

    #[test]
    fn test_unsupported_types() {
        for dt in [
            DataType::Float16,
            DataType::Interval(IntervalUnit::MonthDayNano),
            DataType::List(Box::new(DataType::Int32)),
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
        ] {
            let err = ArraySorter::try_new(&dt).unwrap_err();
            assert!(matches!(err, KernelError::UnsupportedType(_)), "{dt}");
        }
        assert_eq!(
            ArraySorter::try_new(&DataType::Float16).unwrap_err().to_string(),
            KernelError::UnsupportedType("Sorting not supported for type halffloat".into())
                .to_string()
        );
        let nested = DataType::Struct(vec![DataType::Int32]);
        assert_eq!(
            ArraySorter::try_new(&nested).unwrap_err(),
            KernelError::UnsupportedType(
                "Sorting not supported for nested type struct<int32>".into()
            )
        );
    }

    #[test]
    fn test_config_overrides() {
        let cmp = SortConfig::new().algorithm(SortAlgorithm::Comparison);
        assert_eq!(
            ArraySorter::with_config(&DataType::Boolean, &cmp).unwrap().kind(),
            SorterKind::Comparison
        );
        assert_eq!(
            ArraySorter::with_config(&DataType::UInt8, &cmp).unwrap().kind(),
            SorterKind::Comparison
        );
    }

    #[test]
    fn test_mismatched_array_left_untouched() {
        let values = [1.5f64, 0.5];
        let arr = ArrayView::primitive(&values, None).unwrap();
        let sorter = ArraySorter::try_new(&DataType::Int64).unwrap();
        let mut out = [7u64, 7];
        let err = sorter.sort(&mut out, &arr, &ArraySortOptions::default()).unwrap_err();
        assert!(matches!(err, KernelError::TypeMismatch(_)));
        assert_eq!(out, [7, 7]);
    }

    #[test]
    fn test_partition_nth_pivot_bound() {
        let values = [3i32, 1, 2];
        let arr = ArrayView::primitive(&values, None).unwrap();
        let sorter = ArraySorter::try_new(&DataType::Int32).unwrap();
        let mut out = [0u64; 3];
        let err = sorter
            .partition_nth(&mut out, &arr, &PartitionNthOptions::new(4))
            .unwrap_err();
        assert!(matches!(err, KernelError::IndexOutOfRange(_)));

        sorter
            .partition_nth(&mut out, &arr, &PartitionNthOptions::new(3))
            .unwrap();
        assert_eq!(out, [0, 1, 2]);
    }
}
