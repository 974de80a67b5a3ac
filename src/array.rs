// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Array Views** - *Borrowed, Typed Input to the Sort Kernels*
//!
//! The kernels never own array memory. An [`ArrayView`] borrows the caller's value buffers
//! together with an optional Minarrow [`Bitmask`] validity (bit set = valid), a logical
//! [`DataType`] and a cached null count. Construction validates that the buffers match the
//! physical representation of the logical type, so the sorters can index them without
//! further checks.
//!
//! Minarrow's typed arrays convert with `ArrayView::try_from(&arr)`, borrowing their `data`
//! and `null_mask` buffers.

use arrow_buffer::i256;
use minarrow::traits::type_unions::{Float, Integer};
use minarrow::{Bitmask, BooleanArray, FloatArray, IntegerArray, StringArray};

use crate::datatypes::{DataType, PhysicalType};
use crate::errors::{KernelError, log_length_mismatch};
use crate::utils::{confirm_equal_len, confirm_mask_len, count_ones_and};

/// Physical value buffers of an array.
#[derive(Debug, Clone, Copy)]
pub enum ArrayData<'a> {
    /// No value buffer (null-typed arrays).
    Null,
    Boolean(&'a Bitmask),
    Int8(&'a [i8]),
    Int16(&'a [i16]),
    Int32(&'a [i32]),
    Int64(&'a [i64]),
    UInt8(&'a [u8]),
    UInt16(&'a [u16]),
    UInt32(&'a [u32]),
    UInt64(&'a [u64]),
    Float32(&'a [f32]),
    Float64(&'a [f64]),
    Decimal128(&'a [i128]),
    Decimal256(&'a [i256]),
    /// `offsets.len() == len + 1`, value `i` is `values[offsets[i]..offsets[i + 1]]`.
    Binary {
        offsets: &'a [u32],
        values: &'a [u8],
    },
    LargeBinary {
        offsets: &'a [u64],
        values: &'a [u8],
    },
    FixedSizeBinary {
        width: usize,
        values: &'a [u8],
    },
    /// Child arrays of nested types. Not modelled here, only the logical type and
    /// validity of such arrays are visible.
    Nested,
}

impl<'a> ArrayData<'a> {
    /// Physical representation of these buffers, `None` for [`ArrayData::Nested`].
    pub fn physical_type(&self) -> Option<PhysicalType> {
        let p = match self {
            ArrayData::Null => PhysicalType::Null,
            ArrayData::Boolean(_) => PhysicalType::Boolean,
            ArrayData::Int8(_) => PhysicalType::Int8,
            ArrayData::Int16(_) => PhysicalType::Int16,
            ArrayData::Int32(_) => PhysicalType::Int32,
            ArrayData::Int64(_) => PhysicalType::Int64,
            ArrayData::UInt8(_) => PhysicalType::UInt8,
            ArrayData::UInt16(_) => PhysicalType::UInt16,
            ArrayData::UInt32(_) => PhysicalType::UInt32,
            ArrayData::UInt64(_) => PhysicalType::UInt64,
            ArrayData::Float32(_) => PhysicalType::Float32,
            ArrayData::Float64(_) => PhysicalType::Float64,
            ArrayData::Decimal128(_) => PhysicalType::Decimal128,
            ArrayData::Decimal256(_) => PhysicalType::Decimal256,
            ArrayData::Binary { .. } => PhysicalType::Binary,
            ArrayData::LargeBinary { .. } => PhysicalType::LargeBinary,
            ArrayData::FixedSizeBinary { width, .. } => PhysicalType::FixedSizeBinary(*width),
            ArrayData::Nested => return None,
        };
        Some(p)
    }

    /// Number of slots implied by the buffers, when they imply one.
    pub fn slot_count(&self) -> Option<usize> {
        match self {
            ArrayData::Null | ArrayData::Nested => None,
            ArrayData::Boolean(bits) => Some(bits.len()),
            ArrayData::Int8(v) => Some(v.len()),
            ArrayData::Int16(v) => Some(v.len()),
            ArrayData::Int32(v) => Some(v.len()),
            ArrayData::Int64(v) => Some(v.len()),
            ArrayData::UInt8(v) => Some(v.len()),
            ArrayData::UInt16(v) => Some(v.len()),
            ArrayData::UInt32(v) => Some(v.len()),
            ArrayData::UInt64(v) => Some(v.len()),
            ArrayData::Float32(v) => Some(v.len()),
            ArrayData::Float64(v) => Some(v.len()),
            ArrayData::Decimal128(v) => Some(v.len()),
            ArrayData::Decimal256(v) => Some(v.len()),
            ArrayData::Binary { offsets, .. } => Some(offsets.len().saturating_sub(1)),
            ArrayData::LargeBinary { offsets, .. } => Some(offsets.len().saturating_sub(1)),
            ArrayData::FixedSizeBinary { width, values } => {
                if *width == 0 {
                    None
                } else {
                    Some(values.len() / width)
                }
            }
        }
    }
}

/// Fixed-width value types that can back an array directly.
pub trait NativeType: Copy + PartialOrd + Default + Send + Sync + 'static {
    /// Logical type an array of this native type gets by default.
    const DATA_TYPE: DataType;
    /// Whether the type has NaN values that need partitioning apart.
    const HAS_NAN: bool = false;

    fn wrap(values: &[Self]) -> ArrayData<'_>;

    fn unwrap<'a>(data: &ArrayData<'a>) -> Option<&'a [Self]>;

    #[inline(always)]
    fn is_nan(self) -> bool {
        false
    }
}

macro_rules! impl_native {
    ($t:ty, $variant:ident, $dt:expr) => {
        impl NativeType for $t {
            const DATA_TYPE: DataType = $dt;

            #[inline]
            fn wrap(values: &[Self]) -> ArrayData<'_> {
                ArrayData::$variant(values)
            }

            #[inline]
            fn unwrap<'a>(data: &ArrayData<'a>) -> Option<&'a [Self]> {
                match data {
                    ArrayData::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

impl_native!(i8, Int8, DataType::Int8);
impl_native!(i16, Int16, DataType::Int16);
impl_native!(i32, Int32, DataType::Int32);
impl_native!(i64, Int64, DataType::Int64);
impl_native!(u8, UInt8, DataType::UInt8);
impl_native!(u16, UInt16, DataType::UInt16);
impl_native!(u32, UInt32, DataType::UInt32);
impl_native!(u64, UInt64, DataType::UInt64);
impl_native!(i128, Decimal128, DataType::Decimal128(38, 0));
impl_native!(i256, Decimal256, DataType::Decimal256(76, 0));

macro_rules! impl_native_float {
    ($t:ty, $variant:ident, $dt:expr) => {
        impl NativeType for $t {
            const DATA_TYPE: DataType = $dt;
            const HAS_NAN: bool = true;

            #[inline]
            fn wrap(values: &[Self]) -> ArrayData<'_> {
                ArrayData::$variant(values)
            }

            #[inline]
            fn unwrap<'a>(data: &ArrayData<'a>) -> Option<&'a [Self]> {
                match data {
                    ArrayData::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            #[inline(always)]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }
        }
    };
}

impl_native_float!(f32, Float32, DataType::Float32);
impl_native_float!(f64, Float64, DataType::Float64);

/// A borrowed, immutable, typed array.
#[derive(Debug, Clone)]
pub struct ArrayView<'a> {
    data_type: DataType,
    data: ArrayData<'a>,
    len: usize,
    validity: Option<&'a Bitmask>,
    null_count: usize,
    true_count: usize,
}

impl<'a> ArrayView<'a> {
    /// Builds a view after checking the buffers against the logical type.
    ///
    /// # Errors
    /// - `TypeMismatch` when `data` is not the physical representation of `data_type`
    /// - `LengthMismatch` when the buffers or validity are shorter/longer than `len`
    pub fn try_new(
        data_type: DataType,
        data: ArrayData<'a>,
        len: usize,
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        if let Some(expected) = data_type.physical_type() {
            if data.physical_type() != Some(expected) {
                return Err(KernelError::TypeMismatch(format!(
                    "{} arrays are stored as {:?}, got {:?} buffers",
                    data_type,
                    expected,
                    data.physical_type()
                )));
            }
        }
        if let Some(slots) = data.slot_count() {
            confirm_equal_len("ArrayView values", len, slots)?;
        }
        if let ArrayData::Binary { offsets, values } = data {
            check_offsets(offsets.iter().map(|&o| o as u64), values.len())?;
        }
        if let ArrayData::LargeBinary { offsets, values } = data {
            check_offsets(offsets.iter().copied(), values.len())?;
        }
        confirm_mask_len("ArrayView validity", len, validity)?;

        let null_count = if data_type.is_null() {
            len
        } else {
            match validity {
                Some(m) => len - m.count_ones(),
                None => 0,
            }
        };
        let true_count = match (data, validity) {
            (ArrayData::Boolean(bits), Some(m)) => count_ones_and(bits, m, len),
            (ArrayData::Boolean(bits), None) => bits.count_ones(),
            _ => 0,
        };
        Ok(Self {
            data_type,
            data,
            len,
            validity,
            null_count,
            true_count,
        })
    }

    /// Null-typed array of `len` rows.
    pub fn null(len: usize) -> Self {
        Self {
            data_type: DataType::Null,
            data: ArrayData::Null,
            len,
            validity: None,
            null_count: len,
            true_count: 0,
        }
    }

    /// Array over a native value slice with its default logical type.
    pub fn primitive<T: NativeType>(
        values: &'a [T],
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        Self::try_new(T::DATA_TYPE, T::wrap(values), values.len(), validity)
    }

    pub fn boolean(bits: &'a Bitmask, validity: Option<&'a Bitmask>) -> Result<Self, KernelError> {
        Self::try_new(DataType::Boolean, ArrayData::Boolean(bits), bits.len(), validity)
    }

    pub fn utf8(
        offsets: &'a [u32],
        values: &'a [u8],
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        let len = offsets.len().saturating_sub(1);
        Self::try_new(DataType::Utf8, ArrayData::Binary { offsets, values }, len, validity)
    }

    pub fn binary(
        offsets: &'a [u32],
        values: &'a [u8],
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        let len = offsets.len().saturating_sub(1);
        Self::try_new(DataType::Binary, ArrayData::Binary { offsets, values }, len, validity)
    }

    pub fn large_utf8(
        offsets: &'a [u64],
        values: &'a [u8],
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        let len = offsets.len().saturating_sub(1);
        Self::try_new(
            DataType::LargeUtf8,
            ArrayData::LargeBinary { offsets, values },
            len,
            validity,
        )
    }

    /// `values.len()` must be a multiple of `width`; zero-width arrays are empty.
    pub fn fixed_size_binary(
        width: usize,
        values: &'a [u8],
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        let len = if width == 0 { 0 } else { values.len() / width };
        if width != 0 && values.len() % width != 0 {
            return Err(KernelError::LengthMismatch(format!(
                "fixed_size_binary[{}]: {} value bytes is not a whole number of values",
                width,
                values.len()
            )));
        }
        Self::try_new(
            DataType::FixedSizeBinary(width),
            ArrayData::FixedSizeBinary { width, values },
            len,
            validity,
        )
    }

    pub fn decimal128(
        values: &'a [i128],
        precision: u8,
        scale: i8,
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        Self::try_new(
            DataType::Decimal128(precision, scale),
            ArrayData::Decimal128(values),
            values.len(),
            validity,
        )
    }

    pub fn decimal256(
        values: &'a [i256],
        precision: u8,
        scale: i8,
        validity: Option<&'a Bitmask>,
    ) -> Result<Self, KernelError> {
        Self::try_new(
            DataType::Decimal256(precision, scale),
            ArrayData::Decimal256(values),
            values.len(),
            validity,
        )
    }

    /// Relabels the array with another logical type sharing its physical layout,
    /// e.g. an `i32` buffer as `Date32`.
    pub fn with_data_type(self, data_type: DataType) -> Result<Self, KernelError> {
        Self::try_new(data_type, self.data, self.len, self.validity)
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    #[inline]
    pub fn data(&self) -> &ArrayData<'a> {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Validity bitmap, `None` when every row is valid (or the type is null).
    #[inline]
    pub fn validity(&self) -> Option<&'a Bitmask> {
        self.validity
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        if self.data_type.is_null() {
            return true;
        }
        match self.validity {
            Some(m) => !m.get(i),
            None => false,
        }
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        !self.is_null(i)
    }

    /// Typed value slice for a native physical type.
    pub fn values<T: NativeType>(&self) -> Result<&'a [T], KernelError> {
        T::unwrap(&self.data).ok_or_else(|| self.mismatch(std::any::type_name::<T>()))
    }

    pub fn boolean_values(&self) -> Result<&'a Bitmask, KernelError> {
        match self.data {
            ArrayData::Boolean(bits) => Ok(bits),
            _ => Err(self.mismatch("boolean")),
        }
    }

    /// Number of valid rows holding `true`. Zero for non-boolean arrays.
    #[inline]
    pub fn true_count(&self) -> usize {
        self.true_count
    }

    fn mismatch(&self, wanted: &str) -> KernelError {
        KernelError::TypeMismatch(format!(
            "requested {} values from a {} array",
            wanted, self.data_type
        ))
    }
}

impl<'a, T: NativeType + Integer> TryFrom<&'a IntegerArray<T>> for ArrayView<'a> {
    type Error = KernelError;

    fn try_from(arr: &'a IntegerArray<T>) -> Result<Self, Self::Error> {
        Self::primitive(&arr.data[..], arr.null_mask.as_ref())
    }
}

impl<'a, T: NativeType + Float> TryFrom<&'a FloatArray<T>> for ArrayView<'a> {
    type Error = KernelError;

    fn try_from(arr: &'a FloatArray<T>) -> Result<Self, Self::Error> {
        Self::primitive(&arr.data[..], arr.null_mask.as_ref())
    }
}

impl<'a> TryFrom<&'a BooleanArray<()>> for ArrayView<'a> {
    type Error = KernelError;

    fn try_from(arr: &'a BooleanArray<()>) -> Result<Self, Self::Error> {
        Self::try_new(
            DataType::Boolean,
            ArrayData::Boolean(&arr.data),
            arr.len,
            arr.null_mask.as_ref(),
        )
    }
}

impl<'a> TryFrom<&'a StringArray<u32>> for ArrayView<'a> {
    type Error = KernelError;

    fn try_from(arr: &'a StringArray<u32>) -> Result<Self, Self::Error> {
        Self::utf8(&arr.offsets[..], &arr.data[..], arr.null_mask.as_ref())
    }
}

impl<'a> TryFrom<&'a StringArray<u64>> for ArrayView<'a> {
    type Error = KernelError;

    fn try_from(arr: &'a StringArray<u64>) -> Result<Self, Self::Error> {
        Self::large_utf8(&arr.offsets[..], &arr.data[..], arr.null_mask.as_ref())
    }
}

fn check_offsets(
    mut offsets: impl Iterator<Item = u64>,
    values_len: usize,
) -> Result<(), KernelError> {
    let mut prev = match offsets.next() {
        Some(first) => first,
        None => return Ok(()),
    };
    for o in offsets {
        if o < prev {
            return Err(KernelError::LengthMismatch(format!(
                "binary offsets decrease from {} to {}",
                prev, o
            )));
        }
        prev = o;
    }
    if prev as usize > values_len {
        return Err(KernelError::LengthMismatch(log_length_mismatch(
            "binary offsets",
            values_len,
            prev as usize,
        )));
    }
    Ok(())
}
