// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Data Types** - *Logical Types and Their Physical Storage*
//!
//! [`DataType`] is the runtime logical type tag carried by every [`ArrayView`](crate::array::ArrayView).
//! Sorting never looks at the logical type directly beyond choosing a sorter: each logical type
//! resolves to a [`PhysicalType`], the storage layout the comparison or counting sort actually
//! reads. Dates, times, timestamps and durations sort as their integer representation, strings
//! as bytes, decimals as wide signed integers.

use core::fmt;

pub use minarrow::TimeUnit;

fn unit_suffix(unit: &TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Seconds => "s",
        TimeUnit::Milliseconds => "ms",
        TimeUnit::Microseconds => "us",
        TimeUnit::Nanoseconds => "ns",
        TimeUnit::Days => "d",
    }
}

/// Layout of interval values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalUnit {
    YearMonth,
    DayTime,
    MonthDayNano,
}

/// Logical type of an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    /// Days since the UNIX epoch, stored as `i32`.
    Date32,
    /// Milliseconds since the UNIX epoch, stored as `i64`.
    Date64,
    Time32(TimeUnit),
    Time64(TimeUnit),
    /// Optional timezone name.
    Timestamp(TimeUnit, Option<String>),
    Duration(TimeUnit),
    Interval(IntervalUnit),
    /// Precision and scale.
    Decimal128(u8, i8),
    /// Precision and scale.
    Decimal256(u8, i8),
    Binary,
    LargeBinary,
    Utf8,
    LargeUtf8,
    /// Byte width of every value.
    FixedSizeBinary(usize),
    List(Box<DataType>),
    LargeList(Box<DataType>),
    Struct(Vec<DataType>),
    /// Key type and value type.
    Dictionary(Box<DataType>, Box<DataType>),
}

/// Storage representation a sorter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Null,
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    /// 16-byte signed integer.
    Decimal128,
    /// 32-byte signed integer.
    Decimal256,
    /// `u32` offsets into a byte buffer.
    Binary,
    /// `u64` offsets into a byte buffer.
    LargeBinary,
    /// Values of the given byte width, back to back.
    FixedSizeBinary(usize),
}

impl DataType {
    /// Storage representation of this logical type, or `None` when the type has no
    /// representation the sort kernels can order (half floats, intervals, nested and
    /// dictionary types).
    pub fn physical_type(&self) -> Option<PhysicalType> {
        let p = match self {
            DataType::Null => PhysicalType::Null,
            DataType::Boolean => PhysicalType::Boolean,
            DataType::Int8 => PhysicalType::Int8,
            DataType::Int16 => PhysicalType::Int16,
            DataType::Int32 | DataType::Date32 | DataType::Time32(_) => PhysicalType::Int32,
            DataType::Int64
            | DataType::Date64
            | DataType::Time64(_)
            | DataType::Timestamp(_, _)
            | DataType::Duration(_) => PhysicalType::Int64,
            DataType::UInt8 => PhysicalType::UInt8,
            DataType::UInt16 => PhysicalType::UInt16,
            DataType::UInt32 => PhysicalType::UInt32,
            DataType::UInt64 => PhysicalType::UInt64,
            DataType::Float32 => PhysicalType::Float32,
            DataType::Float64 => PhysicalType::Float64,
            DataType::Decimal128(_, _) => PhysicalType::Decimal128,
            DataType::Decimal256(_, _) => PhysicalType::Decimal256,
            DataType::Binary | DataType::Utf8 => PhysicalType::Binary,
            DataType::LargeBinary | DataType::LargeUtf8 => PhysicalType::LargeBinary,
            DataType::FixedSizeBinary(w) => PhysicalType::FixedSizeBinary(*w),
            DataType::Float16
            | DataType::Interval(_)
            | DataType::List(_)
            | DataType::LargeList(_)
            | DataType::Struct(_)
            | DataType::Dictionary(_, _) => return None,
        };
        Some(p)
    }

    /// True for types whose values are all null by definition.
    pub fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    /// True for list, struct and dictionary types.
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            DataType::List(_) | DataType::LargeList(_) | DataType::Struct(_) | DataType::Dictionary(_, _)
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => f.write_str("null"),
            DataType::Boolean => f.write_str("bool"),
            DataType::Int8 => f.write_str("int8"),
            DataType::Int16 => f.write_str("int16"),
            DataType::Int32 => f.write_str("int32"),
            DataType::Int64 => f.write_str("int64"),
            DataType::UInt8 => f.write_str("uint8"),
            DataType::UInt16 => f.write_str("uint16"),
            DataType::UInt32 => f.write_str("uint32"),
            DataType::UInt64 => f.write_str("uint64"),
            DataType::Float16 => f.write_str("halffloat"),
            DataType::Float32 => f.write_str("float"),
            DataType::Float64 => f.write_str("double"),
            DataType::Date32 => f.write_str("date32[day]"),
            DataType::Date64 => f.write_str("date64[ms]"),
            DataType::Time32(u) => write!(f, "time32[{}]", unit_suffix(u)),
            DataType::Time64(u) => write!(f, "time64[{}]", unit_suffix(u)),
            DataType::Timestamp(u, None) => write!(f, "timestamp[{}]", unit_suffix(u)),
            DataType::Timestamp(u, Some(tz)) => {
                write!(f, "timestamp[{}, tz={}]", unit_suffix(u), tz)
            }
            DataType::Duration(u) => write!(f, "duration[{}]", unit_suffix(u)),
            DataType::Interval(IntervalUnit::YearMonth) => f.write_str("month_interval"),
            DataType::Interval(IntervalUnit::DayTime) => f.write_str("day_time_interval"),
            DataType::Interval(IntervalUnit::MonthDayNano) => {
                f.write_str("month_day_nano_interval")
            }
            DataType::Decimal128(p, s) => write!(f, "decimal128({}, {})", p, s),
            DataType::Decimal256(p, s) => write!(f, "decimal256({}, {})", p, s),
            DataType::Binary => f.write_str("binary"),
            DataType::LargeBinary => f.write_str("large_binary"),
            DataType::Utf8 => f.write_str("string"),
            DataType::LargeUtf8 => f.write_str("large_string"),
            DataType::FixedSizeBinary(w) => write!(f, "fixed_size_binary[{}]", w),
            DataType::List(child) => write!(f, "list<item: {}>", child),
            DataType::LargeList(child) => write!(f, "large_list<item: {}>", child),
            DataType::Struct(children) => {
                f.write_str("struct<")?;
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str(">")
            }
            DataType::Dictionary(key, value) => {
                write!(f, "dictionary<values={}, indices={}>", value, key)
            }
        }
    }
}
