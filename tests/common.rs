//! Test helpers with owned array fixtures
#![allow(dead_code)]

use std::cmp::Ordering;

use minarrow::traits::type_unions::{Float, Integer};
use minarrow::{Bitmask, BooleanArray, FloatArray, IntegerArray, StringArray};
use sort_kernels::{ArraySortOptions, ArrayView, NativeType, NullPlacement, SortOrder};

/// Owned values plus optional validity for a fixed-width column.
pub struct Column<T> {
    pub values: Vec<T>,
    pub validity: Option<Bitmask>,
}

impl<T: NativeType> Column<T> {
    pub fn dense(values: &[T]) -> Self {
        Self {
            values: values.to_vec(),
            validity: None,
        }
    }

    /// `None` entries become nulls backed by `T::default()`.
    pub fn from_options(vals: &[Option<T>]) -> Self {
        let values = vals.iter().map(|v| v.unwrap_or_default()).collect();
        let bools: Vec<bool> = vals.iter().map(Option::is_some).collect();
        Self {
            values,
            validity: Some(Bitmask::from_bools(&bools)),
        }
    }

    pub fn view(&self) -> ArrayView<'_> {
        ArrayView::primitive(&self.values, self.validity.as_ref()).unwrap()
    }
}

/// Nullable minarrow integer array, built the same way as the dense fixtures.
pub fn int_arr_null<T: Integer>(vals: &[Option<T>]) -> IntegerArray<T> {
    let mut a = IntegerArray::<T>::with_capacity(vals.len(), true);
    for v in vals {
        match v {
            Some(x) => a.push(*x),
            None => a.push_null(),
        }
    }
    a
}

pub fn float_arr_null<T: Float>(vals: &[Option<T>]) -> FloatArray<T> {
    let mut a = FloatArray::<T>::with_capacity(vals.len(), true);
    for v in vals {
        match v {
            Some(x) => a.push(*x),
            None => a.push_null(),
        }
    }
    a
}

pub fn bool_arr_null(vals: &[Option<bool>]) -> BooleanArray<()> {
    let bits: Vec<bool> = vals.iter().map(|v| v.unwrap_or(false)).collect();
    let mut a = BooleanArray::from_slice(&bits[..]);
    for (i, v) in vals.iter().enumerate() {
        if v.is_none() {
            a.set_null(i);
        }
    }
    a
}

/// `None` entries become empty null slots.
pub fn str_arr_null(vals: &[Option<&str>]) -> StringArray<u32> {
    let strs: Vec<&str> = vals.iter().map(|v| v.unwrap_or("")).collect();
    let mut a = StringArray::<u32>::from_slice(&strs[..]);
    for (i, v) in vals.iter().enumerate() {
        if v.is_none() {
            a.set_null(i);
        }
    }
    a
}

/// Stable reference sort: values ordered by `cmp`, then NaNs, then nulls (mirrored for
/// nulls at start). NaNs and nulls keep input order.
pub fn reference_sort_by<T>(
    vals: &[Option<T>],
    is_nan: impl Fn(&T) -> bool,
    cmp: impl Fn(&T, &T) -> Ordering,
    options: &ArraySortOptions,
) -> Vec<u64> {
    let mut values = Vec::new();
    let mut nans = Vec::new();
    let mut nulls = Vec::new();
    for (i, v) in vals.iter().enumerate() {
        match v {
            None => nulls.push(i as u64),
            Some(x) if is_nan(x) => nans.push(i as u64),
            Some(_) => values.push(i as u64),
        }
    }
    let get = |i: u64| vals[i as usize].as_ref().unwrap();
    match options.order {
        SortOrder::Ascending => values.sort_by(|&a, &b| cmp(get(a), get(b))),
        SortOrder::Descending => values.sort_by(|&a, &b| cmp(get(b), get(a))),
    }
    match options.null_placement {
        NullPlacement::AtEnd => values.into_iter().chain(nans).chain(nulls).collect(),
        NullPlacement::AtStart => nulls.into_iter().chain(nans).chain(values).collect(),
    }
}

/// [`reference_sort_by`] for totally ordered values.
pub fn reference_sort<T: Ord>(vals: &[Option<T>], options: &ArraySortOptions) -> Vec<u64> {
    reference_sort_by(vals, |_| false, T::cmp, options)
}

/// Every combination of order and null placement.
pub fn all_options() -> [ArraySortOptions; 4] {
    [
        ArraySortOptions::new(SortOrder::Ascending, NullPlacement::AtEnd),
        ArraySortOptions::new(SortOrder::Ascending, NullPlacement::AtStart),
        ArraySortOptions::new(SortOrder::Descending, NullPlacement::AtEnd),
        ArraySortOptions::new(SortOrder::Descending, NullPlacement::AtStart),
    ]
}

/// Values addressed by a permutation.
pub fn gather<T: Copy>(vals: &[Option<T>], indices: &[u64]) -> Vec<Option<T>> {
    indices.iter().map(|&i| vals[i as usize]).collect()
}

/// True when `indices` holds each of `0..n` exactly once.
pub fn is_permutation(indices: &[u64], n: usize) -> bool {
    let mut seen = vec![false; n];
    for &i in indices {
        let i = i as usize;
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    indices.len() == n
}
