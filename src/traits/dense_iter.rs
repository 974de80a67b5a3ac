// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use minarrow::Bitmask;
use num_traits::PrimInt;

/// Iterator over non-null values in a slice, using an optional Bitmask.
pub struct DenseIter<'a, T> {
    slice: &'a [T],
    idx: usize,
    mask: Option<&'a Bitmask>,
    len: usize,
}

impl<'a, T: Copy> DenseIter<'a, T> {
    #[inline(always)]
    pub fn new(slice: &'a [T], mask: Option<&'a Bitmask>) -> Self {
        let len = slice.len();
        Self {
            slice,
            idx: 0,
            mask,
            len,
        }
    }
}

impl<'a, T: Copy> Iterator for DenseIter<'a, T> {
    type Item = T;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        match self.mask {
            None => {
                if self.idx >= self.len {
                    None
                } else {
                    let v = self.slice[self.idx];
                    self.idx += 1;
                    Some(v)
                }
            }
            Some(m) => {
                while self.idx < self.len {
                    let i = self.idx;
                    self.idx += 1;
                    if m.get(i) {
                        return Some(self.slice[i]);
                    }
                }
                None
            }
        }
    }
}

/// Smallest and largest non-null value, `None` when every slot is null.
#[inline]
pub fn valid_min_max<T: PrimInt>(d: &[T], m: Option<&Bitmask>) -> Option<(T, T)> {
    DenseIter::new(d, m).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
