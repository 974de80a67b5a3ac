// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Validation and Index Buffer Helpers*
//!
//! Length checks shared by the array constructors and kernels, and the identity fill
//! every sort starts from.

use minarrow::Bitmask;

use crate::errors::KernelError;

/// Validates that two lengths are equal.
///
/// # Parameters
/// - `label`: context label for error reporting (e.g., "array_sort_indices output")
/// - `a`: expected length, normally the array length
/// - `b`: length of the buffer being checked
///
/// # Returns
/// `Ok(())` if lengths are equal, otherwise `KernelError::LengthMismatch` with diagnostic details.
#[inline(always)]
pub fn confirm_equal_len(label: &str, a: usize, b: usize) -> Result<(), KernelError> {
    if a != b {
        return Err(KernelError::LengthMismatch(format!(
            "{}: length mismatch (lhs: {}, rhs: {})",
            label, a, b
        )));
    }
    Ok(())
}

/// Validates an optional validity bitmap against the array length.
#[inline(always)]
pub fn confirm_mask_len(
    label: &str,
    len: usize,
    mask: Option<&Bitmask>,
) -> Result<(), KernelError> {
    if let Some(m) = mask {
        confirm_equal_len(label, len, m.len())?;
    }
    Ok(())
}

/// Number of the first `len` bits set in both masks.
pub fn count_ones_and(lhs: &Bitmask, rhs: &Bitmask, len: usize) -> usize {
    let full = len / 8;
    let mut acc: usize = lhs.bits[..full]
        .iter()
        .zip(rhs.bits[..full].iter())
        .map(|(a, b)| (a & b).count_ones() as usize)
        .sum();
    let tail = len % 8;
    if tail != 0 {
        let slack = (1u8 << tail) - 1;
        acc += (lhs.bits[full] & rhs.bits[full] & slack).count_ones() as usize;
    }
    acc
}

/// Writes `0, 1, .., n - 1` into the index buffer.
#[inline]
pub fn fill_identity(indices: &mut [u64]) {
    for (i, slot) in indices.iter_mut().enumerate() {
        *slot = i as u64;
    }
}

/// Converts an index buffer entry back into a row position.
#[inline(always)]
pub(crate) fn row(idx: u64) -> usize {
    idx as usize
}
