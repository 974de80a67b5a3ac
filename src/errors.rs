// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Sort Kernel Error Handling*
//!
//! Error types for sort and partition kernels with structured error reporting.
//!
//! ## Error Categories
//! - **Type Errors**: logical types without a sorter, or buffers that do not match their type
//! - **Dimension Errors**: output buffer and validity bitmap length mismatches
//! - **Boundary Errors**: pivot ranks beyond the array length
//! - **Invocation Errors**: missing or wrongly typed options, unknown function names
//!
//! All errors carry a contextual message. None of them are raised after a kernel has
//! started reordering its output.

use core::fmt;
use std::error::Error;

/// Error type for all sort and partition kernel operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// No sorter is registered for the logical type (nested, dictionary, intervals...).
    UnsupportedType(String),

    /// The array buffers do not match the declared logical type.
    TypeMismatch(String),

    /// Length mismatch between the array and an output buffer or validity bitmap.
    LengthMismatch(String),

    /// Rank or index beyond the end of the array.
    IndexOutOfRange(String),

    /// Options required by a kernel are absent or of the wrong kind.
    InvalidOptions(String),

    /// No function is registered under the requested name.
    FunctionNotFound(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            KernelError::TypeMismatch(msg) => write!(f, "Type mismatch: {}", msg),
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::IndexOutOfRange(msg) => write!(f, "Index out of range: {}", msg),
            KernelError::InvalidOptions(msg) => write!(f, "Invalid options: {}", msg),
            KernelError::FunctionNotFound(msg) => write!(f, "Function not found: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for a length mismatch between an array and a buffer
/// derived from it.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `expected` - Length of the array
/// * `actual` - Length of the offending buffer
pub fn log_length_mismatch(fname: &str, expected: usize, actual: usize) -> String {
    format!("{} => Length mismatch: expected {} got {}", fname, expected, actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let e = KernelError::UnsupportedType("struct<int32>".into());
        assert_eq!(e.to_string(), "Unsupported type: struct<int32>");
        let e = KernelError::IndexOutOfRange("pivot 5 > 4".into());
        assert_eq!(e.to_string(), "Index out of range: pivot 5 > 4");
    }

    #[test]
    fn test_log_length_mismatch() {
        assert_eq!(
            log_length_mismatch("array_sort_indices", 4, 3),
            "array_sort_indices => Length mismatch: expected 4 got 3"
        );
    }
}
