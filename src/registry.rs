// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Function Registry** - *Name-Based Access to the Sort Kernels*
//!
//! Maps function names to kernels, their documentation and default options, so a query
//! layer can invoke `"array_sort_indices"` or `"partition_nth_indices"` by name.
//!
//! ```
//! use sort_kernels::array::ArrayView;
//! use sort_kernels::registry::FunctionRegistry;
//!
//! let registry = FunctionRegistry::with_sort_kernels();
//! let values = [3u32, 1, 2];
//! let arr = ArrayView::primitive(&values, None).unwrap();
//! let idx = registry.call("array_sort_indices", &arr, None).unwrap();
//! assert_eq!(idx.as_slice(), &[1, 2, 0]);
//! ```

use std::collections::HashMap;

use minarrow::Vec64;
use tracing::debug;

use crate::array::ArrayView;
use crate::errors::KernelError;
use crate::kernels::sort::{
    ArraySortOptions, PartitionNthOptions, array_sort_indices, partition_nth_indices,
};
use crate::operators::SortKernel;

/// Options accepted by a registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionOptions {
    ArraySort(ArraySortOptions),
    PartitionNth(PartitionNthOptions),
}

impl FunctionOptions {
    /// Name of the options type, as used in error messages and docs.
    pub fn type_name(&self) -> &'static str {
        match self {
            FunctionOptions::ArraySort(_) => "ArraySortOptions",
            FunctionOptions::PartitionNth(_) => "PartitionNthOptions",
        }
    }
}

impl From<ArraySortOptions> for FunctionOptions {
    fn from(o: ArraySortOptions) -> Self {
        FunctionOptions::ArraySort(o)
    }
}

impl From<PartitionNthOptions> for FunctionOptions {
    fn from(o: PartitionNthOptions) -> Self {
        FunctionOptions::PartitionNth(o)
    }
}

/// User-facing documentation of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDoc {
    pub summary: &'static str,
    pub description: &'static str,
    pub arg_names: &'static [&'static str],
    pub options_class: &'static str,
    /// Whether the function refuses to run without options.
    pub options_required: bool,
}

pub static ARRAY_SORT_INDICES_DOC: FunctionDoc = FunctionDoc {
    summary: "Return the indices that would sort an array",
    description: "Computes an array of indices that define a stable sort of the input \
        array. By default, null values are considered greater than any other value and \
        are therefore sorted at the end of the array. For floating-point types, NaNs are \
        considered greater than any other non-null value, but smaller than null values.\n\
        \n\
        The handling of nulls and NaNs can be changed in ArraySortOptions.",
    arg_names: &["array"],
    options_class: "ArraySortOptions",
    options_required: false,
};

pub static PARTITION_NTH_INDICES_DOC: FunctionDoc = FunctionDoc {
    summary: "Return the indices that would partition an array around a pivot",
    description: "Computes an array of indices that define a non-stable partial sort of \
        the input array.\n\
        \n\
        The output is such that the `N`'th index points to the `N`'th element of the input \
        in sorted order, and all indices before the `N`'th point to elements in the input \
        less or equal to elements at or after the `N`'th.\n\
        \n\
        By default, null values are considered greater than any other value and are \
        therefore partitioned towards the end of the array. For floating-point types, \
        NaNs are considered greater than any other non-null value, but smaller than null \
        values.\n\
        \n\
        The pivot index `N` must be given in PartitionNthOptions. The handling of nulls \
        and NaNs can also be changed in PartitionNthOptions.",
    arg_names: &["array"],
    options_class: "PartitionNthOptions",
    options_required: true,
};

impl SortKernel {
    /// Documentation of the kernel.
    pub fn doc(&self) -> &'static FunctionDoc {
        match self {
            SortKernel::ArraySortIndices => &ARRAY_SORT_INDICES_DOC,
            SortKernel::PartitionNthIndices => &PARTITION_NTH_INDICES_DOC,
        }
    }

    /// Options used when a call supplies none. `None` means options are mandatory.
    pub fn default_options(&self) -> Option<FunctionOptions> {
        match self {
            SortKernel::ArraySortIndices => Some(ArraySortOptions::defaults().into()),
            SortKernel::PartitionNthIndices => None,
        }
    }

    /// Runs the kernel over `array`.
    ///
    /// # Errors
    /// `InvalidOptions` when `options` belong to another kernel, plus any kernel error.
    pub fn execute(
        &self,
        array: &ArrayView<'_>,
        options: &FunctionOptions,
    ) -> Result<Vec64<u64>, KernelError> {
        match (self, options) {
            (SortKernel::ArraySortIndices, FunctionOptions::ArraySort(o)) => {
                array_sort_indices(array, o)
            }
            (SortKernel::PartitionNthIndices, FunctionOptions::PartitionNth(o)) => {
                partition_nth_indices(array, o)
            }
            _ => Err(KernelError::InvalidOptions(format!(
                "{} requires {}, got {}",
                self,
                self.doc().options_class,
                options.type_name()
            ))),
        }
    }
}

/// A kernel bound to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredFunction {
    pub kernel: SortKernel,
    pub doc: &'static FunctionDoc,
    pub default_options: Option<FunctionOptions>,
}

impl RegisteredFunction {
    pub fn new(kernel: SortKernel) -> Self {
        Self {
            kernel,
            doc: kernel.doc(),
            default_options: kernel.default_options(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.kernel.name()
    }
}

/// Registry of vector functions keyed by name.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, RegisteredFunction>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `array_sort_indices` and `partition_nth_indices`.
    #[must_use]
    pub fn with_sort_kernels() -> Self {
        let mut registry = Self::new();
        registry.register(RegisteredFunction::new(SortKernel::ArraySortIndices));
        registry.register(RegisteredFunction::new(SortKernel::PartitionNthIndices));
        registry
    }

    /// Register a function under its kernel name.
    ///
    /// Overwrites any existing function with the same name. Returns the previous
    /// function if one existed.
    pub fn register(&mut self, function: RegisteredFunction) -> Option<RegisteredFunction> {
        self.functions.insert(function.name().to_string(), function)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredFunction> {
        let found = self.functions.get(name);
        debug!(
            name,
            hit = if found.is_some() { "exact" } else { "miss" },
            "registry lookup"
        );
        found
    }

    /// Registered names, sorted.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Invokes the function registered as `name`, falling back to its default options
    /// when `options` is `None`.
    ///
    /// # Errors
    /// - `FunctionNotFound` for unknown names
    /// - `InvalidOptions` when options are required but absent, or of the wrong kind
    /// - any error of the kernel itself
    pub fn call(
        &self,
        name: &str,
        array: &ArrayView<'_>,
        options: Option<&FunctionOptions>,
    ) -> Result<Vec64<u64>, KernelError> {
        let function = self
            .get(name)
            .ok_or_else(|| KernelError::FunctionNotFound(name.to_string()))?;
        let options = match (options, function.default_options.as_ref()) {
            (Some(o), _) => o,
            (None, Some(d)) => d,
            (None, None) => {
                return Err(KernelError::InvalidOptions(format!(
                    "{} requires {}",
                    function.name(),
                    function.doc.options_class
                )));
            }
        };
        function.kernel.execute(array, options)
    }
}
