mod common;

use arrow_buffer::i256;
use common::{
    Column, all_options, bool_arr_null, float_arr_null, int_arr_null, reference_sort,
    reference_sort_by, str_arr_null,
};
use minarrow::{Bitmask, StringArray, vec64};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sort_kernels::{
    ArraySortOptions, ArraySorter, ArrayView, DataType, KernelError, NullPlacement,
    SortAlgorithm, SortConfig, SortOrder, SorterKind, TimeUnit, array_sort_indices,
    array_sort_indices_to, array_sort_indices_with_config,
};

#[test]
fn stable_ties_ascending() {
    let col = Column::dense(&[3i32, 1, 3, 2]);
    let idx = array_sort_indices(&col.view(), &ArraySortOptions::default()).unwrap();
    assert_eq!(idx, vec64![1u64, 3, 0, 2]);
}

#[test]
fn null_placement_is_independent_of_order() {
    let col = Column::from_options(&[Some(5i64), None, Some(1)]);
    let arr = col.view();
    let cases = [
        (SortOrder::Ascending, NullPlacement::AtEnd, [2u64, 0, 1]),
        (SortOrder::Ascending, NullPlacement::AtStart, [1, 2, 0]),
        (SortOrder::Descending, NullPlacement::AtEnd, [0, 2, 1]),
        (SortOrder::Descending, NullPlacement::AtStart, [1, 0, 2]),
    ];
    for (order, placement, expected) in cases {
        let idx = array_sort_indices(&arr, &ArraySortOptions::new(order, placement)).unwrap();
        assert_eq!(idx.as_slice(), &expected, "{order:?} {placement:?}");
    }
}

#[test]
fn nan_sorts_between_values_and_nulls() {
    let col = Column::from_options(&[Some(1.0f64), Some(f64::NAN), None, Some(0.0)]);
    let idx = array_sort_indices(&col.view(), &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[3, 0, 1, 2]);

    let opts = ArraySortOptions::new(SortOrder::Ascending, NullPlacement::AtStart);
    let idx = array_sort_indices(&col.view(), &opts).unwrap();
    assert_eq!(idx.as_slice(), &[2, 1, 3, 0]);
}

#[test]
fn float32_matches_reference() {
    let vals = [
        Some(2.5f32),
        None,
        Some(f32::NAN),
        Some(-1.0),
        Some(f32::INFINITY),
        Some(-0.0),
        Some(0.0),
        None,
        Some(f32::NEG_INFINITY),
        Some(f32::NAN),
        Some(2.5),
    ];
    let col = Column::from_options(&vals);
    for opts in all_options() {
        let idx = array_sort_indices(&col.view(), &opts).unwrap();
        let expected = reference_sort_by(
            &vals,
            |v| v.is_nan(),
            |a, b| a.partial_cmp(b).unwrap(),
            &opts,
        );
        assert_eq!(idx.as_slice(), expected.as_slice(), "{opts:?}");
    }
}

#[test]
fn boolean_counting_and_comparison_agree() {
    let vals = [Some(true), None, Some(false), Some(true), Some(false), None, Some(true)];
    let bits = Bitmask::from_bools(&vals.iter().map(|v| v.unwrap_or(false)).collect::<Vec<_>>());
    let validity = Bitmask::from_bools(&vals.iter().map(Option::is_some).collect::<Vec<_>>());
    let arr = ArrayView::boolean(&bits, Some(&validity)).unwrap();
    let cmp = SortConfig::new().algorithm(SortAlgorithm::Comparison);
    for opts in all_options() {
        let counted = array_sort_indices(&arr, &opts).unwrap();
        let compared = array_sort_indices_with_config(&arr, &opts, &cmp).unwrap();
        assert_eq!(counted, compared, "{opts:?}");
        assert_eq!(counted.as_slice(), reference_sort(&vals, &opts).as_slice());
    }
}

#[test]
fn one_byte_integers_use_full_domain() {
    let vals = [Some(127i8), Some(-128), None, Some(0), Some(-128), Some(5)];
    let col = Column::from_options(&vals);
    for opts in all_options() {
        let idx = array_sort_indices(&col.view(), &opts).unwrap();
        assert_eq!(idx.as_slice(), reference_sort(&vals, &opts).as_slice());
    }
    let u = Column::dense(&[255u8, 0, 128, 0]);
    let idx = array_sort_indices(&u.view(), &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[1, 3, 2, 0]);
}

#[test]
fn large_narrow_range_uses_counting_and_matches_comparison() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let vals: Vec<Option<i32>> = (0..5000)
        .map(|_| {
            if rng.gen_bool(0.1) {
                None
            } else {
                Some(rng.gen_range(-1000..1000))
            }
        })
        .collect();
    let col = Column::from_options(&vals);
    let cmp = SortConfig::new().algorithm(SortAlgorithm::Comparison);
    for opts in all_options() {
        let auto = array_sort_indices(&col.view(), &opts).unwrap();
        let compared = array_sort_indices_with_config(&col.view(), &opts, &cmp).unwrap();
        assert_eq!(auto, compared, "{opts:?}");
        assert_eq!(auto.as_slice(), reference_sort(&vals, &opts).as_slice());
    }
}

#[test]
fn large_wide_range_falls_back_to_comparison() {
    let mut rng = StdRng::seed_from_u64(7);
    let vals: Vec<Option<u64>> = (0..3000).map(|_| Some(rng.gen::<u64>())).collect();
    let col = Column::from_options(&vals);
    let opts = ArraySortOptions::default();
    let idx = array_sort_indices(&col.view(), &opts).unwrap();
    assert_eq!(idx.as_slice(), reference_sort(&vals, &opts).as_slice());
}

#[test]
fn temporal_types_sort_as_integers() {
    let col = Column::from_options(&[Some(30i64), None, Some(-10), Some(20)]);
    let arr = col
        .view()
        .with_data_type(DataType::Timestamp(TimeUnit::Nanoseconds, Some("UTC".into())))
        .unwrap();
    let idx = array_sort_indices(&arr, &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[2, 3, 0, 1]);

    let days = Column::dense(&[19000i32, 18000, 19500]);
    let arr = days.view().with_data_type(DataType::Date32).unwrap();
    let idx = array_sort_indices(&arr, &ArraySortOptions::default().order(SortOrder::Descending))
        .unwrap();
    assert_eq!(idx.as_slice(), &[2, 0, 1]);
}

#[test]
fn decimals_sort_by_value() {
    let d128 = [12345i128, -1, i128::MAX, 0];
    let arr = ArrayView::decimal128(&d128, 38, 2, None).unwrap();
    let idx = array_sort_indices(&arr, &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[1, 3, 0, 2]);

    let d256 = [
        i256::from_parts(0, 1),
        i256::from_i128(-5),
        i256::from_i128(i128::MAX),
        i256::MIN,
    ];
    let validity = Bitmask::from_bools(&[true, true, true, false]);
    let arr = ArrayView::decimal256(&d256, 76, 0, Some(&validity)).unwrap();
    let idx = array_sort_indices(&arr, &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[1, 2, 0, 3]);
}

#[test]
fn strings_sort_lexicographically() {
    let vals = [Some("pear"), None, Some("apple"), Some(""), Some("pea"), Some("apple")];
    let arr = str_arr_null(&vals);
    let view = ArrayView::try_from(&arr).unwrap();
    for opts in all_options() {
        let idx = array_sort_indices(&view, &opts).unwrap();
        assert_eq!(idx.as_slice(), reference_sort(&vals, &opts).as_slice(), "{opts:?}");
    }
}

#[test]
fn large_utf8_and_fixed_size_binary() {
    let large = StringArray::<u64>::from_slice(&["b", "ab", ""]);
    let arr = ArrayView::try_from(&large).unwrap();
    assert_eq!(arr.data_type(), &DataType::LargeUtf8);
    let idx = array_sort_indices(&arr, &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[2, 1, 0]);

    let arr = ArrayView::fixed_size_binary(3, b"cabaacabc", None).unwrap();
    let idx = array_sort_indices(&arr, &ArraySortOptions::default()).unwrap();
    assert_eq!(idx.as_slice(), &[1, 2, 0]);
}

#[test]
fn all_null_and_empty_arrays() {
    let col = Column::<i32>::from_options(&[None, None, None]);
    for opts in all_options() {
        let idx = array_sort_indices(&col.view(), &opts).unwrap();
        assert_eq!(idx.as_slice(), &[0, 1, 2]);
    }
    let empty = Column::<f64>::dense(&[]);
    assert!(array_sort_indices(&empty.view(), &ArraySortOptions::default())
        .unwrap()
        .is_empty());
    let nulls = ArrayView::null(0);
    assert!(array_sort_indices(&nulls, &ArraySortOptions::default())
        .unwrap()
        .is_empty());
}

#[test]
fn null_typed_array_reports_all_null() {
    let arr = ArrayView::null(4);
    let sorter = ArraySorter::try_new(arr.data_type()).unwrap();
    assert_eq!(sorter.kind(), SorterKind::NullOnly);
    let mut out = [0u64; 4];
    let p = sorter
        .sort(&mut out, &arr, &ArraySortOptions::default().null_placement(NullPlacement::AtStart))
        .unwrap();
    assert_eq!(out, [0, 1, 2, 3]);
    assert_eq!(p.nulls, 0..4);
    assert!(p.non_nulls.is_empty());
}

#[test]
fn preallocated_output() {
    let col = Column::dense(&[9u32, 7, 8]);
    let mut out = [0u64; 3];
    array_sort_indices_to(&col.view(), &ArraySortOptions::default(), &mut out).unwrap();
    assert_eq!(out, [1, 2, 0]);

    let mut short = [0u64; 2];
    let err = array_sort_indices_to(&col.view(), &ArraySortOptions::default(), &mut short)
        .unwrap_err();
    assert!(matches!(err, KernelError::LengthMismatch(_)));
}

#[test]
fn unsupported_types_error() {
    for dt in [
        DataType::Struct(vec![DataType::Int32]),
        DataType::Float16,
        DataType::LargeList(Box::new(DataType::Utf8)),
    ] {
        let err = ArraySorter::try_new(&dt).unwrap_err();
        assert!(
            matches!(&err, KernelError::UnsupportedType(m) if m.contains("Sorting not supported")),
            "{err}"
        );
    }
}

#[test]
fn minarrow_arrays_sort_directly() {
    let vals = [Some(4i32), None, Some(-1), Some(4), Some(0)];
    let ints = int_arr_null(&vals);
    let floats = float_arr_null(&[Some(0.5f64), None, Some(f64::NAN), Some(-2.0)]);
    let flags = bool_arr_null(&[Some(true), None, Some(false), Some(true)]);
    for opts in all_options() {
        let idx = array_sort_indices(&ArrayView::try_from(&ints).unwrap(), &opts).unwrap();
        assert_eq!(idx.as_slice(), reference_sort(&vals, &opts).as_slice(), "{opts:?}");
    }

    let idx = array_sort_indices(&ArrayView::try_from(&floats).unwrap(), &ArraySortOptions::default())
        .unwrap();
    assert_eq!(idx.as_slice(), &[3, 0, 2, 1]);

    let desc = ArraySortOptions::new(SortOrder::Descending, NullPlacement::AtStart);
    let idx = array_sort_indices(&ArrayView::try_from(&flags).unwrap(), &desc).unwrap();
    assert_eq!(idx.as_slice(), &[1, 0, 3, 2]);
}
