//! End to end checks of the store engine across dtypes, shapes, and the
//! `.npy` interchange.

use numr::numpy;
use numr::prelude::*;

#[test]
fn store_dispatch_matrix() {
    // every registered (source, destination) pair succeeds; the complex to
    // real pairs are the only failures outside the object destination
    let dtypes = [
        DType::Bool,
        DType::U8,
        DType::U16,
        DType::U32,
        DType::U64,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::F32,
        DType::F64,
        DType::C64,
        DType::C128,
        DType::Object,
    ];
    for src_dtype in dtypes {
        let src = DynArray::zeros(src_dtype, [2, 2]);
        for dst_dtype in dtypes {
            let mut dst = DynArray::zeros(dst_dtype, [2, 2]);
            let result = dst.try_store(&src);
            let src_complex = src_dtype.is_complex();
            let dst_real = !dst_dtype.is_complex() && dst_dtype != DType::Object;
            if src_complex && dst_real {
                let err = result.unwrap_err();
                assert_eq!(
                    err.to_string(),
                    format!(
                        "unknown conversion from {} to {}",
                        src_dtype.name(),
                        dst_dtype.name()
                    )
                );
            } else {
                assert!(result.is_ok(), "{src_dtype} -> {dst_dtype} should store");
            }
        }
    }
}

#[test]
fn store_follows_promotion_for_concatenate() {
    let bools = DynArray::from(NArray::from_data(vec![true, false]));
    let ints = DynArray::from(NArray::<i16>::from_vec([2], vec![-3, 9]));
    let floats = DynArray::from(NArray::<f32>::from_vec([2], vec![0.5, 1.5]));

    let out = try_concatenate(&[bools, ints, floats], 0).unwrap();
    assert_eq!(out.dtype(), DType::F32);
    let out = NArray::<f32>::try_from(out).unwrap();
    assert_eq!(out.as_slice(), &[1.0, 0.0, -3.0, 9.0, 0.5, 1.5]);
}

#[test]
fn lossy_downcast_is_allowed() {
    // storing down the promotion order truncates rather than failing
    let src = DynArray::from(NArray::<f64>::from_vec([3], vec![1.7, -2.7, 300.0]));
    let mut dst = DynArray::zeros(DType::I8, [3]);
    dst.store(&src);
    assert_eq!(NArray::<i8>::try_from(dst).unwrap().as_slice(), &[1, -2, 127]);
}

#[test]
fn object_array_roundtrip_preserves_values() {
    let mut obj = DynArray::zeros(DType::Object, [3]);
    obj.store(&DynArray::from(NArray::<i32>::from_vec([3], vec![7, -8, 9])));

    let back = obj.cast_to(DType::I32);
    assert_eq!(NArray::<i32>::try_from(back).unwrap().as_slice(), &[7, -8, 9]);
}

#[test]
fn npy_file_roundtrip_with_cast_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("values.npy");

    let src = DynArray::from(NArray::<f64>::from_vec([2, 2], vec![1.5, 2.5, 3.5, 4.5]));
    numpy::save(&path, &src).unwrap();

    let loaded = numpy::load(&path).unwrap();
    assert_eq!(loaded, src);

    let mut ints = DynArray::zeros(DType::I64, [2, 2]);
    numpy::load_into(&path, &mut ints).unwrap();
    assert_eq!(
        NArray::<i64>::try_from(ints).unwrap().as_slice(),
        &[1, 2, 3, 4]
    );
}

#[test]
fn split_then_concatenate_mixed_dtypes() {
    let a = NArray::<i32>::seq([4, 2]);
    let parts = a.vsplit(2).unwrap();
    assert_eq!(parts[0].shape().dims(), &[2, 2]);

    let as_dyn: Vec<DynArray> = parts.into_iter().map(DynArray::from).collect();
    let widened = DynArray::from(NArray::<f64>::from_vec([1, 2], vec![9.5, 10.5]));

    let out = vstack(&[as_dyn[0].clone(), as_dyn[1].clone(), widened]).unwrap();
    assert_eq!(out.dtype(), DType::F64);
    assert_eq!(out.shape().dims(), &[5, 2]);
    let out = NArray::<f64>::try_from(out).unwrap();
    assert_eq!(
        out.as_slice(),
        &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.5, 10.5]
    );
}
