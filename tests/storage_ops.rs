use nyale::storage::*;

#[test]
fn test_build_mutate_and_compare() {
    // element and index types are independent: 64-bit values, 8-bit index
    let mut s = YaleStorage::<f64, u8>::zeros(10, 10).unwrap();
    assert_eq!(s.element_type(), ElementType::F64);
    assert_eq!(s.index_type(), IndexType::U8);

    // fill a banded pattern, forcing several growths past the initial 21
    for i in 0..10 {
        s.set(i, i, i as f64 + 1.).unwrap();
        if i + 1 < 10 {
            s.set(i, i + 1, 0.5).unwrap();
        }
        if i >= 1 {
            s.set(i, i - 1, -0.5).unwrap();
        }
    }
    assert_eq!(s.ndnz(), 18);
    assert_eq!(s.nnz(), 28);
    assert!(s.check_format().is_ok());

    // the same matrix built back-to-front compares equal
    let mut t = YaleStorage::<f64, u8>::zeros(10, 10).unwrap();
    for i in (0..10).rev() {
        if i >= 1 {
            t.set(i, i - 1, -0.5).unwrap();
        }
        if i + 1 < 10 {
            t.set(i, i + 1, 0.5).unwrap();
        }
        t.set(i, i, i as f64 + 1.).unwrap();
    }
    assert_eq!(s, t);

    // clearing the sub-diagonal reduces storage again
    for i in 1..10 {
        t.set(i, i - 1, 0.).unwrap();
    }
    assert_eq!(t.ndnz(), 9);
    assert_ne!(s, t);
}

#[test]
fn test_classic_import_cast_and_slice() {
    // 4x4 tridiagonal in classic (diagonal-inline) form
    let ia: Vec<u32> = vec![0, 2, 5, 8, 10];
    let ja: Vec<u32> = vec![0, 1, 0, 1, 2, 1, 2, 3, 2, 3];
    let vals: Vec<i32> = vec![2, -1, -1, 2, -1, -1, 2, -1, -1, 2];

    let s = YaleStorage::<i32, u16>::from_classic_yale(4, 4, &ia, &ja, &vals).unwrap();
    assert_eq!(s.ndnz(), 6);
    assert_eq!(s.nnz(), 10);
    assert!(s.check_format().is_ok());

    // widen to f64, structure untouched
    let f: YaleStorage<f64, u16> = s.cast_copy().unwrap();
    assert_eq!(f.ndnz(), s.ndnz());
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(f.get(i, j).unwrap(), s.get(i, j).unwrap() as f64);
        }
    }

    // trailing 2x2 principal sub-block keeps the tridiagonal structure
    let b = f.sub_block(2, 2, 2, 2).unwrap();
    assert_eq!(b.get(0, 0).unwrap(), 2.);
    assert_eq!(b.get(0, 1).unwrap(), -1.);
    assert_eq!(b.get(1, 0).unwrap(), -1.);
    assert_eq!(b.get(1, 1).unwrap(), 2.);

    // a narrowing cast that cannot hold the values fails cleanly
    let mut big = YaleStorage::<i32, u16>::zeros(2, 2).unwrap();
    big.set(0, 1, 70000).unwrap();
    let r: Result<YaleStorage<i16, u16>, _> = big.cast_copy();
    assert_eq!(r.unwrap_err(), StorageError::CastOverflow);
    assert_eq!(big.get(0, 1).unwrap(), 70000);
}

#[test]
fn test_merge_seeds_binary_kernels() {
    // typical kernel usage: pre-seed the result pattern from one operand,
    // merge in the second, then fill values position by position
    let mut a = YaleStorage::<f64, u8>::identity(4).unwrap();
    a.set(0, 3, 2.).unwrap();
    let mut b = YaleStorage::<f64, u8>::identity(4).unwrap();
    b.set(3, 0, 4.).unwrap();

    let mut out = YaleStorage::create_merged_with(&a, &b, MergeValues::PatternOnly).unwrap();
    assert_eq!(out.ndnz(), 2);

    // an elementwise add over the merged pattern
    for i in 0..4 {
        for j in 0..4 {
            let sum = a.get(i, j).unwrap() + b.get(i, j).unwrap();
            if out.get_entry(i, j).is_some() || sum != 0. {
                out.set(i, j, sum).unwrap();
            }
        }
    }
    assert_eq!(out.get(0, 0).unwrap(), 2.);
    assert_eq!(out.get(0, 3).unwrap(), 2.);
    assert_eq!(out.get(3, 0).unwrap(), 4.);
    assert_eq!(out.get(2, 1).unwrap(), 0.);
    assert!(out.check_format().is_ok());
}
