use crate::storage::*;

fn merge_operands() -> (YaleStorage<f64, u8>, YaleStorage<f64, u8>) {
    // A =                 B =
    //[1.0  2.0   ⋅    ⋅ ] [ ⋅    ⋅    ⋅   9.0]
    //[ ⋅    ⋅   3.0   ⋅ ] [ ⋅   5.0  6.0   ⋅ ]
    //[4.0   ⋅    ⋅    ⋅ ] [7.0   ⋅   8.0   ⋅ ]
    let mut a = YaleStorage::zeros(3, 4).unwrap();
    a.set(0, 0, 1.).unwrap();
    a.set(0, 1, 2.).unwrap();
    a.set(1, 2, 3.).unwrap();
    a.set(2, 0, 4.).unwrap();

    let mut b = YaleStorage::zeros(3, 4).unwrap();
    b.set(0, 3, 9.).unwrap();
    b.set(1, 1, 5.).unwrap();
    b.set(1, 2, 6.).unwrap();
    b.set(2, 0, 7.).unwrap();
    b.set(2, 2, 8.).unwrap();
    (a, b)
}

#[test]
fn test_merge_is_union_with_other_precedence() {
    let (a, b) = merge_operands();
    let m = YaleStorage::create_merged(&a, &b).unwrap();
    assert!(m.check_format().is_ok());

    // every position: B's value where B has the entry, else A's, else zero
    for i in 0..3 {
        for j in 0..4 {
            let expect = match b.get(i, j).unwrap() {
                v if v != 0. => v,
                _ => a.get(i, j).unwrap(),
            };
            assert_eq!(m.get(i, j).unwrap(), expect, "mismatch at ({},{})", i, j);
        }
    }

    // union of the off-diagonal patterns (0,1),(0,3),(1,2),(2,0);
    // B's (1,1) and (2,2) live on the dense diagonal
    assert_eq!(m.ndnz(), 4);
}

#[test]
fn test_merge_does_not_touch_operands() {
    let (a, b) = merge_operands();
    let (a2, b2) = merge_operands();
    let _ = YaleStorage::create_merged(&a, &b).unwrap();
    assert_eq!(a, a2);
    assert_eq!(b, b2);
}

#[test]
fn test_merge_identical_patterns() {
    let (a, _) = merge_operands();
    let m = YaleStorage::create_merged(&a, &a).unwrap();
    assert_eq!(m, a);
    assert_eq!(m.ndnz(), a.ndnz());
}

#[test]
fn test_merge_with_empty() {
    let (a, _) = merge_operands();
    let empty = YaleStorage::<f64, u8>::zeros(3, 4).unwrap();

    let m = YaleStorage::create_merged(&a, &empty).unwrap();
    assert_eq!(m, a);

    let m = YaleStorage::create_merged(&empty, &a).unwrap();
    assert_eq!(m, a);
}

#[test]
fn test_pattern_only_merge_presizes_result() {
    let (a, b) = merge_operands();
    let m = YaleStorage::create_merged_with(&a, &b, MergeValues::PatternOnly).unwrap();
    assert!(m.check_format().is_ok());

    // structure is the union, values come from the template only
    assert_eq!(m.ndnz(), 4);
    assert_eq!(m.get(0, 1).unwrap(), 2.); // template only
    assert_eq!(m.get(1, 2).unwrap(), 3.); // overlap keeps template
    assert_eq!(m.get(0, 3).unwrap(), 0.); // other only: structural zero
    assert!(m.get_entry(0, 3).is_some());

    // diagonal comes straight from the template
    assert_eq!(m.get(0, 0).unwrap(), 1.);
    assert_eq!(m.get(1, 1).unwrap(), 0.);
}

#[test]
fn test_merge_diagonal_precedence() {
    let mut a = YaleStorage::<f64, u8>::zeros(2, 2).unwrap();
    a.set(0, 0, 1.).unwrap();
    a.set(1, 1, 2.).unwrap();
    let mut b = YaleStorage::<f64, u8>::zeros(2, 2).unwrap();
    b.set(0, 0, 10.).unwrap();

    let m = YaleStorage::create_merged(&a, &b).unwrap();
    // other's nonzero diagonal wins; its zero diagonal is not part of the
    // pattern and falls back to the template
    assert_eq!(m.get(0, 0).unwrap(), 10.);
    assert_eq!(m.get(1, 1).unwrap(), 2.);
}
