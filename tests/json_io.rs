#![cfg(feature = "serde")]

use nyale::io::StorageJSONReadWrite;
use nyale::storage::*;
use std::io::{Seek, SeekFrom};

fn sample_storage() -> YaleStorage<f64, u8> {
    let mut s = YaleStorage::zeros(4, 4).unwrap();
    s.set(0, 0, 1.).unwrap();
    s.set(0, 3, 2.5).unwrap();
    s.set(2, 1, -3.).unwrap();
    s.set(3, 3, 4.).unwrap();
    s
}

#[test]
fn test_json_roundtrip() {
    let s = sample_storage();

    let mut file = tempfile::tempfile().unwrap();
    s.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let t = YaleStorage::<f64, u8>::read_from_file(&mut file).unwrap();

    assert_eq!(s, t);
    assert_eq!(t.ndnz(), 2);
    assert_eq!(t.capacity(), s.capacity());
    assert!(t.check_format().is_ok());
}

#[test]
fn test_json_type_tags_are_enforced() {
    let s = sample_storage();

    let mut file = tempfile::tempfile().unwrap();
    s.write_to_file(&mut file).unwrap();

    // the file was written as f64/u8; loading it under another element or
    // index type must be refused
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(YaleStorage::<f32, u8>::read_from_file(&mut file).is_err());

    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(YaleStorage::<f64, u16>::read_from_file(&mut file).is_err());

    // the original instantiation still loads
    file.seek(SeekFrom::Start(0)).unwrap();
    assert!(YaleStorage::<f64, u8>::read_from_file(&mut file).is_ok());
}
