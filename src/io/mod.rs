//! Reading / writing of storage objects to JSON files.
//!
//! The serialized form mirrors the in-memory layout (shape, off-diagonal
//! count, then the raw value and index buffers) and is wrapped in a header
//! carrying the element and index type tags, so a file written with one
//! instantiation cannot be silently loaded into another.

use crate::storage::{ElementType, IndexT, IndexType, ScalarT, StorageError, YaleStorage};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::{Error, ErrorKind, Read, Write};
use std::{fs::File, io};

#[derive(Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned, I: Serialize + DeserializeOwned")]
struct JsonStorageData<T, I> {
    element_type: ElementType,
    index_type: IndexType,
    storage: YaleStorage<T, I>,
}

/// JSON file persistence for storage objects.
pub trait StorageJSONReadWrite: Sized {
    /// write the storage to a file, tagged with its element/index types
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error>;
    /// read a storage back from a file written by
    /// [`write_to_file`](Self::write_to_file)
    fn read_from_file(file: &mut File) -> Result<Self, io::Error>;
}

impl<T, I> StorageJSONReadWrite for YaleStorage<T, I>
where
    T: ScalarT + Serialize + DeserializeOwned,
    I: IndexT + Serialize + DeserializeOwned,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json_data = JsonStorageData {
            element_type: self.element_type(),
            index_type: self.index_type(),
            storage: self.clone(),
        };
        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonStorageData<T, I> = serde_json::from_str(&buffer)?;

        if json_data.element_type != T::ELEMENT_TYPE || json_data.index_type != I::INDEX_TYPE {
            let err = StorageError::TypeMismatch {
                expected: format!("{}/{}", T::ELEMENT_TYPE, I::INDEX_TYPE),
                found: format!("{}/{}", json_data.element_type, json_data.index_type),
            };
            return Err(Error::new(ErrorKind::InvalidData, err));
        }

        // never trust buffer contents from a file
        json_data
            .storage
            .check_format()
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;

        Ok(json_data.storage)
    }
}
