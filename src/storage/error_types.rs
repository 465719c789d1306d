use crate::storage::IndexType;
use thiserror::Error;

/// Error type returned by storage operations.
///
/// All errors are reported synchronously to the caller of the offending
/// operation and no operation leaves the storage partially mutated:
/// capacity and bounds are validated before any buffer is touched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// A row/column address lies outside the storage shape
    #[error("index ({row},{col}) is out of bounds for {rows}x{cols} storage")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Growth would exceed the structural maximum capacity.  The caller
    /// requested more distinct nonzero positions than the shape permits;
    /// this is a contract violation, not a recoverable runtime condition.
    #[error("storage requires {required} slots but the shape permits at most {maximum}")]
    CapacityExceeded { required: usize, maximum: usize },
    /// Input data is structurally defective
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    /// A value cannot be represented in the target element type
    #[error("value cannot be represented in the target element type")]
    CastOverflow,
    /// Type tags disagree with the requested storage instantiation
    #[error("storage type tags do not match: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
    /// Operation on two storages with incompatible shapes
    #[error("storage shapes {0:?} and {1:?} are incompatible")]
    ShapeMismatch((usize, usize), (usize, usize)),
    /// The index type cannot address the requested shape
    #[error("index type {index_type} cannot address a {rows}x{cols} shape")]
    NarrowIndexType {
        index_type: IndexType,
        rows: usize,
        cols: usize,
    },
}
