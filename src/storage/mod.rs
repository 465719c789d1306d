//! Sparse storage in "new Yale" format.
//!
//! All matrices are held in a single [`YaleStorage`] object: a dense
//! diagonal block, a row-pointer block and a growable off-diagonal block
//! share one pair of value/index buffers.  See the [`YaleStorage`]
//! documentation for the exact layout.

mod convert;
mod core;
mod error_types;
mod layout;
mod merge;
mod mutate;
mod types;

pub use self::core::YaleStorage;
pub use self::error_types::StorageError;
pub use self::merge::MergeValues;
pub use self::types::{ElementType, IndexT, IndexType, ScalarT, ShapedMatrix};

#[cfg(test)]
mod tests;
