//! __nyale__ implements sparse 2-D matrix storage in the modified ("new")
//! Yale format: the matrix diagonal is stored densely and separately from the
//! off-diagonal nonzeros, so diagonal reads and writes are O(1) while memory
//! use remains proportional to the number of structurally stored entries.
//!
//! The crate provides the storage substrate only: layout, buffer growth,
//! element lookup/insertion/deletion, structural merge of sparsity patterns,
//! logical equality and type-casting copies.  Numeric kernels that operate
//! over the storage are left to downstream crates.
//!
//! __Example usage__ :
//! ```
//! use nyale::storage::YaleStorage;
//!
//! let mut s = YaleStorage::<f64, u8>::zeros(3, 3).unwrap();
//! s.set(0, 2, 5.0).unwrap();
//! s.set(1, 0, 7.0).unwrap();
//! s.set(2, 2, 9.0).unwrap(); // diagonal write, O(1)
//!
//! assert_eq!(s.get(0, 2).unwrap(), 5.0);
//! assert_eq!(s.get(2, 0).unwrap(), 0.0); // structural miss reads as zero
//! assert_eq!(s.ndnz(), 2);
//! ```

pub mod storage;

#[cfg(feature = "serde")]
pub mod io;
