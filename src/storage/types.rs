use num_traits::{Num, NumAssign, NumCast, PrimInt, Unsigned};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Runtime tag identifying the element type of a storage object.
///
/// The tag is carried in serialized headers and returned by
/// [`YaleStorage::element_type`](crate::storage::YaleStorage::element_type);
/// all actual dispatch happens at compile time through the [`ScalarT`]
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl ElementType {
    /// width of one element in bytes
    pub fn size_of(&self) -> usize {
        match self {
            ElementType::I8 | ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::I8 => "i8",
            ElementType::I16 => "i16",
            ElementType::I32 => "i32",
            ElementType::I64 => "i64",
            ElementType::U8 => "u8",
            ElementType::U16 => "u16",
            ElementType::U32 => "u32",
            ElementType::U64 => "u64",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Runtime tag identifying the integer type used for row pointers and
/// column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexType {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IndexType {
    /// The smallest unsigned index tag able to represent `dim`.
    ///
    /// This is the selection rule for a storage of shape `(rows, cols)`:
    /// pass `max(rows, cols)` and instantiate the matching [`IndexT`]
    /// parameter.
    pub fn minimal(dim: usize) -> IndexType {
        if dim <= u8::MAX as usize {
            IndexType::U8
        } else if dim <= u16::MAX as usize {
            IndexType::U16
        } else if dim <= u32::MAX as usize {
            IndexType::U32
        } else {
            IndexType::U64
        }
    }

    /// width of one index in bytes
    pub fn size_of(&self) -> usize {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
            IndexType::U64 => 8,
            IndexType::Usize => std::mem::size_of::<usize>(),
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexType::U8 => "u8",
            IndexType::U16 => "u16",
            IndexType::U32 => "u32",
            IndexType::U64 => "u64",
            IndexType::Usize => "usize",
        };
        write!(f, "{}", name)
    }
}

/// Core trait for storable element values.
///
/// `ScalarT` relies on [`num_traits`](num_traits) for its constituent
/// numeric bounds and is implemented for the primitive signed, unsigned
/// and floating point types.  Element and index types of a storage are
/// chosen independently.
pub trait ScalarT:
    'static + Copy + Num + NumAssign + NumCast + PartialOrd + Default + fmt::Debug + fmt::Display
{
    /// runtime tag for this element type
    const ELEMENT_TYPE: ElementType;
}

macro_rules! impl_ScalarT {
    ($ty:ty, $tag:ident) => {
        impl ScalarT for $ty {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;
        }
    };
}
impl_ScalarT!(i8, I8);
impl_ScalarT!(i16, I16);
impl_ScalarT!(i32, I32);
impl_ScalarT!(i64, I64);
impl_ScalarT!(u8, U8);
impl_ScalarT!(u16, U16);
impl_ScalarT!(u32, U32);
impl_ScalarT!(u64, U64);
impl_ScalarT!(f32, F32);
impl_ScalarT!(f64, F64);

/// Core trait for the integer type used for row pointers and column
/// indices.
///
/// Implementations exist for the unsigned primitives.  The conversion
/// helpers avoid `Option` plumbing at interior call sites: index values
/// written into the buffers are bounds-checked once at construction time,
/// so `from_usize` only debug-asserts.
pub trait IndexT:
    'static + Copy + PrimInt + Unsigned + NumAssign + Default + fmt::Debug + fmt::Display
{
    /// runtime tag for this index type
    const INDEX_TYPE: IndexType;

    fn as_usize(self) -> usize;
    fn from_usize(n: usize) -> Self;
    fn checked_from_usize(n: usize) -> Option<Self>;

    /// largest value representable in this index type, as a `usize`
    /// (saturating on 32-bit targets)
    fn max_usize() -> usize;
}

macro_rules! impl_IndexT {
    ($ty:ty, $tag:ident) => {
        impl IndexT for $ty {
            const INDEX_TYPE: IndexType = IndexType::$tag;

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn from_usize(n: usize) -> Self {
                debug_assert!(<$ty>::try_from(n).is_ok());
                n as $ty
            }

            #[inline]
            fn checked_from_usize(n: usize) -> Option<Self> {
                <$ty>::try_from(n).ok()
            }

            #[inline]
            fn max_usize() -> usize {
                usize::try_from(<$ty>::MAX).unwrap_or(usize::MAX)
            }
        }
    };
}
impl_IndexT!(u8, U8);
impl_IndexT!(u16, U16);
impl_IndexT!(u32, U32);
impl_IndexT!(u64, U64);
impl_IndexT!(usize, Usize);

/// Shape introspection common to matrix-like objects.
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn size(&self) -> (usize, usize);
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

#[test]
fn test_minimal_index_type() {
    assert_eq!(IndexType::minimal(0), IndexType::U8);
    assert_eq!(IndexType::minimal(255), IndexType::U8);
    assert_eq!(IndexType::minimal(256), IndexType::U16);
    assert_eq!(IndexType::minimal(65536), IndexType::U32);
    assert_eq!(IndexType::minimal(1 << 40), IndexType::U64);
}

#[test]
fn test_type_tags() {
    assert_eq!(<f64 as ScalarT>::ELEMENT_TYPE, ElementType::F64);
    assert_eq!(<i8 as ScalarT>::ELEMENT_TYPE, ElementType::I8);
    assert_eq!(<u16 as IndexT>::INDEX_TYPE, IndexType::U16);
    assert_eq!(ElementType::F32.size_of(), 4);
    assert_eq!(IndexType::U8.size_of(), 1);
    assert_eq!(format!("{}", ElementType::I64), "i64");
}
