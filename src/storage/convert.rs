//---------------------------------------------------------
// conversions: classic (diagonal-inline) Yale input and
// element-type casting copies.
//---------------------------------------------------------

use crate::storage::{IndexT, ScalarT, StorageError, YaleStorage};
use num_traits::NumCast;

/// Convert one element value between scalar types, failing on values the
/// target type cannot represent.
pub(crate) fn cast_value<A, B>(v: A) -> Result<B, StorageError>
where
    A: ScalarT,
    B: ScalarT,
{
    <B as NumCast>::from(v).ok_or(StorageError::CastOverflow)
}

impl<T, I> YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    /// Build a storage from a classic Yale / CSR representation in which
    /// the diagonal is not pulled out: `ia` holds `rows + 1` row pointers
    /// into `ja`/`vals`, and diagonal entries appear inline.
    ///
    /// Diagonal entries are routed into the dense diagonal block and the
    /// remainder into the off-diagonal region, re-deriving the row
    /// pointers.  The source may use different element and index types;
    /// values are converted through [`NumCast`] (`CastOverflow` on
    /// failure).  Fails with `MalformedInput` if `ia` is not
    /// non-decreasing, a column index is out of `[0, cols)`, or columns
    /// within a row are not strictly increasing.
    pub fn from_classic_yale<T2, I2>(
        rows: usize,
        cols: usize,
        ia: &[I2],
        ja: &[I2],
        vals: &[T2],
    ) -> Result<Self, StorageError>
    where
        T2: ScalarT,
        I2: IndexT,
    {
        if ia.len() != rows + 1 {
            return Err(StorageError::MalformedInput(
                "row pointer array must have rows + 1 entries",
            ));
        }
        if ja.len() != vals.len() {
            return Err(StorageError::MalformedInput(
                "column index and value arrays differ in length",
            ));
        }
        if ia.windows(2).any(|w| w[0] > w[1]) {
            return Err(StorageError::MalformedInput(
                "row pointers are not non-decreasing",
            ));
        }
        if ia[rows].as_usize() != ja.len() {
            return Err(StorageError::MalformedInput(
                "row pointer sentinel does not match the entry count",
            ));
        }

        // validate the column structure and count the strictly
        // off-diagonal entries before touching any buffer
        let mut ndnz = 0;
        for r in 0..rows {
            let seg = &ja[ia[r].as_usize()..ia[r + 1].as_usize()];
            if seg.windows(2).any(|w| w[0] >= w[1]) {
                return Err(StorageError::MalformedInput(
                    "column indices are not strictly increasing within a row",
                ));
            }
            for c in seg {
                if c.as_usize() >= cols {
                    return Err(StorageError::MalformedInput(
                        "column index exceeds the matrix column dimension",
                    ));
                }
                if c.as_usize() != r {
                    ndnz += 1;
                }
            }
        }

        Self::ensure_fits(rows, cols, rows + 1 + ndnz)?;
        let mut out = Self::with_capacity(rows, cols, rows + 1 + ndnz)?;

        let mut ptr = rows + 1;
        for r in 0..rows {
            out.set_row_ptr(r, ptr);
            let mut cbuf = Vec::new();
            let mut vbuf = Vec::new();
            for k in ia[r].as_usize()..ia[r + 1].as_usize() {
                let c = ja[k].as_usize();
                let v: T = cast_value(vals[k])?;
                if c == r {
                    out.a[r] = v;
                } else {
                    cbuf.push(c);
                    vbuf.push(v);
                }
            }
            out.vector_replace(ptr, &cbuf, &vbuf);
            ptr += cbuf.len();
        }
        out.set_row_ptr(rows, ptr);
        out.ndnz = ndnz;

        Ok(out)
    }

    /// Structural copy with every value converted into the element type
    /// `T2`: identical shape, row pointers and column indices.
    ///
    /// Fails with `CastOverflow` if a stored value cannot be represented
    /// in `T2`; the source is never modified.
    pub fn cast_copy<T2>(&self) -> Result<YaleStorage<T2, I>, StorageError>
    where
        T2: ScalarT,
    {
        let size = self.current_size();
        let mut a = vec![T2::zero(); self.capacity()];
        // convert the occupied prefix only; slack slots stay zero
        for (dst, &src) in a[..size].iter_mut().zip(self.a[..size].iter()) {
            *dst = cast_value(src)?;
        }
        Ok(YaleStorage {
            rows: self.rows,
            cols: self.cols,
            offset: self.offset,
            ndnz: self.ndnz,
            ija: self.ija.clone(),
            a,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{ShapedMatrix, StorageError, YaleStorage};

    #[test]
    fn classic_conversion() {
        // A =
        //[1.0  2.0   ⋅ ]
        //[ ⋅   3.0  4.0]
        //[5.0   ⋅   6.0]
        let ia: Vec<u16> = vec![0, 2, 4, 6];
        let ja: Vec<u16> = vec![0, 1, 1, 2, 0, 2];
        let vals: Vec<f64> = vec![1., 2., 3., 4., 5., 6.];

        let s = YaleStorage::<f64, u8>::from_classic_yale(3, 3, &ia, &ja, &vals).unwrap();
        assert_eq!(s.size(), (3, 3));
        assert_eq!(s.ndnz(), 3);
        assert_eq!(s.get(0, 0).unwrap(), 1.);
        assert_eq!(s.get(0, 1).unwrap(), 2.);
        assert_eq!(s.get(1, 1).unwrap(), 3.);
        assert_eq!(s.get(1, 2).unwrap(), 4.);
        assert_eq!(s.get(2, 0).unwrap(), 5.);
        assert_eq!(s.get(2, 2).unwrap(), 6.);
        assert_eq!(s.get(1, 0).unwrap(), 0.);
        assert!(s.check_format().is_ok());
    }

    #[test]
    fn classic_conversion_rejects_malformed_input() {
        let vals = [1.0f64; 3];

        // non-monotone row pointers
        let r = YaleStorage::<f64, u8>::from_classic_yale(
            2,
            2,
            &[0u16, 2, 1],
            &[0u16, 1, 1],
            &vals,
        );
        assert!(matches!(r, Err(StorageError::MalformedInput(_))));

        // column index out of range
        let r = YaleStorage::<f64, u8>::from_classic_yale(
            2,
            2,
            &[0u16, 2, 3],
            &[0u16, 5, 1],
            &vals,
        );
        assert!(matches!(r, Err(StorageError::MalformedInput(_))));

        // columns out of order within a row
        let r = YaleStorage::<f64, u8>::from_classic_yale(
            2,
            2,
            &[0u16, 2, 3],
            &[1u16, 0, 1],
            &vals,
        );
        assert!(matches!(r, Err(StorageError::MalformedInput(_))));
    }

    #[test]
    fn cast_copy_roundtrip_and_overflow() {
        let mut s = YaleStorage::<i16, u8>::zeros(3, 3).unwrap();
        s.set(0, 0, 100).unwrap();
        s.set(0, 2, 300).unwrap();
        s.set(2, 1, -7).unwrap();

        // widening cast preserves structure and values
        let w: YaleStorage<f64, u8> = s.cast_copy().unwrap();
        assert_eq!(w.ndnz(), s.ndnz());
        assert_eq!(w.get(0, 0).unwrap(), 100.);
        assert_eq!(w.get(0, 2).unwrap(), 300.);
        assert_eq!(w.get(2, 1).unwrap(), -7.);
        assert!(w.check_format().is_ok());

        // 300 does not fit an i8: the cast fails and the source is intact
        let r: Result<YaleStorage<i8, u8>, _> = s.cast_copy();
        assert_eq!(r.unwrap_err(), StorageError::CastOverflow);
        assert_eq!(s.get(0, 2).unwrap(), 300);
        assert_eq!(s.ndnz(), 2);
        assert!(s.check_format().is_ok());
    }
}
