//---------------------------------------------------------
// structural merge: per-row sorted union of two sparsity
// patterns, used to pre-size the results of binary kernels.
//---------------------------------------------------------

use crate::storage::{IndexT, ScalarT, ShapedMatrix, StorageError, YaleStorage};
use itertools::{merge_join_by, EitherOrBoth};

/// Value policy for [`YaleStorage::create_merged_with`].
///
/// The union of the two sparsity patterns is the same under either
/// policy; only the values written at the merged positions differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeValues {
    /// Positions present in `other` take `other`'s value; positions
    /// present only in `template` keep `template`'s.  On the dense
    /// diagonal, `other` wins where its entry is nonzero (a zero diagonal
    /// is not part of `other`'s pattern).
    FromOther,
    /// Values come from `template` only; positions new to the pattern are
    /// left at zero.  This builds a result pattern for a kernel that will
    /// fill the values itself.
    PatternOnly,
}

impl<T, I> YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    /// Produce a new storage whose off-diagonal structure is the per-row
    /// set union of `template`'s and `other`'s column-index sets, with
    /// values taken per [`MergeValues::FromOther`].
    pub fn create_merged(template: &Self, other: &Self) -> Result<Self, StorageError> {
        Self::create_merged_with(template, other, MergeValues::FromOther)
    }

    /// As [`Self::create_merged`], with an explicit value policy.
    ///
    /// Row segments in the result remain column-sorted.  Fails with
    /// `ShapeMismatch` if the two storages differ in shape.
    pub fn create_merged_with(
        template: &Self,
        other: &Self,
        policy: MergeValues,
    ) -> Result<Self, StorageError> {
        if template.size() != other.size() {
            return Err(StorageError::ShapeMismatch(template.size(), other.size()));
        }
        let (rows, cols) = template.size();

        // size the union before any allocation
        let ndnz: usize = (0..rows)
            .map(|r| {
                merge_join_by(template.row_entries(r), other.row_entries(r), |a, b| {
                    a.0.cmp(&b.0)
                })
                .count()
            })
            .sum();

        Self::ensure_fits(rows, cols, rows + 1 + ndnz)?;
        let mut out = Self::with_capacity(rows, cols, rows + 1 + ndnz)?;

        for i in 0..rows {
            out.a[i] = match policy {
                MergeValues::PatternOnly => template.a[i],
                MergeValues::FromOther => {
                    if other.a[i].is_zero() {
                        template.a[i]
                    } else {
                        other.a[i]
                    }
                }
            };
        }

        let mut ptr = rows + 1;
        for r in 0..rows {
            out.set_row_ptr(r, ptr);
            let mut cbuf = Vec::new();
            let mut vbuf = Vec::new();
            for item in merge_join_by(template.row_entries(r), other.row_entries(r), |a, b| {
                a.0.cmp(&b.0)
            }) {
                let (c, v) = match (item, policy) {
                    (EitherOrBoth::Left((c, v)), _) => (c, v),
                    (EitherOrBoth::Right((c, v)), MergeValues::FromOther) => (c, v),
                    (EitherOrBoth::Right((c, _)), MergeValues::PatternOnly) => (c, T::zero()),
                    (EitherOrBoth::Both(_, (c, v)), MergeValues::FromOther) => (c, v),
                    (EitherOrBoth::Both((c, v), _), MergeValues::PatternOnly) => (c, v),
                };
                cbuf.push(c);
                vbuf.push(v);
            }
            out.vector_replace(ptr, &cbuf, &vbuf);
            ptr += cbuf.len();
        }
        out.set_row_ptr(rows, ptr);
        out.ndnz = ndnz;

        Ok(out)
    }
}
