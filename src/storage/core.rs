use crate::storage::{ElementType, IndexT, IndexType, ScalarT, ShapedMatrix, StorageError};
use itertools::{merge_join_by, EitherOrBoth};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix storage in modified ("new") Yale format.
///
/// The diagonal is pulled out of the sparse structure and stored densely,
/// so diagonal access is O(1).  Two equally sized buffers hold everything:
///
/// ```text
/// a   : [ d0 d1 .. d(r-1) | _ | off-diagonal values, row-major      ]
/// ija : [ p0 p1 .. p(r-1) | S | off-diagonal column indices         ]
/// ```
///
/// Slots `0..rows` of `a` are the dense diagonal.  Slots `0..rows` of `ija`
/// are row pointers into the off-diagonal region, and slot `rows` is the
/// one-past-the-end sentinel (the current fill size), so row `i` occupies
/// the flat range `ija[i]..ija[i+1]`.  Column indices within a row are
/// strictly increasing, which admits binary search.  Only the off-diagonal
/// region grows; the diagonal and row-pointer blocks sit at fixed offsets.
///
/// `T` is the element type and `I` the index type; the two are independent.
/// `I` should be the smallest unsigned type able to represent
/// `max(rows, cols)` (see [`IndexType::minimal`]).
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  0.  5.]
///     [7.  2.  0.]
///     [0.  0.  3.]
/// ```
///
/// ```
/// use nyale::storage::YaleStorage;
///
/// let mut A = YaleStorage::<f64, u8>::zeros(3, 3).unwrap();
/// for (i, j, v) in [(0, 0, 1.), (1, 1, 2.), (2, 2, 3.), (0, 2, 5.), (1, 0, 7.)] {
///     A.set(i, j, v).unwrap();
/// }
///
/// assert_eq!(A.ndnz(), 2);
/// assert!(A.check_format().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct YaleStorage<T = f64, I = usize> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) offset: (usize, usize),
    /// strictly off-diagonal nonzero count
    pub(crate) ndnz: usize,
    /// index buffer: row pointers, sentinel, then column indices
    pub(crate) ija: Vec<I>,
    /// value buffer: dense diagonal, one alignment slot, then off-diagonal
    /// values
    pub(crate) a: Vec<T>,
}

impl<T, I> YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    /// Allocate storage for a `rows` x `cols` all-zero matrix with room for
    /// approximately `init_capacity` slots.
    ///
    /// The requested capacity is clamped to the layout minimum and to the
    /// structural maximum `rows*cols + 1`.  Fails with `MalformedInput` on
    /// an empty shape and with `NarrowIndexType` if `I` cannot represent
    /// `max(rows, cols)`.
    pub fn with_capacity(
        rows: usize,
        cols: usize,
        init_capacity: usize,
    ) -> Result<Self, StorageError> {
        if rows == 0 || cols == 0 {
            return Err(StorageError::MalformedInput(
                "storage shape must have nonzero dimensions",
            ));
        }
        // the index type must represent every column index and every row
        // pointer value; the latter reach at least rows + 1
        if I::checked_from_usize(rows.max(cols)).is_none()
            || Self::max_capacity_for(rows, cols) < rows + 1
        {
            return Err(StorageError::NarrowIndexType {
                index_type: I::INDEX_TYPE,
                rows,
                cols,
            });
        }

        let capacity = init_capacity
            .max(Self::min_capacity(rows, cols))
            .min(Self::max_capacity_for(rows, cols));

        let mut ija = vec![I::zero(); capacity];
        let a = vec![T::zero(); capacity];

        // empty rows: every pointer, sentinel included, starts at the
        // beginning of the off-diagonal region
        let start = I::from_usize(rows + 1);
        for p in ija[..=rows].iter_mut() {
            *p = start;
        }

        Ok(YaleStorage {
            rows,
            cols,
            offset: (0, 0),
            ndnz: 0,
            ija,
            a,
        })
    }

    /// A `rows` x `cols` matrix of zeros at minimum capacity.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, StorageError> {
        Self::with_capacity(rows, cols, 0)
    }

    /// Identity matrix of size `n`.  The ones live entirely in the dense
    /// diagonal block, so no off-diagonal slots are consumed.
    pub fn identity(n: usize) -> Result<Self, StorageError> {
        let mut s = Self::zeros(n, n)?;
        for d in s.a[..n].iter_mut() {
            *d = T::one();
        }
        Ok(s)
    }

    /// runtime tag of the element type `T`
    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    /// runtime tag of the index type `I`
    pub fn index_type(&self) -> IndexType {
        I::INDEX_TYPE
    }

    /// number of strictly off-diagonal stored entries
    pub fn ndnz(&self) -> usize {
        self.ndnz
    }

    /// number of logical nonzeros (off-diagonal stored entries plus
    /// nonzero diagonal entries)
    pub fn nnz(&self) -> usize {
        let diag = self.a[..self.rows].iter().filter(|v| !v.is_zero()).count();
        self.ndnz + diag
    }

    /// logical row/column offset of this storage.
    ///
    /// Reserved for views into a larger storage; every constructor in this
    /// crate produces a detached storage, for which the offset is `(0, 0)`
    /// and address translation is the identity.
    pub fn offset(&self) -> (usize, usize) {
        self.offset
    }

    /// Binary search for `col` within row `row`'s sorted off-diagonal
    /// segment.  Returns the flat buffer position if the entry exists, or
    /// the position at which it would be inserted to preserve order.
    pub(crate) fn find_pos(&self, row: usize, col: usize) -> Result<usize, usize> {
        let rng = self.row_range(row);
        let key = I::from_usize(col);
        match self.ija[rng.clone()].binary_search(&key) {
            Ok(i) => Ok(rng.start + i),
            Err(i) => Err(rng.start + i),
        }
    }

    /// Point read, returning the stored value by copy.
    ///
    /// Diagonal reads are O(1); off-diagonal reads binary-search the row.
    /// Absence of a structural entry means logical zero, never an error.
    pub fn get(&self, row: usize, col: usize) -> Result<T, StorageError> {
        self.check_bounds(row, col)?;
        if row == col {
            return Ok(self.a[row]);
        }
        Ok(match self.find_pos(row, col) {
            Ok(pos) => self.a[pos],
            Err(_) => T::zero(),
        })
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not structurally stored; note
    /// that the diagonal is dense by construction and therefore always
    /// present.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, row: usize, col: usize) -> Option<T> {
        assert!(row < self.rows && col < self.cols);
        if row == col {
            return Some(self.a[row]);
        }
        match self.find_pos(row, col) {
            Ok(pos) => Some(self.a[pos]),
            Err(_) => None,
        }
    }

    /// Point write.
    ///
    /// Diagonal writes are O(1) and never touch capacity.  Off-diagonal
    /// writes overwrite an existing entry in place, or insert a new one
    /// (growing the buffers if required).  Writing zero never materializes
    /// a structural entry; overwriting an existing entry with zero removes
    /// it.
    pub fn set(&mut self, row: usize, col: usize, val: T) -> Result<(), StorageError> {
        self.check_bounds(row, col)?;
        if row == col {
            self.a[row] = val;
            return Ok(());
        }
        match self.find_pos(row, col) {
            Ok(pos) => {
                if val.is_zero() {
                    self.vector_remove(row, pos, 1);
                } else {
                    self.a[pos] = val;
                }
            }
            Err(pos) => {
                if !val.is_zero() {
                    self.vector_insert(row, pos, &[col], &[val], false)?;
                }
            }
        }
        Ok(())
    }

    /// Extract a detached copy of the rectangular sub-block anchored at
    /// `(row0, col0)` with shape `(nrows, ncols)`, re-applying the
    /// split-diagonal layout to the result.
    pub fn sub_block(
        &self,
        row0: usize,
        col0: usize,
        nrows: usize,
        ncols: usize,
    ) -> Result<Self, StorageError> {
        if nrows == 0 || ncols == 0 {
            return Err(StorageError::MalformedInput(
                "sub-block shape must have nonzero dimensions",
            ));
        }
        if row0 + nrows > self.rows || col0 + ncols > self.cols {
            return Err(StorageError::IndexOutOfBounds {
                row: row0 + nrows - 1,
                col: col0 + ncols - 1,
                rows: self.rows,
                cols: self.cols,
            });
        }

        // gather the addressed entries of each row, in column order
        let mut entries: Vec<Vec<(usize, T)>> = Vec::with_capacity(nrows);
        for i in 0..nrows {
            let r = row0 + i;
            let mut rowbuf: Vec<(usize, T)> = self
                .row_entries(r)
                .filter(|&(c, _)| c >= col0 && c < col0 + ncols)
                .map(|(c, v)| (c - col0, v))
                .collect();

            // the source diagonal is dense, not structural; it joins the
            // sub-block pattern only when nonzero
            if r >= col0 && r < col0 + ncols && !self.a[r].is_zero() {
                let j = r - col0;
                match rowbuf.binary_search_by_key(&j, |e| e.0) {
                    Ok(_) => unreachable!("diagonal is never stored structurally"),
                    Err(k) => rowbuf.insert(k, (j, self.a[r])),
                }
            }
            entries.push(rowbuf);
        }

        let ndnz = entries
            .iter()
            .enumerate()
            .map(|(i, row)| row.iter().filter(|&&(j, _)| j != i).count())
            .sum::<usize>();

        Self::ensure_fits(nrows, ncols, nrows + 1 + ndnz)?;
        let mut out = Self::with_capacity(nrows, ncols, nrows + 1 + ndnz)?;

        let mut ptr = nrows + 1;
        for (i, rowbuf) in entries.iter().enumerate() {
            out.set_row_ptr(i, ptr);
            let mut cbuf = Vec::with_capacity(rowbuf.len());
            let mut vbuf = Vec::with_capacity(rowbuf.len());
            for &(j, v) in rowbuf {
                if j == i {
                    out.a[i] = v;
                } else {
                    cbuf.push(j);
                    vbuf.push(v);
                }
            }
            out.vector_replace(ptr, &cbuf, &vbuf);
            ptr += cbuf.len();
        }
        out.set_row_ptr(nrows, ptr);
        out.ndnz = ndnz;

        Ok(out)
    }

    /// True iff both storages denote the same logical matrix: same shape
    /// and equal values at every (row, col).  Physical layouts may differ;
    /// an explicitly stored zero compares equal to an absent entry.
    pub fn logical_eq<I2>(&self, other: &YaleStorage<T, I2>) -> bool
    where
        I2: IndexT,
    {
        if self.size() != other.size() {
            return false;
        }
        if self.a[..self.rows] != other.a[..other.rows] {
            return false;
        }
        (0..self.rows).all(|r| {
            merge_join_by(self.row_entries(r), other.row_entries(r), |a, b| {
                a.0.cmp(&b.0)
            })
            .all(|item| match item {
                EitherOrBoth::Left((_, v)) => v.is_zero(),
                EitherOrBoth::Right((_, v)) => v.is_zero(),
                EitherOrBoth::Both((_, x), (_, y)) => x == y,
            })
        })
    }

    /// Check that the storage satisfies the new-Yale layout invariants.
    pub fn check_format(&self) -> Result<(), StorageError> {
        if self.ija.len() != self.a.len() {
            return Err(StorageError::MalformedInput(
                "index and value buffers differ in length",
            ));
        }
        if self.capacity() < self.rows + 1
            || self.capacity() > Self::max_capacity_for(self.rows, self.cols)
        {
            return Err(StorageError::MalformedInput(
                "capacity outside the layout bounds",
            ));
        }
        if self.row_ptr(0) != self.rows + 1 {
            return Err(StorageError::MalformedInput(
                "first row pointer does not start the off-diagonal region",
            ));
        }
        if self.current_size() > self.capacity() {
            return Err(StorageError::MalformedInput(
                "size sentinel exceeds capacity",
            ));
        }
        if self.ija[..=self.rows].windows(2).any(|w| w[0] > w[1]) {
            return Err(StorageError::MalformedInput(
                "row pointers are not non-decreasing",
            ));
        }
        if self.ndnz != self.current_size() - (self.rows + 1) {
            return Err(StorageError::MalformedInput(
                "off-diagonal count disagrees with the size sentinel",
            ));
        }
        for r in 0..self.rows {
            let seg = &self.ija[self.row_range(r)];
            if seg.windows(2).any(|w| w[0] >= w[1]) {
                return Err(StorageError::MalformedInput(
                    "column indices are not strictly increasing within a row",
                ));
            }
            if seg.iter().any(|c| c.as_usize() >= self.cols) {
                return Err(StorageError::MalformedInput(
                    "column index exceeds the matrix column dimension",
                ));
            }
            if seg.iter().any(|c| c.as_usize() == r) {
                return Err(StorageError::MalformedInput(
                    "diagonal entry stored in the off-diagonal region",
                ));
            }
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn check_bounds(&self, row: usize, col: usize) -> Result<(), StorageError> {
        if row >= self.rows || col >= self.cols {
            return Err(StorageError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Iterate row `r`'s off-diagonal entries as `(col, value)` pairs, in
    /// ascending column order.
    pub(crate) fn row_entries(&self, r: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        self.row_range(r)
            .map(move |pos| (self.ija[pos].as_usize(), self.a[pos]))
    }
}

impl<T, I> ShapedMatrix for YaleStorage<T, I> {
    fn nrows(&self) -> usize {
        self.rows
    }
    fn ncols(&self) -> usize {
        self.cols
    }
    fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl<T, I> PartialEq for YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    fn eq(&self, other: &Self) -> bool {
        self.logical_eq(other)
    }
}

/// Diagnostic dump of the raw index/value vectors.  Not part of the
/// logical contract; intended for debugging and tests.
impl<T, I> fmt::Display for YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.current_size();
        writeln!(
            f,
            "YaleStorage<{},{}> {}x{} (ndnz = {}, size = {}, capacity = {})",
            self.element_type(),
            self.index_type(),
            self.rows,
            self.cols,
            self.ndnz,
            size,
            self.capacity()
        )?;
        write!(f, "ija: [")?;
        for (k, x) in self.ija[..size].iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        writeln!(f, "]")?;
        write!(f, "a:   [")?;
        for (k, x) in self.a[..size].iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

#[test]
#[allow(non_snake_case)]
fn test_get_entry() {
    // A =
    //[1.0   ⋅   5.0]
    //[7.0  2.0   ⋅ ]
    //[ ⋅    ⋅   9.0]
    let mut A = YaleStorage::<f64, u8>::zeros(3, 3).unwrap();
    A.set(0, 0, 1.).unwrap();
    A.set(1, 1, 2.).unwrap();
    A.set(2, 2, 9.).unwrap();
    A.set(0, 2, 5.).unwrap();
    A.set(1, 0, 7.).unwrap();

    assert_eq!(A.get_entry(0, 2).unwrap(), 5.);
    assert_eq!(A.get_entry(1, 0).unwrap(), 7.);
    assert_eq!(A.get_entry(1, 1).unwrap(), 2.);
    assert!(A.get_entry(0, 1).is_none());
    assert!(A.get_entry(2, 0).is_none());

    // the diagonal is dense, so its entries are always present
    assert_eq!(A.get_entry(2, 2).unwrap(), 9.);
}

#[test]
fn test_identity_and_nnz() {
    let s = YaleStorage::<f32, u8>::identity(4).unwrap();
    assert_eq!(s.ndnz(), 0);
    assert_eq!(s.nnz(), 4);
    for i in 0..4 {
        for j in 0..4 {
            let expect = if i == j { 1.0 } else { 0.0 };
            assert_eq!(s.get(i, j).unwrap(), expect);
        }
    }
    assert!(s.check_format().is_ok());
}

#[test]
fn test_display_dump() {
    let mut s = YaleStorage::<i32, u8>::zeros(2, 2).unwrap();
    s.set(0, 1, -4).unwrap();
    let dump = format!("{}", s);
    assert!(dump.contains("YaleStorage<i32,u8> 2x2"));
    assert!(dump.contains("ija:"));
    assert!(dump.contains("a:"));
}
