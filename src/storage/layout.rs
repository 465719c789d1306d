//---------------------------------------------------------
// layout constants and slot accessors for the split-diagonal
// buffer arrangement.  Pure functions of shape and capacity;
// no search and no mutation of the off-diagonal content.
//---------------------------------------------------------

use crate::storage::{IndexT, ScalarT, StorageError, YaleStorage};
use std::ops::Range;

impl<T, I> YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    /// Minimum capacity for a `rows` x `cols` storage: the dense diagonal,
    /// the row-pointer block and an equal amount of off-diagonal slack,
    /// clamped to the structural maximum for skinny shapes.
    pub(crate) fn min_capacity(rows: usize, cols: usize) -> usize {
        (2 * rows + 1).min(Self::max_capacity_for(rows, cols))
    }

    /// Maximum capacity for a `rows` x `cols` storage: one slot per
    /// distinct (row, col) pair plus the sentinel, clamped to what the
    /// index type can address.
    pub(crate) fn max_capacity_for(rows: usize, cols: usize) -> usize {
        rows.saturating_mul(cols)
            .saturating_add(1)
            .min(I::max_usize())
    }

    /// Fail with `CapacityExceeded` before any allocation if `required`
    /// slots cannot fit a `rows` x `cols` storage.
    pub(crate) fn ensure_fits(
        rows: usize,
        cols: usize,
        required: usize,
    ) -> Result<(), StorageError> {
        let maximum = Self::max_capacity_for(rows, cols);
        if required > maximum {
            return Err(StorageError::CapacityExceeded { required, maximum });
        }
        Ok(())
    }

    /// current allocated length of the value/index buffers
    pub fn capacity(&self) -> usize {
        self.ija.len()
    }

    /// one past the last occupied flat slot (the size sentinel)
    pub(crate) fn current_size(&self) -> usize {
        self.ija[self.rows].as_usize()
    }

    #[inline]
    pub(crate) fn row_ptr(&self, i: usize) -> usize {
        self.ija[i].as_usize()
    }

    #[inline]
    pub(crate) fn set_row_ptr(&mut self, i: usize, p: usize) {
        self.ija[i] = I::from_usize(p);
    }

    /// flat range of row `i`'s off-diagonal segment
    #[inline]
    pub(crate) fn row_range(&self, i: usize) -> Range<usize> {
        self.row_ptr(i)..self.row_ptr(i + 1)
    }
}
