//---------------------------------------------------------
// growth strategy and the low-level insert/replace/remove
// primitives shared by all higher-level mutators.
//---------------------------------------------------------

use crate::storage::{IndexT, ScalarT, StorageError, YaleStorage};

/// multiplicative buffer growth applied on overflow
pub(crate) const GROWTH_FACTOR: f64 = 1.5;

impl<T, I> YaleStorage<T, I>
where
    T: ScalarT,
    I: IndexT,
{
    /// Ensure room for `required` additional off-diagonal slots, growing
    /// the buffers if necessary.
    ///
    /// New capacity is `max(ceil(capacity * 1.5), capacity + required)`,
    /// clamped to the structural maximum.  Fails with `CapacityExceeded`
    /// if even the maximum cannot hold the request; the check precedes any
    /// buffer modification.  Growth extends the tail region in place, so
    /// logical positions never move.
    pub(crate) fn grow_for(&mut self, required: usize) -> Result<(), StorageError> {
        let size = self.current_size();
        let maximum = Self::max_capacity_for(self.rows, self.cols);
        if size + required > maximum {
            return Err(StorageError::CapacityExceeded {
                required: size + required,
                maximum,
            });
        }
        if size + required <= self.capacity() {
            return Ok(());
        }

        let grown = (self.capacity() as f64 * GROWTH_FACTOR).ceil() as usize;
        let new_capacity = grown.max(self.capacity() + required).min(maximum);

        self.ija.resize(new_capacity, I::zero());
        self.a.resize(new_capacity, T::zero());
        Ok(())
    }

    /// Insert `n` new (column, value) pairs at flat position `pos` within
    /// row `row`'s segment, shifting the off-diagonal tail right and
    /// advancing every subsequent row pointer by `n`.
    ///
    /// With `struct_only` the value slots are left at zero; the merge
    /// operator uses this to build a sparsity pattern without meaningful
    /// values.  Columns must be presented in ascending order and must
    /// preserve the row's column ordering around `pos`.
    pub(crate) fn vector_insert(
        &mut self,
        row: usize,
        pos: usize,
        cols: &[usize],
        vals: &[T],
        struct_only: bool,
    ) -> Result<(), StorageError> {
        debug_assert!(struct_only || vals.len() == cols.len());
        let n = cols.len();
        self.grow_for(n)?;

        let size = self.current_size();
        self.ija.copy_within(pos..size, pos + n);
        self.a.copy_within(pos..size, pos + n);

        for (k, &c) in cols.iter().enumerate() {
            self.ija[pos + k] = I::from_usize(c);
            self.a[pos + k] = if struct_only { T::zero() } else { vals[k] };
        }

        let shift = I::from_usize(n);
        for p in self.ija[(row + 1)..=self.rows].iter_mut() {
            *p += shift;
        }
        self.ndnz += n;
        Ok(())
    }

    /// Overwrite `n` consecutive off-diagonal slots in place at flat
    /// position `pos`.  Used when the columns already match the existing
    /// structure exactly, so no pointers move.
    pub(crate) fn vector_replace(&mut self, pos: usize, cols: &[usize], vals: &[T]) {
        debug_assert_eq!(cols.len(), vals.len());
        for (k, (&c, &v)) in cols.iter().zip(vals.iter()).enumerate() {
            self.ija[pos + k] = I::from_usize(c);
            self.a[pos + k] = v;
        }
    }

    /// Remove `n` consecutive off-diagonal slots at flat position `pos`
    /// within row `row`'s segment: the mirror of [`Self::vector_insert`].
    pub(crate) fn vector_remove(&mut self, row: usize, pos: usize, n: usize) {
        let size = self.current_size();
        debug_assert!(pos + n <= size);

        self.ija.copy_within((pos + n)..size, pos);
        self.a.copy_within((pos + n)..size, pos);

        // clear the vacated tail so slack slots stay zeroed
        for k in (size - n)..size {
            self.ija[k] = I::zero();
            self.a[k] = T::zero();
        }

        let shift = I::from_usize(n);
        for p in self.ija[(row + 1)..=self.rows].iter_mut() {
            *p -= shift;
        }
        self.ndnz -= n;
    }
}
