use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::Error;
use crate::matrix::{try_buffer, Matrix};
use crate::traits::Scalar;

/// Unit lower-triangular factor in ragged storage.
///
/// Row `i` holds exactly `i + 1` entries, packed into one flat buffer
/// (row `i` starts at offset `i*(i+1)/2`). Entries above the diagonal do
/// not exist; the diagonal is set to 1 at construction and stays 1 for a
/// well-formed factor. Indexing requires `col <= row`.
///
/// # Examples
///
/// ```
/// use luinv::UnitLower;
///
/// let l = UnitLower::identity(3, 0.0_f64);
/// assert_eq!(l[(2, 2)], 1.0);
/// assert_eq!(l[(2, 0)], 0.0);
/// assert_eq!(l.row(1).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnitLower<T> {
    data: Vec<T>,
    n: usize,
}

#[inline]
fn row_offset(i: usize) -> usize {
    i * (i + 1) / 2
}

impl<T: Scalar> UnitLower<T> {
    /// Create an `n x n` unit lower-triangular factor: ones on the
    /// diagonal, zeros strictly below.
    ///
    /// The `_zero` parameter is only used for type inference.
    pub fn identity(n: usize, _zero: T) -> Self {
        let mut l = Self {
            data: vec![T::zero(); row_offset(n)],
            n,
        };
        for i in 0..n {
            l[(i, i)] = T::one();
        }
        l
    }

    /// Fallible variant of [`identity`](Self::identity); returns
    /// [`Error::Allocation`] if the buffer cannot be reserved.
    pub fn try_identity(n: usize) -> Result<Self, Error> {
        let mut l = Self {
            data: try_buffer(row_offset(n))?,
            n,
        };
        for i in 0..n {
            l[(i, i)] = T::one();
        }
        Ok(l)
    }

    /// Expand into a full `n x n` matrix with zeros above the diagonal.
    pub fn to_full(&self) -> Matrix<T> {
        let mut full = Matrix::zeros(self.n, self.n, T::zero());
        for i in 0..self.n {
            for j in 0..=i {
                full[(i, j)] = self[(i, j)];
            }
        }
        full
    }
}

impl<T> UnitLower<T> {
    /// Matrix dimension.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row `i` as a slice of its `i + 1` stored entries.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[row_offset(i)..row_offset(i + 1)]
    }

    /// Swap the leading `cols` entries of rows `a` and `b`.
    ///
    /// Used by the pivot row exchange: at elimination step `i` only
    /// columns `0..i` of the factor are meaningful, and only those may
    /// move with the rows. Requires `cols <= min(a, b) + 1`.
    pub fn swap_row_prefix(&mut self, a: usize, b: usize, cols: usize) {
        debug_assert!(cols <= a + 1 && cols <= b + 1);
        if a != b {
            let (oa, ob) = (row_offset(a), row_offset(b));
            for j in 0..cols {
                self.data.swap(oa + j, ob + j);
            }
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for UnitLower<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col <= row, "no entry above the diagonal: ({}, {})", row, col);
        &self.data[row_offset(row) + col]
    }
}

impl<T> IndexMut<(usize, usize)> for UnitLower<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(col <= row, "no entry above the diagonal: ({}, {})", row, col);
        &mut self.data[row_offset(row) + col]
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for UnitLower<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for (j, x) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", x)?;
            }
            if i + 1 < self.n {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
