mod ops;
mod vector;

pub use vector::Vector;

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::Error;
use crate::traits::Scalar;

/// Allocate a zero-filled buffer, surfacing allocation failure instead of
/// aborting. The factorization and inversion paths allocate exclusively
/// through this.
pub(crate) fn try_buffer<T: Scalar>(len: usize) -> Result<Vec<T>, Error> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|_| Error::Allocation)?;
    data.resize(len, T::zero());
    Ok(data)
}

/// Dense heap-allocated matrix with runtime dimensions.
///
/// Row-major `Vec<T>` storage: row `i` occupies the contiguous range
/// `i*ncols .. (i+1)*ncols`, which makes row extraction, row swaps, and
/// the elimination row updates plain slice operations.
///
/// # Examples
///
/// ```
/// use luinv::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
///
/// let id = Matrix::identity(3, 0.0_f64);
/// assert_eq!(id[(1, 1)], 1.0);
/// assert_eq!(id[(1, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create an `nrows x ncols` matrix of zeros.
    ///
    /// The `_zero` parameter is only used for type inference.
    ///
    /// ```
    /// use luinv::Matrix;
    /// let m = Matrix::zeros(2, 3, 0.0_f64);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize, _zero: T) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Fallible variant of [`zeros`](Self::zeros); returns
    /// [`Error::Allocation`] if the buffer cannot be reserved.
    pub fn try_zeros(nrows: usize, ncols: usize) -> Result<Self, Error> {
        Ok(Self {
            data: try_buffer(nrows * ncols)?,
            nrows,
            ncols,
        })
    }

    /// Create an `n x n` identity matrix.
    ///
    /// The `_zero` parameter is only used for type inference.
    pub fn identity(n: usize, _zero: T) -> Self {
        let mut m = Self::zeros(n, n, T::zero());
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use luinv::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: row_major.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Create a matrix from an owned `Vec<T>` in row-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use luinv::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 2.0_f64 } else { 0.0 });
    /// assert_eq!(m[(1, 1)], 2.0);
    /// assert_eq!(m[(1, 0)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Fallible deep copy; returns [`Error::Allocation`] on reservation
    /// failure.
    pub fn try_clone(&self) -> Result<Self, Error> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| Error::Allocation)?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }
}

// ── Dimensions and element access ───────────────────────────────────

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// View the underlying row-major data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Simultaneous access to row `i` (shared) and row `k` (mutable),
    /// for the elimination update `row k -= m * row i`. Requires `i < k`.
    pub fn row_pair_mut(&mut self, i: usize, k: usize) -> (&[T], &mut [T]) {
        debug_assert!(i < k);
        let n = self.ncols;
        let (head, tail) = self.data.split_at_mut(k * n);
        (&head[i * n..(i + 1) * n], &mut tail[..n])
    }

    /// Swap two rows in place.
    ///
    /// ```
    /// use luinv::Matrix;
    /// let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }
}

impl<T: Scalar> Matrix<T> {
    /// Extract column `j` as a [`Vector`].
    pub fn col(&self, j: usize) -> Vector<T> {
        let mut data = Vec::with_capacity(self.nrows);
        for i in 0..self.nrows {
            data.push(self[(i, j)]);
        }
        Vector::from_vec(data)
    }

    /// Set column `j` from a slice.
    pub fn set_col(&mut self, j: usize, values: &[T]) {
        assert_eq!(values.len(), self.nrows, "column length mismatch");
        for i in 0..self.nrows {
            self[(i, j)] = values[i];
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.ncols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.ncols + col]
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths = vec![0usize; self.ncols];
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                let w = format!("{}", self[(i, j)]).len();
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }

        for i in 0..self.nrows {
            write!(f, "│")?;
            for j in 0..self.ncols {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = widths[j])?;
            }
            write!(f, "│")?;
            if i + 1 < self.nrows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
