use crate::error::Error;
use crate::matrix::{try_buffer, Matrix};
use crate::traits::FloatScalar;

use super::lower::UnitLower;
use super::Pivoting;

/// Pick the pivot row for elimination step `step`.
///
/// Scans rows `step..n` of column `step` and returns the row holding the
/// algebraically largest entry, compared with strict `>` against a
/// baseline of zero — so ties keep the earliest row, and a column whose
/// candidates are all non-positive leaves the step row in place.
pub(crate) fn select_pivot<T: FloatScalar>(a: &Matrix<T>, step: usize) -> usize {
    let mut best_row = step;
    let mut best = T::zero();
    for row in step..a.nrows() {
        let candidate = a[(row, step)];
        if candidate > best {
            best = candidate;
            best_row = row;
        }
    }
    best_row
}

/// Exchange rows `step` and `pivot_row` across the three structures that
/// must stay aligned: the working matrix, the filled region of the lower
/// factor (columns `0..step` only — later columns are not yet
/// meaningful), and the permutation track. All three swaps happen here
/// and nowhere else.
fn exchange_rows<T: FloatScalar>(
    upper: &mut Matrix<T>,
    lower: &mut UnitLower<T>,
    perm: &mut [usize],
    step: usize,
    pivot_row: usize,
) {
    upper.swap_rows(step, pivot_row);
    lower.swap_row_prefix(step, pivot_row, step);
    perm.swap(step, pivot_row);
}

/// LU factorization of a square matrix.
///
/// Produced by [`LuFactors::factorize`] (or [`Matrix::factorize`]):
/// a unit lower-triangular factor `L` with the elimination multipliers,
/// the input overwritten into upper-triangular `U` (subdiagonal entries
/// explicitly zeroed), and the row permutation applied by pivoting.
/// Row `i` of the factored system is row `permutation()[i]` of the
/// original matrix, so `L·U` reconstructs the row-permuted input.
///
/// # Example
///
/// ```
/// use luinv::{Matrix, Pivoting, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let factors = a.factorize(Pivoting::Partial).unwrap();
///
/// let x = factors.solve(&Vector::from_slice(&[4.0, 11.0])).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct LuFactors<T> {
    lower: UnitLower<T>,
    upper: Matrix<T>,
    perm: Vec<usize>,
    even: bool,
}

impl<T: FloatScalar> LuFactors<T> {
    /// Triangularize `a` by in-place Gaussian elimination.
    ///
    /// For each step, optionally selects and applies a pivot exchange,
    /// then eliminates the column below the diagonal, storing the
    /// multipliers in the lower factor. Fails with [`Error::Singular`]
    /// when a diagonal entry is exactly zero at pivot time, and with
    /// [`Error::Allocation`] if a working buffer cannot be allocated.
    pub fn factorize(a: &Matrix<T>, pivoting: Pivoting) -> Result<Self, Error> {
        assert!(a.is_square(), "LU factorization requires a square matrix");
        let n = a.nrows();
        assert!(n >= 1, "LU factorization requires at least a 1x1 matrix");

        let mut upper = a.try_clone()?;
        let mut lower = UnitLower::try_identity(n)?;
        let mut perm: Vec<usize> = try_buffer(n)?;
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i;
        }
        let mut even = true;

        for step in 0..n {
            if pivoting == Pivoting::Partial {
                let pivot_row = select_pivot(&upper, step);
                if pivot_row != step {
                    exchange_rows(&mut upper, &mut lower, &mut perm, step, pivot_row);
                    even = !even;
                }
            }

            let pivot = upper[(step, step)];
            if pivot == T::zero() {
                return Err(Error::Singular);
            }

            for k in (step + 1)..n {
                let m = upper[(k, step)] / pivot;
                lower[(k, step)] = m;
                upper[(k, step)] = T::zero();
                let (pivot_row, target_row) = upper.row_pair_mut(step, k);
                for j in (step + 1)..n {
                    target_row[j] = target_row[j] - m * pivot_row[j];
                }
            }
        }

        Ok(Self {
            lower,
            upper,
            perm,
            even,
        })
    }

    /// The unit lower-triangular factor holding the multipliers.
    #[inline]
    pub fn lower(&self) -> &UnitLower<T> {
        &self.lower
    }

    /// The upper-triangular factor (the eliminated working matrix).
    #[inline]
    pub fn upper(&self) -> &Matrix<T> {
        &self.upper
    }

    /// The row permutation: position `i` of the factored system holds
    /// original row `permutation()[i]`.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Whether an even number of row exchanges was applied.
    #[inline]
    pub fn swap_parity_even(&self) -> bool {
        self.even
    }

    /// Matrix dimension.
    #[inline]
    pub fn n(&self) -> usize {
        self.upper.nrows()
    }

    /// Determinant of the original matrix: the product of the upper
    /// diagonal, negated for an odd number of row exchanges.
    pub fn det(&self) -> T {
        let mut d = if self.even {
            T::one()
        } else {
            T::zero() - T::one()
        };
        for i in 0..self.n() {
            d = d * self.upper[(i, i)];
        }
        d
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// LU factorization of this matrix.
    pub fn factorize(&self, pivoting: Pivoting) -> Result<LuFactors<T>, Error> {
        LuFactors::factorize(self, pivoting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_unique_maximum() {
        let a = Matrix::from_rows(3, 3, &[4.0_f64, 0.0, 0.0, 9.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(select_pivot(&a, 0), 1);
    }

    #[test]
    fn pivot_tie_keeps_earlier_row() {
        let a = Matrix::from_rows(3, 3, &[4.0_f64, 0.0, 0.0, 7.0, 0.0, 0.0, 7.0, 0.0, 0.0]);
        assert_eq!(select_pivot(&a, 0), 1);
    }

    #[test]
    fn pivot_all_non_positive_keeps_step() {
        let a = Matrix::from_rows(3, 3, &[-4.0_f64, 0.0, 0.0, -9.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(select_pivot(&a, 0), 0);
    }

    #[test]
    fn pivot_scan_starts_at_step() {
        // Row 0 holds the overall maximum but is above the step
        let a = Matrix::from_rows(3, 3, &[0.0_f64, 99.0, 0.0, 0.0, 3.0, 0.0, 0.0, 8.0, 0.0]);
        assert_eq!(select_pivot(&a, 1), 2);
    }

    #[test]
    fn factorize_2x2_with_pivoting() {
        let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
        let f = a.factorize(Pivoting::Partial).unwrap();

        // Step 0 pivot selects row 1 (6 > 4)
        assert_eq!(f.permutation(), &[1, 0]);
        assert!(!f.swap_parity_even());

        // U = [[6, 3], [0, 1]], L[1][0] = 4/6
        assert!((f.upper()[(0, 0)] - 6.0).abs() < 1e-15);
        assert!((f.upper()[(0, 1)] - 3.0).abs() < 1e-15);
        assert_eq!(f.upper()[(1, 0)], 0.0);
        assert!((f.upper()[(1, 1)] - 1.0).abs() < 1e-15);
        assert!((f.lower()[(1, 0)] - 2.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn factorize_zeroes_subdiagonal_explicitly() {
        let a = Matrix::from_rows(
            3,
            3,
            &[2.0_f64, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0],
        );
        let f = a.factorize(Pivoting::None).unwrap();
        for i in 0..3 {
            for j in 0..i {
                assert_eq!(f.upper()[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn reconstructs_permuted_input() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 1.0, 3.0, 1.0, 9.0,
                2.0,
            ],
        );
        let f = a.factorize(Pivoting::Partial).unwrap();

        // L·U == P·A, element by element
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    let l_ik = if k > i { 0.0 } else { f.lower()[(i, k)] };
                    let u_kj = if k > j { 0.0 } else { f.upper()[(k, j)] };
                    sum += l_ik * u_kj;
                }
                let expected = a[(f.permutation()[i], j)];
                assert!(
                    (sum - expected).abs() < 1e-12,
                    "LU[({},{})] = {}, PA = {}",
                    i,
                    j,
                    sum,
                    expected
                );
            }
        }
    }

    #[test]
    fn exchange_keeps_structures_aligned() {
        // Engineered so step 0 keeps row 0 and step 1 swaps rows 1 and 2:
        // after eliminating column 0, column 1 holds 5/3 (row 1) and
        // 22/3 (row 2).
        let a = Matrix::from_rows(
            3,
            3,
            &[6.0_f64, 1.0, 1.0, 2.0, 2.0, 5.0, 4.0, 8.0, 7.0],
        );
        let f = a.factorize(Pivoting::Partial).unwrap();
        assert_eq!(f.permutation(), &[0, 2, 1]);

        // The filled multipliers moved with their rows
        assert!((f.lower()[(1, 0)] - 2.0 / 3.0).abs() < 1e-15);
        assert!((f.lower()[(2, 0)] - 1.0 / 3.0).abs() < 1e-15);

        // L·U must match A under the final ordering; a partial swap of
        // only one structure would break this.
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    let l_ik = if k > i { 0.0 } else { f.lower()[(i, k)] };
                    let u_kj = if k > j { 0.0 } else { f.upper()[(k, j)] };
                    sum += l_ik * u_kj;
                }
                assert!((sum - a[(f.permutation()[i], j)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn singular_without_pivoting() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(
            a.factorize(Pivoting::None).unwrap_err(),
            Error::Singular
        );
    }

    #[test]
    fn singular_with_pivoting() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        assert_eq!(
            a.factorize(Pivoting::Partial).unwrap_err(),
            Error::Singular
        );
    }

    #[test]
    fn zero_leading_pivot_without_pivoting() {
        let a = Matrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
        assert_eq!(a.factorize(Pivoting::None).unwrap_err(), Error::Singular);
        // Pivoting rescues the same matrix
        assert!(a.factorize(Pivoting::Partial).is_ok());
    }

    #[test]
    fn factorize_1x1() {
        let a = Matrix::from_rows(1, 1, &[4.0_f64]);
        let f = a.factorize(Pivoting::Partial).unwrap();
        assert_eq!(f.upper()[(0, 0)], 4.0);
        assert_eq!(f.lower()[(0, 0)], 1.0);
        assert_eq!(f.permutation(), &[0]);
    }

    #[test]
    fn det_2x2() {
        let a = Matrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
        let f = a.factorize(Pivoting::Partial).unwrap();
        assert!((f.det() - (-14.0)).abs() < 1e-12);
    }

    #[test]
    fn det_3x3() {
        let a = Matrix::from_rows(
            3,
            3,
            &[6.0_f64, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0],
        );
        let f = a.factorize(Pivoting::Partial).unwrap();
        assert!((f.det() - (-306.0)).abs() < 1e-10);
    }
}
