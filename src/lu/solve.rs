use crate::error::Error;
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

use super::factor::LuFactors;
use super::lower::UnitLower;

/// Forward substitution: solve `L·y = P·b` for `y`.
///
/// `perm` is the row permutation tracked during factorization; position
/// `i` of the triangularized system reads `b[perm[i]]`, which keeps the
/// caller's right-hand side aligned with the pivot exchanges. The factor
/// is unit-triangular so the diagonal division is by 1 for any
/// well-formed `L`, but a zero diagonal is still rejected rather than
/// dividing through.
pub(crate) fn forward_substitute<T: FloatScalar>(
    lower: &UnitLower<T>,
    perm: &[usize],
    b: &[T],
    y: &mut [T],
) -> Result<(), Error> {
    let n = lower.n();
    for i in 0..n {
        let mut sum = b[perm[i]];
        let row = lower.row(i);
        for j in 0..i {
            sum = sum - row[j] * y[j];
        }
        let diag = row[i];
        if diag == T::zero() {
            return Err(Error::Singular);
        }
        y[i] = sum / diag;
    }
    Ok(())
}

/// Backward substitution: solve `U·x = y` for `x`.
///
/// A zero diagonal entry means `U` is singular.
pub(crate) fn back_substitute<T: FloatScalar>(
    upper: &Matrix<T>,
    y: &[T],
    x: &mut [T],
) -> Result<(), Error> {
    let n = upper.nrows();
    for i in (0..n).rev() {
        let mut sum = y[i];
        let row = upper.row(i);
        for j in (i + 1)..n {
            sum = sum - row[j] * x[j];
        }
        let diag = row[i];
        if diag == T::zero() {
            return Err(Error::Singular);
        }
        x[i] = sum / diag;
    }
    Ok(())
}

impl<T: FloatScalar> LuFactors<T> {
    /// Solve `A·x = b` for `x` using the stored factors: one forward
    /// pass against the permuted right-hand side, one backward pass.
    ///
    /// ```
    /// use luinv::{Matrix, Pivoting, Vector};
    ///
    /// let a = Matrix::from_rows(3, 3, &[
    ///     2.0_f64, 1.0, -1.0,
    ///     -3.0, -1.0, 2.0,
    ///     -2.0, 1.0, 2.0,
    /// ]);
    /// let f = a.factorize(Pivoting::Partial).unwrap();
    /// let x = f.solve(&Vector::from_slice(&[8.0, -11.0, -3.0])).unwrap();
    /// assert!((x[0] - 2.0).abs() < 1e-12);
    /// assert!((x[1] - 3.0).abs() < 1e-12);
    /// assert!((x[2] - (-1.0)).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, Error> {
        let n = self.n();
        assert_eq!(b.len(), n, "rhs length mismatch");
        let mut y = Vector::try_zeros(n)?;
        let mut x = Vector::try_zeros(n)?;
        forward_substitute(
            self.lower(),
            self.permutation(),
            b.as_slice(),
            y.as_mut_slice(),
        )?;
        back_substitute(self.upper(), y.as_slice(), x.as_mut_slice())?;
        Ok(x)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Solve `A·x = b` via LU factorization with partial pivoting.
    ///
    /// ```
    /// use luinv::{Matrix, Vector};
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
    /// let x = a.solve(&Vector::from_slice(&[4.0, 11.0])).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, Error> {
        self.factorize(super::Pivoting::Partial)?.solve(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lu::Pivoting;

    /// Deterministic strictly-lower fill for round-trip tests.
    fn test_lower(n: usize) -> UnitLower<f64> {
        let mut l = UnitLower::identity(n, 0.0_f64);
        for i in 0..n {
            for j in 0..i {
                l[(i, j)] = ((i * n + j) as f64 * 0.37).sin();
            }
        }
        l
    }

    #[test]
    fn forward_round_trip() {
        // Build b = L·y from a known y, then recover y
        let n = 6;
        let l = test_lower(n);
        let y_expected: Vec<f64> = (0..n).map(|i| (i as f64 + 1.0) * 0.5).collect();

        let mut b = vec![0.0; n];
        for i in 0..n {
            let row = l.row(i);
            for j in 0..=i {
                b[i] += row[j] * y_expected[j];
            }
        }

        let perm: Vec<usize> = (0..n).collect();
        let mut y = vec![0.0; n];
        forward_substitute(&l, &perm, &b, &mut y).unwrap();
        for i in 0..n {
            assert!((y[i] - y_expected[i]).abs() < 1e-12, "y[{}]", i);
        }
    }

    #[test]
    fn forward_applies_permutation() {
        let l = UnitLower::identity(3, 0.0_f64);
        let perm = [2usize, 0, 1];
        let b = [10.0, 20.0, 30.0];
        let mut y = [0.0; 3];
        forward_substitute(&l, &perm, &b, &mut y).unwrap();
        assert_eq!(y, [30.0, 10.0, 20.0]);
    }

    #[test]
    fn backward_round_trip() {
        // Build y = U·x from a known x, then recover x
        let n = 5;
        let u = Matrix::from_fn(n, n, |i, j| {
            if j < i {
                0.0
            } else if j == i {
                2.0 + i as f64
            } else {
                ((i + 2 * j) as f64 * 0.29).cos()
            }
        });
        let x_expected: Vec<f64> = (0..n).map(|i| 1.0 - 0.25 * i as f64).collect();

        let mut y = vec![0.0; n];
        for i in 0..n {
            for j in i..n {
                y[i] += u[(i, j)] * x_expected[j];
            }
        }

        let mut x = vec![0.0; n];
        back_substitute(&u, &y, &mut x).unwrap();
        for i in 0..n {
            assert!((x[i] - x_expected[i]).abs() < 1e-12, "x[{}]", i);
        }
    }

    #[test]
    fn backward_zero_diagonal_is_singular() {
        let u = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 0.0, 0.0]);
        let y = [1.0, 1.0];
        let mut x = [0.0; 2];
        assert_eq!(
            back_substitute(&u, &y, &mut x).unwrap_err(),
            Error::Singular
        );
    }

    #[test]
    fn solve_verify_residual() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 1.0, 3.0, 1.0, 9.0,
                2.0,
            ],
        );
        let b = Vector::from_slice(&[10.0, 26.0, 13.0, 15.0]);
        let x = a.solve(&b).unwrap();

        // Check each row: sum_j(a[i][j] * x[j]) == b[i]
        for i in 0..4 {
            let mut row_sum = 0.0;
            for j in 0..4 {
                row_sum += a[(i, j)] * x[j];
            }
            assert!(
                (row_sum - b[i]).abs() < 1e-10,
                "residual[{}] = {}",
                i,
                row_sum - b[i]
            );
        }
    }

    #[test]
    fn solve_without_pivoting() {
        let a = Matrix::from_rows(2, 2, &[3.0_f64, 2.0, 1.0, 4.0]);
        let f = a.factorize(Pivoting::None).unwrap();
        let x = f.solve(&Vector::from_slice(&[7.0, 9.0])).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }
}
