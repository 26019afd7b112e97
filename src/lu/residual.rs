use crate::error::Error;
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

/// Per-column residual of a computed inverse: for each column `c`,
/// the sum of squares of `A·inverse[:,c] − e_c`.
///
/// `a` must be the original matrix, not the factored working copy — the
/// check is only meaningful against the pre-elimination values. The
/// reported value is the squared L2 norm; callers wanting the norm
/// itself take the square root per entry.
///
/// ```
/// use luinv::{residual_sum_squares, Matrix};
///
/// let a = Matrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
/// let inv = a.inverse().unwrap();
/// let r = residual_sum_squares(&a, &inv).unwrap();
/// assert!(r[0] < 1e-24);
/// assert!(r[1] < 1e-24);
/// ```
pub fn residual_sum_squares<T: FloatScalar>(
    a: &Matrix<T>,
    inverse: &Matrix<T>,
) -> Result<Vector<T>, Error> {
    assert!(a.is_square(), "residual check requires a square matrix");
    assert_eq!(
        (a.nrows(), a.ncols()),
        (inverse.nrows(), inverse.ncols()),
        "inverse dimensions must match the original matrix",
    );
    let n = a.nrows();
    let mut norms = Vector::try_zeros(n)?;

    for col in 0..n {
        let mut acc = T::zero();
        for row in 0..n {
            let mut dot = T::zero();
            for k in 0..n {
                dot = dot + a[(row, k)] * inverse[(k, col)];
            }
            let r = if row == col { dot - T::one() } else { dot };
            acc = acc + r * r;
        }
        norms[col] = acc;
    }

    Ok(norms)
}
