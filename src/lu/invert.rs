use log::debug;

use crate::clock::Clock;
use crate::error::Error;
use crate::matrix::{Matrix, Vector};
use crate::traits::FloatScalar;

use super::factor::LuFactors;
use super::residual::residual_sum_squares;
use super::solve::{back_substitute, forward_substitute};
use super::Pivoting;

/// Elapsed seconds per phase of an inversion run.
///
/// The solve phases are averaged over the n identity columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    /// Time spent in triangularization.
    pub factorize: f64,
    /// Mean forward-substitution time per column.
    pub forward_avg: f64,
    /// Mean backward-substitution time per column.
    pub backward_avg: f64,
}

/// Everything an inversion run hands to the caller: the assembled
/// inverse, the per-column residual sums of squares (computed against
/// the original matrix), and the phase timings.
#[derive(Debug)]
pub struct Inversion<T> {
    /// The assembled inverse matrix.
    pub inverse: Matrix<T>,
    /// Per-column Σ r² of `A·A⁻¹[:,c] − e_c`.
    pub residual: Vector<T>,
    /// Elapsed seconds per phase.
    pub timings: Timings,
}

/// Invert a square matrix and report residuals and phase timings.
///
/// Runs the triangularization once, then solves one forward+backward
/// pass per identity column, assembling the inverse column by column.
/// The injected `clock` brackets each phase; timings land in the
/// returned [`Inversion`]. On any failure no partial inverse escapes.
///
/// ```
/// use luinv::clock::MonotonicClock;
/// use luinv::{invert_with, Matrix, Pivoting};
///
/// let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
/// let run = invert_with(&a, Pivoting::Partial, &MonotonicClock::new()).unwrap();
///
/// assert!((run.inverse[(0, 0)] - (-0.5)).abs() < 1e-12);
/// assert!((run.inverse[(0, 1)] - 0.5).abs() < 1e-12);
/// assert!(run.residual[0] < 1e-24);
/// assert!(run.timings.factorize >= 0.0);
/// ```
pub fn invert_with<T: FloatScalar, C: Clock>(
    a: &Matrix<T>,
    pivoting: Pivoting,
    clock: &C,
) -> Result<Inversion<T>, Error> {
    let n = a.nrows();

    let t0 = clock.now();
    let factors = LuFactors::factorize(a, pivoting)?;
    let factorize_time = clock.now() - t0;

    let mut inverse = Matrix::try_zeros(n, n)?;
    let mut e = Vector::try_zeros(n)?;
    let mut y = Vector::try_zeros(n)?;
    let mut x = Vector::try_zeros(n)?;
    let mut forward_total = 0.0;
    let mut backward_total = 0.0;

    for col in 0..n {
        if col > 0 {
            e[col - 1] = T::zero();
        }
        e[col] = T::one();

        let t1 = clock.now();
        forward_substitute(
            factors.lower(),
            factors.permutation(),
            e.as_slice(),
            y.as_mut_slice(),
        )?;
        let t2 = clock.now();
        back_substitute(factors.upper(), y.as_slice(), x.as_mut_slice())?;
        forward_total += t2 - t1;
        backward_total += clock.now() - t2;

        inverse.set_col(col, x.as_slice());
    }

    let residual = residual_sum_squares(a, &inverse)?;
    let timings = Timings {
        factorize: factorize_time,
        forward_avg: forward_total / n as f64,
        backward_avg: backward_total / n as f64,
    };
    debug!(
        "inverted {n}x{n} matrix ({pivoting:?} pivoting): \
         factorize {:.3e}s, forward avg {:.3e}s, backward avg {:.3e}s",
        timings.factorize, timings.forward_avg, timings.backward_avg,
    );

    Ok(Inversion {
        inverse,
        residual,
        timings,
    })
}

impl<T: FloatScalar> LuFactors<T> {
    /// Assemble the inverse from the stored factors, one identity
    /// column at a time. Untimed; [`invert_with`] is the instrumented
    /// driver.
    pub fn inverse(&self) -> Result<Matrix<T>, Error> {
        let n = self.n();
        let mut inverse = Matrix::try_zeros(n, n)?;
        let mut e = Vector::try_zeros(n)?;
        let mut y = Vector::try_zeros(n)?;
        let mut x = Vector::try_zeros(n)?;

        for col in 0..n {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();

            forward_substitute(
                self.lower(),
                self.permutation(),
                e.as_slice(),
                y.as_mut_slice(),
            )?;
            back_substitute(self.upper(), y.as_slice(), x.as_mut_slice())?;

            inverse.set_col(col, x.as_slice());
        }

        Ok(inverse)
    }
}

impl<T: FloatScalar> Matrix<T> {
    /// Matrix inverse via LU factorization with partial pivoting.
    ///
    /// ```
    /// use luinv::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let a_inv = a.inverse().unwrap();
    /// let id = &a * &a_inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Matrix<T>, Error> {
        self.factorize(Pivoting::Partial)?.inverse()
    }
}
