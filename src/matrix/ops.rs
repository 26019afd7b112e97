use core::ops::{Mul, Sub};

use crate::traits::Scalar;

use super::vector::Vector;
use super::Matrix;

// ── Matrix multiplication ───────────────────────────────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.ncols(),
            rhs.nrows(),
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows(),
            self.ncols(),
            rhs.nrows(),
            rhs.ncols(),
        );
        let mut out = Matrix::zeros(self.nrows(), rhs.ncols(), T::zero());
        for i in 0..self.nrows() {
            for k in 0..self.ncols() {
                let a_ik = self[(i, k)];
                for j in 0..rhs.ncols() {
                    out[(i, j)] = out[(i, j)] + a_ik * rhs[(k, j)];
                }
            }
        }
        out
    }
}

impl<T: Scalar> Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        &self * &rhs
    }
}

// ── Matrix-vector product ───────────────────────────────────────────

impl<T: Scalar> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        assert_eq!(
            self.ncols(),
            rhs.len(),
            "dimension mismatch: {}x{} * vector of length {}",
            self.nrows(),
            self.ncols(),
            rhs.len(),
        );
        let mut out = Vector::zeros(self.nrows(), T::zero());
        for i in 0..self.nrows() {
            let row = self.row(i);
            let mut sum = T::zero();
            for j in 0..row.len() {
                sum = sum + row[j] * rhs[j];
            }
            out[i] = sum;
        }
        out
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            (self.nrows(), self.ncols()),
            (rhs.nrows(), rhs.ncols()),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows(),
            self.ncols(),
            rhs.nrows(),
            rhs.ncols(),
        );
        Matrix::from_fn(self.nrows(), self.ncols(), |i, j| {
            self[(i, j)] - rhs[(i, j)]
        })
    }
}

impl<T: Scalar> Sub<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;
    fn sub(self, rhs: Matrix<T>) -> Matrix<T> {
        &self - &rhs
    }
}
