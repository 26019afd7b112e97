/// Errors from the factorization / solve / inversion pipeline.
///
/// Both kinds are fatal for the current solve: no partial factor or
/// partial inverse is ever returned alongside an error, and a failed
/// run's buffers must not be reused.
///
/// ```
/// use luinv::{Error, Matrix, Pivoting};
///
/// let singular = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// assert_eq!(
///     singular.factorize(Pivoting::None).unwrap_err(),
///     Error::Singular,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A zero pivot was encountered during elimination or during a
    /// triangular solve.
    Singular,
    /// Heap allocation for a working matrix or vector failed.
    Allocation,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Singular => write!(f, "matrix is singular"),
            Error::Allocation => write!(f, "buffer allocation failed"),
        }
    }
}

impl std::error::Error for Error {}
