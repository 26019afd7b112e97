//! LU factorization with partial pivoting and the inverse pipeline
//! built on it.
//!
//! [`LuFactors`] holds the result of triangularization: a unit
//! lower-triangular factor in ragged storage ([`UnitLower`]), the
//! upper-triangular working matrix, and the row permutation applied by
//! pivoting. [`invert_with`] drives the full pipeline — one
//! factorization, one forward+backward solve per identity column, a
//! per-column residual check — and reports per-phase timings through an
//! injected [`Clock`](crate::clock::Clock).

pub(crate) mod factor;
pub(crate) mod invert;
pub(crate) mod lower;
pub(crate) mod residual;
pub(crate) mod solve;

pub use factor::LuFactors;
pub use invert::{invert_with, Inversion, Timings};
pub use lower::UnitLower;
pub use residual::residual_sum_squares;

/// Row-exchange strategy used during triangularization.
///
/// Under [`Pivoting::Partial`] each elimination step first moves the row
/// with the largest candidate entry of the current column into pivot
/// position. [`Pivoting::None`] leaves rows where they are, which is
/// faster but fails on matrices that need reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pivoting {
    /// Select the pivot row by scanning the current column (default).
    #[default]
    Partial,
    /// Use the current step row unconditionally.
    None,
}
