//! # luinv
//!
//! Dense matrix inversion by LU factorization with optional partial
//! pivoting: in-place Gaussian elimination building a unit
//! lower-triangular factor and an upper-triangular working matrix, then
//! one forward and one backward substitution per identity column to
//! assemble the inverse. Each run reports a per-column residual check
//! and the elapsed time of every phase.
//!
//! ## Quick start
//!
//! ```
//! use luinv::clock::MonotonicClock;
//! use luinv::{invert_with, Matrix, Pivoting};
//!
//! let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
//! let run = invert_with(&a, Pivoting::Partial, &MonotonicClock::new()).unwrap();
//!
//! // inverse ≈ [[-0.5, 0.5], [1.0, -0.6667]]
//! assert!((run.inverse[(1, 0)] - 1.0).abs() < 1e-12);
//! // residual sums of squares per column, against the original matrix
//! assert!(run.residual[0] < 1e-24);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — [`Matrix`] (row-major heap storage, runtime
//!   dimensions) and [`Vector`]. Indexing, row access and swaps, the
//!   few operators the residual check and tests need.
//!
//! - [`lu`] — the pipeline: [`LuFactors`] (triangularization with a
//!   [`Pivoting`] flag, ragged [`UnitLower`] factor, permutation
//!   tracking), triangular solves behind [`LuFactors::solve`], inverse
//!   assembly via [`invert_with`], and [`residual_sum_squares`].
//!
//! - [`clock`] — the injected [`Clock`](clock::Clock) capability that
//!   times the phases; [`MonotonicClock`](clock::MonotonicClock) wraps
//!   `std::time::Instant`.
//!
//! - [`read`] — matrix ingestion from whitespace-separated text.
//!
//! ## Errors
//!
//! Every fatal condition reaches the caller as an [`Error`]:
//! [`Error::Singular`] for a zero pivot during elimination or either
//! substitution pass, [`Error::Allocation`] for a failed working-buffer
//! allocation. A failed solve never yields a partial factor or inverse.

pub mod clock;
mod error;
pub mod lu;
pub mod matrix;
pub mod read;
pub mod traits;

pub use clock::MonotonicClock;
pub use error::Error;
pub use lu::{invert_with, residual_sum_squares, Inversion, LuFactors, Pivoting, Timings, UnitLower};
pub use matrix::{Matrix, Vector};
pub use traits::{FloatScalar, Scalar};
