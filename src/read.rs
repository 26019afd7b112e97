//! Matrix ingestion from whitespace-separated text.
//!
//! The inversion pipeline only needs a fully populated square buffer;
//! this module covers the common case of reading one from a stream:
//! `n * n` real values in row-major order, split on any whitespace,
//! optionally preceded by the dimension itself.

use std::io::{BufRead, Read};
use std::str::FromStr;

use log::debug;

use crate::matrix::Matrix;
use crate::traits::Scalar;

/// Errors from reading a matrix out of a text stream.
///
/// These are ingestion failures, not solver failures, so they are kept
/// apart from [`Error`](crate::Error).
#[derive(Debug)]
pub enum ReadError {
    /// The underlying reader failed.
    Io(std::io::Error),
    /// A token could not be parsed as a number.
    Malformed(String),
    /// The stream ended before `expected` values were read.
    Truncated { expected: usize, got: usize },
}

impl core::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "read failed: {}", e),
            ReadError::Malformed(token) => write!(f, "malformed value {:?}", token),
            ReadError::Truncated { expected, got } => {
                write!(f, "input ended after {} of {} values", got, expected)
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

/// Read an `n x n` matrix: `n * n` whitespace-separated values in
/// row-major order. Tokens past the last needed value are left unread.
///
/// ```
/// use luinv::read::read_matrix;
///
/// let text = "4 3\n6 3\n";
/// let a = read_matrix::<f64, _>(2, text.as_bytes()).unwrap();
/// assert_eq!(a[(1, 0)], 6.0);
/// ```
pub fn read_matrix<T, R>(n: usize, reader: R) -> Result<Matrix<T>, ReadError>
where
    T: Scalar + FromStr,
    R: BufRead,
{
    let total = n * n;
    let mut data = Vec::with_capacity(total);

    'lines: for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let value = token
                .parse::<T>()
                .map_err(|_| ReadError::Malformed(token.to_owned()))?;
            data.push(value);
            if data.len() == total {
                break 'lines;
            }
        }
    }

    if data.len() < total {
        return Err(ReadError::Truncated {
            expected: total,
            got: data.len(),
        });
    }

    debug!("read {n}x{n} matrix");
    Ok(Matrix::from_vec(n, n, data))
}

/// Read a matrix whose dimension leads the stream: first `n`, then the
/// `n * n` entries. Values may begin on the same line as the dimension.
pub fn read_sized_matrix<T, R>(mut reader: R) -> Result<Matrix<T>, ReadError>
where
    T: Scalar + FromStr,
    R: BufRead,
{
    let mut header = String::new();
    loop {
        header.clear();
        if reader.read_line(&mut header)? == 0 {
            return Err(ReadError::Truncated {
                expected: 1,
                got: 0,
            });
        }
        let trimmed = header.trim_start();
        if let Some(token) = trimmed.split_whitespace().next() {
            let n = token
                .parse::<usize>()
                .map_err(|_| ReadError::Malformed(token.to_owned()))?;
            // Keep any values that share the header line
            let rest = trimmed[token.len()..].to_owned();
            return read_matrix(n, std::io::Cursor::new(rest).chain(reader));
        }
    }
}
