use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while writing or checking fixtures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid normal distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    #[error("{}: header {header:?} is not a record count", .path.display())]
    Header { path: PathBuf, header: String },

    #[error("{}:{line}: {message}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}: header declares {declared} records but body holds {found}", .path.display())]
    CountMismatch {
        path: PathBuf,
        declared: usize,
        found: usize,
    },

    #[error("{}:{line}: coordinate {value} outside [{min}, {max}]", .path.display())]
    OutOfRange {
        path: PathBuf,
        line: usize,
        value: i64,
        min: i32,
        max: i32,
    },
}
