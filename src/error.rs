use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use crate::hash::Digest;

/// Every failure is fatal: nothing is recovered internally, errors propagate
/// up to the binary's top-level handler which prints them and exits non-zero.
#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("{path}: {source}")]
    Format { path: PathBuf, source: FormatError },

    #[error("could not read the monotonic clock: {0}")]
    Clock(io::Error),

    #[error("unexpected digest of file {path}\nExpected: {expected}\nActual:   {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: Digest,
        actual: Digest,
    },
}

impl BenchError {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("manifest is empty")]
    Empty,

    #[error("manifest does not end with a NUL sentinel (expected the output of sha256sum with -z flag)")]
    MissingSentinel,

    #[error("line {index}: incomplete manifest line")]
    TruncatedLine { index: usize },

    #[error("line {index}: {source}")]
    InvalidDigest {
        index: usize,
        source: ParseDigestError,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ParseDigestError {
    #[error("invalid digest length")]
    InvalidLength,

    #[error("invalid digest format")]
    InvalidFormat,

    #[error(transparent)]
    IntError(#[from] ParseIntError),
}
