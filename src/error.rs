//! Custom errors and results.

use std::error;
use std::fmt;
use std::io;

/// The kinds of errors that can happen while building or running a
/// delta-debugging reduction.
#[derive(Debug)]
pub enum Error {
    /// Two `Configuration`s (or a `Configuration` and a cache) referred to
    /// different `Input`s.
    InputMismatch,

    /// A `Configuration` was constructed from an index sequence that was
    /// not sorted and duplicate-free.
    BadIndices,

    /// A cache lookup for a configuration that has no stored outcome.
    KeyMissing,

    /// The oracle failed while evaluating a configuration.
    OracleFailure(Box<dyn error::Error + Send + Sync + 'static>),

    /// A parser was asked to produce a tree for a format it does not
    /// implement.
    UnsupportedFormat(String),

    /// An IO error, surfaced by the file-loading helpers.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InputMismatch => write!(f, "configuration does not match input"),
            Error::BadIndices => write!(f, "configuration indices are not sorted and unique"),
            Error::KeyMissing => write!(f, "configuration not found in cache"),
            Error::OracleFailure(ref e) => write!(f, "oracle failed: {}", e),
            Error::UnsupportedFormat(ref fmt_name) => {
                write!(f, "unsupported format: {}", fmt_name)
            }
            Error::Io(ref e) => fmt::Display::fmt(e, f),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::OracleFailure(ref e) => Some(e.as_ref()),
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// A `Result` whose `Err` variant is `delta_debugging::error::Error`.
pub type Result<T> = ::std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::InputMismatch.to_string(),
            "configuration does not match input"
        );
        assert_eq!(
            Error::BadIndices.to_string(),
            "configuration indices are not sorted and unique"
        );
        assert_eq!(
            Error::KeyMissing.to_string(),
            "configuration not found in cache"
        );
        assert_eq!(
            Error::UnsupportedFormat("elf".to_string()).to_string(),
            "unsupported format: elf"
        );
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "nope");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
