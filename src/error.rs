//! The crate's single fallible-operation error type (component M).
//!
//! A hand-rolled enum with manual `Display`/`Error` impls, in the style of
//! the teacher crate's `export::ExportError` (referenced from
//! `Database::export`) — this crate has no `thiserror`/`anyhow` dependency,
//! matching the teacher's own footprint.

use std::fmt;
use std::io;

/// Everything that can make a tangle run fail.
#[derive(Debug)]
pub enum TangleError {
    /// A malformed fence, unterminated block, or bad `#+NAME:` syntax.
    Parse {
        file: String,
        line: u64,
        message: String,
    },
    /// Failure opening/reading an input or writing an output file.
    Io(io::Error),
    /// A reference could not be resolved, and `warnings = error` was set.
    UnresolvedReference {
        name: String,
        file: String,
        line: u64,
    },
    /// One or more blocks were never reached, and `warnings = error` was set.
    UnusedBlock {
        name: String,
        file: String,
        line: u64,
    },
}

impl fmt::Display for TangleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TangleError::Parse {
                file,
                line,
                message,
            } => write!(f, "{file}:{line}: {message}"),
            TangleError::Io(e) => write!(f, "I/O error: {e}"),
            TangleError::UnresolvedReference { name, file, line } => write!(
                f,
                "{file}:{line}: unresolved reference to block '{name}'"
            ),
            TangleError::UnusedBlock { name, file, line } => write!(
                f,
                "{file}:{line}: block '{name}' was never referenced"
            ),
        }
    }
}

impl std::error::Error for TangleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TangleError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TangleError {
    fn from(e: io::Error) -> Self {
        TangleError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, TangleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_formats_with_location() {
        let err = TangleError::Parse {
            file: "a.org".to_string(),
            line: 3,
            message: "expected ':'".to_string(),
        };
        assert_eq!(err.to_string(), "a.org:3: expected ':'");
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: TangleError = io_err.into();
        assert_matches::assert_matches!(err, TangleError::Io(_));
    }
}
