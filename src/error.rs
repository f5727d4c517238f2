use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input is empty, expected the number of elements first")]
    MissingCount,
    #[error("invalid element count: {0:?}")]
    InvalidCount(String),
    #[error("invalid value {token:?} at element {index}")]
    InvalidValue { index: usize, token: String },
    #[error("expected {expected} values, found only {found}")]
    Truncated { expected: usize, found: usize },
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("I/O failure on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("zip archive failure on {path:?}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error(transparent)]
    Stream(#[from] io::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Error::Archive {
            path: path.into(),
            source,
        }
    }
}
