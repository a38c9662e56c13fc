use std::fmt;

/// Result type for conduit-providers operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer.
#[derive(Debug)]
pub enum Error {
    /// IO operation failed (reading the child's stdout, etc.).
    Io(std::io::Error),

    /// Requested provider name has no registered dialect.
    UnknownProvider(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::UnknownProvider(name) => write!(f, "unknown provider: {}", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::UnknownProvider(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
