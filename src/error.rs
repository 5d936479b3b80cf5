//! Infrastructure error type.

use std::fmt;
use std::net::SocketAddr;

/// The error type returned by [`Server::serve`](crate::Server::serve).
///
/// Bad operands never show up here; they are 400 responses, see
/// [`CalcError`](crate::CalcError). This type covers the process-level
/// failures: the port is taken, the listener dies.
#[derive(Debug)]
pub enum Error {
    /// The listener could not be bound.
    Bind { addr: SocketAddr, source: std::io::Error },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, source } => write!(f, "failed to bind {addr}: {source}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
