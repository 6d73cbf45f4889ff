//! Error types for the test client framework.

use std::time::Duration;

use crate::DocClientError;

/// Errors from test server startup and lifecycle management.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum TestAppError {
    /// I/O failure while binding the listener or talking to the server.
    #[display("I/O error: {_0}")]
    IoError(std::io::Error),

    /// Client configuration or request failure.
    #[display("client error: {_0}")]
    ClientError(DocClientError),

    /// The server did not become healthy before the backoff gave up.
    #[from(ignore)]
    #[display("server failed to become healthy within {timeout:?}")]
    UnhealthyServer {
        /// The backoff ceiling that was exhausted.
        timeout: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = TestAppError::UnhealthyServer {
            timeout: Duration::from_secs(5),
        };
        assert_eq!(
            error.to_string(),
            "server failed to become healthy within 5s"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let error: TestAppError = io_error.into();
        assert!(matches!(error, TestAppError::IoError(_)));
    }
}
