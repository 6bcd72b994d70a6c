//! Error types for the resource client.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors a remote operation can fail with.
///
/// Every transport- and server-side failure is normalized into this one
/// shape at the client boundary. Variants are plain data (no source
/// chaining) so snapshots can carry the last error alongside cached data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response reached the client: connection failure, DNS failure,
    /// or the per-call timeout ceiling exceeded.
    #[error("transport error: {message}")]
    Transport {
        /// What went wrong on the wire.
        message: String,
        /// True when the failure was the fixed per-call timeout.
        timeout: bool,
    },

    /// The server answered with a non-success status.
    #[error("server error ({status}){}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Server {
        /// HTTP status code.
        status: u16,
        /// Detail from the structured error body, when it parsed.
        detail: Option<String>,
    },

    /// The server answered 2xx but the body did not decode as the
    /// expected payload.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Creates a non-timeout transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    /// Creates a timeout transport error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timeout: true,
        }
    }

    /// Creates a server error with a detail message.
    pub fn server(status: u16, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: Some(detail.into()),
        }
    }

    /// True when the failure was the per-call timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { timeout: true, .. })
    }

    /// The server's structured detail message, when one was present.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = ClientError::server(404, "path not found");
        assert_eq!(err.to_string(), "server error (404): path not found");

        let err = ClientError::Server {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "server error (502)");
    }

    #[test]
    fn timeout_classification() {
        assert!(ClientError::timeout("deadline exceeded").is_timeout());
        assert!(!ClientError::transport("connection refused").is_timeout());
        assert!(!ClientError::server(500, "boom").is_timeout());
    }

    #[test]
    fn server_detail_accessor() {
        assert_eq!(
            ClientError::server(400, "bad path").server_detail(),
            Some("bad path")
        );
        assert_eq!(ClientError::transport("down").server_detail(), None);
    }
}
