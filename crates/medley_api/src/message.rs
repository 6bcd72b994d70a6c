//! Acknowledgement and error bodies shared by every mutation endpoint.

use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by every write endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Human-readable outcome, e.g. "Started scanning /media/music".
    #[serde(default)]
    pub message: String,
}

impl Message {
    /// Creates an acknowledgement with the given text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Structured error body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Failure detail, e.g. "path not found".
    pub detail: String,
}
