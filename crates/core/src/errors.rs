use thiserror::Error;

use crate::models::filter::DataType;

/// Unified error type for the entire fund-dashboard-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport / Protocol ────────────────────────────────────────
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Service-level ───────────────────────────────────────────────
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // ── Client-side guards ──────────────────────────────────────────
    #[error("No {0} data loaded")]
    DatasetNotLoaded(DataType),

    #[error("Filter validation failed: {0}")]
    ValidationError(String),

    #[error("Required UI element is missing: {0}")]
    MissingElement(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl CoreError {
    /// The one-line text shown to the user in a notification banner.
    ///
    /// Service-provided messages are passed through verbatim; everything
    /// else uses the `Display` form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Service { message, .. } | CoreError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// True for failures where the request never produced a usable reply.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CoreError::Service { .. } | CoreError::Network(_) | CoreError::Deserialization(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Strip query parameters from URLs before the message reaches a banner.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
