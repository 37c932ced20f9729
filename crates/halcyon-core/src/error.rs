//! Error types for Halcyon.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using Halcyon's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the playback core.
#[derive(Error, Debug)]
pub enum Error {
    // Transport errors
    #[error("message channel unavailable: {0}")]
    ChannelUnavailable(String),

    // Engine errors
    #[error("engine rejected command: {0}")]
    Engine(String),

    // Contract errors
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // Generic errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true if this error means the host channel itself is gone,
    /// as opposed to a failure inside a command handler.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ChannelUnavailable(_))
    }
}

/// Structured application error crossing the host boundary.
///
/// Command handler failures are reported to the host as a
/// `(code, message, details)` triple instead of a raw fault, so the
/// channel itself stays usable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Optional extra payload for the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::ChannelUnavailable(_) => "channel-error",
            Error::Engine(_) => "engine-error",
            Error::InvalidArgument(_) => "invalid-argument",
            Error::Internal(_) => "internal-error",
        };
        Self::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_transport() {
        assert!(Error::ChannelUnavailable("closed".into()).is_transport());
        assert!(!Error::Engine("busy".into()).is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("bad index".into());
        assert_eq!(err.to_string(), "invalid argument: bad index");
    }

    #[test]
    fn test_api_error_from_error() {
        let api: ApiError = Error::ChannelUnavailable("host went away".into()).into();
        assert_eq!(api.code, "channel-error");
        assert!(api.message.contains("host went away"));
        assert!(api.details.is_none());
    }

    #[test]
    fn test_api_error_details_serde() {
        let api = ApiError::new("engine-error", "no track loaded")
            .with_details(serde_json::json!({"index": -1}));
        let json = serde_json::to_string(&api).unwrap();
        let back: ApiError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, api);
    }
}
