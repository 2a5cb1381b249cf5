//! Error taxonomy shared by all remote storage services.

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Failures surfaced by a [`RemoteStorageService`](crate::RemoteStorageService).
///
/// Services never retry; transient-failure handling belongs to the HTTP
/// layer underneath.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The provider rejected the stored access token.
    #[error("access token rejected by provider")]
    Unauthorized,

    /// The provider answered with a non-success status. Carries the raw
    /// response body for diagnostics.
    #[error("remote API error (status {status}): {body}")]
    Remote { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider's response could not be decoded.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The operation is not offered by this service.
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),

    /// The request was rejected before any network I/O was attempted.
    #[error("invalid request: {0}")]
    Validation(&'static str),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

impl From<BridgeError> for ServiceError {
    fn from(error: BridgeError) -> Self {
        ServiceError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ServiceError::Remote {
            status: 404,
            body: "File not found".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "remote API error (status 404): File not found"
        );
    }

    #[test]
    fn test_bridge_error_conversion() {
        let bridge = BridgeError::OperationFailed("connection reset".to_string());
        let service: ServiceError = bridge.into();

        assert!(matches!(service, ServiceError::Transport(_)));
        assert!(service.to_string().contains("connection reset"));
    }
}
