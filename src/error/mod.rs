//! Centralized client error handling for motormart
//!
//! Every repository, session and wizard operation reports failures through
//! [`ClientError`]. Transport failures are fatal and expected to surface to the
//! caller unchanged; structured server rejections carry the server body so the
//! caller can render field-level messages.

use thiserror::Error;

use crate::codec::CodecError;
use crate::gateway::{GatewayError, ServerError};
use crate::storage::StorageError;
use crate::wizard::WizardError;

/// Client error type with stable error codes
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Request rejected: {0}")]
    Rejected(ServerError),

    #[error("Response is missing result field: {0}")]
    MissingResult(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("{entity} does not support {operation}")]
    Unsupported {
        entity: &'static str,
        operation: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Session error: {0}")]
    Session(String),
}

impl ClientError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "TRANSPORT",
            ClientError::Rejected(_) => "REJECTED",
            ClientError::MissingResult(_) => "MISSING_RESULT",
            ClientError::Decode(_) => "DECODE",
            ClientError::Codec(_) => "CODEC",
            ClientError::Unsupported { .. } => "UNSUPPORTED",
            ClientError::Storage(_) => "STORAGE",
            ClientError::Validation(_) => "VALIDATION",
            ClientError::Wizard(_) => "WIZARD",
            ClientError::Session(_) => "SESSION",
        }
    }

    /// Transport failures have no server response and are not handled by
    /// repositories.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// The structured server rejection, if any
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            ClientError::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Message recorded in a slice's `error` field and shown in toasts.
    pub fn message(&self) -> String {
        match self {
            ClientError::Rejected(err) => err.message(),
            other => other.to_string(),
        }
    }
}

impl From<GatewayError> for ClientError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(message) => ClientError::Transport(message),
            GatewayError::Server(server) => ClientError::Rejected(server),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(err: validator::ValidationErrors) -> Self {
        ClientError::Validation(err.to_string())
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ClientError::Transport("refused".to_string()).error_code(),
            "TRANSPORT"
        );
        assert_eq!(
            ClientError::MissingResult("vehicleById".to_string()).error_code(),
            "MISSING_RESULT"
        );
        assert_eq!(
            ClientError::Unsupported {
                entity: "Role",
                operation: "fetch_filtered".to_string()
            }
            .error_code(),
            "UNSUPPORTED"
        );
    }

    #[test]
    fn test_only_transport_is_fatal() {
        assert!(ClientError::Transport("reset".to_string()).is_fatal());
        assert!(!ClientError::Decode("bad".to_string()).is_fatal());

        let rejected = ClientError::from(GatewayError::Server(ServerError::from_body(
            Some(400),
            json!({ "errors": [{ "message": "Email already taken" }] }),
        )));
        assert!(!rejected.is_fatal());
        assert_eq!(rejected.message(), "Email already taken");
        assert!(rejected.server_error().is_some());
    }
}
