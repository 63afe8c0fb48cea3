//! Remote gateway client
//!
//! A single shared client issues every query and mutation against one
//! GraphQL endpoint. The `data` map of a response is keyed by the operation's
//! result name; callers unwrap exactly that key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::codec::Variables;
use crate::error::ClientError;

mod http;
mod operation;

pub use http::HttpGateway;
pub use operation::{Operation, OperationKind, Param, Shape, Transport};

/// One error entry of a GraphQL response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Structured rejection carrying the server's response body
#[derive(Debug, Clone, PartialEq)]
pub struct ServerError {
    pub status: Option<u16>,
    pub errors: Vec<GraphQLError>,
    pub body: Value,
}

impl ServerError {
    pub fn from_body(status: Option<u16>, body: Value) -> Self {
        let errors = body
            .get("errors")
            .cloned()
            .and_then(|errors| serde_json::from_value::<Vec<GraphQLError>>(errors).ok())
            .unwrap_or_default();
        Self {
            status,
            errors,
            body,
        }
    }

    /// First server message, falling back to the HTTP status
    pub fn message(&self) -> String {
        if let Some(first) = self.errors.first() {
            return first.message.clone();
        }
        match self.status {
            Some(status) => format!("Request failed with status {}", status),
            None => "Request failed".to_string(),
        }
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request never produced a response
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Server error: {0}")]
    Server(ServerError),
}

/// A rendered request ready for transmission
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub operation_name: &'static str,
    pub kind: OperationKind,
    pub document: String,
    pub variables: Variables,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Execute a request and return the response's `data` map
    async fn execute(&self, request: GatewayRequest) -> Result<Value, GatewayError>;

    /// Attach or clear the bearer token sent with subsequent requests
    fn set_auth_token(&self, _token: Option<String>) {}
}

/// Take the payload stored under `key` out of a response's `data` map.
pub fn take_result(mut data: Value, key: &str) -> Result<Value, ClientError> {
    data.as_object_mut()
        .and_then(|map| map.remove(key))
        .ok_or_else(|| ClientError::MissingResult(key.to_string()))
}
