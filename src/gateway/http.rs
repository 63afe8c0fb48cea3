//! reqwest-backed gateway

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::RwLock;
use std::time::Duration;

use super::{Gateway, GatewayError, GatewayRequest, ServerError};
use crate::config::Config;

pub struct HttpGateway {
    endpoint: String,
    client: Client,
    auth_token: RwLock<Option<String>>,
}

impl HttpGateway {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    timeout_secs = timeout.as_secs(),
                    "Failed to build HTTP client, falling back to defaults without timeout"
                );
                Client::new()
            });

        Self {
            endpoint,
            client,
            auth_token: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gateway_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .map(|token| token.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn execute(&self, request: GatewayRequest) -> Result<Value, GatewayError> {
        let payload = json!({
            "query": request.document,
            "variables": request.variables,
            "operationName": request.operation_name,
        });

        let mut builder = self.client.post(&self.endpoint).json(&payload);
        if let Some(token) = self.auth_token() {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(
            operation = request.operation_name,
            kind = request.kind.as_str(),
            "Sending gateway request"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

        classify_response(status, body)
    }

    fn set_auth_token(&self, token: Option<String>) {
        if let Ok(mut current) = self.auth_token.write() {
            *current = token;
        }
    }
}

/// Split a raw response into its `data` map or a structured server error.
pub(crate) fn classify_response(status: u16, mut body: Value) -> Result<Value, GatewayError> {
    let has_errors = body
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| !errors.is_empty())
        .unwrap_or(false);

    if !(200..300).contains(&status) || has_errors {
        return Err(GatewayError::Server(ServerError::from_body(
            Some(status),
            body,
        )));
    }

    Ok(body
        .as_object_mut()
        .and_then(|map| map.remove("data"))
        .unwrap_or(Value::Null))
}
