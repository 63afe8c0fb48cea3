//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use motormart::codec::{JwtCodec, PayloadCodec, SEALED_KEY};
use motormart::gateway::{Gateway, GatewayError, GatewayRequest, ServerError};
use motormart::storage::MemoryStore;
use motormart::MarketClient;

pub const TEST_SECRET: &str = "integration-test-secret";

type Scripted = (Option<String>, Result<Value, GatewayError>);

/// Gateway answering from a queue of canned responses and recording every
/// request it receives.
///
/// A response queued with `respond` only answers the operation it names;
/// rejections and transport failures answer whichever request comes next.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<GatewayRequest>>,
    token: Mutex<Option<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful response carrying `value` under `key`
    pub fn respond(&self, key: &str, value: Value) {
        self.queue(Some(key.to_string()), Ok(json!({ key: value })));
    }

    pub fn reject(&self, message: &str) {
        self.push(Err(GatewayError::Server(ServerError::from_body(
            Some(200),
            json!({ "data": null, "errors": [{ "message": message }] }),
        ))));
    }

    pub fn fail_transport(&self, message: &str) {
        self.push(Err(GatewayError::Transport(message.to_string())));
    }

    pub fn push(&self, response: Result<Value, GatewayError>) {
        self.queue(None, response);
    }

    fn queue(&self, operation: Option<String>, response: Result<Value, GatewayError>) {
        self.responses.lock().unwrap().push_back((operation, response));
    }

    pub fn calls(&self) -> Vec<GatewayRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> GatewayRequest {
        self.calls().pop().expect("no gateway call recorded")
    }

    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn execute(&self, request: GatewayRequest) -> Result<Value, GatewayError> {
        let operation = request.operation_name;
        self.calls.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        let position = responses
            .iter()
            .position(|(key, _)| key.as_deref().map_or(true, |key| key == operation));
        match position.and_then(|i| responses.remove(i)) {
            Some((_, response)) => response,
            None => Err(GatewayError::Transport(format!(
                "no scripted response for {}",
                operation
            ))),
        }
    }

    fn set_auth_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

pub fn codec() -> Arc<JwtCodec> {
    Arc::new(JwtCodec::new(TEST_SECRET))
}

/// Open the sealed payload of a recorded request
pub fn unseal(request: &GatewayRequest) -> Value {
    let token = request.variables[SEALED_KEY]
        .as_str()
        .expect("request is not sealed");
    codec().decode(token).unwrap()
}

pub fn client_with(gateway: Arc<ScriptedGateway>) -> MarketClient {
    MarketClient::new(gateway, codec(), Arc::new(MemoryStore::new()))
}

/// A connection envelope around `nodes`
pub fn connection(nodes: Vec<Value>, total_count: u64, has_next_page: bool) -> Value {
    let edges: Vec<Value> = nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| json!({ "cursor": format!("c{}", i), "node": node }))
        .collect();
    json!({
        "edges": edges,
        "pageInfo": { "hasNextPage": has_next_page, "hasPreviousPage": false },
        "totalCount": total_count
    })
}
