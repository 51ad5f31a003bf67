use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::adapters::workspace_store::StoreError;
use crate::runtime::workspace::{ObjectData, ObjectIdentity, ObjectInfo, SaveObjectsParams};

const RPC_VERSION: &str = "1.1";
const SERVICE_NAME: &str = "Workspace";
const MAX_BODY_SNIPPET: usize = 512;

/// Thin JSON-RPC 1.1 client for the workspace service.
#[derive(Debug)]
pub struct WorkspaceRpcClient {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl WorkspaceRpcClient {
    /// Create a client for the given workspace endpoint (e.g. `https://kbase.us/services/ws`).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                StoreError::Transport(format!("failed to build HTTP client: {error}"))
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn get_objects(
        &self,
        refs: &[ObjectIdentity],
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectData>, StoreError> {
        let params = serde_json::to_value(refs)
            .map_err(|error| StoreError::Protocol(format!("failed to encode refs: {error}")))?;
        let result = self.call("get_objects", params, auth_token).await?;
        decode_result(result, "get_objects")
    }

    pub async fn save_objects(
        &self,
        params: &SaveObjectsParams,
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectInfo>, StoreError> {
        let params = serde_json::to_value(params).map_err(|error| {
            StoreError::Protocol(format!("failed to encode save parameters: {error}"))
        })?;
        let result = self.call("save_objects", params, auth_token).await?;
        decode_result(result, "save_objects")
    }

    /// Invoke `Workspace.<method>` with a single positional argument and return
    /// the first element of the `result` array.
    pub async fn call(
        &self,
        method: &str,
        params: Value,
        auth_token: Option<&str>,
    ) -> Result<Value, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = rpc_request_body(method, params, id);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = auth_token.filter(|token| !token.trim().is_empty()) {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request
            .send()
            .await
            .map_err(|error| StoreError::Transport(format!("{SERVICE_NAME}.{method}: {error}")))?;
        let status = response.status();
        let text = response.text().await.map_err(|error| {
            StoreError::Transport(format!("failed to read response body: {error}"))
        })?;

        // The workspace reports JSON-RPC errors with a 500 status, so the body
        // is decoded before the status is considered.
        match parse_rpc_response(&text) {
            Err(StoreError::Protocol(_)) if !status.is_success() => {
                let snippet = body_snippet(&text);
                Err(StoreError::Transport(format!("HTTP {status}: {snippet}")))
            }
            other => other,
        }
    }
}

pub fn rpc_request_body(method: &str, params: Value, id: u64) -> Value {
    json!({
        "version": RPC_VERSION,
        "method": format!("{SERVICE_NAME}.{method}"),
        "params": [params],
        "id": id.to_string(),
    })
}

pub fn parse_rpc_response(body: &str) -> Result<Value, StoreError> {
    let envelope: Value = serde_json::from_str(body).map_err(|error| {
        let snippet = body_snippet(body);
        StoreError::Protocol(format!("response is not JSON ({error}): {snippet}"))
    })?;

    if let Some(error) = envelope.get("error").filter(|error| !error.is_null()) {
        return Err(remote_error(error));
    }

    match envelope.get("result") {
        Some(Value::Array(values)) => values
            .first()
            .cloned()
            .ok_or_else(|| StoreError::Protocol("result array is empty".to_string())),
        Some(_) => Err(StoreError::Protocol("result must be a JSON array".to_string())),
        None => Err(StoreError::Protocol("response carries neither result nor error".to_string())),
    }
}

fn remote_error(error: &Value) -> StoreError {
    let text = |key: &str| error.get(key).and_then(Value::as_str).map(str::to_string);
    StoreError::Remote {
        name: text("name").unwrap_or_else(|| "JSONRPCError".to_string()),
        code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
        message: text("message").unwrap_or_else(|| error.to_string()),
        detail: text("error"),
    }
}

fn decode_result<T: DeserializeOwned>(result: Value, method: &str) -> Result<T, StoreError> {
    serde_json::from_value(result)
        .map_err(|error| StoreError::Protocol(format!("malformed {method} result: {error}")))
}

fn body_snippet(body: &str) -> &str {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((cut, _)) => &trimmed[..cut],
        None => trimmed,
    }
}
