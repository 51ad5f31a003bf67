use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ServiceError;

const TOKEN_SCHEMES: [&str; 2] = ["Bearer ", "OAuth "];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Unwrap an API Gateway proxy event into its JSON body. Bare request objects
/// (direct invocations) pass through unchanged.
pub fn normalize_apigw_event(event: &Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event.clone());
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            let parsed: Value = serde_json::from_str(text)
                .map_err(|error| format!("Malformed JSON body: {error}"))?;
            if parsed.is_object() {
                Ok(parsed)
            } else {
                Err("Request body must be a JSON object".to_string())
            }
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

/// Token from the `Authorization` header, falling back to a `token` field in
/// the request body. Scheme prefixes are stripped.
pub fn extract_auth_token(event: &Value, payload: &Value) -> Option<String> {
    let header_token = event
        .get("headers")
        .and_then(Value::as_object)
        .and_then(|headers| {
            headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                .and_then(|(_, value)| value.as_str())
        });

    header_token
        .or_else(|| payload.get("token").and_then(Value::as_str))
        .map(strip_token_scheme)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn strip_token_scheme(raw: &str) -> &str {
    let leading = raw.trim_start();
    TOKEN_SCHEMES
        .iter()
        .find_map(|scheme| {
            leading
                .get(..scheme.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
                .map(|_| leading[scheme.len()..].trim())
        })
        .unwrap_or_else(|| leading.trim_end())
}

pub fn extract_provenance(payload: &Value) -> Result<Vec<Value>, String> {
    match payload.get("provenance") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(actions)) => Ok(actions.clone()),
        Some(_) => Err("provenance must be a list of provenance actions".to_string()),
    }
}

pub fn validation_error_response(message: &str) -> ApiGatewayResponse {
    error_response(
        400,
        json!({
            "error": "validation_error",
            "message": message,
        }),
    )
}

pub fn service_error_response(error: &ServiceError) -> ApiGatewayResponse {
    error_response(
        error.status_code(),
        json!({
            "error": error.code(),
            "message": error.to_string(),
        }),
    )
}

pub fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: json!({"Content-Type": "application/json"}),
            body,
        },
        Err(error) => error_response(
            500,
            json!({
                "error": "serialization_error",
                "message": error.to_string(),
            }),
        ),
    }
}

pub fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: payload.to_string(),
    }
}
