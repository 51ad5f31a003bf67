use serde_json::Value;

use crate::adapters::workspace_store::WorkspaceStore;
use crate::handlers::gateway::{
    extract_auth_token, extract_provenance, normalize_apigw_event, service_error_response,
    success_response, validation_error_response, ApiGatewayResponse,
};
use crate::runtime::contract::FilterParams;
use crate::service::ContigFilterService;

pub fn handle_filter_event<S: WorkspaceStore>(
    event: Value,
    service: &ContigFilterService<S>,
) -> ApiGatewayResponse {
    let payload = match normalize_apigw_event(&event) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    let auth_token = extract_auth_token(&event, &payload);
    let provenance = match extract_provenance(&payload) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    let params = match serde_json::from_value::<FilterParams>(payload) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&format!("Malformed request: {error}")),
    };

    match service.filter_contigs(params, auth_token.as_deref(), provenance) {
        Ok(result) => success_response(200, result),
        Err(error) => service_error_response(&error),
    }
}
