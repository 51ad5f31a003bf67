use serde_json::{json, Value};

use crate::handlers::gateway::{
    normalize_apigw_event, service_error_response, success_response, validation_error_response,
    ApiGatewayResponse,
};
use crate::service::run_trimmomatic;

pub fn handle_trimmomatic_event(event: Value) -> ApiGatewayResponse {
    let payload = match normalize_apigw_event(&event) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    match run_trimmomatic(&payload) {
        Ok(report) => success_response(200, json!({ "report": report })),
        Err(error) => service_error_response(&error),
    }
}
