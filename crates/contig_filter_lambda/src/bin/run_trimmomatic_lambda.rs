use contig_filter_lambda::handlers::gateway::ApiGatewayResponse;
use contig_filter_lambda::handlers::trimmomatic::handle_trimmomatic_event;
use contig_filter_lambda::logging::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_trimmomatic_event(event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
