use contig_filter_lambda::adapters::workspace_rpc::WorkspaceRpcClient;
use contig_filter_lambda::adapters::workspace_store::{StoreError, WorkspaceStore};
use contig_filter_lambda::config::ServiceConfig;
use contig_filter_lambda::handlers::filter::handle_filter_event;
use contig_filter_lambda::handlers::gateway::ApiGatewayResponse;
use contig_filter_lambda::logging::init_tracing;
use contig_filter_lambda::runtime::workspace::{
    ObjectData, ObjectIdentity, ObjectInfo, SaveObjectsParams,
};
use contig_filter_lambda::service::ContigFilterService;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

struct RpcWorkspaceStore {
    client: WorkspaceRpcClient,
}

impl WorkspaceStore for RpcWorkspaceStore {
    fn get_objects(
        &self,
        refs: &[ObjectIdentity],
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectData>, StoreError> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.client.get_objects(refs, auth_token))
        })
    }

    fn save_objects(
        &self,
        params: &SaveObjectsParams,
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectInfo>, StoreError> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(self.client.save_objects(params, auth_token))
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = ServiceConfig::from_env().map_err(|error| Error::from(error.to_string()))?;
    let client = WorkspaceRpcClient::new(&config.workspace_url, config.request_timeout)
        .map_err(|error| Error::from(error.to_string()))?;
    info!(
        workspace_url = %client.endpoint(),
        timeout_secs = config.request_timeout.as_secs(),
        "configured workspace client"
    );

    let service = ContigFilterService::new(RpcWorkspaceStore { client });
    let service_ref = &service;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(handle_filter_event(event.payload, service_ref))
    }))
    .await
}
