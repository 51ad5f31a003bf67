pub mod workspace_rpc;
pub mod workspace_store;
