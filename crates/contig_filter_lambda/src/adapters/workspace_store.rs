use thiserror::Error;

use crate::runtime::workspace::{ObjectData, ObjectIdentity, ObjectInfo, SaveObjectsParams};

/// Remote object store the service reads ContigSets from and writes them back to.
pub trait WorkspaceStore {
    fn get_objects(
        &self,
        refs: &[ObjectIdentity],
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectData>, StoreError>;

    fn save_objects(
        &self,
        params: &SaveObjectsParams,
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectInfo>, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("{name} ({code}): {message}{}", detail_suffix(.detail))]
    Remote {
        name: String,
        code: i64,
        message: String,
        detail: Option<String>,
    },

    #[error("unexpected workspace response: {0}")]
    Protocol(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!("\n{text}"),
        _ => String::new(),
    }
}
