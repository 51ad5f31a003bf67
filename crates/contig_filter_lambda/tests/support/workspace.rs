#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;

use contig_filter_lambda::adapters::workspace_store::{StoreError, WorkspaceStore};
use contig_filter_lambda::runtime::workspace::{
    ObjectData, ObjectIdentity, ObjectInfo, SaveObjectsParams,
};
use serde_json::{json, Value};

#[derive(Debug, Default)]
struct WorkspaceState {
    workspace_ids: BTreeMap<String, u64>,
    object_ids: BTreeMap<(String, String), u64>,
    versions: BTreeMap<(String, String), Vec<Value>>,
    get_calls: usize,
    save_calls: usize,
    tokens: Vec<Option<String>>,
    provenance: Vec<Vec<Value>>,
}

/// Versioned in-memory stand-in for the remote workspace service.
#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    state: Mutex<WorkspaceState>,
    save_failure: Option<StoreError>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_saves(error: StoreError) -> Self {
        Self {
            state: Mutex::new(WorkspaceState::default()),
            save_failure: Some(error),
        }
    }

    pub fn create_workspace(&self, name: &str, id: u64) {
        self.state
            .lock()
            .expect("poisoned mutex")
            .workspace_ids
            .insert(name.to_string(), id);
    }

    pub fn seed_object(&self, workspace: &str, name: &str, data: Value) {
        let mut state = self.state.lock().expect("poisoned mutex");
        store_version(&mut state, workspace, name, data);
    }

    pub fn latest(&self, workspace: &str, name: &str) -> Option<Value> {
        self.state
            .lock()
            .expect("poisoned mutex")
            .versions
            .get(&(workspace.to_string(), name.to_string()))
            .and_then(|versions| versions.last().cloned())
    }

    pub fn version_count(&self, workspace: &str, name: &str) -> usize {
        self.state
            .lock()
            .expect("poisoned mutex")
            .versions
            .get(&(workspace.to_string(), name.to_string()))
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn get_calls(&self) -> usize {
        self.state.lock().expect("poisoned mutex").get_calls
    }

    pub fn save_calls(&self) -> usize {
        self.state.lock().expect("poisoned mutex").save_calls
    }

    pub fn saved_provenance(&self) -> Vec<Vec<Value>> {
        self.state
            .lock()
            .expect("poisoned mutex")
            .provenance
            .clone()
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.state.lock().expect("poisoned mutex").tokens.clone()
    }
}

fn store_version(
    state: &mut WorkspaceState,
    workspace: &str,
    name: &str,
    data: Value,
) -> ObjectInfo {
    let next_workspace_id = state.workspace_ids.len() as u64 + 1;
    let workspace_id = *state
        .workspace_ids
        .entry(workspace.to_string())
        .or_insert(next_workspace_id);
    let key = (workspace.to_string(), name.to_string());
    let next_object_id = state.object_ids.len() as u64 + 1;
    let object_id = *state
        .object_ids
        .entry(key.clone())
        .or_insert(next_object_id);
    let versions = state.versions.entry(key).or_default();
    versions.push(data);

    ObjectInfo {
        object_id,
        name: Some(name.to_string()),
        type_name: Some("KBaseGenomes.ContigSet-3.0".to_string()),
        version: versions.len() as u64,
        workspace_id,
        workspace_name: Some(workspace.to_string()),
        ..ObjectInfo::default()
    }
}

impl WorkspaceStore for InMemoryWorkspace {
    fn get_objects(
        &self,
        refs: &[ObjectIdentity],
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectData>, StoreError> {
        let mut state = self.state.lock().expect("poisoned mutex");
        state.get_calls += 1;
        state.tokens.push(auth_token.map(str::to_string));

        refs.iter()
            .map(|identity| {
                let (workspace, name) = identity
                    .reference
                    .split_once('/')
                    .ok_or_else(|| {
                        remote_error(format!("Illegal reference {}", identity.reference))
                    })?;
                state
                    .versions
                    .get(&(workspace.to_string(), name.to_string()))
                    .and_then(|versions| versions.last())
                    .map(|data| ObjectData {
                        data: data.clone(),
                        info: None,
                    })
                    .ok_or_else(|| {
                        remote_error(format!(
                            "No object with name {name} exists in workspace {workspace}"
                        ))
                    })
            })
            .collect()
    }

    fn save_objects(
        &self,
        params: &SaveObjectsParams,
        auth_token: Option<&str>,
    ) -> Result<Vec<ObjectInfo>, StoreError> {
        let mut state = self.state.lock().expect("poisoned mutex");
        state.save_calls += 1;
        state.tokens.push(auth_token.map(str::to_string));
        if let Some(error) = &self.save_failure {
            return Err(error.clone());
        }

        Ok(params
            .objects
            .iter()
            .map(|object| {
                state.provenance.push(object.provenance.clone());
                store_version(
                    &mut state,
                    &params.workspace,
                    &object.name,
                    object.data.clone(),
                )
            })
            .collect())
    }
}

fn remote_error(message: String) -> StoreError {
    StoreError::Remote {
        name: "JSONRPCError".to_string(),
        code: -32500,
        message,
        detail: None,
    }
}

pub fn contig_set_with_lengths(lengths: &[usize]) -> Value {
    let contigs: Vec<Value> = lengths
        .iter()
        .enumerate()
        .map(|(index, length)| {
            json!({
                "id": format!("contig_{index}"),
                "sequence": "G".repeat(*length),
                "length": length,
            })
        })
        .collect();

    json!({
        "id": "assembly.fa",
        "name": "assembly",
        "source": "test",
        "type": "Genome",
        "contigs": contigs,
    })
}
