use serde_json::Value;
use tracing::{info, warn};

use crate::adapters::workspace_store::{StoreError, WorkspaceStore};
use crate::error::ServiceError;
use crate::runtime::contract::{
    normalize_request, request_fingerprint, FilterParams, FilterResult, CONTIG_SET_TYPE,
};
use crate::runtime::filter::ContigSet;
use crate::runtime::refs::object_ref;
use crate::runtime::workspace::{ObjectIdentity, ObjectSaveData, SaveObjectsParams};

/// Filters a workspace ContigSet by minimum contig length and saves the result
/// as a new version of the same object.
#[derive(Debug)]
pub struct ContigFilterService<S> {
    store: S,
}

impl<S: WorkspaceStore> ContigFilterService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn filter_contigs(
        &self,
        params: FilterParams,
        auth_token: Option<&str>,
        provenance: Vec<Value>,
    ) -> Result<FilterResult, ServiceError> {
        let request = normalize_request(params).map_err(|error| {
            warn!(event = "filter_rejected", error = %error, "rejected filter_contigs request");
            ServiceError::InvalidArgument(error)
        })?;
        let fingerprint = request_fingerprint(&request);
        info!(
            event = "filter_started",
            request_fingerprint = %fingerprint,
            workspace = %request.workspace,
            contigset_id = %request.contigset_id,
            min_length = request.min_length,
            "starting filter_contigs"
        );

        let reference = object_ref(&request.workspace, &request.contigset_id);
        let data = self
            .store
            .get_objects(&[ObjectIdentity::new(reference.clone())], auth_token)
            .map_err(ServiceError::Retrieval)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                let detail = format!("no object returned for {reference}");
                ServiceError::Retrieval(StoreError::Protocol(detail))
            })?
            .data;

        let mut contig_set = ContigSet::from_value(data).map_err(ServiceError::MalformedContigSet)?;
        info!(
            event = "contigset_loaded",
            request_fingerprint = %fingerprint,
            reference = %reference,
            contigs = contig_set.contigs.len(),
            "got ContigSet data"
        );

        let counts = contig_set.retain_min_length(request.min_length);
        info!(
            event = "contigset_filtered",
            request_fingerprint = %fingerprint,
            remaining = counts.remaining,
            total = counts.total,
            "filtered ContigSet to {} contigs out of {}",
            counts.remaining,
            counts.total
        );

        let save_params = SaveObjectsParams {
            workspace: request.workspace.clone(),
            objects: vec![ObjectSaveData {
                type_name: CONTIG_SET_TYPE.to_string(),
                data: contig_set.into_value(),
                name: request.contigset_id.clone(),
                provenance,
            }],
        };
        let saved = self
            .store
            .save_objects(&save_params, auth_token)
            .map_err(ServiceError::Persistence)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                let detail = "save_objects returned no object info".to_string();
                ServiceError::Persistence(StoreError::Protocol(detail))
            })?;
        info!(
            event = "contigset_saved",
            request_fingerprint = %fingerprint,
            object_id = saved.object_id,
            version = saved.version,
            workspace_id = saved.workspace_id,
            "saved filtered ContigSet"
        );

        let result = FilterResult::new(saved.versioned_ref(), counts);
        info!(
            event = "filter_completed",
            request_fingerprint = %fingerprint,
            new_contigset_ref = %result.new_contigset_ref,
            n_initial_contigs = result.n_initial_contigs,
            n_contigs_removed = result.n_contigs_removed,
            n_contigs_remaining = result.n_contigs_remaining,
            "returning filter result"
        );
        Ok(result)
    }

    pub fn run_trimmomatic(&self, params: &Value) -> Result<String, ServiceError> {
        run_trimmomatic(params)
    }
}

/// Read trimming is a named contract with no defined behaviour yet.
pub fn run_trimmomatic(_params: &Value) -> Result<String, ServiceError> {
    warn!(
        event = "trimmomatic_requested",
        "runTrimmomatic has no implementation"
    );
    Err(ServiceError::NotImplemented("runTrimmomatic"))
}
