use thiserror::Error;

use crate::adapters::workspace_store::StoreError;
use crate::runtime::contract::ValidationError;

/// Error types for contig filter service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    #[error("Error loading original ContigSet object from workspace: {0}")]
    Retrieval(StoreError),

    #[error("Error saving filtered ContigSet object to workspace: {0}")]
    Persistence(StoreError),

    #[error("Workspace object is not a valid ContigSet: {0}")]
    MalformedContigSet(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl ServiceError {
    /// Stable machine-readable code used in response envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "validation_error",
            Self::Retrieval(_) => "retrieval_error",
            Self::Persistence(_) => "persistence_error",
            Self::MalformedContigSet(_) => "malformed_contigset",
            Self::NotImplemented(_) => "not_implemented",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::MalformedContigSet(_) => 422,
            Self::NotImplemented(_) => 501,
            Self::Retrieval(_) | Self::Persistence(_) => 502,
        }
    }
}
