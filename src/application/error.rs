//! Fatal failures of a generation run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Distribution not found. Please select a valid Linux distribution.")]
    DistroNotFound,

    #[error("No sources configured for distro \"{name}\"")]
    NoSourcesConfigured { name: String },

    #[error("No apps found for the provided IDs")]
    NoAppsFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog lookup failures, passed through unchanged.
    #[error(transparent)]
    Catalog(#[from] anyhow::Error),
}
