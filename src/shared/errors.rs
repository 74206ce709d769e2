//! Errors that a caller may need to tell apart.
//!
//! Everything else goes through `anyhow`. These variants can be recovered
//! from an `anyhow::Error` with `downcast_ref::<EpitopeError>()`.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpitopeError {
    /// A required predictor is not listed in the manifest or its file is missing.
    #[error("missing model artifact for role '{role}' ({})", .path.display())]
    MissingModelArtifact { role: String, path: PathBuf },

    /// A predictor file exists but cannot be used.
    #[error("invalid model artifact for role '{role}': {reason}")]
    InvalidModelArtifact { role: String, reason: String },

    /// A predictor expects a different number of features than its stage provides.
    #[error("model '{model}' expects {expected} features, the stage provides {found}")]
    FeatureCountMismatch {
        model: String,
        expected: usize,
        found: usize,
    },

    #[error("reference catalog unavailable: {}", .0.display())]
    CatalogUnavailable(PathBuf),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
