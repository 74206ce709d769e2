//! Pretrained predictors: contract, serialized estimators and the model set
pub mod estimator;
pub mod predictor;
pub mod registry;

pub use estimator::{Aggregation, DecisionTree, Estimate, Estimator, LinearModel, TreeEnsemble};
pub use predictor::{ModelArtifact, Predictor};
pub use registry::{ModelManifest, ModelRecord, ModelRole, ModelSet, MANIFEST_FILE};
