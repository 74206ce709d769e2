#![warn(clippy::large_types_passed_by_value)]

pub mod ensemble;
pub mod features;
pub mod hla;
pub mod models;
pub mod pipeline;
pub mod shared;

pub use crate::ensemble::{Affinity, Ensemble, Estimates, Scores, Votes};
pub use crate::features::{
    extract, Analysis, FeatureRow, FeatureVector, ProtParam, ProteinAnalyzer, RecordBuilder,
};
pub use crate::hla::{AlleleMatcher, AlleleScoreRule, ReferenceCatalog};
pub use crate::models::{ModelArtifact, ModelRole, ModelSet, Predictor};
pub use crate::pipeline::{
    select, write_csv, CandidateRow, Pipeline, Prediction, ResultRow, RunReport, Selection,
};
pub use crate::shared::{
    generate_windows, EpitopeError, MhcClass, Mode, PipelineParameters, Window,
};
