//! The predictor contract consumed by the ensemble stages, and the
//! versioned artifacts implementing it.
use crate::models::estimator::{Estimate, Estimator};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// `predict(features) -> value`. Classifiers return their label as 0.0/1.0.
/// Shared read-only between worker threads.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Number of inputs the predictor expects, if known
    fn n_features(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> String {
        "anonymous predictor".to_string()
    }
}

/// A pretrained predictor, loaded from a json file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    pub n_features: usize,
    pub estimator: Estimator,
}

impl ModelArtifact {
    pub fn new(name: &str, version: &str, n_features: usize, estimator: Estimator) -> Result<Self> {
        let artifact = ModelArtifact {
            name: name.to_string(),
            version: version.to_string(),
            n_features,
            estimator,
        };
        artifact.check()?;
        Ok(artifact)
    }

    pub fn load_json(path: &Path) -> Result<ModelArtifact> {
        let file = File::open(path)
            .with_context(|| format!("Error opening the model file {}", path.display()))?;
        let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Error parsing the model file {}", path.display()))?;
        artifact
            .check()
            .with_context(|| format!("Corrupted model file {}", path.display()))?;
        Ok(artifact)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn check(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(anyhow!("Model {} declares no feature", self.name));
        }
        self.estimator.check(self.n_features)
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features {
            return Err(anyhow!(
                "Model {} expects {} features, got {}",
                self.name,
                self.n_features,
                features.len()
            ));
        }
        if features.iter().any(|x| !x.is_finite()) {
            return Err(anyhow!("Model {} received a non-finite feature", self.name));
        }
        Ok(self.estimator.estimate(features))
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }

    fn name(&self) -> String {
        format!("{} ({})", self.name, self.version)
    }
}
