//! The set of pretrained predictors used by the pipeline, loaded once from
//! a model directory described by a `models.json` manifest.
use crate::models::predictor::{ModelArtifact, Predictor};
use crate::shared::errors::EpitopeError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const MANIFEST_FILE: &str = "models.json";

/// Role of each predictor in the ensemble
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    BaggingTarget,
    ExtraTreeTarget,
    RandomForestTarget,
    XgbScore,
    LgbmScore,
    ExtraTreeHla,
    LgbmHla,
    HistHla,
}

impl ModelRole {
    pub const ALL: [ModelRole; 8] = [
        ModelRole::BaggingTarget,
        ModelRole::ExtraTreeTarget,
        ModelRole::RandomForestTarget,
        ModelRole::XgbScore,
        ModelRole::LgbmScore,
        ModelRole::ExtraTreeHla,
        ModelRole::LgbmHla,
        ModelRole::HistHla,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::BaggingTarget => "bagging_target",
            ModelRole::ExtraTreeTarget => "extra_tree_target",
            ModelRole::RandomForestTarget => "random_forest_target",
            ModelRole::XgbScore => "xgb_score",
            ModelRole::LgbmScore => "lgbm_score",
            ModelRole::ExtraTreeHla => "extra_tree_hla",
            ModelRole::LgbmHla => "lgbm_hla",
            ModelRole::HistHla => "hist_hla",
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ModelRecord {
    pub role: ModelRole,
    // path relative to the model directory
    pub file: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ModelManifest {
    pub models: Vec<ModelRecord>,
}

impl ModelManifest {
    pub fn load(path: &Path) -> Result<ModelManifest> {
        let file = File::open(path)
            .with_context(|| format!("Error opening the model manifest {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Error parsing the model manifest {}", path.display()))
    }

    pub fn record(&self, role: ModelRole) -> Option<&ModelRecord> {
        self.models.iter().find(|r| r.role == role)
    }
}

/// Every predictor the pipeline needs. Construction fails unless all
/// roles are present, so lookups cannot miss afterwards.
pub struct ModelSet {
    predictors: HashMap<ModelRole, Box<dyn Predictor>>,
}

impl fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<String> = self
            .predictors
            .iter()
            .map(|(role, p)| format!("{}: {}", role, p.name()))
            .collect();
        names.sort();
        f.debug_struct("ModelSet").field("predictors", &names).finish()
    }
}

impl ModelSet {
    /// Load the predictors listed in `<model_dir>/models.json`.
    /// A role missing from the manifest or from the disk aborts the load.
    pub fn load(model_dir: &Path) -> Result<ModelSet> {
        let manifest_path = model_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(EpitopeError::MissingModelArtifact {
                role: "manifest".to_string(),
                path: manifest_path,
            }
            .into());
        }
        let manifest = ModelManifest::load(&manifest_path)?;

        let mut predictors: Vec<(ModelRole, Box<dyn Predictor>)> = Vec::new();
        for role in ModelRole::ALL {
            let record = manifest
                .record(role)
                .ok_or_else(|| EpitopeError::MissingModelArtifact {
                    role: role.to_string(),
                    path: manifest_path.clone(),
                })?;
            let path = model_dir.join(&record.file);
            if !path.exists() {
                return Err(EpitopeError::MissingModelArtifact {
                    role: role.to_string(),
                    path,
                }
                .into());
            }
            let artifact =
                ModelArtifact::load_json(&path).map_err(|e| EpitopeError::InvalidModelArtifact {
                    role: role.to_string(),
                    reason: format!("{:#}", e),
                })?;
            if artifact.version != record.version {
                log::warn!(
                    "Model {} has version {} but the manifest lists {}",
                    role,
                    artifact.version,
                    record.version
                );
            }
            log::info!(
                "Loaded {} from {} ({} features)",
                role,
                path.display(),
                artifact.n_features
            );
            predictors.push((role, Box::new(artifact)));
        }
        ModelSet::from_predictors(predictors)
    }

    /// Build a model set from already constructed predictors
    pub fn from_predictors(
        predictors: impl IntoIterator<Item = (ModelRole, Box<dyn Predictor>)>,
    ) -> Result<ModelSet> {
        let predictors: HashMap<ModelRole, Box<dyn Predictor>> = predictors.into_iter().collect();
        if let Some(missing) = ModelRole::ALL
            .iter()
            .find(|role| !predictors.contains_key(role))
        {
            return Err(EpitopeError::MissingModelArtifact {
                role: missing.to_string(),
                path: Default::default(),
            }
            .into());
        }
        Ok(ModelSet { predictors })
    }

    pub fn get(&self, role: ModelRole) -> Result<&dyn Predictor> {
        self.predictors
            .get(&role)
            .map(|p| p.as_ref())
            .ok_or(anyhow!("No predictor for role {}", role))
    }

    /// Fail fast if a predictor declares a different input size than its stage.
    pub fn check_inputs(&self, roles: &[ModelRole], n_features: usize) -> Result<()> {
        for &role in roles {
            let predictor = self.get(role)?;
            if let Some(expected) = predictor.n_features() {
                if expected != n_features {
                    return Err(EpitopeError::FeatureCountMismatch {
                        model: predictor.name(),
                        expected,
                        found: n_features,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}
