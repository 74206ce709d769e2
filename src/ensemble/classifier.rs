//! Epitope classifiers: three independent binary labels per window
use crate::features::columns::CLASSIFIER_FEATURES;
use crate::features::row::{resolve_columns, FeatureRow};
use crate::models::{ModelRole, ModelSet};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const CLASSIFIER_ROLES: [ModelRole; 3] = [
    ModelRole::BaggingTarget,
    ModelRole::ExtraTreeTarget,
    ModelRole::RandomForestTarget,
];

/// Labels of the three classifiers for one window (0 or 1)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Votes {
    #[serde(rename = "bagging_target")]
    pub bagging: u8,
    #[serde(rename = "extra_tree_target")]
    pub extra_tree: u8,
    #[serde(rename = "random_forest_target")]
    pub random_forest: u8,
}

impl Votes {
    pub fn signals(&self) -> [u8; 3] {
        [self.extra_tree, self.random_forest, self.bagging]
    }

    /// Epitope verdict, see `majority_target`
    pub fn target(&self) -> u8 {
        majority_target(self.signals())
    }

    /// Extra trees and random forest both positive. Used by the selector.
    pub fn pair_consensus(&self) -> bool {
        u32::from(self.extra_tree) + u32::from(self.random_forest) > 1
    }
}

/// 1 if the three signals sum to more than 2, so all of them must be
/// positive.
pub fn majority_target(signals: [u8; 3]) -> u8 {
    let count: u32 = signals.iter().map(|&s| u32::from(s)).sum();
    if count > 2 {
        1
    } else {
        0
    }
}

/// Turn a classifier output into a 0/1 label.
pub fn as_label(value: f64) -> Result<u8> {
    if value.is_nan() {
        return Err(anyhow!("Classifier returned NaN"));
    }
    Ok(if value >= 0.5 { 1 } else { 0 })
}

#[derive(Clone, Debug)]
pub struct ClassifierStage {
    columns: Vec<usize>,
}

impl ClassifierStage {
    pub fn new(models: &ModelSet) -> Result<ClassifierStage> {
        models.check_inputs(&CLASSIFIER_ROLES, CLASSIFIER_FEATURES.len())?;
        Ok(ClassifierStage {
            columns: resolve_columns(&CLASSIFIER_FEATURES)?,
        })
    }

    pub fn inputs(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        row.select(&self.columns).ok_or(anyhow!(
            "Invalid window {}-{} sent to the classifiers",
            row.window.start,
            row.window.end
        ))
    }

    pub fn classify(&self, row: &FeatureRow, models: &ModelSet) -> Result<Votes> {
        let x = self.inputs(row)?;
        Ok(Votes {
            bagging: as_label(models.get(ModelRole::BaggingTarget)?.predict(&x)?)?,
            extra_tree: as_label(models.get(ModelRole::ExtraTreeTarget)?.predict(&x)?)?,
            random_forest: as_label(models.get(ModelRole::RandomForestTarget)?.predict(&x)?)?,
        })
    }
}
