//! HLA affinity regressors.
//!
//! Their input is the extra-trees label of the window, followed by the
//! `HLA_FEATURES` columns, a constant 0 and the hydrophobicity of the whole
//! input sequence.
use crate::features::columns::{HLA_FEATURES, HLA_INPUT_LEN};
use crate::features::row::{resolve_columns, FeatureRow};
use crate::models::{ModelRole, ModelSet};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const AFFINITY_ROLES: [ModelRole; 3] = [
    ModelRole::ExtraTreeHla,
    ModelRole::LgbmHla,
    ModelRole::HistHla,
];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Affinity {
    #[serde(rename = "extra_tree_hla")]
    pub extra_tree: f64,
    #[serde(rename = "lgbm_hla_prediction")]
    pub lgbm: f64,
    #[serde(rename = "hist_hla")]
    pub hist: f64,
}

impl Affinity {
    /// The estimate used for allele matching. The two others are only reported.
    pub fn value(&self) -> f64 {
        self.extra_tree
    }
}

#[derive(Clone, Debug)]
pub struct AffinityStage {
    columns: Vec<usize>,
}

impl AffinityStage {
    pub fn new(models: &ModelSet) -> Result<AffinityStage> {
        models.check_inputs(&AFFINITY_ROLES, HLA_INPUT_LEN)?;
        Ok(AffinityStage {
            columns: resolve_columns(&HLA_FEATURES)?,
        })
    }

    pub fn inputs(&self, row: &FeatureRow, label: u8, sequence_scalar: f64) -> Result<Vec<f64>> {
        let features = row.select(&self.columns).ok_or(anyhow!(
            "Invalid window {}-{} sent to the affinity regressors",
            row.window.start,
            row.window.end
        ))?;
        let mut x = Vec::with_capacity(HLA_INPUT_LEN);
        x.push(label as f64);
        x.extend(features);
        // placeholder column, always 0
        x.push(0.);
        x.push(sequence_scalar);
        Ok(x)
    }

    pub fn estimate(
        &self,
        row: &FeatureRow,
        label: u8,
        sequence_scalar: f64,
        models: &ModelSet,
    ) -> Result<Affinity> {
        let x = self.inputs(row, label, sequence_scalar)?;
        Ok(Affinity {
            extra_tree: models.get(ModelRole::ExtraTreeHla)?.predict(&x)?,
            lgbm: models.get(ModelRole::LgbmHla)?.predict(&x)?,
            hist: models.get(ModelRole::HistHla)?.predict(&x)?,
        })
    }
}
