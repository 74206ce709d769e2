//! Antigenicity score regressors
use crate::features::columns::SCORE_FEATURES;
use crate::features::row::{resolve_columns, FeatureRow};
use crate::models::{ModelRole, ModelSet};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub const SCORE_ROLES: [ModelRole; 2] = [ModelRole::XgbScore, ModelRole::LgbmScore];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Scores {
    // scoreA, used to rank windows in the selector fallback
    #[serde(rename = "XGB_predicted_score")]
    pub xgb: f64,
    #[serde(rename = "light_gbm_predicted_score")]
    pub lgbm: f64,
}

#[derive(Clone, Debug)]
pub struct ScoreStage {
    columns: Vec<usize>,
}

impl ScoreStage {
    pub fn new(models: &ModelSet) -> Result<ScoreStage> {
        models.check_inputs(&SCORE_ROLES, SCORE_FEATURES.len())?;
        Ok(ScoreStage {
            columns: resolve_columns(&SCORE_FEATURES)?,
        })
    }

    pub fn score(&self, row: &FeatureRow, models: &ModelSet) -> Result<Scores> {
        let x = row.select(&self.columns).ok_or(anyhow!(
            "Invalid window {}-{} sent to the score regressors",
            row.window.start,
            row.window.end
        ))?;
        let xgb = models.get(ModelRole::XgbScore)?.predict(&x)?;
        let lgbm = models.get(ModelRole::LgbmScore)?.predict(&x)?;
        if !xgb.is_finite() || !lgbm.is_finite() {
            return Err(anyhow!(
                "Non-finite score for window {}-{}",
                row.window.start,
                row.window.end
            ));
        }
        Ok(Scores { xgb, lgbm })
    }
}
