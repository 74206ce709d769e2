//! The three predictor stages applied to every valid window
pub mod affinity;
pub mod classifier;
pub mod regressor;

pub use affinity::{Affinity, AffinityStage};
pub use classifier::{as_label, majority_target, ClassifierStage, Votes};
pub use regressor::{ScoreStage, Scores};

use crate::features::row::FeatureRow;
use crate::models::ModelSet;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Outputs of every stage for one window
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Estimates {
    pub votes: Votes,
    pub scores: Scores,
    pub affinity: Affinity,
}

/// The stages, with their feature columns resolved once.
#[derive(Clone, Debug)]
pub struct Ensemble {
    classifier: ClassifierStage,
    scores: ScoreStage,
    affinity: AffinityStage,
}

impl Ensemble {
    /// Fails if a loaded predictor declares an input size different from
    /// the size of its stage's feature list.
    pub fn new(models: &ModelSet) -> Result<Ensemble> {
        Ok(Ensemble {
            classifier: ClassifierStage::new(models)?,
            scores: ScoreStage::new(models)?,
            affinity: AffinityStage::new(models)?,
        })
    }

    /// `sequence_scalar` is the hydrophobicity of the whole input sequence.
    pub fn evaluate(
        &self,
        row: &FeatureRow,
        sequence_scalar: f64,
        models: &ModelSet,
    ) -> Result<Estimates> {
        let votes = self.classifier.classify(row, models)?;
        let scores = self.scores.score(row, models)?;
        let affinity = self
            .affinity
            .estimate(row, votes.extra_tree, sequence_scalar, models)?;
        if !affinity.value().is_finite() {
            return Err(anyhow!(
                "Non-finite affinity for window {}-{}",
                row.window.start,
                row.window.end
            ));
        }
        Ok(Estimates {
            votes,
            scores,
            affinity,
        })
    }
}
