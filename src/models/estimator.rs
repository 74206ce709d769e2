//! Serialized estimators: decision-tree ensembles exported from the
//! training side (flat sklearn-like arrays) and linear models.
use anyhow::{anyhow, Result};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

#[enum_dispatch]
pub trait Estimate {
    /// Raw model output for one input vector (already length-checked).
    fn estimate(&self, features: &[f64]) -> f64;
    /// Structural checks against the declared number of features.
    fn check(&self, n_features: usize) -> Result<()>;
}

#[enum_dispatch(Estimate)]
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type")]
pub enum Estimator {
    TreeEnsemble(TreeEnsemble),
    Linear(LinearModel),
}

/// How the outputs of the trees are combined
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregation {
    // forests, bagging, extra trees (regression)
    Mean,
    // gradient boosting: base_score + sum of the trees
    Sum,
    // classifiers: leaves hold P(class 1), label is 1 if the mean is above 0.5
    Vote,
}

/// One binary tree. Node `i` is a leaf when `left[i] < 0`; otherwise go
/// left when `x[feature[i]] <= threshold[i]`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DecisionTree {
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub feature: Vec<usize>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    /// Single-leaf tree
    pub fn constant(value: f64) -> DecisionTree {
        DecisionTree {
            left: vec![-1],
            right: vec![-1],
            feature: vec![0],
            threshold: vec![0.],
            value: vec![value],
        }
    }

    /// Depth-one tree: `low` if `x[feature] <= threshold`, `high` otherwise
    pub fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> DecisionTree {
        DecisionTree {
            left: vec![1, -1, -1],
            right: vec![2, -1, -1],
            feature: vec![feature, 0, 0],
            threshold: vec![threshold, 0., 0.],
            value: vec![0., low, high],
        }
    }

    pub fn evaluate(&self, features: &[f64]) -> f64 {
        let mut node = 0;
        while self.left[node] >= 0 {
            node = if features[self.feature[node]] <= self.threshold[node] {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
        self.value[node]
    }

    fn check(&self, n_features: usize) -> Result<()> {
        let n = self.value.len();
        if n == 0 {
            return Err(anyhow!("Empty tree"));
        }
        if self.left.len() != n
            || self.right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err(anyhow!("Tree arrays have inconsistent lengths"));
        }
        for node in 0..n {
            if self.left[node] < 0 {
                continue;
            }
            // children are stored after their parent, which rules out cycles
            for child in [self.left[node], self.right[node]] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(anyhow!("Invalid child {} for node {}", child, node));
                }
            }
            if self.feature[node] >= n_features {
                return Err(anyhow!(
                    "Node {} splits on feature {} (only {} features)",
                    node,
                    self.feature[node],
                    n_features
                ));
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TreeEnsemble {
    pub trees: Vec<DecisionTree>,
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
}

impl Estimate for TreeEnsemble {
    fn estimate(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        let mean = total / self.trees.len() as f64;
        match self.aggregation {
            Aggregation::Mean => mean,
            Aggregation::Sum => self.base_score + total,
            Aggregation::Vote => {
                if mean > 0.5 {
                    1.
                } else {
                    0.
                }
            }
        }
    }

    fn check(&self, n_features: usize) -> Result<()> {
        if self.trees.is_empty() {
            return Err(anyhow!("Tree ensemble without trees"));
        }
        for (ii, tree) in self.trees.iter().enumerate() {
            tree.check(n_features)
                .map_err(|e| anyhow!("Tree {}: {}", ii, e))?;
        }
        Ok(())
    }
}

/// `intercept + weights . x`, turned into a 0/1 label when a threshold is set.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl Estimate for LinearModel {
    fn estimate(&self, features: &[f64]) -> f64 {
        let value = self.intercept
            + self
                .weights
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        match self.threshold {
            Some(t) if value > t => 1.,
            Some(_) => 0.,
            None => value,
        }
    }

    fn check(&self, n_features: usize) -> Result<()> {
        if self.weights.len() != n_features {
            return Err(anyhow!(
                "Linear model has {} weights for {} features",
                self.weights.len(),
                n_features
            ));
        }
        Ok(())
    }
}
