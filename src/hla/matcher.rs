//! Nearest-allele search: the catalog entries whose score is the closest
//! to an affinity estimate.
use crate::hla::catalog::ReferenceCatalog;
use crate::hla::scoring::AlleleScoreRule;
use anyhow::{anyhow, Result};
use itertools::Itertools;

/// Catalog entries with their scores, computed once.
#[derive(Clone, Debug, Default)]
pub struct AlleleMatcher {
    entries: Vec<String>,
    scores: Vec<f64>,
}

impl AlleleMatcher {
    /// Scores the catalog with the multiplicative rule.
    pub fn new(catalog: &ReferenceCatalog) -> AlleleMatcher {
        AlleleMatcher {
            entries: catalog.entries().to_vec(),
            scores: catalog.scores(AlleleScoreRule::Multiplicative),
        }
    }

    /// Matcher over precomputed scores.
    pub fn with_scores(entries: Vec<String>, scores: Vec<f64>) -> Result<AlleleMatcher> {
        if entries.len() != scores.len() {
            return Err(anyhow!(
                "{} catalog entries for {} scores",
                entries.len(),
                scores.len()
            ));
        }
        Ok(AlleleMatcher { entries, scores })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `k` entries closest to `affinity` with their distance, closest
    /// first. Equal distances keep the catalog order. Fewer than `k` entries
    /// are returned when the catalog is smaller.
    pub fn nearest_with_distance(&self, affinity: f64, k: usize) -> Vec<(String, f64)> {
        self.scores
            .iter()
            .map(|s| (s - affinity).abs())
            .enumerate()
            // stable sort
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
            .take(k)
            .map(|(idx, d)| (self.entries[idx].clone(), d))
            .collect()
    }

    pub fn nearest(&self, affinity: f64, k: usize) -> Vec<String> {
        self.nearest_with_distance(affinity, k)
            .into_iter()
            .map(|(entry, _)| entry)
            .collect()
    }
}
