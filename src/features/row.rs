//! One feature row per window: the window position, the window features
//! and the features of the whole input sequence (`p_` prefix).
use crate::features::analyzer::ProteinAnalyzer;
use crate::features::extractor::{extract, FeatureVector, FEATURE_NAMES};
use crate::shared::sequence::Window;
use anyhow::{anyhow, Result};
use ndarray::{Array1, Axis};
use once_cell::sync::Lazy;

pub const PROTEIN_PREFIX: &str = "p_";

pub static ROW_COLUMNS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut columns = vec!["start".to_string(), "end".to_string()];
    columns.extend(FEATURE_NAMES.iter().cloned());
    columns.extend(
        FEATURE_NAMES
            .iter()
            .map(|n| format!("{}{}", PROTEIN_PREFIX, n)),
    );
    columns
});

/// Position of each requested column in a feature row.
pub fn resolve_columns(names: &[&str]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|name| {
            ROW_COLUMNS
                .iter()
                .position(|c| c == name)
                .ok_or(anyhow!("Unknown feature column {}", name))
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRow {
    pub window: Window,
    // `ROW_COLUMNS` order, None if the window or the sequence is invalid
    values: Option<Array1<f64>>,
}

impl FeatureRow {
    pub fn new(
        window: Window,
        features: Option<&FeatureVector>,
        protein: Option<&FeatureVector>,
    ) -> FeatureRow {
        let values = match (features, protein) {
            (Some(f), Some(p)) => {
                let mut v = Vec::with_capacity(ROW_COLUMNS.len());
                v.push(window.start as f64);
                v.push(window.end as f64);
                v.extend(f.values().iter());
                v.extend(p.values().iter());
                Some(Array1::from(v))
            }
            _ => None,
        };
        FeatureRow { window, values }
    }

    pub fn is_valid(&self) -> bool {
        self.values.is_some()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let values = self.values.as_ref()?;
        ROW_COLUMNS
            .iter()
            .position(|c| c == name)
            .map(|i| values[i])
    }

    /// The requested columns (see `resolve_columns`), in order.
    pub fn select(&self, indices: &[usize]) -> Option<Vec<f64>> {
        self.values
            .as_ref()
            .map(|v| v.select(Axis(0), indices).to_vec())
    }
}

/// Builds the feature rows of one run. The whole-sequence block is
/// computed once and shared by every window.
pub struct RecordBuilder<'a> {
    analyzer: &'a dyn ProteinAnalyzer,
    protein: Option<FeatureVector>,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(sequence: &str, analyzer: &'a dyn ProteinAnalyzer) -> RecordBuilder<'a> {
        RecordBuilder {
            analyzer,
            protein: extract(sequence, analyzer),
        }
    }

    /// False if the whole sequence has invalid residues, in which case
    /// every row is invalid.
    pub fn has_protein_features(&self) -> bool {
        self.protein.is_some()
    }

    pub fn build(&self, window: Window) -> FeatureRow {
        let features = extract(&window.peptide, self.analyzer);
        FeatureRow::new(window, features.as_ref(), self.protein.as_ref())
    }
}
