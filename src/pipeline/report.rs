//! Result rows and run reports returned to the caller, and the csv sink.
use crate::ensemble::{Affinity, Estimates, Scores, Votes};
use crate::shared::parameters::MhcClass;
use crate::shared::sequence::Window;
use anyhow::{Context, Result};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything predicted for a valid window
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    pub votes: Votes,
    pub target: u8,
    pub scores: Scores,
    pub affinity: Affinity,
    pub matched_hla: Vec<String>,
}

impl Prediction {
    pub fn new(estimates: Estimates, matched_hla: Vec<String>) -> Prediction {
        Prediction {
            votes: estimates.votes,
            target: estimates.votes.target(),
            scores: estimates.scores,
            affinity: estimates.affinity,
            matched_hla,
        }
    }
}

/// One window of the scan. `prediction` is None when the window (or the
/// whole sequence) holds a residue outside the 20 standard ones.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub start: usize,
    pub end: usize,
    pub epitope: String,
    pub prediction: Option<Prediction>,
}

impl ResultRow {
    pub fn new(window: Window, prediction: Prediction) -> ResultRow {
        ResultRow {
            start: window.start,
            end: window.end,
            epitope: window.peptide,
            prediction: Some(prediction),
        }
    }

    pub fn invalid(window: Window) -> ResultRow {
        ResultRow {
            start: window.start,
            end: window.end,
            epitope: window.peptide,
            prediction: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.prediction.is_some()
    }

    pub fn target(&self) -> Option<u8> {
        self.prediction.as_ref().map(|p| p.target)
    }

    /// The XGBoost score, used for ranking
    pub fn score_a(&self) -> Option<f64> {
        self.prediction.as_ref().map(|p| p.scores.xgb)
    }

    pub fn matched_hla(&self) -> &[String] {
        match &self.prediction {
            Some(p) => &p.matched_hla,
            None => &[],
        }
    }
}

/// Reduced row returned when few windows pass the selector filter
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CandidateRow {
    pub start: usize,
    pub end: usize,
    pub epitope: String,
    pub matched_hla: Vec<String>,
}

impl From<&ResultRow> for CandidateRow {
    fn from(row: &ResultRow) -> CandidateRow {
        CandidateRow {
            start: row.start,
            end: row.end,
            epitope: row.epitope.clone(),
            matched_hla: row.matched_hla().to_vec(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Selection {
    Filtered(Vec<CandidateRow>),
    TopScored(Vec<ResultRow>),
}

impl Selection {
    pub fn len(&self) -> usize {
        match self {
            Selection::Filtered(rows) => rows.len(),
            Selection::TopScored(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of one scan (one window length)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RunReport {
    pub class: MhcClass,
    pub window_length: usize,
    // every window, ordered by start
    pub rows: Vec<ResultRow>,
    pub selection: Selection,
}

impl RunReport {
    pub fn n_valid(&self) -> usize {
        self.rows.iter().filter(|r| r.is_valid()).count()
    }

    /// Windows flagged as epitopes by the classifiers
    pub fn epitopes(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(|r| r.target() == Some(1))
    }
}

#[derive(Serialize)]
struct CsvRecord<'a> {
    mode: String,
    start: usize,
    end: usize,
    epitope: &'a str,
    #[serde(rename = "XGB_predicted_score")]
    xgb_score: Option<f64>,
    #[serde(rename = "light_gbm_predicted_score")]
    lgbm_score: Option<f64>,
    extra_tree_target: Option<u8>,
    bagging_target: Option<u8>,
    random_forest_target: Option<u8>,
    target: Option<u8>,
    lgbm_hla_prediction: Option<f64>,
    extra_tree_hla: Option<f64>,
    hist_hla: Option<f64>,
    matched_hla: String,
}

impl<'a> CsvRecord<'a> {
    fn new(class: MhcClass, row: &'a ResultRow) -> CsvRecord<'a> {
        let p = row.prediction.as_ref();
        CsvRecord {
            mode: class.to_string(),
            start: row.start,
            end: row.end,
            epitope: &row.epitope,
            xgb_score: p.map(|p| p.scores.xgb),
            lgbm_score: p.map(|p| p.scores.lgbm),
            extra_tree_target: p.map(|p| p.votes.extra_tree),
            bagging_target: p.map(|p| p.votes.bagging),
            random_forest_target: p.map(|p| p.votes.random_forest),
            target: p.map(|p| p.target),
            lgbm_hla_prediction: p.map(|p| p.affinity.lgbm),
            extra_tree_hla: p.map(|p| p.affinity.extra_tree),
            hist_hla: p.map(|p| p.affinity.hist),
            matched_hla: row.matched_hla().join(";"),
        }
    }
}

/// Write every row of every report to a csv file. Invalid windows have
/// empty prediction columns.
pub fn write_csv(reports: &[RunReport], path: &Path) -> Result<()> {
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("Error creating the output file {}", path.display()))?;
    for report in reports {
        for row in &report.rows {
            wtr.serialize(CsvRecord::new(report.class, row))?;
        }
    }
    wtr.flush()?;
    Ok(())
}
