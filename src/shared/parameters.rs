//! The structs used for specifying the parameters of the pipeline
use crate::shared::errors::EpitopeError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// MHC class scanned by a single pipeline run.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MhcClass {
    #[serde(rename = "MHC-1")]
    One,
    #[serde(rename = "MHC-2")]
    Two,
}

impl MhcClass {
    pub fn window_length(&self, params: &PipelineParameters) -> usize {
        match self {
            MhcClass::One => params.mhc1_window,
            MhcClass::Two => params.mhc2_window,
        }
    }
}

impl fmt::Display for MhcClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MhcClass::One => write!(f, "MHC-1"),
            MhcClass::Two => write!(f, "MHC-2"),
        }
    }
}

/// Prediction mode requested by the caller. `Both` is two sequential runs,
/// MHC-1 then MHC-2.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Mhc1,
    Mhc2,
    Both,
}

impl Mode {
    /// Ordered list of runs for this mode
    pub fn classes(&self) -> Vec<MhcClass> {
        match self {
            Mode::Mhc1 => vec![MhcClass::One],
            Mode::Mhc2 => vec![MhcClass::Two],
            Mode::Both => vec![MhcClass::One, MhcClass::Two],
        }
    }
}

impl FromStr for Mode {
    type Err = EpitopeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "mhc1" => Ok(Mode::Mhc1),
            "mhc2" => Ok(Mode::Mhc2),
            "both" => Ok(Mode::Both),
            _ => Err(EpitopeError::InvalidParameters(format!(
                "unknown prediction mode '{}' (expected MHC-1, MHC-2 or BOTH)",
                s
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PipelineParameters {
    // window length of the MHC-1 scan
    pub mhc1_window: usize,
    // window length of the MHC-2 scan
    pub mhc2_window: usize,
    // number of catalog alleles returned per window
    pub nearest_k: usize,
    // above this many consensus windows, the selector falls back to
    // the best scored windows
    pub max_candidates: usize,
    // size of the worker pool (None: all cores)
    pub num_threads: Option<usize>,
    // progress bar over the window loop (needs the `kdam` feature)
    pub show_progress: bool,
    // column of the reference csv holding the allele strings
    pub catalog_column: String,
}

impl Default for PipelineParameters {
    fn default() -> PipelineParameters {
        PipelineParameters {
            mhc1_window: 10,
            mhc2_window: 15,
            nearest_k: 10,
            max_candidates: 30,
            num_threads: None,
            show_progress: false,
            catalog_column: "HLA".to_string(),
        }
    }
}

impl PipelineParameters {
    pub fn load_json(path: &Path) -> Result<PipelineParameters> {
        let file = File::open(path)
            .with_context(|| format!("Error opening the parameter file {}", path.display()))?;
        let params: PipelineParameters = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Error parsing the parameter file {}", path.display()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), EpitopeError> {
        if self.mhc1_window == 0 || self.mhc2_window == 0 {
            return Err(EpitopeError::InvalidParameters(
                "window lengths must be at least 1".to_string(),
            ));
        }
        if self.nearest_k == 0 {
            return Err(EpitopeError::InvalidParameters(
                "nearest_k must be at least 1".to_string(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(EpitopeError::InvalidParameters(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(EpitopeError::InvalidParameters(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
