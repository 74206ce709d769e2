//! Sequence windows and whole-sequence helpers
use crate::shared::amino_acids::{aa_index, KYTE_DOOLITTLE};
use serde::{Deserialize, Serialize};

/// Hydropathy used for residues missing from the scale when encoding a
/// full input sequence.
const UNKNOWN_RESIDUE_HYDROPATHY: f64 = 0.5;

/// A fixed-length slice of the input sequence.
/// `end` is inclusive: `end = start + peptide.len() - 1`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    pub peptide: String,
    pub start: usize,
    pub end: usize,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.peptide.is_empty()
    }
}

/// All windows of size `length`, left to right, one per start offset.
/// Returns an empty vector if the sequence is shorter than `length`
/// (or if `length` is 0).
pub fn generate_windows(sequence: &str, length: usize) -> Vec<Window> {
    if length == 0 {
        return Vec::new();
    }
    let residues: Vec<char> = sequence.chars().collect();
    residues
        .windows(length)
        .enumerate()
        .map(|(start, w)| Window {
            peptide: w.iter().collect(),
            start,
            end: start + length - 1,
        })
        .collect()
}

/// True if the peptide is non-empty and only contains the 20 standard
/// (upper-case) residues.
pub fn is_valid_peptide(peptide: &str) -> bool {
    !peptide.is_empty() && peptide.bytes().all(|b| aa_index(b).is_some())
}

/// Numeric encoding of a whole input sequence: the mean hydropathy of its
/// upper-cased residues, unknown residues counting for 0.5.
pub fn sequence_hydrophobicity(sequence: &str) -> f64 {
    let values: Vec<f64> = sequence
        .to_uppercase()
        .chars()
        .map(|c| {
            u8::try_from(c)
                .ok()
                .and_then(|b| KYTE_DOOLITTLE.get(&b).copied())
                .unwrap_or(UNKNOWN_RESIDUE_HYDROPATHY)
        })
        .collect();
    if values.is_empty() {
        return UNKNOWN_RESIDUE_HYDROPATHY;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
