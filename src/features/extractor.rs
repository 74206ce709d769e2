//! Peptide -> physicochemical feature vector
use crate::features::analyzer::{percent_of, ProteinAnalyzer};
use crate::shared::amino_acids::{hydropathy, ATOM_CONTRIBUTIONS, AMINO_ACIDS, COMPOSITION_ORDER};
use crate::shared::sequence::is_valid_peptide;
use ndarray::{Array1, ArrayView1};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const POSITIVE_RESIDUES: &[u8] = b"RKH";
const NEGATIVE_RESIDUES: &[u8] = b"DE";
const POLAR_RESIDUES: &[u8] = b"STNQ";
// every standard residue counts as "non polar" in the trained models,
// so this count is the peptide length.
const NONPOLAR_RESIDUES: &[u8] = &AMINO_ACIDS;

/// Names of the entries of a `FeatureVector`, in storage order.
pub static FEATURE_NAMES: Lazy<Vec<String>> = Lazy::new(|| {
    let mut names: Vec<String> = [
        "H_Count",
        "C_Count",
        "N_Count",
        "O_Count",
        "S_Count",
        "TotalAtoms_Count",
        "Theoretical.pI",
        "Aliphatic.Index",
        "Positive.Residues",
        "Negative.Residues",
        "Aromatic.Count",
        "Polar.Count",
        "Nonpolar.Count",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    names.extend(
        COMPOSITION_ORDER
            .iter()
            .map(|&aa| format!("{}_Percent", aa as char)),
    );
    names.extend(
        [
            "Molecular.Weight",
            "Instability.Index",
            "Aromaticity",
            "Helix.Fraction",
            "Strand.Fraction",
            "Coil.Fraction",
            "Charge.at.pH.7.0",
            "Gravy",
            "Amphipathicity",
            "GRAVY.Last.50",
            "Molar.Extinction.Coefficient",
            "Molar.Extinction.Coefficient.Cystines",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    names
});

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AtomCounts {
    pub hydrogen: u32,
    pub carbon: u32,
    pub nitrogen: u32,
    pub oxygen: u32,
    pub sulfur: u32,
}

impl AtomCounts {
    pub fn total(&self) -> u32 {
        self.hydrogen + self.carbon + self.nitrogen + self.oxygen + self.sulfur
    }
}

/// Elemental composition of the residues (no correction for peptide bonds).
/// Residues are upper-cased, unknown residues contribute nothing.
pub fn atom_counts(peptide: &str) -> AtomCounts {
    let mut counts = AtomCounts::default();
    for aa in peptide.bytes().map(|b| b.to_ascii_uppercase()) {
        if let Some(&[h, c, n, o, s]) = ATOM_CONTRIBUTIONS.get(&aa) {
            counts.hydrogen += h;
            counts.carbon += c;
            counts.nitrogen += n;
            counts.oxygen += o;
            counts.sulfur += s;
        }
    }
    counts
}

/// Mean hydropathy of the peptide. Not the classic aliphatic index
/// (this is the definition the predictors were trained on).
pub fn aliphatic_index(peptide: &str) -> f64 {
    if peptide.is_empty() {
        return 0.;
    }
    total_hydropathy(peptide) / peptide.len() as f64
}

/// `sum(hydropathy) - mean(hydropathy)`, i.e. `(n - 1) * mean`.
pub fn amphipathicity(peptide: &str) -> f64 {
    if peptide.is_empty() {
        return 0.;
    }
    let moment = total_hydropathy(peptide);
    moment - moment / peptide.len() as f64
}

fn total_hydropathy(peptide: &str) -> f64 {
    peptide.bytes().map(hydropathy).sum()
}

fn count_residues(peptide: &str, residues: &[u8]) -> f64 {
    peptide.bytes().filter(|b| residues.contains(b)).count() as f64
}

/// Numeric summary of one peptide, stored in `FEATURE_NAMES` order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureVector {
    values: Array1<f64>,
}

impl FeatureVector {
    pub fn names() -> &'static [String] {
        &FEATURE_NAMES
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn values(&self) -> ArrayView1<f64> {
        self.values.view()
    }

    /// Fraction of the peptide made of each residue, in `COMPOSITION_ORDER`
    pub fn composition(&self) -> Vec<f64> {
        COMPOSITION_ORDER
            .iter()
            .filter_map(|&aa| self.get(&format!("{}_Percent", aa as char)))
            .collect()
    }
}

/// Compute the feature vector of a peptide.
/// Returns `None` (the all-null sentinel) if the peptide is empty or
/// contains anything outside the 20-letter alphabet.
pub fn extract(peptide: &str, analyzer: &dyn ProteinAnalyzer) -> Option<FeatureVector> {
    if !is_valid_peptide(peptide) {
        return None;
    }
    let analysis = analyzer.analyze(peptide);
    let atoms = atom_counts(peptide);
    let length = peptide.len() as f64;

    let mut values = Vec::with_capacity(FEATURE_NAMES.len());
    values.extend([
        atoms.hydrogen as f64,
        atoms.carbon as f64,
        atoms.nitrogen as f64,
        atoms.oxygen as f64,
        atoms.sulfur as f64,
        atoms.total() as f64,
        analysis.isoelectric_point,
        aliphatic_index(peptide),
        count_residues(peptide, POSITIVE_RESIDUES),
        count_residues(peptide, NEGATIVE_RESIDUES),
        analysis.aromaticity * length,
        count_residues(peptide, POLAR_RESIDUES),
        count_residues(peptide, NONPOLAR_RESIDUES),
    ]);
    values.extend(COMPOSITION_ORDER.iter().map(|&aa| percent_of(&analysis, aa)));
    values.extend([
        analysis.molecular_weight,
        analysis.instability_index,
        analysis.aromaticity,
        analysis.secondary_structure.helix,
        analysis.secondary_structure.turn,
        analysis.secondary_structure.sheet,
        analysis.charge_at_ph7,
        analysis.gravy,
        amphipathicity(peptide),
        analysis.gravy,
        analysis.molar_extinction.reduced,
        analysis.molar_extinction.cystines,
    ]);
    debug_assert_eq!(values.len(), FEATURE_NAMES.len());

    Some(FeatureVector {
        values: Array1::from(values),
    })
}
