//! Residue-level physicochemical analysis of a peptide.
//!
//! The feature extractor only depends on the `ProteinAnalyzer` trait; `ProtParam`
//! is the default implementation and follows the ExPASy ProtParam definitions
//! (Bjellqvist pK set for the charge, Guruprasad instability index,
//! Pace extinction coefficients).
use crate::shared::amino_acids::{
    aa_index, AMINO_ACIDS, DIWV, KYTE_DOOLITTLE, RESIDUE_WEIGHTS, WATER_WEIGHT,
};
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Everything the feature extractor needs from the analyzer, for one peptide.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Analysis {
    pub isoelectric_point: f64,
    pub instability_index: f64,
    pub aromaticity: f64,
    pub secondary_structure: SecondaryStructure,
    pub charge_at_ph7: f64,
    pub gravy: f64,
    pub molecular_weight: f64,
    pub molar_extinction: MolarExtinction,
    // fraction of each residue, indexed like `AMINO_ACIDS`
    pub amino_acids_percent: [f64; 20],
}

/// Fractions of residues favouring each conformation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SecondaryStructure {
    pub helix: f64,
    pub turn: f64,
    pub sheet: f64,
}

/// Molar extinction coefficient at 280nm, with reduced cysteines and with
/// every cysteine pair forming a cystine.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct MolarExtinction {
    pub reduced: f64,
    pub cystines: f64,
}

/// External "protein analyzer" capability. Only called on valid peptides
/// (non-empty, 20-letter alphabet).
pub trait ProteinAnalyzer: Send + Sync {
    fn analyze(&self, peptide: &str) -> Analysis;
}

static POSITIVE_PKS: phf::Map<u8, f64> = phf_map! {
    b'K' => 10.0, b'R' => 12.0, b'H' => 5.98,
};
static NEGATIVE_PKS: phf::Map<u8, f64> = phf_map! {
    b'D' => 4.05, b'E' => 4.45, b'C' => 9.0, b'Y' => 10.0,
};
static N_TERMINAL_PKS: phf::Map<u8, f64> = phf_map! {
    b'A' => 7.59, b'M' => 7.0, b'S' => 6.93, b'P' => 8.36,
    b'T' => 6.82, b'V' => 7.44, b'E' => 7.7,
};
static C_TERMINAL_PKS: phf::Map<u8, f64> = phf_map! {
    b'D' => 4.55, b'E' => 4.75,
};
const N_TERMINUS_PK: f64 = 7.5;
const C_TERMINUS_PK: f64 = 3.55;

const EXTINCTION_TRP: f64 = 5500.;
const EXTINCTION_TYR: f64 = 1490.;
const EXTINCTION_CYSTINE: f64 = 125.;

const HELIX_FORMERS: &[u8] = b"VIYFWL";
const TURN_FORMERS: &[u8] = b"NPGS";
const SHEET_FORMERS: &[u8] = b"EMAL";

#[derive(Default, Clone, Copy, Debug)]
pub struct ProtParam;

impl ProteinAnalyzer for ProtParam {
    fn analyze(&self, peptide: &str) -> Analysis {
        let seq = peptide.as_bytes();
        let counts = residue_counts(seq);
        let amino_acids_percent = amino_acids_percent(&counts, seq.len());
        Analysis {
            isoelectric_point: isoelectric_point(seq, &counts),
            instability_index: instability_index(seq),
            aromaticity: fraction_of(&amino_acids_percent, b"FWY"),
            secondary_structure: SecondaryStructure {
                helix: fraction_of(&amino_acids_percent, HELIX_FORMERS),
                turn: fraction_of(&amino_acids_percent, TURN_FORMERS),
                sheet: fraction_of(&amino_acids_percent, SHEET_FORMERS),
            },
            charge_at_ph7: charge_at_ph(seq, &counts, 7.0),
            gravy: gravy(seq),
            molecular_weight: molecular_weight(seq),
            molar_extinction: molar_extinction(&counts),
            amino_acids_percent,
        }
    }
}

pub fn residue_counts(seq: &[u8]) -> [usize; 20] {
    let mut counts = [0; 20];
    for idx in seq.iter().filter_map(|&aa| aa_index(aa)) {
        counts[idx] += 1;
    }
    counts
}

fn count_of(counts: &[usize; 20], aa: u8) -> usize {
    aa_index(aa).map(|i| counts[i]).unwrap_or(0)
}

fn amino_acids_percent(counts: &[usize; 20], len: usize) -> [f64; 20] {
    let mut percent = [0.; 20];
    if len == 0 {
        return percent;
    }
    for (p, &c) in percent.iter_mut().zip(counts.iter()) {
        *p = c as f64 / len as f64;
    }
    percent
}

fn fraction_of(percent: &[f64; 20], residues: &[u8]) -> f64 {
    residues
        .iter()
        .filter_map(|&aa| aa_index(aa))
        .map(|i| percent[i])
        .sum()
}

/// Net charge at a given pH (Henderson-Hasselbalch), the terminal pKs being
/// adjusted for the first and last residues.
pub fn charge_at_ph(seq: &[u8], counts: &[usize; 20], ph: f64) -> f64 {
    let (first, last) = match (seq.first(), seq.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => return 0.,
    };
    let n_term_pk = N_TERMINAL_PKS
        .get(&first)
        .copied()
        .unwrap_or(N_TERMINUS_PK);
    let c_term_pk = C_TERMINAL_PKS
        .get(&last)
        .copied()
        .unwrap_or(C_TERMINUS_PK);

    let positive_partial = |pk: f64| 1. / (10f64.powf(ph - pk) + 1.);
    let negative_partial = |pk: f64| 1. / (10f64.powf(pk - ph) + 1.);

    let mut positive = positive_partial(n_term_pk);
    for (&aa, &pk) in POSITIVE_PKS.entries() {
        positive += count_of(counts, aa) as f64 * positive_partial(pk);
    }
    let mut negative = negative_partial(c_term_pk);
    for (&aa, &pk) in NEGATIVE_PKS.entries() {
        negative += count_of(counts, aa) as f64 * negative_partial(pk);
    }
    positive - negative
}

/// Bisection on the net charge, from pH 7.775 inside [4.05, 12].
pub fn isoelectric_point(seq: &[u8], counts: &[usize; 20]) -> f64 {
    let mut ph = 7.775;
    let mut min = 4.05;
    let mut max = 12.;
    while max - min > 0.0001 {
        if charge_at_ph(seq, counts, ph) > 0. {
            min = ph;
        } else {
            max = ph;
        }
        ph = (min + max) / 2.;
    }
    ph
}

pub fn instability_index(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.;
    }
    let score: f64 = seq
        .windows(2)
        .filter_map(|d| Some(DIWV[aa_index(d[0])?][aa_index(d[1])?]))
        .sum();
    10. / seq.len() as f64 * score
}

pub fn gravy(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.;
    }
    let sum: f64 = seq
        .iter()
        .map(|aa| KYTE_DOOLITTLE.get(aa).copied().unwrap_or(0.))
        .sum();
    sum / seq.len() as f64
}

pub fn molecular_weight(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.;
    }
    let sum: f64 = seq
        .iter()
        .map(|aa| RESIDUE_WEIGHTS.get(aa).copied().unwrap_or(0.))
        .sum();
    sum - (seq.len() - 1) as f64 * WATER_WEIGHT
}

fn molar_extinction(counts: &[usize; 20]) -> MolarExtinction {
    let reduced = count_of(counts, b'W') as f64 * EXTINCTION_TRP
        + count_of(counts, b'Y') as f64 * EXTINCTION_TYR;
    let cystines = reduced + (count_of(counts, b'C') / 2) as f64 * EXTINCTION_CYSTINE;
    MolarExtinction { reduced, cystines }
}

/// Convenience: residue fraction as a map-like lookup, 0 when absent.
pub fn percent_of(analysis: &Analysis, aa: u8) -> f64 {
    aa_index(aa)
        .map(|i| analysis.amino_acids_percent[i])
        .unwrap_or(0.)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn molecular_weight_of_dipeptide() {
        assert!(close(molecular_weight(b"G"), 75.0666, 1e-9));
        assert!(close(
            molecular_weight(b"AA"),
            2. * 89.0932 - WATER_WEIGHT,
            1e-9
        ));
    }

    #[test]
    fn charge_and_pi() {
        let acidic = b"DDDDD";
        let basic = b"KKKKK";
        let pi_acid = isoelectric_point(acidic, &residue_counts(acidic));
        let pi_base = isoelectric_point(basic, &residue_counts(basic));
        assert!(pi_acid < 4.5);
        assert!(pi_base > 9.5);
        // the charge changes sign around the pI
        let counts = residue_counts(basic);
        assert!(charge_at_ph(basic, &counts, pi_base - 1.) > 0.);
        assert!(charge_at_ph(basic, &counts, pi_base + 1.) < 0.);
    }

    #[test]
    fn extinction() {
        let ext = molar_extinction(&residue_counts(b"WYCC"));
        assert!(close(ext.reduced, 6990., 1e-9));
        assert!(close(ext.cystines, 7115., 1e-9));
    }

    #[test]
    fn instability_of_known_dipeptides() {
        // AC = 44.94, one dipeptide, length 2
        assert!(close(instability_index(b"AC"), 10. / 2. * 44.94, 1e-9));
        assert!(close(instability_index(b"A"), 0., 1e-12));
    }

    #[test]
    fn analysis_fractions() {
        let a = ProtParam.analyze("AAWF");
        assert!(close(a.aromaticity, 0.5, 1e-12));
        assert!(close(a.secondary_structure.helix, 0.5, 1e-12));
        assert!(close(a.secondary_structure.sheet, 0.5, 1e-12));
        assert!(close(a.secondary_structure.turn, 0., 1e-12));
        assert!(close(percent_of(&a, b'A'), 0.5, 1e-12));
        assert!(close(a.amino_acids_percent.iter().sum::<f64>(), 1., 1e-12));
        assert!(close(a.gravy, (1.8 * 2. - 0.9 + 2.8) / 4., 1e-12));
        assert_eq!(AMINO_ACIDS.len(), a.amino_acids_percent.len());
    }
}
