//! Numeric score of an allele string.
//!
//! An entry is a list of alleles separated by `/`. In each allele the
//! letters are looked up in the Kyte-Doolittle table (absolute value, 0 when
//! unknown) and the digits, concatenated, form a multiplier. Alleles without
//! digits contribute nothing. The two rules below differ in how a letter and
//! the multiplier are combined, and both are in use: `Additive` gives the
//! reference scores the affinity regressors were trained against,
//! `Multiplicative` is used when matching.
use crate::shared::amino_acids::KYTE_DOOLITTLE;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlleleScoreRule {
    // |h(letter)| + multiplier
    Additive,
    // |h(letter)| * multiplier
    Multiplicative,
}

impl AlleleScoreRule {
    pub fn score(&self, entry: &str) -> f64 {
        entry
            .split('/')
            .filter_map(parse_allele)
            .map(|(letters, multiplier)| {
                letters
                    .iter()
                    .map(|h| match self {
                        AlleleScoreRule::Additive => h + multiplier,
                        AlleleScoreRule::Multiplicative => h * multiplier,
                    })
                    .sum::<f64>()
            })
            .sum()
    }
}

/// Letter values and multiplier of one allele, None without digits.
fn parse_allele(allele: &str) -> Option<(Vec<f64>, f64)> {
    let digits: String = allele.chars().filter(|c| c.is_ascii_digit()).collect();
    // a long digit run still parses, as a large float
    let multiplier = digits.parse::<f64>().ok()?;
    let letters = allele
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| {
            u8::try_from(c)
                .ok()
                .and_then(|b| KYTE_DOOLITTLE.get(&b))
                .map_or(0., |h| h.abs())
        })
        .collect();
    Some((letters, multiplier))
}
