//! Top-candidate selection over the rows of one run
use crate::pipeline::report::{CandidateRow, ResultRow, Selection};
use itertools::Itertools;

/// Rows where the extra trees and random forest classifiers agree on an
/// epitope. If there are at most `max_candidates` of them, they are
/// returned with reduced columns. Otherwise the valid rows with the highest
/// XGBoost scores are returned in full: the `max_candidates` best scores
/// are kept, along with every row tied with the last one.
pub fn select(rows: &[ResultRow], max_candidates: usize) -> Selection {
    let passing: Vec<&ResultRow> = rows
        .iter()
        .filter(|r| {
            r.prediction
                .as_ref()
                .is_some_and(|p| p.votes.pair_consensus())
        })
        .collect();

    if passing.len() <= max_candidates {
        return Selection::Filtered(passing.into_iter().map(CandidateRow::from).collect());
    }
    Selection::TopScored(top_scored(rows, max_candidates))
}

/// Valid rows by decreasing score (then increasing start), cut after the
/// `n`-th one but keeping the rows tied with it.
pub fn top_scored(rows: &[ResultRow], n: usize) -> Vec<ResultRow> {
    let ranked: Vec<(f64, &ResultRow)> = rows
        .iter()
        .filter_map(|r| r.score_a().map(|s| (s, r)))
        .sorted_by(|a, b| b.0.total_cmp(&a.0))
        .collect();
    if n == 0 {
        return Vec::new();
    }
    let cutoff = match ranked.get(n - 1) {
        Some(&(score, _)) => score,
        None => f64::NEG_INFINITY,
    };
    ranked
        .into_iter()
        .take_while(|(score, _)| *score >= cutoff)
        .map(|(_, row)| row.clone())
        .collect()
}
