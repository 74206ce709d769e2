//! Reference catalog of allele strings
use crate::hla::scoring::AlleleScoreRule;
use crate::shared::errors::EpitopeError;
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read-only list of allele strings. Entry order is kept and used as the
/// tie-break order when matching.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceCatalog {
    entries: Vec<String>,
}

impl ReferenceCatalog {
    /// Blank entries are dropped.
    pub fn from_entries<I, S>(entries: I) -> ReferenceCatalog
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ReferenceCatalog {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Read the allele strings from the `column` of a csv file with headers.
    pub fn from_csv_reader<R: Read>(reader: R, column: &str) -> Result<ReferenceCatalog> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| anyhow!("Error reading the catalog headers: {:?}", e))?;
        let idx = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or(anyhow!("No column {} in the reference catalog", column))?;
        let mut entries = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| anyhow!("Error reading the record {:?}", e))?;
            if let Some(value) = record.get(idx) {
                entries.push(value.to_string());
            }
        }
        Ok(ReferenceCatalog::from_entries(entries))
    }

    /// One allele string per line.
    pub fn from_lines<R: BufRead>(reader: R) -> Result<ReferenceCatalog> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Ok(ReferenceCatalog::from_entries(lines))
    }

    /// Load a csv (`.csv`, read from `column`) or a plain list (any other
    /// extension). A missing file gives an empty catalog, every window then
    /// gets an empty match list.
    pub fn load(path: &Path, column: &str) -> Result<ReferenceCatalog> {
        if !path.exists() {
            log::warn!("{}", EpitopeError::CatalogUnavailable(path.to_path_buf()));
            return Ok(ReferenceCatalog::default());
        }
        let file = File::open(path)
            .with_context(|| format!("Error opening the reference catalog {}", path.display()))?;
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let catalog = if is_csv {
            ReferenceCatalog::from_csv_reader(file, column)
        } else {
            ReferenceCatalog::from_lines(BufReader::new(file))
        }
        .with_context(|| format!("Error reading the reference catalog {}", path.display()))?;

        if catalog.is_empty() {
            log::warn!("Reference catalog {} has no entry", path.display());
        } else {
            let scores = catalog.reference_scores();
            let (min, max) = scores
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                    (lo.min(s), hi.max(s))
                });
            log::info!(
                "Loaded {} reference alleles from {} (reference scores {:.2} to {:.2})",
                catalog.len(),
                path.display(),
                min,
                max
            );
        }
        Ok(catalog)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scores of the entries under the additive rule, the scale of the
    /// affinity regressors' training target.
    pub fn reference_scores(&self) -> Vec<f64> {
        self.scores(AlleleScoreRule::Additive)
    }

    pub fn scores(&self, rule: AlleleScoreRule) -> Vec<f64> {
        self.entries.iter().map(|e| rule.score(e)).collect()
    }
}
