//! The prediction pipeline: windows, features, ensemble, allele matching
//! and candidate selection, for one sequence and one mode.
pub mod report;
pub mod selector;

pub use report::{write_csv, CandidateRow, Prediction, ResultRow, RunReport, Selection};
pub use selector::{select, top_scored};

use crate::ensemble::Ensemble;
use crate::features::analyzer::{ProtParam, ProteinAnalyzer};
use crate::features::row::RecordBuilder;
use crate::hla::{AlleleMatcher, ReferenceCatalog};
use crate::models::ModelSet;
use crate::shared::parameters::{MhcClass, Mode, PipelineParameters};
use crate::shared::sequence::{generate_windows, sequence_hydrophobicity, Window};
use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::path::Path;

#[cfg(feature = "kdam")]
use kdam::TqdmParallelIterator;

/// Models, catalog and parameters, loaded once and shared read-only by
/// every run.
pub struct Pipeline {
    models: ModelSet,
    ensemble: Ensemble,
    catalog: ReferenceCatalog,
    matcher: AlleleMatcher,
    analyzer: Box<dyn ProteinAnalyzer>,
    params: PipelineParameters,
    // dedicated pool when `num_threads` is set, rayon's global pool otherwise
    pool: Option<ThreadPool>,
}

impl Pipeline {
    pub fn new(
        models: ModelSet,
        catalog: ReferenceCatalog,
        params: PipelineParameters,
    ) -> Result<Pipeline> {
        Pipeline::with_analyzer(models, catalog, params, Box::new(ProtParam))
    }

    pub fn with_analyzer(
        models: ModelSet,
        catalog: ReferenceCatalog,
        params: PipelineParameters,
        analyzer: Box<dyn ProteinAnalyzer>,
    ) -> Result<Pipeline> {
        params.validate()?;
        let ensemble = Ensemble::new(&models)?;
        let matcher = AlleleMatcher::new(&catalog);
        let pool = match params.num_threads {
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .context("Error building the thread pool")?,
            ),
            None => None,
        };
        Ok(Pipeline {
            models,
            ensemble,
            catalog,
            matcher,
            analyzer,
            params,
            pool,
        })
    }

    /// Load the model directory and the reference catalog. Fails before any
    /// prediction if a model is missing.
    pub fn load(
        model_dir: &Path,
        catalog_path: &Path,
        params: PipelineParameters,
    ) -> Result<Pipeline> {
        params.validate()?;
        let models = ModelSet::load(model_dir)?;
        let catalog = ReferenceCatalog::load(catalog_path, &params.catalog_column)?;
        Pipeline::new(models, catalog, params)
    }

    pub fn params(&self) -> &PipelineParameters {
        &self.params
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// One report per scan of the mode, `Both` giving the MHC-1 report
    /// then the MHC-2 one.
    pub fn predict(&self, sequence: &str, mode: Mode) -> Result<Vec<RunReport>> {
        mode.classes()
            .into_iter()
            .map(|class| self.run(sequence, class))
            .collect()
    }

    /// Scan `sequence` with the window length of `class`.
    pub fn run(&self, sequence: &str, class: MhcClass) -> Result<RunReport> {
        let window_length = class.window_length(&self.params);
        let windows = generate_windows(sequence, window_length);
        log::info!(
            "{}: {} windows of length {} over {} residues",
            class,
            windows.len(),
            window_length,
            sequence.chars().count()
        );

        let builder = RecordBuilder::new(sequence, self.analyzer.as_ref());
        if !builder.has_protein_features() && !windows.is_empty() {
            log::warn!(
                "{}: the sequence holds non-standard residues, no window can be evaluated",
                class
            );
        }
        let sequence_scalar = sequence_hydrophobicity(sequence);

        let rows = match &self.pool {
            Some(pool) => pool.install(|| self.evaluate_windows(windows, &builder, sequence_scalar)),
            None => self.evaluate_windows(windows, &builder, sequence_scalar),
        };
        let n_invalid = rows.iter().filter(|r| !r.is_valid()).count();
        if n_invalid > 0 {
            log::warn!("{}: {} invalid windows skipped", class, n_invalid);
        }

        let selection = select(&rows, self.params.max_candidates);
        match &selection {
            Selection::Filtered(c) => {
                log::info!("{}: {} windows pass the classifier filter", class, c.len())
            }
            Selection::TopScored(c) => log::info!(
                "{}: more than {} windows pass the classifier filter, keeping the {} best scored",
                class,
                self.params.max_candidates,
                c.len()
            ),
        }

        Ok(RunReport {
            class,
            window_length,
            rows,
            selection,
        })
    }

    fn evaluate_windows(
        &self,
        windows: Vec<Window>,
        builder: &RecordBuilder,
        sequence_scalar: f64,
    ) -> Vec<ResultRow> {
        #[cfg(feature = "kdam")]
        {
            if self.params.show_progress {
                let mut rows: Vec<ResultRow> = windows
                    .into_par_iter()
                    .tqdm()
                    .map(|w| self.evaluate_window(w, builder, sequence_scalar))
                    .collect();
                rows.sort_by_key(|r| r.start);
                return rows;
            }
        }

        windows
            .into_par_iter()
            .map(|w| self.evaluate_window(w, builder, sequence_scalar))
            .collect()
    }

    fn evaluate_window(
        &self,
        window: Window,
        builder: &RecordBuilder,
        sequence_scalar: f64,
    ) -> ResultRow {
        let row = builder.build(window);
        if !row.is_valid() {
            return ResultRow::invalid(row.window);
        }
        match self.ensemble.evaluate(&row, sequence_scalar, &self.models) {
            Ok(estimates) => {
                let matched = self
                    .matcher
                    .nearest(estimates.affinity.value(), self.params.nearest_k);
                ResultRow::new(row.window, Prediction::new(estimates, matched))
            }
            Err(e) => {
                log::warn!(
                    "Window {}-{} ({}) skipped: {:#}",
                    row.window.start,
                    row.window.end,
                    row.window.peptide,
                    e
                );
                ResultRow::invalid(row.window)
            }
        }
    }
}
