//! Feature extraction: from a peptide to the numeric rows fed to the predictors
pub mod analyzer;
pub mod columns;
pub mod extractor;
pub mod row;

pub use analyzer::{Analysis, ProtParam, ProteinAnalyzer};
pub use extractor::{atom_counts, extract, AtomCounts, FeatureVector};
pub use row::{resolve_columns, FeatureRow, RecordBuilder};
