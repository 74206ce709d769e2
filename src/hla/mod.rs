//! HLA reference catalog and nearest-allele matching
pub mod catalog;
pub mod matcher;
pub mod scoring;

pub use catalog::ReferenceCatalog;
pub use matcher::AlleleMatcher;
pub use scoring::AlleleScoreRule;
