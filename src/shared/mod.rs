//! Shared functionalities: residue tables, windows, parameters and errors
pub mod amino_acids;
pub mod errors;
pub mod parameters;
pub mod sequence;

pub use amino_acids::{aa_index, hydropathy, AMINO_ACIDS, COMPOSITION_ORDER, KYTE_DOOLITTLE};
pub use errors::EpitopeError;
pub use parameters::{MhcClass, Mode, PipelineParameters};
pub use sequence::{generate_windows, is_valid_peptide, sequence_hydrophobicity, Window};
