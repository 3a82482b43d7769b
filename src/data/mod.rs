// mod.rs - Data structures module

pub mod comparison;
pub mod loaders;
pub mod sequence;
pub mod table;

// Re-export main types for convenience
pub use comparison::{format_vector, group_name, parse_vector, ComparisonRecord, DifferenceVector};
pub use sequence::{placeholder_group, AlignmentSet, SequenceRecord, REFERENCE_ID};
pub use table::ComparisonTable;
