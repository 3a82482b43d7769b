// mod.rs - Core logic module

pub mod adjacent;
pub mod dispatcher;
pub mod params;
pub mod reduction;
pub mod window;

// Re-export main types for convenience
pub use adjacent::{retain_changed_columns_group, retain_changed_columns_table};
pub use dispatcher::{ComparisonRun, Dispatcher, GroupUnit, DEFAULT_WORKERS};
pub use params::{KmerParams, ReducerKind};
pub use reduction::{reduce_group, reduce_table, GroupMatrix};
pub use window::{compare_windows, kmer_window, process_sequences, GroupOutcome, DEFAULT_WINDOW_SIZE};
