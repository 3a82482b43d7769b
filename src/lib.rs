// lib.rs - kmersig library root

//! # kmersig - K-mer difference signatures for per-variant-group alignments
//!
//! Every group alignment holds a reference (`seq0`) and its variants. Each
//! variant is compared to the reference window by window, giving a binary
//! vector per variant; the vectors of one group are then reduced to a compact
//! signature matrix.
//!
//! ## Features
//!
//! - **Parallel**: groups are compared on a fixed worker pool, one failure never stops the run
//! - **Two reducers**: identity augmentation with zero/duplicate column removal, or the adjacent-diff filter
//! - **Strict table format**: vectors are stored as versioned `[0, 1, 1]` literals and parsed without evaluation
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use kmersig::prelude::*;
//! use std::path::Path;
//!
//! let logger = Logger::root();
//! let params = KmerParams::new(4, Some(8))?;
//! let step1 = process_fasta_files(
//!     Path::new("alignment_results"),
//!     &params,
//!     Some(Path::new("out/comparison_results.csv")),
//!     Some(Path::new("out/error_log.txt")),
//!     false,
//!     &logger,
//! )?;
//! println!("{} rows", step1.run.processed.len());
//!
//! let reduced = process_and_merge_results(
//!     Path::new("out/comparison_results.csv"),
//!     Path::new("out/output_final_results.csv"),
//!     &Crc32ColumnHasher,
//!     &logger,
//! )?;
//! println!("{} groups", reduced.group_count());
//! # Ok::<(), kmersig::KmerError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod hashers;
pub mod logging;
pub mod output;
pub mod pipeline;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{compare_windows, kmer_window, process_sequences, GroupOutcome};
    pub use crate::core::{reduce_group, reduce_table, retain_changed_columns_table};
    pub use crate::core::{ComparisonRun, Dispatcher, GroupUnit, KmerParams, ReducerKind};
    pub use crate::data::{AlignmentSet, ComparisonRecord, ComparisonTable, SequenceRecord};
    pub use crate::error::KmerError;
    pub use crate::hashers::{ColumnHasher, Crc32ColumnHasher};
    pub use crate::logging::Logger;
    pub use crate::pipeline::{
        process_and_merge_results, process_chromosome_groups, process_fasta_files,
        reduce_comparison_file, OutputLayout,
    };
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{KmerParams, ReducerKind};
pub use data::{AlignmentSet, ComparisonRecord, ComparisonTable, SequenceRecord};
pub use error::KmerError;
pub use hashers::{ColumnHasher, Crc32ColumnHasher};
pub use logging::Logger;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
