// pipeline.rs - Step orchestration: alignments -> comparison table -> reduced table

use std::path::{Path, PathBuf};
use crate::core::adjacent::retain_changed_columns_table;
use crate::core::dispatcher::{ComparisonRun, Dispatcher};
use crate::core::params::{KmerParams, ReducerKind};
use crate::core::reduction::reduce_table;
use crate::data::sequence::AlignmentSet;
use crate::data::table::ComparisonTable;
use crate::error::Result;
use crate::hashers::ColumnHasher;
use crate::logging::Logger;
use crate::output::{write_comparison_csv, write_error_log};

/// Intermediate (pre-reduction) table name inside the output directory
pub const INTERMEDIATE_TABLE: &str = "comparison_results.csv";
/// Final table name inside the output directory
pub const FINAL_TABLE: &str = "output_final_results.csv";
/// Default error log name inside the output directory
pub const ERROR_LOG: &str = "error_log.txt";

/// File locations of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub intermediate: PathBuf,
    pub final_table: PathBuf,
    pub error_log: PathBuf,
}

impl OutputLayout {
    pub fn in_dir(out_dir: &Path) -> Self {
        Self {
            intermediate: out_dir.join(INTERMEDIATE_TABLE),
            final_table: out_dir.join(FINAL_TABLE),
            error_log: out_dir.join(ERROR_LOG),
        }
    }
}

/// Counts from loading the alignment directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub groups: usize,
    pub sequences: usize,
    pub placeholder_groups: usize,
    pub skipped_files: usize,
}

impl From<&AlignmentSet> for LoadStats {
    fn from(set: &AlignmentSet) -> Self {
        Self {
            groups: set.groups.len(),
            sequences: set.total_sequences,
            placeholder_groups: set.placeholder_groups,
            skipped_files: set.skipped_files,
        }
    }
}

/// Output of [`process_fasta_files`]
#[derive(Debug, Clone, Default)]
pub struct FastaProcessing {
    pub load: LoadStats,
    pub run: ComparisonRun,
}

/// Step 1: read every group alignment in `directory`, compare all groups in
/// parallel and optionally persist the table and the error log.
///
/// Per-group failures end up in `run.errors`; anything returned as `Err`
/// is fatal for the run and has already been logged.
pub fn process_fasta_files(
    directory: &Path,
    params: &KmerParams,
    output_file: Option<&Path>,
    error_log: Option<&Path>,
    show_progress: bool,
    logger: &Logger,
) -> Result<FastaProcessing> {
    let logger = logger.scoped("pipeline");
    compare_directory(directory, params, output_file, error_log, show_progress, &logger).map_err(|e| {
        logger.error(format!("Error in process_fasta_files: {}", e));
        e
    })
}

fn compare_directory(
    directory: &Path,
    params: &KmerParams,
    output_file: Option<&Path>,
    error_log: Option<&Path>,
    show_progress: bool,
    logger: &Logger,
) -> Result<FastaProcessing> {
    params.validate()?;
    logger.info(format!(
        "Starting FASTA processing with {} workers (k = {})",
        params.effective_workers(),
        params.window_size
    ));

    let alignments = AlignmentSet::from_directory(directory, logger)?;
    let load = LoadStats::from(&alignments);

    let run = Dispatcher::new(params.workers, logger)
        .with_progress(show_progress)
        .dispatch_groups(alignments, params.window_size)?;

    if let Some(path) = output_file {
        save_kmer_results_to_csv(&run, path, logger)?;
    }

    if let Some(path) = error_log {
        if !run.errors.is_empty() {
            write_error_log(path, &run.errors)?;
            logger.warn(format!("Errors were logged to: {}", path.display()));
        }
    }

    Ok(FastaProcessing { load, run })
}

/// Persist the rows of a comparison run. An empty run still gets a header.
pub fn save_kmer_results_to_csv(run: &ComparisonRun, output_file: &Path, logger: &Logger) -> Result<()> {
    if run.processed.is_empty() {
        logger.warn("No results to save");
    }
    let table = ComparisonTable::from_records(run.processed.clone());
    write_comparison_csv(output_file, &table)?;
    logger.info(format!("Results saved to: {}", output_file.display()));
    Ok(())
}

/// Step 2 (default): identity-augmented column reduction of every group.
pub fn process_and_merge_results(
    input_file: &Path,
    output_file: &Path,
    hasher: &dyn ColumnHasher,
    logger: &Logger,
) -> Result<ComparisonTable> {
    let logger = logger.scoped("pipeline");
    merge_table_file(input_file, output_file, hasher, &logger).map_err(|e| {
        logger.error(format!("Error processing results: {}", e));
        e
    })
}

fn merge_table_file(
    input_file: &Path,
    output_file: &Path,
    hasher: &dyn ColumnHasher,
    logger: &Logger,
) -> Result<ComparisonTable> {
    logger.info(format!("Reading comparison results from: {}", input_file.display()));
    let table = ComparisonTable::from_csv(input_file)?;
    let reduced = reduce_table(&table, hasher, logger)?;
    write_comparison_csv(output_file, &reduced)?;
    logger.info(format!("Processed results saved to: {}", output_file.display()));
    Ok(reduced)
}

/// Step 2 (legacy): keep columns that change from their left neighbour.
pub fn process_chromosome_groups(
    input_file: &Path,
    output_file: &Path,
    logger: &Logger,
) -> Result<ComparisonTable> {
    let logger = logger.scoped("pipeline");
    retain_table_file(input_file, output_file, &logger).map_err(|e| {
        logger.error(format!("Error in process_chromosome_groups: {}", e));
        e
    })
}

fn retain_table_file(input_file: &Path, output_file: &Path, logger: &Logger) -> Result<ComparisonTable> {
    logger.info(format!("Reading comparison results from: {}", input_file.display()));
    let table = ComparisonTable::from_csv(input_file)?;
    let retained = retain_changed_columns_table(&table, logger)?;
    write_comparison_csv(output_file, &retained)?;
    logger.info(format!("Processed results saved to: {}", output_file.display()));
    Ok(retained)
}

/// Run the selected reducer over a comparison table file
pub fn reduce_comparison_file(
    reducer: ReducerKind,
    input_file: &Path,
    output_file: &Path,
    hasher: &dyn ColumnHasher,
    logger: &Logger,
) -> Result<ComparisonTable> {
    match reducer {
        ReducerKind::Identity => process_and_merge_results(input_file, output_file, hasher, logger),
        ReducerKind::Adjacent => process_chromosome_groups(input_file, output_file, logger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::comparison::ComparisonRecord;
    use crate::error::KmerError;
    use crate::hashers::Crc32ColumnHasher;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn write_groups(dir: &Path) {
        fs::write(
            dir.join("Group_1_chr1_aligned.fasta"),
            ">seq0\nACGTACGT\n>seq1\nACGTTCGT\n",
        )
        .unwrap();
        fs::write(
            dir.join("Group_2_chr1_aligned.fasta"),
            ">seq0\nAAAAAA\n>seq1\nAAAAAT\n>seq2\nAAAAAT\n>seq3\nTAAAAA\n",
        )
        .unwrap();
        fs::write(
            dir.join("Group_3_chr1_aligned.fasta"),
            ">seq0\nACGTACGT\n>seq1\nACGT\n",
        )
        .unwrap();
        fs::write(dir.join("Group_4_chr2_aligned.fasta"), "").unwrap();
    }

    #[test]
    fn test_full_pipeline() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_groups(input.path());

        let layout = OutputLayout::in_dir(out.path());
        let error_log = layout.error_log.clone();
        let params = KmerParams::new(4, Some(3)).unwrap();

        let step1 = process_fasta_files(
            input.path(),
            &params,
            Some(&layout.intermediate),
            Some(&error_log),
            false,
            &Logger::root(),
        )
        .unwrap();

        assert_eq!(step1.load.groups, 4);
        assert_eq!(step1.load.placeholder_groups, 1);
        assert_eq!(step1.run.groups_failed, 1);
        assert_eq!(
            fs::read_to_string(&error_log).unwrap().lines().count(),
            1
        );
        assert!(fs::read_to_string(&error_log)
            .unwrap()
            .starts_with("Error in Group_3_chr1_aligned.fasta: "));

        let intermediate = ComparisonTable::from_csv(&layout.intermediate).unwrap();
        assert_eq!(intermediate.len(), 5);

        let reduced = process_and_merge_results(
            &layout.intermediate,
            &layout.final_table,
            &Crc32ColumnHasher,
            &Logger::root(),
        )
        .unwrap();

        let groups = reduced.grouped();
        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, vec!["Group_1_chr1", "Group_2_chr1", "Group_4_chr2"]);
        assert_eq!(groups["Group_1_chr1"][0].comparison, vec![1]);
        assert_eq!(groups["Group_4_chr2"][0], &ComparisonRecord::new("Group_4_chr2", "seq1", vec![1]));

        let group2: Vec<&Vec<u8>> = groups["Group_2_chr1"].iter().map(|r| &r.comparison).collect();
        assert_eq!(group2.len(), 3);
        assert_eq!(group2.iter().collect::<HashSet<_>>().len(), 3);

        assert_eq!(ComparisonTable::from_csv(&layout.final_table).unwrap(), reduced);
    }

    #[test]
    fn test_legacy_reducer_step() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(
            &input,
            "chromosome_group,sequence_id,comparison\n\
             Group_1_chr1,seq1,\"[0, 0, 1, 1]\"\n\
             Group_1_chr1,seq2,\"[0, 0, 0, 1]\"\n",
        )
        .unwrap();

        let table = reduce_comparison_file(
            ReducerKind::Adjacent,
            &input,
            &output,
            &Crc32ColumnHasher,
            &Logger::root(),
        )
        .unwrap();
        assert_eq!(table.records[0].comparison, vec![0, 1, 1]);
        assert_eq!(table.records[1].comparison, vec![0, 0, 1]);
        assert!(output.exists());
    }

    #[test]
    fn test_malformed_table_is_fatal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        fs::write(
            &input,
            "chromosome_group,sequence_id,comparison\n\
             Group_1_chr1,seq1,\"[0, 1]\"\n\
             Group_1_chr1,seq2,\"[0, 1, 1]\"\n",
        )
        .unwrap();

        let result = process_and_merge_results(
            &input,
            &dir.path().join("out.csv"),
            &Crc32ColumnHasher,
            &Logger::root(),
        );
        assert!(matches!(result, Err(KmerError::RaggedGroup { .. })));
    }

    #[test]
    fn test_missing_alignment_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let result = process_fasta_files(
            &dir.path().join("missing"),
            &KmerParams::default(),
            None,
            None,
            false,
            &Logger::root(),
        );
        assert!(result.is_err());
    }
}
