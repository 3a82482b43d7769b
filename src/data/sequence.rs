// sequence.rs - Aligned group loading from a directory of FASTA files

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use bio::io::fasta;
use regex::Regex;
use crate::error::{KmerError, Result};
use crate::logging::Logger;

/// Identifier of the reference record inside every group alignment
pub const REFERENCE_ID: &str = "seq0";

/// Base-name convention of group alignment files (`Group_*_*_aligned.fasta`)
pub const GROUP_FILE_PATTERN: &str = r"^Group_.*_.*_aligned\.fasta$";

/// One aligned sequence of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    pub fn is_reference(&self) -> bool {
        self.id == REFERENCE_ID
    }
}

/// Stand-in for a group whose file held no records: an empty reference
/// plus one empty haplotype, so the group still yields one row downstream.
pub fn placeholder_group() -> Vec<SequenceRecord> {
    vec![
        SequenceRecord::new(REFERENCE_ID, Vec::new()),
        SequenceRecord::new("seq1", Vec::new()),
    ]
}

/// All group alignments of a run, keyed by file base name
#[derive(Debug, Clone, Default)]
pub struct AlignmentSet {
    pub groups: BTreeMap<String, Vec<SequenceRecord>>,
    pub total_sequences: usize,
    pub placeholder_groups: usize,
    pub skipped_files: usize,
}

impl AlignmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the records of one group
    pub fn add_group(&mut self, file_name: String, records: Vec<SequenceRecord>) {
        self.total_sequences += records.len();
        if let Some(previous) = self.groups.insert(file_name, records) {
            self.total_sequences -= previous.len();
        }
    }

    pub fn get_group(&self, file_name: &str) -> Option<&[SequenceRecord]> {
        self.groups.get(file_name).map(|records| records.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// (groups, sequences)
    pub fn get_stats(&self) -> (usize, usize) {
        (self.groups.len(), self.total_sequences)
    }

    /// Load every group alignment file found in `dir`.
    ///
    /// Files are visited in path order. A file that fails to parse is logged
    /// and left out; a file with no records becomes [`placeholder_group`].
    /// Only an unreadable directory fails the whole load.
    pub fn from_directory(dir: &Path, logger: &Logger) -> Result<Self> {
        let logger = logger.scoped("reader");
        let files = find_group_files(dir)?;
        logger.info(format!(
            "Found {} files matching the pattern in {}",
            files.len(),
            dir.display()
        ));

        let mut set = Self::new();
        for path in files {
            let file_name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            match read_group_file(&path) {
                Ok(records) if records.is_empty() => {
                    logger.warn(format!("Empty aligned file detected: {}", path.display()));
                    set.placeholder_groups += 1;
                    set.add_group(file_name, placeholder_group());
                }
                Ok(records) => {
                    logger.debug(format!("{}: {} sequences", file_name, records.len()));
                    set.add_group(file_name, records);
                }
                Err(e) => {
                    logger.error(format!("Error processing file {}: {}", path.display(), e));
                    set.skipped_files += 1;
                }
            }
        }

        logger.info(format!(
            "Loaded {} groups, {} sequences ({} placeholders, {} skipped)",
            set.groups.len(),
            set.total_sequences,
            set.placeholder_groups,
            set.skipped_files
        ));
        Ok(set)
    }
}

/// List group alignment files in `dir`, sorted by path
pub fn find_group_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Regex::new(GROUP_FILE_PATTERN)
        .map_err(|e| KmerError::Config(format!("Invalid group file pattern: {}", e)))?;

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| KmerError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| pattern.is_match(name))
                    .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Parse one aligned FASTA file. Whitespace-only files yield no records,
/// and headers without sequence lines are dropped.
pub fn read_group_file(path: &Path) -> Result<Vec<SequenceRecord>> {
    let content = fs::read(path).map_err(|e| KmerError::io(path, e))?;
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }

    let reader = fasta::Reader::new(content.as_slice());
    let mut records = Vec::new();
    for record_result in reader.records() {
        let record = record_result.map_err(|e| KmerError::Fasta {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if record.seq().is_empty() {
            continue;
        }
        records.push(SequenceRecord::new(record.id(), record.seq().to_vec()));
    }

    Ok(records)
}
