// mod.rs - Output writers: comparison tables, error log, run summary

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use serde::Serialize;
use crate::data::comparison::VECTOR_FORMAT_VERSION;
use crate::data::table::ComparisonTable;
use crate::error::{KmerError, Result};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| KmerError::io(parent, e))?;
        }
    }
    Ok(())
}

/// Write a `chromosome_group,sequence_id,comparison` table
pub fn write_comparison_csv(file_path: &Path, table: &ComparisonTable) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| KmerError::io(file_path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    if table.is_empty() {
        writer.write_record(["chromosome_group", "sequence_id", "comparison"])?;
    }
    for record in &table.records {
        writer.serialize(record)?;
    }

    writer.flush().map_err(|e| KmerError::io(file_path, e))?;
    Ok(())
}

/// Write one `Error in <file>: <message>` line per failed group
pub fn write_error_log(file_path: &Path, errors: &[String]) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| KmerError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);

    for error in errors {
        writeln!(writer, "{}", error).map_err(|e| KmerError::io(file_path, e))?;
    }

    writer.flush().map_err(|e| KmerError::io(file_path, e))?;
    Ok(())
}

/// Machine-readable record of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub version: String,
    pub generated: String,
    pub command: String,
    pub vector_format_version: u32,
    pub window_size: Option<usize>,
    pub workers: Option<usize>,
    pub reducer: String,
    pub groups_loaded: usize,
    pub placeholder_groups: usize,
    pub skipped_files: usize,
    pub groups_failed: usize,
    pub intermediate_rows: usize,
    pub final_groups: usize,
    pub final_rows: usize,
    pub errors: Vec<String>,
}

impl RunSummary {
    pub fn new(command: &str, reducer: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            command: command.to_string(),
            vector_format_version: VECTOR_FORMAT_VERSION,
            window_size: None,
            workers: None,
            reducer: reducer.to_string(),
            groups_loaded: 0,
            placeholder_groups: 0,
            skipped_files: 0,
            groups_failed: 0,
            intermediate_rows: 0,
            final_groups: 0,
            final_rows: 0,
            errors: Vec::new(),
        }
    }
}

pub fn write_summary(file_path: &Path, summary: &RunSummary) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path).map_err(|e| KmerError::io(file_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer).map_err(|e| KmerError::io(file_path, e))?;
    writer.flush().map_err(|e| KmerError::io(file_path, e))?;
    Ok(())
}
