// validation.rs - Input validation utilities

use std::path::{Path, PathBuf};
use std::str::FromStr;
use crate::cli::args::Args;
use crate::core::{KmerParams, ReducerKind};
use crate::pipeline::OutputLayout;

#[derive(Debug)]
pub struct ValidationResult {
    pub params: KmerParams,
    pub reducer: ReducerKind,
    /// `None` when an existing comparison table is reduced directly
    pub alignments_dir: Option<PathBuf>,
    pub input_table: Option<PathBuf>,
    pub layout: OutputLayout,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if args.window_size == 0 {
        return Err("--window-size must be at least 1".to_string());
    }
    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }

    let params = KmerParams::new(args.window_size, args.threads).map_err(|e| e.to_string())?;
    let reducer = ReducerKind::from_str(&args.reducer).map_err(|e| e.to_string())?;

    let out = args.out.as_ref().ok_or("--out is required")?;
    let mut layout = OutputLayout::in_dir(Path::new(out));
    if let Some(error_log) = &args.error_log {
        layout.error_log = PathBuf::from(error_log);
    }

    let (alignments_dir, input_table) = match (&args.input_table, &args.alignments) {
        (Some(table), _) => {
            let table = PathBuf::from(table);
            if !table.is_file() {
                return Err(format!("Input table '{}' does not exist", table.display()));
            }
            if table == layout.final_table {
                return Err("--input-table must differ from the final output table".to_string());
            }
            (None, Some(table))
        }
        (None, Some(dir)) => {
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                return Err(format!("Alignment directory '{}' does not exist", dir.display()));
            }
            (Some(dir), None)
        }
        (None, None) => return Err("--alignments is required (or --input-table)".to_string()),
    };

    Ok(ValidationResult {
        params,
        reducer,
        alignments_dir,
        input_table,
        layout,
    })
}
