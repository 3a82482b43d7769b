// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use crate::error::{KmerError, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub alignments: Option<String>,
    pub out: Option<String>,
    pub input_table: Option<String>,
    pub error_log: Option<String>,
    pub summary: Option<String>,

    // Core settings
    pub window_size: Option<usize>,
    pub reducer: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub no_progress: Option<bool>,
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| KmerError::io(path, e))?;
        Self::from_toml(&content)
            .map_err(|e| KmerError::Config(format!("'{}': {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| KmerError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| KmerError::io(path, e))
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# kmersig.toml - Configuration file for kmersig
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Directory of aligned group FASTA files (Group_*_*_aligned.fasta)
alignments = "/path/to/alignment_results"

# Output directory; receives comparison_results.csv and output_final_results.csv
out = "kmer_results"

# Reduce an existing comparison table instead of reading alignments
# input_table = "kmer_results/comparison_results.csv"

# Failed groups, one "Error in <file>: <message>" line each
error_log = "kmer_results/error_log.txt"

# JSON run summary
# summary = "kmer_results/summary.json"

# =============================================================================
# CORE SETTINGS
# =============================================================================

# K-mer window size
window_size = 4

# Column reducer for the final table: identity, adjacent
reducer = "identity"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Maximum number of worker threads (omit for the default of 10)
threads = 10

# =============================================================================
# FLAGS
# =============================================================================

# Hide the progress bar
no_progress = false

# Enable debug logging
verbose = false

# Load alignments and report counts without comparing
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();
        assert_eq!(config.window_size, Some(4));
        assert_eq!(config.reducer.as_deref(), Some("identity"));
        assert_eq!(config.threads, Some(10));
        assert!(config.input_table.is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kmersig.toml");
        let config = Config {
            out: Some("results".to_string()),
            window_size: Some(6),
            ..Config::default()
        };
        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "window_size = \"four\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(KmerError::Config(_))));
    }
}
