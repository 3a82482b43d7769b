// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::core::window::DEFAULT_WINDOW_SIZE;
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.alignments.is_none() {
            self.alignments = config.alignments;
        }
        if self.out.is_none() {
            self.out = config.out;
        }
        if self.input_table.is_none() {
            self.input_table = config.input_table;
        }
        if self.error_log.is_none() {
            self.error_log = config.error_log;
        }
        if self.summary.is_none() {
            self.summary = config.summary;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.window_size == DEFAULT_WINDOW_SIZE {
            if let Some(window_size) = config.window_size {
                self.window_size = window_size;
            }
        }
        if self.reducer == "identity" {
            if let Some(reducer) = config.reducer {
                self.reducer = reducer;
            }
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.no_progress && config.no_progress.unwrap_or(false) {
            self.no_progress = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
