// params.rs - Run parameters and reducer selection

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::core::dispatcher::DEFAULT_WORKERS;
use crate::core::window::DEFAULT_WINDOW_SIZE;
use crate::error::{KmerError, Result};

/// Parameters of the comparison step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmerParams {
    pub window_size: usize,
    pub workers: Option<usize>,
}

impl Default for KmerParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            workers: None,
        }
    }
}

impl KmerParams {
    pub fn new(window_size: usize, workers: Option<usize>) -> Result<Self> {
        let params = Self {
            window_size,
            workers,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(KmerError::InvalidWindowSize(self.window_size));
        }
        if self.workers == Some(0) {
            return Err(KmerError::Config(
                "Worker count must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Worker count actually used
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS)
    }
}

/// Which column reduction produces the final table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReducerKind {
    /// Identity augmentation, then drop all-zero and duplicate columns
    Identity,
    /// Keep columns that change relative to their left neighbour
    Adjacent,
}

impl FromStr for ReducerKind {
    type Err = KmerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "identity" | "merge" => Ok(ReducerKind::Identity),
            "adjacent" | "legacy" => Ok(ReducerKind::Adjacent),
            _ => Err(KmerError::Config(format!(
                "Invalid reducer: {}. Use: identity, adjacent",
                s
            ))),
        }
    }
}

impl ReducerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReducerKind::Identity => "identity",
            ReducerKind::Adjacent => "adjacent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReducerKind::Identity => "identity-augmented dedup (drop all-zero and duplicate columns)",
            ReducerKind::Adjacent => "legacy adjacent-diff (keep columns changing from their left neighbour)",
        }
    }
}
