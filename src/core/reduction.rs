// reduction.rs - Identity-augmented column reduction of group matrices

use std::collections::HashMap;
use crate::data::comparison::{ComparisonRecord, DifferenceVector};
use crate::data::table::ComparisonTable;
use crate::error::{KmerError, Result};
use crate::hashers::ColumnHasher;
use crate::logging::Logger;

/// Signature of a haplotype that is alone in its group
pub const SINGLE_ROW_SIGNATURE: [u8; 1] = [1];

/// Column-major binary matrix of one group.
///
/// Row count is fixed at construction; reduction only removes columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatrix {
    n_rows: usize,
    columns: Vec<Vec<u8>>,
}

impl GroupMatrix {
    /// Stack equally long rows. Rows of different widths are an error.
    pub fn from_rows<R: AsRef<[u8]>>(group: &str, rows: &[R]) -> Result<Self> {
        let width = ensure_rectangular(group, rows)?;
        let columns = (0..width)
            .map(|c| rows.iter().map(|row| row.as_ref()[c]).collect())
            .collect();
        Ok(Self {
            n_rows: rows.len(),
            columns,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Append the `n × n` identity block, one column per row
    pub fn append_identity(&mut self) {
        for i in 0..self.n_rows {
            let mut column = vec![0u8; self.n_rows];
            column[i] = 1;
            self.columns.push(column);
        }
    }

    pub fn drop_zero_columns(&mut self) {
        self.columns.retain(|column| column.iter().any(|&cell| cell != 0));
    }

    /// Keep the first column of every set of identical columns
    pub fn drop_duplicate_columns(&mut self, hasher: &dyn ColumnHasher) {
        let mut buckets: HashMap<u32, Vec<usize>> = HashMap::new();
        let mut kept: Vec<Vec<u8>> = Vec::with_capacity(self.columns.len());

        for column in self.columns.drain(..) {
            let bucket = buckets.entry(hasher.hash_column(&column)).or_default();
            if bucket.iter().any(|&index| kept[index] == column) {
                continue;
            }
            bucket.push(kept.len());
            kept.push(column);
        }

        self.columns = kept;
    }

    /// Remove all-zero and duplicate columns. Idempotent.
    pub fn strip_redundant_columns(&mut self, hasher: &dyn ColumnHasher) {
        self.drop_zero_columns();
        self.drop_duplicate_columns(hasher);
    }

    pub fn to_rows(&self) -> Vec<DifferenceVector> {
        (0..self.n_rows)
            .map(|r| self.columns.iter().map(|column| column[r]).collect())
            .collect()
    }
}

/// Width shared by all rows, or `RaggedGroup`
pub fn ensure_rectangular<R: AsRef<[u8]>>(group: &str, rows: &[R]) -> Result<usize> {
    let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
    for row in rows {
        let found = row.as_ref().len();
        if found != width {
            return Err(KmerError::RaggedGroup {
                group: group.to_string(),
                expected: width,
                found,
            });
        }
    }
    Ok(width)
}

/// Reduce one group's difference vectors to a minimal discriminating set
/// of columns. Output rows match input rows one to one.
///
/// A lone row becomes `[1]`. Otherwise the matrix is extended with an
/// identity block before stripping, so every row stays unique.
pub fn reduce_group<R: AsRef<[u8]>>(
    group: &str,
    rows: &[R],
    hasher: &dyn ColumnHasher,
) -> Result<Vec<DifferenceVector>> {
    match rows.len() {
        0 => Ok(Vec::new()),
        1 => Ok(vec![SINGLE_ROW_SIGNATURE.to_vec()]),
        _ => {
            let mut matrix = GroupMatrix::from_rows(group, rows)?;
            matrix.append_identity();
            matrix.strip_redundant_columns(hasher);
            Ok(matrix.to_rows())
        }
    }
}

/// Apply [`reduce_group`] to every group of a table.
///
/// Groups are emitted in name order; sequence ids and row order are kept.
pub fn reduce_table(
    table: &ComparisonTable,
    hasher: &dyn ColumnHasher,
    logger: &Logger,
) -> Result<ComparisonTable> {
    let logger = logger.scoped("reduction");
    let mut reduced = ComparisonTable::new();

    for (group, records) in table.grouped() {
        let rows: Vec<&[u8]> = records.iter().map(|r| r.comparison.as_slice()).collect();
        let signatures = reduce_group(group, &rows, hasher)?;
        logger.debug(format!(
            "{}: {} rows, {} -> {} columns",
            group,
            rows.len(),
            rows.first().map(|row| row.len()).unwrap_or(0),
            signatures.first().map(|row| row.len()).unwrap_or(0)
        ));

        for (record, signature) in records.iter().zip(signatures) {
            reduced.push(ComparisonRecord::new(group, &record.sequence_id, signature));
        }
    }

    logger.info(format!(
        "Reduced {} groups ({} rows)",
        table.group_count(),
        reduced.len()
    ));
    Ok(reduced)
}
