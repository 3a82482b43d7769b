// adjacent.rs - Legacy reducer keeping columns that change from their left neighbour

use crate::core::reduction::ensure_rectangular;
use crate::data::comparison::{ComparisonRecord, DifferenceVector};
use crate::data::table::ComparisonTable;
use crate::error::Result;
use crate::logging::Logger;

/// Keep column 0, then every column where at least one row differs from
/// its value in the previous column. Kept columns are kept for all rows.
///
/// Order sensitive: unlike [`crate::core::reduction::reduce_group`] it
/// neither adds identity columns nor removes non-adjacent duplicates.
pub fn retain_changed_columns_group<R: AsRef<[u8]>>(
    group: &str,
    rows: &[R],
) -> Result<Vec<DifferenceVector>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let width = ensure_rectangular(group, rows)?;
    let mut retained: Vec<DifferenceVector> = vec![Vec::with_capacity(width); rows.len()];
    if width == 0 {
        return Ok(retained);
    }

    for (out, row) in retained.iter_mut().zip(rows) {
        out.push(row.as_ref()[0]);
    }

    for col in 1..width {
        let changed = rows.iter().any(|row| {
            let row = row.as_ref();
            row[col] != row[col - 1]
        });
        if changed {
            for (out, row) in retained.iter_mut().zip(rows) {
                out.push(row.as_ref()[col]);
            }
        }
    }

    Ok(retained)
}

/// Apply [`retain_changed_columns_group`] to every group of a table
pub fn retain_changed_columns_table(
    table: &ComparisonTable,
    logger: &Logger,
) -> Result<ComparisonTable> {
    let logger = logger.scoped("adjacent");
    let mut retained = ComparisonTable::new();

    for (group, records) in table.grouped() {
        let rows: Vec<&[u8]> = records.iter().map(|r| r.comparison.as_slice()).collect();
        let kept = retain_changed_columns_group(group, &rows)?;
        for (record, comparison) in records.iter().zip(kept) {
            retained.push(ComparisonRecord::new(group, &record.sequence_id, comparison));
        }
    }

    logger.info(format!(
        "Retained changed columns for {} groups ({} rows)",
        table.group_count(),
        retained.len()
    ));
    Ok(retained)
}
