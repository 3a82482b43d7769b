// traits.rs - Column hasher trait used by column deduplication

use std::fmt::Debug;

/// Content hash over one matrix column.
///
/// Equal columns must hash equally. Unequal columns may collide; callers
/// confirm a match by comparing the column contents.
pub trait ColumnHasher: Send + Sync + Debug {
    /// Hash the 0/1 cells of a column, top row first
    fn hash_column(&self, column: &[u8]) -> u32;

    /// Get a human-readable name for this hasher
    fn name(&self) -> &'static str;

    /// Get a description of this hasher
    fn description(&self) -> &'static str;
}
