// crc32.rs - CRC32 column hasher

use super::traits::ColumnHasher;

/// CRC32 over the raw column bytes
#[derive(Debug, Clone, Default)]
pub struct Crc32ColumnHasher;

impl ColumnHasher for Crc32ColumnHasher {
    fn hash_column(&self, column: &[u8]) -> u32 {
        use crc32fast::Hasher;
        let mut hasher = Hasher::new();
        hasher.update(column);
        hasher.finalize()
    }

    fn name(&self) -> &'static str {
        "CRC32"
    }

    fn description(&self) -> &'static str {
        "CRC32 of the column cells, verified by exact comparison"
    }
}
