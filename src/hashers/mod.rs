// mod.rs - Hashers module root

pub mod crc32;
pub mod traits;

// Re-export main types for convenience
pub use crc32::Crc32ColumnHasher;
pub use traits::ColumnHasher;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_column_hasher() {
        let hasher = Crc32ColumnHasher;
        let hash1 = hasher.hash_column(&[0, 1, 1, 0]);
        let hash2 = hasher.hash_column(&[0, 1, 1, 0]);
        let hash3 = hasher.hash_column(&[1, 0, 0, 1]);

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hasher.name(), "CRC32");
    }

    #[test]
    fn test_hasher_as_trait_object() {
        let hasher: Box<dyn ColumnHasher> = Box::new(Crc32ColumnHasher);
        assert_eq!(hasher.hash_column(&[]), Crc32ColumnHasher.hash_column(&[]));
        assert!(hasher.description().contains("exact comparison"));
    }
}
