// comparison.rs - Difference vectors and their table encoding

use serde::{Deserialize, Serialize};
use crate::error::{KmerError, Result};

/// Positional 0/1 mismatch vector of one haplotype against its reference
pub type DifferenceVector = Vec<u8>;

/// Version of the `comparison` column encoding written by this crate.
///
/// v1: `[b, b, ...]`, each `b` is `0` or `1`; whitespace around brackets
/// and commas is ignored on input.
pub const VECTOR_FORMAT_VERSION: u32 = 1;

/// One row of a comparison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub chromosome_group: String,
    pub sequence_id: String,
    #[serde(with = "vector_literal")]
    pub comparison: DifferenceVector,
}

impl ComparisonRecord {
    pub fn new(
        chromosome_group: impl Into<String>,
        sequence_id: impl Into<String>,
        comparison: DifferenceVector,
    ) -> Self {
        Self {
            chromosome_group: chromosome_group.into(),
            sequence_id: sequence_id.into(),
            comparison,
        }
    }
}

/// Group identifier derived from an alignment file name
pub fn group_name(file_name: &str) -> String {
    file_name
        .replace("_aligned.fasta", "")
        .replace("_input.fasta", "")
}

/// Encode a vector as `[0, 1, 1]`
pub fn format_vector(vector: &[u8]) -> String {
    let mut out = String::with_capacity(vector.len() * 3 + 2);
    out.push('[');
    for (i, bit) in vector.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(if *bit == 0 { "0" } else { "1" });
    }
    out.push(']');
    out
}

/// Decode a `comparison` cell.
///
/// Grammar: `'[' ws ( bit ( ws ',' ws bit )* )? ws ']'` with `bit` = `0 | 1`.
pub fn parse_vector(value: &str) -> Result<DifferenceVector> {
    let invalid = |reason: &str| KmerError::InvalidVector {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| invalid("expected a bracketed list"))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|token| match token.trim() {
            "0" => Ok(0u8),
            "1" => Ok(1u8),
            "" => Err(invalid("empty element")),
            _ => Err(invalid("elements must be 0 or 1")),
        })
        .collect()
}

/// serde adapter storing a [`DifferenceVector`] as its text literal
pub mod vector_literal {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(vector: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_vector(vector))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_vector(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[0, 1, 1]), "[0, 1, 1]");
        assert_eq!(format_vector(&[1]), "[1]");
        assert_eq!(format_vector(&[]), "[]");
    }

    #[test]
    fn test_parse_accepts_whitespace_variants() {
        assert_eq!(parse_vector("[0, 1, 1]").unwrap(), vec![0, 1, 1]);
        assert_eq!(parse_vector("[0,1,1]").unwrap(), vec![0, 1, 1]);
        assert_eq!(parse_vector(" [ 1 ] ").unwrap(), vec![1]);
        assert_eq!(parse_vector("[]").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_parse_rejects_non_literals() {
        for bad in ["[0,2]", "0,1", "[0,,1]", "[x]", "__import__('os')", "[0, 1", "[01]", "[1,]"] {
            let result = parse_vector(bad);
            assert!(
                matches!(result, Err(KmerError::InvalidVector { .. })),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_group_name_strips_suffixes() {
        assert_eq!(group_name("Group_12_chr3_aligned.fasta"), "Group_12_chr3");
        assert_eq!(group_name("Group_12_chr3_input.fasta"), "Group_12_chr3");
        assert_eq!(group_name("Group_12_chr3_input.fasta_aligned.fasta"), "Group_12_chr3");
    }
}
