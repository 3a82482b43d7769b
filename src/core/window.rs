// window.rs - K-mer windowing and positional comparison against the reference

use crate::data::comparison::{group_name, ComparisonRecord, DifferenceVector};
use crate::data::sequence::SequenceRecord;
use crate::error::{KmerError, Result};
use crate::logging::Logger;

/// Default k-mer window size
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// Signature given to every haplotype of a group without a usable reference
pub const NO_REFERENCE_SENTINEL: [u8; 1] = [0];

/// All length-`k` windows of `sequence`, stride 1.
///
/// Empty when the sequence is shorter than `k` or `k` is zero.
pub fn kmer_window(sequence: &[u8], k: usize) -> Vec<&[u8]> {
    if k == 0 {
        return Vec::new();
    }
    sequence.windows(k).collect()
}

/// Compare windows position by position: 0 for identical k-mers, 1 otherwise.
///
/// Aligned sequences have equal lengths, so differing window counts mean the
/// group alignment is broken.
pub fn compare_windows(ref_windows: &[&[u8]], var_windows: &[&[u8]]) -> Result<DifferenceVector> {
    if ref_windows.len() != var_windows.len() {
        return Err(KmerError::LengthMismatch {
            reference: ref_windows.len(),
            variant: var_windows.len(),
        });
    }

    Ok(ref_windows
        .iter()
        .zip(var_windows)
        .map(|(reference, variant)| u8::from(reference != variant))
        .collect())
}

/// Result of comparing one group: either rows or an error, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub file_name: String,
    pub results: Vec<ComparisonRecord>,
    pub error: Option<String>,
}

impl GroupOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Compare every haplotype of a group against its `seq0` reference.
///
/// A group without a reference (or with an empty one) still yields one
/// sentinel row per haplotype. Failures are logged and reported in the
/// outcome instead of being returned.
pub fn process_sequences(
    file_name: &str,
    sequences: &[SequenceRecord],
    k: usize,
    logger: &Logger,
) -> GroupOutcome {
    match compare_group(file_name, sequences, k, logger) {
        Ok(results) => GroupOutcome {
            file_name: file_name.to_string(),
            results,
            error: None,
        },
        Err(e) => {
            logger.error(format!("Error processing sequences in {}: {}", file_name, e));
            GroupOutcome {
                file_name: file_name.to_string(),
                results: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

fn compare_group(
    file_name: &str,
    sequences: &[SequenceRecord],
    k: usize,
    logger: &Logger,
) -> Result<Vec<ComparisonRecord>> {
    if k == 0 {
        return Err(KmerError::InvalidWindowSize(k));
    }

    let group = group_name(file_name);
    let haplotypes = sequences.iter().filter(|record| !record.is_reference());

    let reference = sequences
        .iter()
        .find(|record| record.is_reference())
        .filter(|record| !record.sequence.is_empty());

    let Some(reference) = reference else {
        logger.warn(format!("No reference sequence found in {}", file_name));
        return Ok(haplotypes
            .map(|record| {
                ComparisonRecord::new(&group, &record.id, NO_REFERENCE_SENTINEL.to_vec())
            })
            .collect());
    };

    let ref_windows = kmer_window(&reference.sequence, k);
    haplotypes
        .map(|record| {
            let var_windows = kmer_window(&record.sequence, k);
            let comparison = compare_windows(&ref_windows, &var_windows)?;
            Ok(ComparisonRecord::new(&group, &record.id, comparison))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sequence::placeholder_group;

    fn record(id: &str, sequence: &str) -> SequenceRecord {
        SequenceRecord::new(id, sequence.as_bytes().to_vec())
    }

    #[test]
    fn test_kmer_window_sliding() {
        let windows = kmer_window(b"ACGTACGT", 4);
        let expected: Vec<&[u8]> = vec![&b"ACGT"[..], &b"CGTA"[..], &b"GTAC"[..], &b"TACG"[..], &b"ACGT"[..]];
        assert_eq!(windows, expected);
    }

    #[test]
    fn test_kmer_window_short_sequence() {
        assert!(kmer_window(b"ACG", 4).is_empty());
        assert!(kmer_window(b"", 4).is_empty());
        assert!(kmer_window(b"ACGT", 0).is_empty());
        assert_eq!(kmer_window(b"ACGT", 4).len(), 1);
    }

    #[test]
    fn test_compare_windows_known_case() {
        let ref_windows = kmer_window(b"ACGTACGT", 4);
        let var_windows = kmer_window(b"ACGTTCGT", 4);
        let expected: Vec<&[u8]> = vec![&b"ACGT"[..], &b"CGTT"[..], &b"GTTC"[..], &b"TTCG"[..], &b"TCGT"[..]];
        assert_eq!(var_windows, expected);
        assert_eq!(compare_windows(&ref_windows, &var_windows).unwrap(), vec![0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_compare_windows_length_and_identity() {
        let pairs = [
            ("ACGTACGTAA", "ACGTACGTAA"),
            ("ACGTACGTAA", "ACGTACGTAT"),
            ("AAAAAAAAAA", "TTTTTTTTTT"),
            ("AC-GTACGTA", "ACGGTACGTA"),
        ];
        for k in 1..=10 {
            for (a, b) in pairs {
                let diff = compare_windows(&kmer_window(a.as_bytes(), k), &kmer_window(b.as_bytes(), k))
                    .unwrap();
                assert_eq!(diff.len(), a.len() - k + 1);
                assert_eq!(diff.iter().all(|&bit| bit == 0), a == b, "k={} {} vs {}", k, a, b);
            }
        }
    }

    #[test]
    fn test_compare_windows_length_mismatch() {
        let ref_windows = kmer_window(b"ACGTACGT", 4);
        let var_windows = kmer_window(b"ACGTAC", 4);
        let result = compare_windows(&ref_windows, &var_windows);
        assert!(matches!(
            result,
            Err(KmerError::LengthMismatch { reference: 5, variant: 3 })
        ));
    }

    #[test]
    fn test_process_sequences_with_reference() {
        let sequences = vec![
            record("seq1", "ACGTTCGT"),
            record("seq0", "ACGTACGT"),
            record("seq2", "ACGTACGT"),
        ];
        let outcome = process_sequences("Group_1_chr1_aligned.fasta", &sequences, 4, &Logger::root());

        assert!(outcome.is_ok());
        assert_eq!(
            outcome.results,
            vec![
                ComparisonRecord::new("Group_1_chr1", "seq1", vec![0, 1, 1, 1, 1]),
                ComparisonRecord::new("Group_1_chr1", "seq2", vec![0, 0, 0, 0, 0]),
            ]
        );
    }

    #[test]
    fn test_process_sequences_without_reference() {
        let sequences = vec![record("seq1", "ACGT"), record("seq2", "ACGA")];
        let outcome = process_sequences("Group_2_chr1_aligned.fasta", &sequences, 4, &Logger::root());

        assert!(outcome.is_ok());
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.results.iter().all(|r| r.comparison == vec![0]));
    }

    #[test]
    fn test_placeholder_group_yields_sentinel_row() {
        let outcome = process_sequences(
            "Group_3_chr1_aligned.fasta",
            &placeholder_group(),
            4,
            &Logger::root(),
        );
        assert_eq!(
            outcome.results,
            vec![ComparisonRecord::new("Group_3_chr1", "seq1", vec![0])]
        );
    }

    #[test]
    fn test_process_sequences_mismatch_reports_error() {
        let sequences = vec![
            record("seq0", "ACGTACGT"),
            record("seq1", "ACGTACGT"),
            record("seq2", "ACGTA"),
        ];
        let outcome = process_sequences("Group_4_chr1_aligned.fasta", &sequences, 4, &Logger::root());

        assert!(!outcome.is_ok());
        assert!(outcome.results.is_empty());
        assert!(outcome.error.unwrap().contains("same length"));
    }

    #[test]
    fn test_process_sequences_zero_window_is_error() {
        let sequences = vec![record("seq0", "ACGT"), record("seq1", "ACGT")];
        let outcome = process_sequences("Group_5_chr1_aligned.fasta", &sequences, 0, &Logger::root());
        assert!(outcome.error.is_some());
    }
}
