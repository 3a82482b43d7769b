// csv.rs - CSV loader for comparison tables

use std::fs::File;
use std::io::Read;
use std::path::Path;
use crate::data::comparison::ComparisonRecord;
use crate::data::table::ComparisonTable;
use crate::error::{KmerError, Result};

impl ComparisonTable {
    /// Load a comparison table written by this crate (or by the Python
    /// pipeline it replaces). Any malformed row fails the whole load.
    pub fn from_csv(file_path: &Path) -> Result<Self> {
        let file = File::open(file_path).map_err(|e| KmerError::io(file_path, e))?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<ComparisonRecord>() {
            records.push(row?);
        }

        Ok(Self { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_quoted_vectors() {
        let data = "chromosome_group,sequence_id,comparison\n\
                    Group_1_chr1,seq1,\"[0, 1, 1]\"\n\
                    Group_1_chr1,seq2,\"[1, 0, 0]\"\n\
                    Group_2_chr1,seq1,[1]\n";
        let table = ComparisonTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records[0].comparison, vec![0, 1, 1]);
        assert_eq!(table.records[2], ComparisonRecord::new("Group_2_chr1", "seq1", vec![1]));
    }

    #[test]
    fn test_ignores_extra_columns() {
        let data = "file_name,chromosome_group,sequence_id,comparison\n\
                    a.fasta,Group_1_chr1,seq1,\"[0, 1]\"\n";
        let table = ComparisonTable::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.records[0].sequence_id, "seq1");
    }

    #[test]
    fn test_rejects_expression_cells() {
        let data = "chromosome_group,sequence_id,comparison\n\
                    Group_1_chr1,seq1,\"list(range(3))\"\n";
        let result = ComparisonTable::from_reader(data.as_bytes());
        assert!(matches!(result, Err(KmerError::Csv(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ComparisonTable::from_csv(Path::new("/nonexistent/comparison.csv"));
        assert!(matches!(result, Err(KmerError::Io { .. })));
    }
}
