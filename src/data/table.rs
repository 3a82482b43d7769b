// table.rs - In-memory comparison table

use std::collections::BTreeMap;
use crate::data::comparison::ComparisonRecord;

/// Rows of a `chromosome_group,sequence_id,comparison` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonTable {
    pub records: Vec<ComparisonRecord>,
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ComparisonRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: ComparisonRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split rows by `chromosome_group`.
    ///
    /// Groups come out sorted by name; rows keep their table order inside
    /// each group.
    pub fn grouped(&self) -> BTreeMap<&str, Vec<&ComparisonRecord>> {
        let mut groups: BTreeMap<&str, Vec<&ComparisonRecord>> = BTreeMap::new();
        for record in &self.records {
            groups
                .entry(record.chromosome_group.as_str())
                .or_default()
                .push(record);
        }
        groups
    }

    /// Number of distinct groups
    pub fn group_count(&self) -> usize {
        self.grouped().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_sorts_groups_and_keeps_row_order() {
        let table = ComparisonTable::from_records(vec![
            ComparisonRecord::new("Group_2_chr1", "seq2", vec![1]),
            ComparisonRecord::new("Group_1_chr1", "seq1", vec![0]),
            ComparisonRecord::new("Group_2_chr1", "seq1", vec![0]),
        ]);

        let groups = table.grouped();
        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, vec!["Group_1_chr1", "Group_2_chr1"]);

        let ids: Vec<&str> = groups["Group_2_chr1"]
            .iter()
            .map(|r| r.sequence_id.as_str())
            .collect();
        assert_eq!(ids, vec!["seq2", "seq1"]);
        assert_eq!(table.group_count(), 2);
    }
}
