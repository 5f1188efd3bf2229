//! In-memory search table.
//!
//! Records keep the order they had in the generated file; a key map gives
//! O(1) lookup. A `SearchTable` can only be built from records that satisfy
//! every table invariant, so readers never see a half-valid table.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::MalformedIndexError;
use crate::markup;
use crate::types::{Occurrence, SearchRecord};

/// Name of the table variable the generator declares.
pub const DEFAULT_TABLE_VARIABLE: &str = "searchData";

#[derive(Debug, Clone)]
pub struct SearchTable {
    variable: String,
    records: Vec<SearchRecord>,
    positions: IndexMap<String, usize>,
}

/// Summary counts for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub records: usize,
    pub occurrences: usize,
    pub definitions: usize,
    /// Key with the most occurrences, and how many it has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest: Option<(String, usize)>,
}

impl TableStats {
    /// Fold another table's counts into this one.
    pub fn merge(&mut self, other: &TableStats) {
        self.records += other.records;
        self.occurrences += other.occurrences;
        self.definitions += other.definitions;
        if let Some((key, count)) = &other.largest {
            let replace = match &self.largest {
                Some((_, current)) => count > current,
                None => true,
            };
            if replace {
                self.largest = Some((key.clone(), *count));
            }
        }
    }
}

impl SearchTable {
    /// Build a table, rejecting records that break an invariant.
    pub fn from_records(
        variable: impl Into<String>,
        records: Vec<SearchRecord>,
    ) -> Result<Self, MalformedIndexError> {
        let mut positions = IndexMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            check_record(index, record)?;
            if let Some(&first) = positions.get(&record.key) {
                return Err(MalformedIndexError::DuplicateKey {
                    record: index,
                    key: record.key.clone(),
                    first,
                });
            }
            positions.insert(record.key.clone(), index);
        }

        Ok(Self {
            variable: variable.into(),
            records,
            positions,
        })
    }

    /// An empty table with the default variable name.
    pub fn empty() -> Self {
        Self {
            variable: DEFAULT_TABLE_VARIABLE.to_string(),
            records: Vec::new(),
            positions: IndexMap::new(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }

    /// Exact lookup by stored key (`value_5ftype`).
    pub fn get(&self, key: &str) -> Option<&SearchRecord> {
        self.positions.get(key).map(|&index| &self.records[index])
    }

    /// Occurrences for a key; empty when the key is not in the table.
    pub fn occurrences(&self, key: &str) -> &[Occurrence] {
        self.get(key)
            .map(|record| record.occurrences.as_slice())
            .unwrap_or(&[])
    }

    /// Lookup by plain symbol name (`value_type`, `Variant`).
    pub fn lookup_symbol(&self, name: &str) -> Option<&SearchRecord> {
        self.get(&markup::encode_key(name))
    }

    /// Class/struct definition occurrences for a key.
    pub fn definitions(&self, key: &str) -> Vec<&Occurrence> {
        self.occurrences(key)
            .iter()
            .filter(|occurrence| occurrence.is_definition())
            .collect()
    }

    /// Records whose key starts with `prefix`, in table order.
    ///
    /// The prefix is a plain symbol fragment; it is encoded the same way keys
    /// are, so `value_t` matches `value_5ftype`. `limit == 0` means no limit.
    pub fn search(&self, prefix: &str, limit: usize) -> Vec<&SearchRecord> {
        let encoded = markup::encode_key(prefix);
        let matches = self
            .records
            .iter()
            .filter(|record| record.key.starts_with(&encoded));
        if limit == 0 {
            matches.collect()
        } else {
            matches.take(limit).collect()
        }
    }

    /// Re-check every invariant.
    pub fn validate(&self) -> Result<(), MalformedIndexError> {
        let mut seen: IndexMap<&str, usize> = IndexMap::with_capacity(self.records.len());
        for (index, record) in self.records.iter().enumerate() {
            check_record(index, record)?;
            if let Some(&first) = seen.get(record.key.as_str()) {
                return Err(MalformedIndexError::DuplicateKey {
                    record: index,
                    key: record.key.clone(),
                    first,
                });
            }
            seen.insert(record.key.as_str(), index);
        }
        Ok(())
    }

    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats {
            records: self.records.len(),
            ..TableStats::default()
        };
        for record in &self.records {
            let count = record.occurrences.len();
            stats.occurrences += count;
            stats.definitions += record.definitions().count();
            let larger = match &stats.largest {
                Some((_, best)) => count > *best,
                None => true,
            };
            if larger {
                stats.largest = Some((record.key.clone(), count));
            }
        }
        stats
    }
}

fn check_record(index: usize, record: &SearchRecord) -> Result<(), MalformedIndexError> {
    if record.key.is_empty() {
        return Err(MalformedIndexError::EmptyKey { record: index });
    }
    if record.occurrences.is_empty() {
        return Err(MalformedIndexError::MissingOccurrences {
            record: index,
            key: record.key.clone(),
        });
    }
    for (position, occurrence) in record.occurrences.iter().enumerate() {
        if occurrence.anchor.as_str().is_empty() {
            return Err(MalformedIndexError::EmptyAnchor {
                record: index,
                key: record.key.clone(),
                occurrence: position,
            });
        }
        if occurrence.description.is_empty() {
            return Err(MalformedIndexError::EmptyDescription {
                record: index,
                key: record.key.clone(),
                occurrence: position,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, label: &str, anchors: &[&str]) -> SearchRecord {
        anchors.iter().fold(SearchRecord::new(key, label), |r, a| {
            r.with_occurrence(Occurrence::new(a, format!("xlnt::{label}")))
        })
    }

    fn sample() -> SearchTable {
        SearchTable::from_records(
            DEFAULT_TABLE_VARIABLE,
            vec![
                record("value", "value", &["../c.html#a1", "../c.html#a2"]),
                record("value_5ftype", "value_type", &["../v.html#a3"]),
                record("variant", "variant", &["../v.html", "../v.html#a4"]),
                record("vector", "vector", &["../r.html#a5"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_get_and_occurrences() {
        let table = sample();
        assert_eq!(table.len(), 4);
        assert_eq!(table.occurrences("value").len(), 2);
        assert_eq!(table.get("variant").unwrap().label, "variant");
    }

    #[test]
    fn test_missing_key_is_empty_not_error() {
        let table = sample();
        assert!(table.get("nonexistent_symbol").is_none());
        assert!(table.occurrences("nonexistent_symbol").is_empty());
        assert!(table.definitions("nonexistent_symbol").is_empty());
    }

    #[test]
    fn test_lookup_symbol_encodes_name() {
        let table = sample();
        assert_eq!(table.lookup_symbol("value_type").unwrap().key, "value_5ftype");
        assert_eq!(table.lookup_symbol("Variant").unwrap().key, "variant");
    }

    #[test]
    fn test_search_prefix_in_table_order() {
        let table = sample();
        let keys: Vec<_> = table.search("va", 0).iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["value", "value_5ftype", "variant"]);

        let keys: Vec<_> = table.search("value_", 0).iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["value_5ftype"]);

        assert_eq!(table.search("v", 2).len(), 2);
        assert!(table.search("zzz", 0).is_empty());
    }

    #[test]
    fn test_definitions() {
        let table = sample();
        let defs = table.definitions("variant");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].anchor.as_str(), "../v.html");
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let err = SearchTable::from_records(
            "searchData",
            vec![
                record("view", "view", &["../w.html#a"]),
                record("view", "view", &["../w.html#b"]),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            MalformedIndexError::DuplicateKey {
                record: 1,
                key: "view".to_string(),
                first: 0
            }
        );
    }

    #[test]
    fn test_rejects_empty_parts() {
        let err = SearchTable::from_records("searchData", vec![record("", "x", &["../a.html"])])
            .unwrap_err();
        assert_eq!(err, MalformedIndexError::EmptyKey { record: 0 });

        let err = SearchTable::from_records("searchData", vec![record("x", "x", &[])]).unwrap_err();
        assert!(matches!(err, MalformedIndexError::MissingOccurrences { .. }));

        let err = SearchTable::from_records("searchData", vec![record("x", "x", &[""])])
            .unwrap_err();
        assert!(matches!(err, MalformedIndexError::EmptyAnchor { occurrence: 0, .. }));

        let bad = SearchRecord::new("x", "x").with_occurrence(Occurrence::new("../a.html", ""));
        let err = SearchTable::from_records("searchData", vec![bad]).unwrap_err();
        assert!(matches!(err, MalformedIndexError::EmptyDescription { .. }));
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.records, 4);
        assert_eq!(stats.occurrences, 6);
        assert_eq!(stats.definitions, 1);
        assert_eq!(stats.largest, Some(("value".to_string(), 2)));
    }

    #[test]
    fn test_stats_merge() {
        let mut total = TableStats::default();
        total.merge(&sample().stats());
        total.merge(&TableStats {
            records: 1,
            occurrences: 5,
            definitions: 0,
            largest: Some(("view".to_string(), 5)),
        });
        assert_eq!(total.records, 5);
        assert_eq!(total.occurrences, 11);
        assert_eq!(total.largest, Some(("view".to_string(), 5)));
    }

    #[test]
    fn test_validate_and_empty() {
        assert!(sample().validate().is_ok());
        let empty = SearchTable::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.variable(), "searchData");
        assert!(empty.validate().is_ok());
    }
}
