//! Search facade for host applications.
//!
//! Opening never fails. If the index cannot be loaded the facade stays
//! usable in an unavailable state: every query returns nothing and
//! [`DocSearch::is_available`] tells the host to switch its search UI off.

use std::path::Path;

use crate::config::Settings;
use crate::error::IndexResult;
use crate::index::loader::load_table;
use crate::index::sections::{DEFAULT_SECTION, SearchDirectory, SearchIndexSet};
use crate::types::{Occurrence, SearchRecord};

#[derive(Debug)]
pub enum DocSearch {
    Available {
        index: SearchIndexSet,
        default_section: String,
        max_results: usize,
    },
    Unavailable {
        reason: String,
    },
}

impl DocSearch {
    /// Open the search directory named by the settings.
    pub fn open(settings: &Settings) -> Self {
        let path = settings.resolved_search_dir();
        match load_index(&path) {
            Ok(index) => DocSearch::Available {
                index,
                default_section: settings.search.default_section.clone(),
                max_results: settings.search.max_results,
            },
            Err(e) => {
                tracing::warn!("[search] disabled, could not load {}: {e}", path.display());
                DocSearch::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Wrap an already loaded index with default query settings.
    pub fn from_index(index: SearchIndexSet) -> Self {
        DocSearch::Available {
            index,
            default_section: DEFAULT_SECTION.to_string(),
            max_results: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DocSearch::Available { .. })
    }

    /// Why search is off, when it is.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            DocSearch::Unavailable { reason } => Some(reason),
            DocSearch::Available { .. } => None,
        }
    }

    pub fn index(&self) -> Option<&SearchIndexSet> {
        match self {
            DocSearch::Available { index, .. } => Some(index),
            DocSearch::Unavailable { .. } => None,
        }
    }

    /// Occurrences for a stored key in the default section.
    pub fn occurrences(&self, key: &str) -> &[Occurrence] {
        self.record(key)
            .map(|record| record.occurrences.as_slice())
            .unwrap_or(&[])
    }

    /// Record for a stored key in the default section.
    pub fn record(&self, key: &str) -> Option<&SearchRecord> {
        let DocSearch::Available {
            index,
            default_section,
            ..
        } = self
        else {
            return None;
        };
        index.lookup(default_section, key).ok().flatten()
    }

    /// Find-as-you-type over the default section, capped by `max_results`.
    pub fn suggest(&self, prefix: &str) -> Vec<&SearchRecord> {
        let DocSearch::Available {
            index,
            default_section,
            max_results,
        } = self
        else {
            return Vec::new();
        };
        index
            .search(default_section, prefix, *max_results)
            .unwrap_or_default()
    }
}

/// Load either a whole search directory or a single table file.
pub fn load_index(path: &Path) -> IndexResult<SearchIndexSet> {
    if path.is_file() {
        let table = load_table(path)?;
        let section = crate::index::sections::BucketFile::from_path(path)
            .map(|bucket| bucket.section)
            .unwrap_or_else(|| DEFAULT_SECTION.to_string());
        return Ok(SearchIndexSet::from_table(&section, table));
    }
    SearchDirectory::discover(path)?.load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings_for(path: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.search_dir = path.to_path_buf();
        settings
    }

    #[test]
    fn test_open_available() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("all_14.js"),
            "var searchData=\n[\n  ['value',['value',['../c.html#a1',1,'c::value()']]],\n  ['view',['view',['../w.html#a2',1,'w::view()']]]\n];",
        )
        .unwrap();

        let search = DocSearch::open(&settings_for(dir.path()));
        assert!(search.is_available());
        assert!(search.unavailable_reason().is_none());
        assert_eq!(search.occurrences("value").len(), 1);
        assert!(search.occurrences("nonexistent_symbol").is_empty());
        assert_eq!(search.suggest("v").len(), 2);
    }

    #[test]
    fn test_from_index_has_no_result_cap() {
        let table = crate::index::parse_table(
            "var searchData=[['value',['value',['../c.html#a1',1,'c::value()']]],['variant',['variant',['../v.html',1,'v']]],['view',['view',['../w.html#a2',1,'w::view()']]]];",
        )
        .unwrap();
        let search = DocSearch::from_index(SearchIndexSet::from_table(DEFAULT_SECTION, table));

        assert!(search.is_available());
        assert_eq!(search.suggest("v").len(), 3);
        assert_eq!(search.record("variant").unwrap().definitions().count(), 1);
        assert!(search.record("nonexistent_symbol").is_none());
    }

    #[test]
    fn test_open_degrades_on_malformed_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("all_0.js"), "var searchData=[['a']];").unwrap();

        let search = DocSearch::open(&settings_for(dir.path()));
        assert!(!search.is_available());
        assert!(search.unavailable_reason().unwrap().contains("all_0.js"));
        assert!(search.occurrences("a").is_empty());
        assert!(search.suggest("a").is_empty());
        assert!(search.index().is_none());
    }

    #[test]
    fn test_open_degrades_on_missing_dir() {
        let dir = TempDir::new().unwrap();
        let search = DocSearch::open(&settings_for(&dir.path().join("missing")));
        assert!(!search.is_available());
    }

    #[test]
    fn test_load_single_file_uses_section_from_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("classes_3.js");
        fs::write(&path, "var searchData=[['cell',['cell',['../classxlnt_1_1cell.html',1,'xlnt::cell']]]];")
            .unwrap();

        let index = load_index(&path).unwrap();
        assert_eq!(index.section_names().collect::<Vec<_>>(), vec!["classes"]);
        assert!(index.lookup("classes", "cell").unwrap().is_some());
    }
}
