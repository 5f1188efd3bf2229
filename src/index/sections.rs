//! Generated `search/` directories.
//!
//! The generator splits its index into sections (`all`, `classes`,
//! `functions`, ...) and each section into buckets keyed by the first
//! character of the symbol, one file per bucket: `all_14.js`, `classes_3.js`.
//! The bucket number is hexadecimal. An optional `searchdata.js` names the
//! sections and gives their display labels.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{IndexError, IndexResult};
use crate::index::loader::load_table;
use crate::index::table::{SearchTable, TableStats};
use crate::types::SearchRecord;

/// Section used when the caller does not name one.
pub const DEFAULT_SECTION: &str = "all";

/// Name of the section metadata file.
pub const SECTION_METADATA_FILE: &str = "searchdata.js";

static BUCKET_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)_([0-9a-f]+)\.js$").expect("bucket file pattern"));

static OBJECT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*\{(.*?)\}").expect("object pattern")
});

static OBJECT_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\d+)\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("object entry pattern")
});

/// One bucket file of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketFile {
    pub section: String,
    pub bucket: u32,
    pub path: PathBuf,
}

impl BucketFile {
    /// Recognize a `<section>_<hex>.js` file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let captures = BUCKET_FILE.captures(name)?;
        let bucket = u32::from_str_radix(&captures[2], 16).ok()?;
        Some(Self {
            section: captures[1].to_string(),
            bucket,
            path: path.to_path_buf(),
        })
    }
}

/// Section names and labels declared in `searchdata.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionNames {
    names: BTreeMap<u32, String>,
    labels: BTreeMap<u32, String>,
}

impl SectionNames {
    pub fn parse(source: &str) -> Self {
        let mut parsed = Self::default();
        for declaration in OBJECT_DECLARATION.captures_iter(source) {
            let target = match &declaration[1] {
                "indexSectionNames" => &mut parsed.names,
                "indexSectionLabels" => &mut parsed.labels,
                _ => continue,
            };
            for entry in OBJECT_ENTRY.captures_iter(&declaration[2]) {
                if let Ok(position) = entry[1].parse::<u32>() {
                    target.insert(position, entry[2].replace("\\\"", "\""));
                }
            }
        }
        parsed
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Section names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    /// Display label for a section name, when declared.
    pub fn label_for(&self, section: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, name)| name.as_str() == section)
            .and_then(|(position, _)| self.labels.get(position))
            .map(String::as_str)
    }

    /// Declaration position of a section, used for ordering.
    fn position_of(&self, section: &str) -> Option<u32> {
        self.names
            .iter()
            .find(|(_, name)| name.as_str() == section)
            .map(|(position, _)| *position)
    }
}

/// The files found in a generated search directory.
#[derive(Debug, Clone)]
pub struct SearchDirectory {
    root: PathBuf,
    buckets: Vec<BucketFile>,
    names: SectionNames,
}

impl SearchDirectory {
    /// Scan `root` for bucket files and section metadata.
    pub fn discover(root: impl AsRef<Path>) -> IndexResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(IndexError::NotASearchDirectory {
                path: root.to_path_buf(),
            });
        }

        let mut buckets = Vec::new();
        let mut names = SectionNames::default();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
        {
            let path = entry.path();
            if entry.file_name() == SECTION_METADATA_FILE {
                let source =
                    std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
                        path: path.to_path_buf(),
                        source,
                    })?;
                names = SectionNames::parse(&source);
            } else if let Some(bucket) = BucketFile::from_path(path) {
                buckets.push(bucket);
            }
        }

        if buckets.is_empty() {
            return Err(IndexError::NotASearchDirectory {
                path: root.to_path_buf(),
            });
        }

        buckets.sort_by(|a, b| {
            let rank_a = names.position_of(&a.section).unwrap_or(u32::MAX);
            let rank_b = names.position_of(&b.section).unwrap_or(u32::MAX);
            rank_a
                .cmp(&rank_b)
                .then_with(|| a.section.cmp(&b.section))
                .then_with(|| a.bucket.cmp(&b.bucket))
        });

        tracing::debug!(
            "[sections] found {} bucket files in {}",
            buckets.len(),
            root.display()
        );
        Ok(Self {
            root: root.to_path_buf(),
            buckets,
            names,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn buckets(&self) -> &[BucketFile] {
        &self.buckets
    }

    pub fn names(&self) -> &SectionNames {
        &self.names
    }

    /// Load every bucket file in parallel. The first malformed file fails
    /// the whole load.
    pub fn load(&self) -> IndexResult<SearchIndexSet> {
        let tables = self
            .buckets
            .par_iter()
            .map(|bucket| load_table(&bucket.path).map(|table| (bucket.clone(), table)))
            .collect::<IndexResult<Vec<_>>>()?;

        let mut set = SearchIndexSet::default();
        for (bucket, table) in tables {
            let label = self.names.label_for(&bucket.section).map(str::to_string);
            set.sections
                .entry(bucket.section.clone())
                .or_insert_with(|| Section::new(&bucket.section, label))
                .push(bucket.bucket, table);
        }

        tracing::info!(
            "[sections] loaded {} sections from {}",
            set.sections.len(),
            self.root.display()
        );
        Ok(set)
    }
}

/// All bucket tables of one section.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub label: Option<String>,
    tables: Vec<(u32, SearchTable)>,
}

impl Section {
    fn new(name: &str, label: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            label,
            tables: Vec::new(),
        }
    }

    fn push(&mut self, bucket: u32, table: SearchTable) {
        self.tables.push((bucket, table));
    }

    pub fn tables(&self) -> impl Iterator<Item = &SearchTable> {
        self.tables.iter().map(|(_, table)| table)
    }

    pub fn get(&self, key: &str) -> Option<&SearchRecord> {
        self.tables().find_map(|table| table.get(key))
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<&SearchRecord> {
        self.tables().find_map(|table| table.lookup_symbol(name))
    }

    pub fn search(&self, prefix: &str, limit: usize) -> Vec<&SearchRecord> {
        let mut found = Vec::new();
        for table in self.tables() {
            let remaining = if limit == 0 { 0 } else { limit - found.len() };
            found.extend(table.search(prefix, remaining));
            if limit != 0 && found.len() >= limit {
                break;
            }
        }
        found
    }

    pub fn stats(&self) -> TableStats {
        let mut stats = TableStats::default();
        for table in self.tables() {
            stats.merge(&table.stats());
        }
        stats
    }
}

/// Every loaded section of a search directory, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndexSet {
    sections: IndexMap<String, Section>,
}

impl SearchIndexSet {
    /// A set holding a single table, e.g. one file given on the command line.
    pub fn from_table(section: &str, table: SearchTable) -> Self {
        let mut entry = Section::new(section, None);
        entry.push(0, table);
        let mut sections = IndexMap::new();
        sections.insert(section.to_string(), entry);
        Self { sections }
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn section(&self, name: &str) -> IndexResult<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| IndexError::UnknownSection(name.to_string()))
    }

    /// Exact key lookup. A missing key is `Ok(None)`.
    pub fn lookup(&self, section: &str, key: &str) -> IndexResult<Option<&SearchRecord>> {
        Ok(self.section(section)?.get(key))
    }

    pub fn lookup_symbol(&self, section: &str, name: &str) -> IndexResult<Option<&SearchRecord>> {
        Ok(self.section(section)?.lookup_symbol(name))
    }

    pub fn search(
        &self,
        section: &str,
        prefix: &str,
        limit: usize,
    ) -> IndexResult<Vec<&SearchRecord>> {
        Ok(self.section(section)?.search(prefix, limit))
    }

    pub fn stats(&self) -> Vec<(&str, TableStats)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section.stats()))
            .collect()
    }
}
