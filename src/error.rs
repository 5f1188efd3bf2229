//! Error types for loading and validating search index tables.

use std::path::PathBuf;
use thiserror::Error;

/// Structural problems found in a search index table.
///
/// Record positions are zero-based indexes into the table's record list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedIndexError {
    #[error("missing table declaration (expected `var <name>=[...]`)")]
    MissingDeclaration,

    #[error("table value is not an array")]
    NotAnArray,

    #[error("record {record}: expected [key, [label, occurrences...]]")]
    RecordShape { record: usize },

    #[error("record {record}: missing key")]
    MissingKey { record: usize },

    #[error("record {record}: key must not be empty")]
    EmptyKey { record: usize },

    #[error("record {record} ('{key}'): missing label")]
    MissingLabel { record: usize, key: String },

    #[error("record {record} ('{key}'): missing occurrence list")]
    MissingOccurrences { record: usize, key: String },

    #[error(
        "record {record} ('{key}'), occurrence {occurrence}: expected exactly an anchor and a description"
    )]
    OccurrenceShape {
        record: usize,
        key: String,
        occurrence: usize,
    },

    #[error("record {record} ('{key}'), occurrence {occurrence}: anchor must not be empty")]
    EmptyAnchor {
        record: usize,
        key: String,
        occurrence: usize,
    },

    #[error("record {record} ('{key}'), occurrence {occurrence}: description must not be empty")]
    EmptyDescription {
        record: usize,
        key: String,
        occurrence: usize,
    },

    #[error("record {record}: duplicate key '{key}' (first seen at record {first})")]
    DuplicateKey {
        record: usize,
        key: String,
        first: usize,
    },
}

/// Errors from loading search index files and directories.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Malformed index {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedIndexError,
    },

    #[error("Malformed index: {0}")]
    MalformedTable(#[from] MalformedIndexError),

    #[error("Syntax error in table literal: {0}")]
    Syntax(String),

    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a search directory: {}", path.display())]
    NotASearchDirectory { path: PathBuf },

    #[error("Unknown section '{0}'")]
    UnknownSection(String),
}

impl IndexError {
    /// Attach a file path to errors that were raised while parsing its contents.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            IndexError::MalformedTable(source) => IndexError::Malformed {
                path: path.into(),
                source,
            },
            IndexError::Syntax(reason) => {
                IndexError::Syntax(format!("{}: {reason}", path.into().display()))
            }
            other => other,
        }
    }

    /// The structural error, if this is a malformed-table failure.
    pub fn malformed(&self) -> Option<&MalformedIndexError> {
        match self {
            IndexError::Malformed { source, .. } => Some(source),
            IndexError::MalformedTable(source) => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json5::Error> for IndexError {
    fn from(e: serde_json5::Error) -> Self {
        IndexError::Syntax(e.to_string())
    }
}

pub type IndexResult<T> = Result<T, IndexError>;
