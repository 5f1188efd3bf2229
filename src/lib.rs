pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod io;
pub mod logging;
pub mod markup;
pub mod types;

pub use config::Settings;
pub use error::{IndexError, IndexResult, MalformedIndexError};
pub use index::{
    DocSearch, SearchDirectory, SearchIndexSet, SearchTable, load_table, parse_table, write_table,
};
pub use types::{Anchor, Occurrence, OccurrenceKind, SearchRecord};
