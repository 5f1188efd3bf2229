//! Loading, querying and writing generated search tables.

pub mod loader;
pub mod sections;
pub mod service;
pub mod table;
pub mod writer;

pub use loader::{load_table, parse_table};
pub use sections::{
    BucketFile, DEFAULT_SECTION, SearchDirectory, SearchIndexSet, Section, SectionNames,
};
pub use service::{DocSearch, load_index};
pub use table::{DEFAULT_TABLE_VARIABLE, SearchTable, TableStats};
pub use writer::write_table;
