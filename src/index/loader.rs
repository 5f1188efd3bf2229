//! Parsing of generated search table files.
//!
//! A table file is a single script statement:
//!
//! ```text
//! var searchData=
//! [
//!   ['value_5ftype',['value_type',['../classxlnt_1_1variant.html#ad58...',1,'xlnt::variant']]],
//!   ...
//! ];
//! ```
//!
//! The array literal is JSON5 (single-quoted strings, backslash escapes), so
//! it is read with `serde_json5` into a value tree and then checked record by
//! record.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{IndexError, IndexResult, MalformedIndexError};
use crate::index::table::SearchTable;
use crate::types::{Occurrence, SearchRecord};

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*var\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=").expect("declaration pattern")
});

/// Parse table source text.
pub fn parse_table(source: &str) -> IndexResult<SearchTable> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let captures = DECLARATION
        .captures(source)
        .ok_or(MalformedIndexError::MissingDeclaration)?;
    let variable = captures[1].to_string();
    let literal = source[captures[0].len()..].trim_end();
    let literal = literal.strip_suffix(';').unwrap_or(literal);

    let value: Value = serde_json5::from_str(literal)?;
    let Value::Array(rows) = value else {
        return Err(MalformedIndexError::NotAnArray.into());
    };

    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| parse_record(index, row))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(
        "[loader] parsed '{variable}' with {} records",
        records.len()
    );
    Ok(SearchTable::from_records(variable, records)?)
}

/// Read and parse a table file. Errors carry the file path.
pub fn load_table(path: impl AsRef<Path>) -> IndexResult<SearchTable> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_table(&source).map_err(|e| e.with_path(path))?;
    tracing::debug!(
        "[loader] loaded {} ({} records)",
        path.display(),
        table.len()
    );
    Ok(table)
}

fn parse_record(index: usize, row: &Value) -> Result<SearchRecord, MalformedIndexError> {
    let Value::Array(parts) = row else {
        return Err(MalformedIndexError::RecordShape { record: index });
    };

    let key = match parts.first() {
        Some(Value::String(key)) => key.clone(),
        _ => return Err(MalformedIndexError::MissingKey { record: index }),
    };

    let body = match parts.as_slice() {
        [_, Value::Array(body)] => body,
        [_] | [_, _] => {
            return Err(MalformedIndexError::MissingLabel { record: index, key });
        }
        _ => return Err(MalformedIndexError::RecordShape { record: index }),
    };

    let label = match body.first() {
        Some(Value::String(label)) => label.clone(),
        _ => return Err(MalformedIndexError::MissingLabel { record: index, key }),
    };

    if body.len() < 2 {
        return Err(MalformedIndexError::MissingOccurrences { record: index, key });
    }

    let mut record = SearchRecord::new(key, label);
    for (position, entry) in body[1..].iter().enumerate() {
        let occurrence = parse_occurrence(entry).ok_or_else(|| {
            MalformedIndexError::OccurrenceShape {
                record: index,
                key: record.key.clone(),
                occurrence: position,
            }
        })?;
        record.occurrences.push(occurrence);
    }

    Ok(record)
}

/// `[anchor, description]` or `[anchor, flag, description]`.
fn parse_occurrence(entry: &Value) -> Option<Occurrence> {
    match entry.as_array()?.as_slice() {
        [Value::String(anchor), Value::String(description)] => {
            Some(Occurrence::new(anchor, description.clone()))
        }
        [Value::String(anchor), Value::Number(flag), Value::String(description)] => {
            let flag = flag
                .as_u64()
                .or_else(|| flag.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
                .and_then(|f| u32::try_from(f).ok())?;
            Some(Occurrence::new(anchor, description.clone()).with_link_target(flag))
        }
        _ => None,
    }
}
