//! Serialization of a table back into the generator's file layout.
//!
//! Output matches what the generator writes byte for byte: two-space record
//! indent, no spaces inside arrays, single-quoted strings, and no newline
//! after the closing `];`.

use std::fmt::Write as _;

use crate::index::table::SearchTable;
use crate::types::{Occurrence, SearchRecord};

pub fn write_table(table: &SearchTable) -> String {
    let mut out = String::with_capacity(estimate_len(table));
    out.push_str("var ");
    out.push_str(table.variable());
    out.push_str("=\n[\n");

    for (index, record) in table.records().iter().enumerate() {
        if index > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        write_record(&mut out, record);
    }

    if !table.is_empty() {
        out.push('\n');
    }
    out.push_str("];");
    out
}

fn write_record(out: &mut String, record: &SearchRecord) {
    out.push('[');
    write_str(out, &record.key);
    out.push_str(",[");
    write_str(out, &record.label);
    for occurrence in &record.occurrences {
        out.push(',');
        write_occurrence(out, occurrence);
    }
    out.push_str("]]");
}

fn write_occurrence(out: &mut String, occurrence: &Occurrence) {
    out.push('[');
    write_str(out, occurrence.anchor.as_str());
    out.push(',');
    if let Some(flag) = occurrence.link_target {
        // Writing into a String cannot fail.
        let _ = write!(out, "{flag},");
    }
    write_str(out, &occurrence.description);
    out.push(']');
}

fn write_str(out: &mut String, value: &str) {
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

fn estimate_len(table: &SearchTable) -> usize {
    table
        .records()
        .iter()
        .map(|record| {
            record.key.len()
                + record.label.len()
                + record
                    .occurrences
                    .iter()
                    .map(|o| o.anchor.as_str().len() + o.description.len() + 10)
                    .sum::<usize>()
                + 16
        })
        .sum::<usize>()
        + 32
}
