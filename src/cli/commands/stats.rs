//! Stats command - record and occurrence counts per section.

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

use crate::config::Settings;
use crate::index::TableStats;
use crate::io::output::{emit_json, print_header};
use crate::io::{EntityType, Envelope, ExitCode, OutputFormat};

use super::open_search;

#[derive(Debug, Serialize)]
pub struct SectionStats<'a> {
    pub section: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
    pub buckets: usize,
    #[serde(flatten)]
    pub counts: TableStats,
}

pub fn run(json: bool, settings: &Settings) -> ExitCode {
    let format = OutputFormat::resolve(json, settings.output.format);
    let search = match open_search(settings, format) {
        Ok(search) => search,
        Err(code) => return code,
    };
    let Some(index) = search.index() else {
        return ExitCode::Error;
    };

    let rows: Vec<SectionStats> = index
        .sections()
        .map(|section| SectionStats {
            section: &section.name,
            label: section.label.as_deref(),
            buckets: section.tables().count(),
            counts: section.stats(),
        })
        .collect();

    if format.is_json() {
        let count = rows.len();
        let envelope = Envelope::success(rows)
            .with_entity_type(EntityType::Stats)
            .with_count(count)
            .with_message(format!("{count} section(s)"));
        return emit_json(&envelope);
    }

    print_header(&format!(
        "Search index: {}",
        settings.resolved_search_dir().display()
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED).set_header(vec![
        "Section",
        "Files",
        "Records",
        "Occurrences",
        "Definitions",
        "Most overloaded",
    ]);
    for row in &rows {
        let largest = row
            .counts
            .largest
            .as_ref()
            .map(|(key, count)| format!("{key} ({count})"))
            .unwrap_or_default();
        table.add_row(vec![
            row.label.unwrap_or(row.section).to_string(),
            row.buckets.to_string(),
            row.counts.records.to_string(),
            row.counts.occurrences.to_string(),
            row.counts.definitions.to_string(),
            largest,
        ]);
    }
    println!("{table}");
    ExitCode::Success
}
