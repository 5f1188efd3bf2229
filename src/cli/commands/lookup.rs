//! Lookup command - list the documentation locations of one key.

use serde::Serialize;

use crate::config::Settings;
use crate::error::IndexError;
use crate::io::output::{emit_json, occurrence_table, print_header};
use crate::io::{EntityType, Envelope, ExitCode, OutputFormat, ResultCode};
use crate::types::{Occurrence, OccurrenceKind, SearchRecord};

use super::{open_search, report_error};

/// One occurrence as shown in JSON output.
#[derive(Debug, Serialize)]
pub struct OccurrenceView<'a> {
    pub kind: OccurrenceKind,
    pub anchor: &'a str,
    pub url: String,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<u32>,
}

impl<'a> OccurrenceView<'a> {
    pub fn new(occurrence: &'a Occurrence, base_url: &str) -> Self {
        Self {
            kind: occurrence.kind(),
            anchor: occurrence.anchor.as_str(),
            url: occurrence.anchor.resolve(base_url),
            description: &occurrence.description,
            link_target: occurrence.link_target,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupView<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub occurrences: Vec<OccurrenceView<'a>>,
}

pub struct LookupArgs {
    pub key: String,
    pub symbol: bool,
    pub definitions: bool,
    pub section: Option<String>,
    pub json: bool,
}

pub fn run(args: LookupArgs, settings: &Settings) -> ExitCode {
    let format = OutputFormat::resolve(args.json, settings.output.format);
    let search = match open_search(settings, format) {
        Ok(search) => search,
        Err(code) => return code,
    };
    let Some(index) = search.index() else {
        return ExitCode::Error;
    };

    let section = args
        .section
        .unwrap_or_else(|| settings.search.default_section.clone());
    let found = if args.symbol {
        index.lookup_symbol(&section, &args.key)
    } else {
        index.lookup(&section, &args.key)
    };

    let record = match found {
        Ok(record) => record,
        Err(IndexError::UnknownSection(name)) => {
            let available = index.section_names().collect::<Vec<_>>().join(", ");
            return report_error(
                ResultCode::UnknownSection,
                format!("Unknown section '{name}'"),
                format!("Available sections: {available}"),
                format,
            );
        }
        Err(e) => {
            return report_error(
                ResultCode::InternalError,
                e.to_string(),
                "Re-run with RUST_LOG=debug for details".to_string(),
                format,
            );
        }
    };

    let occurrences: Vec<&Occurrence> = match record {
        Some(record) if args.definitions => record.definitions().collect(),
        Some(record) => record.occurrences.iter().collect(),
        None => Vec::new(),
    };

    match record {
        Some(record) if !occurrences.is_empty() => {
            output_found(record, &occurrences, &section, settings, format)
        }
        _ => output_not_found(&args.key, &section, format),
    }
}

fn output_found(
    record: &SearchRecord,
    occurrences: &[&Occurrence],
    section: &str,
    settings: &Settings,
    format: OutputFormat,
) -> ExitCode {
    let base_url = &settings.output.base_url;
    if format.is_json() {
        let view = LookupView {
            key: &record.key,
            label: &record.label,
            occurrences: occurrences
                .iter()
                .map(|occurrence| OccurrenceView::new(occurrence, base_url))
                .collect(),
        };
        let envelope = Envelope::success(view)
            .with_entity_type(EntityType::Occurrence)
            .with_count(occurrences.len())
            .with_query(&record.key)
            .with_section(section)
            .with_message(format!(
                "Found {} occurrence(s) of '{}'",
                occurrences.len(),
                record.label
            ));
        return emit_json(&envelope);
    }

    print_header(&format!(
        "{} ({}): {} occurrence(s)",
        record.label,
        record.key,
        occurrences.len()
    ));
    let filtered = SearchRecord {
        key: record.key.clone(),
        label: record.label.clone(),
        occurrences: occurrences.iter().map(|&o| o.clone()).collect(),
    };
    println!("{}", occurrence_table(&filtered, base_url));
    ExitCode::Success
}

fn output_not_found(key: &str, section: &str, format: OutputFormat) -> ExitCode {
    if format.is_json() {
        let envelope: Envelope<()> =
            Envelope::not_found(format!("No entry for '{key}' in section '{section}'"))
                .with_entity_type(EntityType::Occurrence)
                .with_query(key)
                .with_section(section)
                .with_count(0)
                .with_hint(format!("Try: doxsearch search {key}"));
        emit_json(&envelope)
    } else {
        eprintln!("Not found: '{key}' in section '{section}'");
        ExitCode::NotFound
    }
}
