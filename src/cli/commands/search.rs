//! Search command - find-as-you-type prefix matching.

use serde::Serialize;

use crate::config::Settings;
use crate::io::output::{emit_json, print_header, record_table};
use crate::io::{EntityType, Envelope, ExitCode, OutputFormat, ResultCode};
use crate::types::SearchRecord;

use super::{open_search, report_error};

#[derive(Debug, Serialize)]
pub struct MatchView<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub occurrences: usize,
}

impl<'a> From<&'a SearchRecord> for MatchView<'a> {
    fn from(record: &'a SearchRecord) -> Self {
        Self {
            key: &record.key,
            label: &record.label,
            occurrences: record.occurrences.len(),
        }
    }
}

pub struct SearchArgs {
    pub prefix: String,
    pub limit: Option<usize>,
    pub section: Option<String>,
    pub json: bool,
}

pub fn run(args: SearchArgs, settings: &Settings) -> ExitCode {
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
    let limit = args.limit.unwrap_or(settings.search.max_results);

    // One extra result tells us whether the limit cut anything off.
    let fetch = if limit == 0 { 0 } else { limit.saturating_add(1) };
    let mut matches = match index.search(&section, &args.prefix, fetch) {
        Ok(matches) => matches,
        Err(e) => {
            let available = index.section_names().collect::<Vec<_>>().join(", ");
            return report_error(
                ResultCode::UnknownSection,
                e.to_string(),
                format!("Available sections: {available}"),
                format,
            );
        }
    };
    let truncated = limit != 0 && matches.len() > limit;
    matches.truncate(if limit == 0 { matches.len() } else { limit });

    if matches.is_empty() {
        if format.is_json() {
            let envelope: Envelope<()> = Envelope::not_found(format!(
                "No symbols start with '{}' in section '{section}'",
                args.prefix
            ))
            .with_entity_type(EntityType::Record)
            .with_query(&args.prefix)
            .with_section(&section)
            .with_count(0);
            return emit_json(&envelope);
        }
        eprintln!("No symbols start with '{}'", args.prefix);
        return ExitCode::NotFound;
    }

    if format.is_json() {
        let views: Vec<MatchView> = matches.iter().map(|&record| record.into()).collect();
        let envelope = Envelope::success(views)
            .with_entity_type(EntityType::Record)
            .with_count(matches.len())
            .with_query(&args.prefix)
            .with_section(&section)
            .with_truncated(truncated)
            .with_message(format!("Found {} symbol(s)", matches.len()));
        return emit_json(&envelope);
    }

    print_header(&format!(
        "{} symbol(s) starting with '{}'",
        matches.len(),
        args.prefix
    ));
    println!("{}", record_table(&matches));
    if truncated {
        println!("(more results available, raise --limit)");
    }
    ExitCode::Success
}
