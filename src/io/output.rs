//! Terminal and JSON rendering for command results.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use console::style;
use serde::Serialize;

use crate::io::ExitCode;
use crate::io::envelope::Envelope;
use crate::types::SearchRecord;

/// Colors are off when `NO_COLOR` is set or stdout is not a terminal.
pub fn should_disable_colors() -> bool {
    std::env::var_os("NO_COLOR").is_some() || !is_terminal::is_terminal(std::io::stdout())
}

/// Print a section header, styled when colors are enabled.
pub fn print_header(title: &str) {
    if should_disable_colors() {
        println!("{title}");
    } else {
        println!("{}", style(title).cyan().bold());
    }
}

/// Print an envelope as pretty JSON and return its exit code.
pub fn emit_json<T: Serialize>(envelope: &Envelope<T>) -> ExitCode {
    match envelope.to_json() {
        Ok(json) => {
            println!("{json}");
            match envelope.exit_code {
                0 => ExitCode::Success,
                1 => ExitCode::NotFound,
                _ => ExitCode::Error,
            }
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {e}");
            ExitCode::Error
        }
    }
}

/// Table of occurrences for one record. Anchors are joined onto `base_url`.
pub fn occurrence_table(record: &SearchRecord, base_url: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Kind", "Description", "Anchor"]);

    for (position, occurrence) in record.occurrences.iter().enumerate() {
        let kind = if occurrence.is_definition() {
            "definition"
        } else {
            "member"
        };
        table.add_row(vec![
            (position + 1).to_string(),
            kind.to_string(),
            occurrence.display_description().into_owned(),
            occurrence.anchor.resolve(base_url),
        ]);
    }
    table
}

/// Table listing search matches, one row per record.
pub fn record_table(records: &[&SearchRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "Key", "Occurrences"]);

    for record in records {
        table.add_row(vec![
            record.label.clone(),
            record.key.clone(),
            record.occurrences.len().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Occurrence;

    #[test]
    fn test_occurrence_table_rows() {
        let record = SearchRecord::new("variant", "variant")
            .with_occurrence(Occurrence::new("../classxlnt_1_1variant.html", "xlnt::variant"))
            .with_occurrence(Occurrence::new(
                "../classxlnt_1_1variant.html#ab8f",
                "xlnt::variant::variant(const std::vector&lt; variant &gt; &amp;value)",
            ));

        let rendered = occurrence_table(&record, "https://docs.example.org").to_string();
        assert!(rendered.contains("definition"));
        assert!(rendered.contains("https://docs.example.org/classxlnt_1_1variant.html"));
        assert!(rendered.contains("std::vector< variant > &value"));
    }

    #[test]
    fn test_record_table_rows() {
        let record = SearchRecord::new("value_5ftype", "value_type")
            .with_occurrence(Occurrence::new("../a.html#b", "xlnt::variant"));
        let rendered = record_table(&[&record]).to_string();
        assert!(rendered.contains("value_type"));
        assert!(rendered.contains("value_5ftype"));
    }
}
