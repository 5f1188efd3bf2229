//! Command implementations for the CLI.
//!
//! Each command is implemented in its own module and returns the exit code
//! the process should end with.

pub mod format;
pub mod init;
pub mod lookup;
pub mod search;
pub mod stats;
pub mod validate;

use crate::config::Settings;
use crate::index::DocSearch;
use crate::io::output::emit_json;
use crate::io::{Envelope, ExitCode, OutputFormat, ResultCode};

/// Open the configured index, reporting why when it is unavailable.
pub(crate) fn open_search(settings: &Settings, format: OutputFormat) -> Result<DocSearch, ExitCode> {
    let search = DocSearch::open(settings);
    if let Some(reason) = search.unavailable_reason() {
        let message = format!("Search index unavailable: {reason}");
        let hint = format!(
            "Check search_dir ({}) or pass --search-dir",
            settings.resolved_search_dir().display()
        );
        return Err(report_error(ResultCode::IndexUnavailable, message, hint, format));
    }
    Ok(search)
}

/// Print an error in the requested format and return the error exit code.
pub(crate) fn report_error(
    code: ResultCode,
    message: String,
    hint: String,
    format: OutputFormat,
) -> ExitCode {
    if format.is_json() {
        let envelope: Envelope<()> = Envelope::error(code, message).with_hint(hint);
        emit_json(&envelope)
    } else {
        eprintln!("Error [{}]: {message}", code.as_str());
        eprintln!("Hint: {hint}");
        ExitCode::Error
    }
}
