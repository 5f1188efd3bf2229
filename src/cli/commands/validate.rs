//! Validate command - parse table files and report every problem found.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::config::Settings;
use crate::index::{SearchDirectory, load_table};
use crate::io::output::{emit_json, print_header};
use crate::io::{EntityType, Envelope, ExitCode, OutputFormat, ResultCode, Status};

/// Outcome for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn check(path: &Path) -> Self {
        match load_table(path).and_then(|table| {
            table.validate()?;
            Ok(table.stats())
        }) {
            Ok(stats) => Self {
                path: path.to_path_buf(),
                valid: true,
                records: Some(stats.records),
                occurrences: Some(stats.occurrences),
                error: None,
            },
            Err(e) => Self {
                path: path.to_path_buf(),
                valid: false,
                records: None,
                occurrences: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Expand directories into their bucket files.
fn collect_files(paths: &[PathBuf]) -> Vec<Result<PathBuf, FileReport>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            match SearchDirectory::discover(path) {
                Ok(found) => files.extend(found.buckets().iter().map(|b| Ok(b.path.clone()))),
                Err(e) => files.push(Err(FileReport {
                    path: path.clone(),
                    valid: false,
                    records: None,
                    occurrences: None,
                    error: Some(e.to_string()),
                })),
            }
        } else {
            files.push(Ok(path.clone()));
        }
    }
    files
}

pub fn run(paths: Vec<PathBuf>, json: bool, settings: &Settings) -> ExitCode {
    let format = OutputFormat::resolve(json, settings.output.format);
    let paths = if paths.is_empty() {
        vec![settings.resolved_search_dir()]
    } else {
        paths
    };

    let reports: Vec<FileReport> = collect_files(&paths)
        .into_par_iter()
        .map(|entry| match entry {
            Ok(path) => FileReport::check(&path),
            Err(report) => report,
        })
        .collect();

    let failed = reports.iter().filter(|r| !r.valid).count();
    let passed = reports.len() - failed;
    tracing::info!("[validate] {passed} valid, {failed} invalid");

    let (status, code, exit) = match (passed, failed) {
        (_, 0) => (Status::Success, ResultCode::Ok, ExitCode::Success),
        (0, _) => (Status::Error, ResultCode::MalformedIndex, ExitCode::Error),
        _ => (Status::PartialSuccess, ResultCode::MalformedIndex, ExitCode::Error),
    };

    if format.is_json() {
        let count = reports.len();
        let envelope = Envelope::success(reports)
            .with_status(status, code, exit.code())
            .with_entity_type(EntityType::ValidationReport)
            .with_count(count)
            .with_message(format!("{passed} valid, {failed} invalid"));
        return emit_json(&envelope);
    }

    print_header(&format!("Validated {} file(s)", reports.len()));
    for report in &reports {
        match (&report.error, report.records) {
            (Some(error), _) => println!("  FAIL {}: {error}", report.path.display()),
            (None, Some(records)) => println!(
                "  ok   {} ({records} records, {} occurrences)",
                report.path.display(),
                report.occurrences.unwrap_or(0)
            ),
            (None, None) => println!("  ok   {}", report.path.display()),
        }
    }
    println!("{passed} valid, {failed} invalid");
    exit
}
