//! Format command - rewrite a table in the generator's canonical layout.

use std::path::Path;

use anyhow::Context;

use crate::index::{parse_table, write_table};
use crate::io::ExitCode;

const BOM: &str = "\u{feff}";

enum Outcome {
    Printed,
    Canonical,
    WouldReformat,
    Rewritten,
}

pub fn run(file: &Path, check: bool, stdout: bool) -> ExitCode {
    match reformat(file, check, stdout) {
        Ok(Outcome::Printed) => ExitCode::Success,
        Ok(Outcome::Canonical) => {
            println!("{} is already canonical", file.display());
            ExitCode::Success
        }
        Ok(Outcome::WouldReformat) => {
            println!("{} would be reformatted", file.display());
            ExitCode::NotFound
        }
        Ok(Outcome::Rewritten) => {
            println!("Reformatted {}", file.display());
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::Error
        }
    }
}

fn reformat(file: &Path, check: bool, stdout: bool) -> anyhow::Result<Outcome> {
    let current = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let table = parse_table(&current).map_err(|e| e.with_path(file))?;

    // A leading byte order mark survives the rewrite.
    let bom = if current.starts_with(BOM) { BOM } else { "" };
    let canonical = format!("{bom}{}", write_table(&table));

    if stdout {
        print!("{canonical}");
        return Ok(Outcome::Printed);
    }
    if current == canonical {
        return Ok(Outcome::Canonical);
    }
    if check {
        return Ok(Outcome::WouldReformat);
    }

    std::fs::write(file, &canonical)
        .with_context(|| format!("failed to write {}", file.display()))?;
    tracing::info!("[format] rewrote {}", file.display());
    Ok(Outcome::Rewritten)
}
