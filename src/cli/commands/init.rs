//! Init and Config commands.

use crate::config::Settings;
use crate::io::ExitCode;

/// Run init command - create configuration file.
pub fn run_init(force: bool) -> ExitCode {
    match Settings::init_config_file(force) {
        Ok(path) => {
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to point search_dir at your generated search/ directory.");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::Error
        }
    }
}

/// Run config command - display current configuration.
pub fn run_config(config: &Settings) -> ExitCode {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    match toml::to_string_pretty(config) {
        Ok(toml_str) => {
            println!("{toml_str}");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error displaying config: {e}");
            ExitCode::Error
        }
    }
}
