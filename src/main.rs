use clap::Parser;

use doxsearch::Settings;
use doxsearch::cli::commands::{format, init, lookup, search, stats, validate};
use doxsearch::cli::{Cli, Commands};
use doxsearch::io::ExitCode;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Init writes the config file, it must not depend on loading one.
    if let Commands::Init { force } = cli.command {
        doxsearch::logging::init();
        return init::run_init(force).into();
    }

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = loaded.unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        eprintln!("Using default configuration for now.");
        Settings::default()
    });
    if let Some(dir) = cli.search_dir {
        settings.search_dir = dir;
    }

    doxsearch::logging::init_with_config(&settings.logging);
    tracing::debug!(
        "[cli] search_dir = {}",
        settings.resolved_search_dir().display()
    );

    let code: ExitCode = match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Config => init::run_config(&settings),
        Commands::Lookup {
            key,
            symbol,
            definitions,
            section,
            json,
        } => lookup::run(
            lookup::LookupArgs {
                key,
                symbol,
                definitions,
                section,
                json,
            },
            &settings,
        ),
        Commands::Search {
            prefix,
            limit,
            section,
            json,
        } => search::run(
            search::SearchArgs {
                prefix,
                limit,
                section,
                json,
            },
            &settings,
        ),
        Commands::Validate { paths, json } => validate::run(paths, json, &settings),
        Commands::Format {
            file,
            check,
            stdout,
        } => format::run(&file, check, stdout),
        Commands::Stats { json } => stats::run(json, &settings),
    };

    code.into()
}
