//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Query and check generated documentation search indexes
#[derive(Parser, Debug)]
#[command(
    name = "doxsearch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Query and check generated documentation search indexes",
    long_about = "Load the search tables a documentation generator writes into html/search/, \
                  look symbols up, validate the tables and rewrite them in canonical form.",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Quick Start:\n  $ doxsearch init\n  $ doxsearch lookup value\n  $ doxsearch search vert --limit 5\n  $ doxsearch validate docs/html/search"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Search directory or single table file (overrides config)
    #[arg(long, global = true)]
    pub search_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up .doxsearch directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// List every documentation location of a key
    #[command(
        after_help = "Examples:\n  doxsearch lookup value\n  doxsearch lookup value_5ftype\n  doxsearch lookup value_type --symbol\n  doxsearch lookup variant --json"
    )]
    Lookup {
        /// Stored key (e.g. value_5ftype), or a symbol name with --symbol
        key: String,

        /// Treat KEY as a plain symbol name and encode it first
        #[arg(long)]
        symbol: bool,

        /// Only list class/struct definition pages
        #[arg(long)]
        definitions: bool,

        /// Section to query (default from config, usually "all")
        #[arg(short, long)]
        section: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Find symbols starting with a prefix
    Search {
        /// Symbol prefix, e.g. "vert" or "value_t"
        prefix: String,

        /// Maximum number of results (0 = unlimited, overrides config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Section to query (default from config, usually "all")
        #[arg(short, long)]
        section: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Parse and check table files or search directories
    Validate {
        /// Files or directories (default: configured search directory)
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a table file in the generator's canonical layout
    Format {
        /// Table file to rewrite
        file: PathBuf,

        /// Only report whether the file is already canonical
        #[arg(long)]
        check: bool,

        /// Print the result instead of writing the file
        #[arg(long, conflicts_with = "check")]
        stdout: bool,
    },

    /// Show record and occurrence counts per section
    Stats {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::try_parse_from([
            "doxsearch",
            "--search-dir",
            "docs/search",
            "lookup",
            "value_type",
            "--symbol",
            "--section",
            "functions",
        ])
        .unwrap();

        assert_eq!(cli.search_dir, Some(PathBuf::from("docs/search")));
        match cli.command {
            Commands::Lookup {
                key,
                symbol,
                section,
                json,
                definitions,
            } => {
                assert_eq!(key, "value_type");
                assert!(symbol);
                assert!(!definitions);
                assert_eq!(section.as_deref(), Some("functions"));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_format_check_conflicts_with_stdout() {
        let result = Cli::try_parse_from(["doxsearch", "format", "all_0.js", "--check", "--stdout"]);
        assert!(result.is_err());
    }
}
