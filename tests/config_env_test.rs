//! Environment variables override the settings file.

use std::fs;

use doxsearch::Settings;
use doxsearch::io::OutputFormat;
use tempfile::TempDir;

#[test]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(
        &config_path,
        "search_dir = \"from/file\"\n[search]\nmax_results = 10\ndefault_section = \"classes\"\n",
    )
    .unwrap();

    // Only test in this binary, so no other thread reads the environment.
    unsafe {
        std::env::set_var("DS_SEARCH__MAX_RESULTS", "3");
        std::env::set_var("DS_OUTPUT__FORMAT", "json");
        std::env::set_var("DS_SEARCH_DIR", "from/env");
    }

    let settings = Settings::load_from(&config_path).unwrap();

    unsafe {
        std::env::remove_var("DS_SEARCH__MAX_RESULTS");
        std::env::remove_var("DS_OUTPUT__FORMAT");
        std::env::remove_var("DS_SEARCH_DIR");
    }

    assert_eq!(settings.search.max_results, 3);
    assert_eq!(settings.output.format, OutputFormat::Json);
    assert_eq!(settings.search_dir, std::path::PathBuf::from("from/env"));
    // Value only in the file is kept
    assert_eq!(settings.search.default_section, "classes");
}
