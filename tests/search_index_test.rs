//! Properties of the generated search table shipped as a fixture.

use std::collections::HashSet;
use std::path::PathBuf;

use doxsearch::index::DEFAULT_SECTION;
use doxsearch::{
    DocSearch, MalformedIndexError, SearchDirectory, Settings, load_table, parse_table,
    write_table,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/search")
}

fn fixture_file() -> PathBuf {
    fixture_dir().join("all_14.js")
}

#[test]
fn test_keys_are_non_empty_and_unique() {
    let table = load_table(fixture_file()).unwrap();
    assert_eq!(table.len(), 10);

    let mut seen = HashSet::new();
    for record in table.records() {
        assert!(!record.key.is_empty());
        assert!(seen.insert(record.key.as_str()), "duplicate key {}", record.key);
    }
}

#[test]
fn test_every_record_has_complete_occurrences() {
    let table = load_table(fixture_file()).unwrap();
    for record in table.records() {
        assert!(!record.occurrences.is_empty(), "{} has no occurrences", record.key);
        for occurrence in &record.occurrences {
            assert!(!occurrence.anchor.as_str().is_empty());
            assert!(!occurrence.description.is_empty());
        }
    }
    assert!(table.validate().is_ok());
}

#[test]
fn test_round_trip_is_byte_identical() {
    let source = std::fs::read_to_string(fixture_file()).unwrap();
    let table = parse_table(&source).unwrap();
    assert_eq!(write_table(&table), source);
}

#[test]
fn test_value_overloads_have_distinct_anchors() {
    let table = load_table(fixture_file()).unwrap();
    let occurrences = table.occurrences("value");
    assert_eq!(occurrences.len(), 18);

    let anchors: HashSet<_> = occurrences.iter().map(|o| o.anchor.as_str()).collect();
    assert_eq!(anchors.len(), occurrences.len());
    assert!(occurrences.iter().all(|o| o.anchor.page() == "../classxlnt_1_1cell.html"));
}

#[test]
fn test_variant_has_class_definition_occurrence() {
    let table = load_table(fixture_file()).unwrap();
    let variant = table.get("variant").unwrap();
    assert_eq!(variant.occurrences.len(), 14);

    let definitions = table.definitions("variant");
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].description, "xlnt::variant");
    assert_eq!(definitions[0].anchor.as_str(), "../classxlnt_1_1variant.html");

    // Constructors carry the parameter list and point into the page.
    let constructors = variant
        .occurrences
        .iter()
        .filter(|o| o.description.starts_with("xlnt::variant::variant("))
        .count();
    assert_eq!(constructors, 13);
}

#[test]
fn test_missing_key_returns_empty_result() {
    let table = load_table(fixture_file()).unwrap();
    assert!(table.get("nonexistent_symbol").is_none());
    assert!(table.occurrences("nonexistent_symbol").is_empty());
}

#[test]
fn test_escaped_markup_is_preserved() {
    let table = load_table(fixture_file()).unwrap();
    let occurrence = table
        .occurrences("variant")
        .iter()
        .find(|o| o.anchor.fragment() == Some("ab8fce396095bb6df500a97bb4a5857b8"))
        .unwrap();
    assert_eq!(
        occurrence.description,
        "xlnt::variant::variant(const std::vector&lt; variant &gt; &amp;value)"
    );
    assert_eq!(
        occurrence.display_description(),
        "xlnt::variant::variant(const std::vector< variant > &value)"
    );
}

#[test]
fn test_symbol_lookup_and_prefix_search() {
    let table = load_table(fixture_file()).unwrap();
    let record = table.lookup_symbol("vertical_dpi_").unwrap();
    assert_eq!(record.key, "vertical_5fdpi_5f");
    assert_eq!(record.decoded_key(), "vertical_dpi_");

    let keys: Vec<_> = table.search("vert", 0).iter().map(|r| r.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "vertical",
            "vertical_5falignment",
            "vertical_5fcentered",
            "vertical_5fdpi_5f"
        ]
    );
}

#[test]
fn test_directory_load_uses_section_labels() {
    let set = SearchDirectory::discover(fixture_dir()).unwrap().load().unwrap();
    let section = set.section(DEFAULT_SECTION).unwrap();
    assert_eq!(section.label.as_deref(), Some("All"));
    assert_eq!(section.stats().occurrences, 45);
    assert_eq!(set.lookup(DEFAULT_SECTION, "view").unwrap().unwrap().occurrences.len(), 3);
}

#[test]
fn test_doc_search_degrades_instead_of_failing() {
    let dir = tempfile::TempDir::new().unwrap();
    let source = std::fs::read_to_string(fixture_file()).unwrap();
    // Drop the label of the first record.
    let broken = source.replacen("['value',['value',", "['value',[", 1);
    std::fs::write(dir.path().join("all_14.js"), broken).unwrap();

    let err = load_table(dir.path().join("all_14.js")).unwrap_err();
    assert!(matches!(
        err.malformed(),
        Some(MalformedIndexError::MissingLabel { record: 0, .. })
    ));

    let mut settings = Settings::default();
    settings.search_dir = dir.path().to_path_buf();
    let search = DocSearch::open(&settings);
    assert!(!search.is_available());
    assert!(search.occurrences("value").is_empty());

    settings.search_dir = fixture_dir();
    let search = DocSearch::open(&settings);
    assert!(search.is_available());
    assert_eq!(search.occurrences("value").len(), 18);
    assert_eq!(search.suggest("vi").len(), 2);
}
