use mediafind::core::TextNormalizer;
use mediafind::library::{Catalog, SearchField};
use mediafind::matcher::MatchEngine;
use mediafind::utils::edit_distance;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

const CATALOG: &str = "The Lord of the Rings\tJ. R. R. Tolkien\tLord of the Rings: The Fellowship\n\
                       Missing fields line\n\
                       Dune\tFrank Herbert\tDesert planet politics\n\
                       Lord of the Flies\tWilliam Golding\tBoys stranded on an island\n\
                       Café Society\tWoody Allen\tHollywood in the thirties\n";

fn write_catalog() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(CATALOG.as_bytes())
        .expect("Failed to write catalog");
    file
}

fn load_catalog() -> (Catalog, TextNormalizer) {
    let file = write_catalog();
    let normalizer = TextNormalizer::default();
    let catalog = Catalog::load(file.path(), &normalizer).expect("Failed to load catalog");
    (catalog, normalizer)
}

#[test]
fn test_load_skips_malformed_lines() {
    let (catalog, _) = load_catalog();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.get(1).map(|r| r.title.as_str()), Some("Dune"));
}

#[test]
fn test_typo_query_matches_description() {
    let (catalog, normalizer) = load_catalog();
    let engine = MatchEngine::default();

    let description: Vec<String> = catalog
        .candidates(SearchField::Description)
        .next()
        .map(|(_, tokens)| tokens.to_vec())
        .expect("catalog is empty");
    assert_eq!(description, vec!["LORD", "RINGS", "FELLOWSHIP"]);

    let query = normalizer.normalize("Lordd Ring");
    assert_eq!(query, vec!["LORDD", "RING"]);
    assert_eq!(edit_distance("LORDD", "LORD"), 1);
    assert_eq!(edit_distance("RING", "RINGS"), 1);

    let found = catalog.search(&query, &engine, &[SearchField::Description]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].author, "J. R. R. Tolkien");
}

#[test]
fn test_results_keep_catalog_order() {
    let (catalog, normalizer) = load_catalog();
    let engine = MatchEngine::default();

    // "Lord of the Flies" scores better, but plain search keeps load order
    let query = normalizer.normalize("Lord Flies");
    let found = catalog.search(&query, &engine, &[SearchField::Title]);
    let titles: Vec<&str> = found.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["The Lord of the Rings", "Lord of the Flies"]);

    let ranked = catalog.search_ranked(&query, &engine, &[SearchField::Title]);
    let titles: Vec<&str> = ranked.iter().map(|(r, _)| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Lord of the Flies", "The Lord of the Rings"]);
}

#[test]
fn test_accented_title() {
    let (catalog, normalizer) = load_catalog();
    let engine = MatchEngine::default();

    let found = catalog.search(&normalizer.normalize("cafe"), &engine, &[SearchField::Title]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Café Society");
}

#[test]
fn test_empty_query_finds_nothing() {
    let (catalog, normalizer) = load_catalog();
    let engine = MatchEngine::new(f64::MAX);

    let query = normalizer.normalize("the of and");
    assert!(query.is_empty());
    assert!(catalog.search(&query, &engine, &SearchField::ALL).is_empty());
}

#[test]
fn test_threshold_override() {
    let (catalog, normalizer) = load_catalog();
    let query = normalizer.normalize("Lordd Ring");

    let strict = MatchEngine::new(0.5);
    assert!(catalog
        .search(&query, &strict, &[SearchField::Description])
        .is_empty());
}

#[test]
fn test_binary_single_query() {
    let catalog = write_catalog();
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = Command::new(env!("CARGO_BIN_EXE_mediafind"))
        .arg(catalog.path())
        .arg("--config")
        .arg(config_dir.path().join("config.json"))
        .args(["--query", "Dunee", "--field", "title"])
        .output()
        .expect("Failed to run mediafind");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Transformed input:\n[DUNEE]\n"));
    assert!(stdout.contains("   Title: Dune\n"));
    assert!(!stdout.contains("Lord of the Flies"));
    assert!(!stdout.contains("All media objects:"));
}

#[test]
fn test_binary_interactive_session() {
    let catalog = write_catalog();
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let mut child = Command::new(env!("CARGO_BIN_EXE_mediafind"))
        .arg(catalog.path())
        .arg("--config")
        .arg(config_dir.path().join("config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn mediafind");

    child
        .stdin
        .take()
        .expect("no stdin")
        .write_all(b"golding\nstranded\nx\n")
        .expect("Failed to write queries");
    let output = child.wait_with_output().expect("Failed to wait");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4. Title: Café Society"));
    assert_eq!(stdout.matches("Enter search query: ").count(), 3);
    assert!(stdout.contains("[STRANDED]"));
    assert!(stdout.contains("   Title: Lord of the Flies\n"));
}

#[test]
fn test_binary_writes_config() {
    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = config_dir.path().join("mediafind").join("config.json");

    let status = Command::new(env!("CARGO_BIN_EXE_mediafind"))
        .arg("--config")
        .arg(&config_path)
        .args(["--threshold", "1.5", "--field", "author", "--write-config"])
        .stderr(Stdio::null())
        .status()
        .expect("Failed to run mediafind");
    assert!(status.success());

    let config = mediafind::config::Config::load_from(&config_path).expect("Failed to load");
    assert_eq!(config.threshold, 1.5);
    assert_eq!(config.search_fields, vec![SearchField::Author]);
}

#[test]
fn test_all_stop_word_record_never_matches() {
    let normalizer = TextNormalizer::default();
    let catalog = Catalog::from_records(
        vec![
            mediafind::library::Record::new("The Of And", "A", "In On For"),
            mediafind::library::Record::new("Dune", "Frank Herbert", "Desert planet"),
        ],
        &normalizer,
    );
    let engine = MatchEngine::new(f64::INFINITY);

    let found = catalog.search(&normalizer.normalize("zzzz"), &engine, &SearchField::ALL);
    let titles: Vec<&str> = found.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune"]);
}
