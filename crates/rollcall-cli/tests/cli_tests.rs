//! End-to-end tests for the CLI library against real table files.

use chrono::{TimeZone, Utc};
use rollcall_cli::commands::ingest::run_ingest;
use rollcall_cli::config::OutputFormat;
use rollcall_cli::{Config, Formatter};
use rollcall_domain::traits::TableStore;
use rollcall_extractor::{CompletionClient, PipelineConfig};
use rollcall_llm::MockProvider;
use rollcall_store::CsvTableStore;
use std::fs;

#[tokio::test]
async fn test_ingest_merges_into_csv_and_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("results.csv");
    fs::write(
        &table,
        "name,interests,last_updated\nana ruiz,cooking,2024-01-01T00:00:00Z\n",
    )
    .unwrap();

    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "Ana Ruiz hikes. Lee plays chess.").unwrap();
    let binary = dir.path().join("tool.exe");
    fs::write(&binary, b"MZ").unwrap();

    let provider = MockProvider::new(
        r#"[{"name": "Ana Ruiz", "interests": ["hiking"]}, {"name": "Lee", "interests": ["chess"]}]"#,
    );
    let formatter = Formatter::new(OutputFormat::Table, false);

    let output = run_ingest(
        CompletionClient::new(provider),
        CsvTableStore::new(&table),
        "results.csv",
        PipelineConfig::default(),
        &[notes, binary],
        &formatter,
    )
    .await
    .unwrap();

    assert!(output.contains("+ Added: Lee"));
    assert!(output.contains("~ Updated: ana ruiz"));
    assert!(output.contains("tool.exe"));
    assert!(output.contains("results.csv now holds 2 row(s) (1 file(s) failed)"));

    let rows = CsvTableStore::new(&table).load().unwrap();
    assert_eq!(rows.len(), 2);
    let ana = rows.iter().find(|r| r.name == "ana ruiz").unwrap();
    assert!(ana.interests.contains("cooking"));
    assert!(ana.interests.contains("hiking"));
    assert!(ana.last_updated > Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.store.path = dir.path().join("people.csv");
    config.settings.format = OutputFormat::Quiet;
    config.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("[store]"));
    assert!(text.contains("format = \"quiet\""));
    assert_eq!(Config::load(Some(&path)).unwrap(), config);
}
