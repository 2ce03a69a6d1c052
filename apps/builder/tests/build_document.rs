//! End-to-end tests for the kanjidic build step.

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use kanji_core::{BuildOptions, Document};
use kanjidic_build::build_from_path;
use kanjidic_build::cli::Cli;
use pretty_assertions::assert_eq;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/kanjidic_sample.tsv")
}

fn options() -> BuildOptions {
    BuildOptions {
        source_url: "test://kanjidic".to_string(),
        built_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn sample_table_is_sorted_by_study_priority() {
    let doc = build_from_path(&sample_path(), &options()).unwrap();
    let kanji: Vec<&str> = doc.entries.iter().map(|e| e.record.kanji.as_str()).collect();
    assert_eq!(kanji, vec!["一", "日", "悪", "亜", "丼"]);
    assert_eq!(
        doc.entries.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
}

#[test]
fn empty_cells_stay_null_in_json() {
    let doc = build_from_path(&sample_path(), &options()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
    let don = &json["entries"][4];
    assert_eq!(don["kanji"], "丼");
    assert!(don["jlpt"].is_null());
    assert!(don["grade"].is_null());
    assert_eq!(don["strokes"], 5);
    assert_eq!(json["filters"]["JLPT"]["values"], serde_json::json!([4, 3, 2, 1, null]));
}

#[test]
fn rebuilds_are_identical() {
    let first = build_from_path(&sample_path(), &options()).unwrap();
    let second = build_from_path(&sample_path(), &options()).unwrap();
    assert_eq!(
        first.to_json_pretty().unwrap(),
        second.to_json_pretty().unwrap()
    );
}

#[test]
fn run_writes_a_loadable_document() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("kanjidic.json");

    kanjidic_build::run(Cli {
        kanjidic: sample_path(),
        output: Some(output.clone()),
        source_url: "test://kanjidic".to_string(),
    })
    .unwrap();

    let doc = Document::load(&output).unwrap();
    assert_eq!(doc.entries.len(), 5);
    assert_eq!(doc.source.url, "test://kanjidic");
}

#[test]
fn malformed_table_fails_the_whole_build() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.tsv");
    std::fs::write(
        &input,
        "kanji\tstrokes\tgrade\tjlpt\tfreq\tref_sh_kk\ton'yomi\tkun'yomi\tmeanings\n\
         日\t4\t1\t4\t1\t42\tニチ\tひ\tday\n\
         月\tfour\t1\t4\t1\t42\tゲツ\tつき\tmonth\n",
    )
    .unwrap();

    let err = build_from_path(&input, &options()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("row 3"), "{}", message);
    assert!(message.contains("strokes"), "{}", message);
}

#[test]
fn missing_input_file_is_reported() {
    let err = build_from_path(&PathBuf::from("/nonexistent/kanjidic.tsv"), &options()).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
