//! Test fixtures and factory functions for creating test data.

use chrono::{TimeZone, Utc};
use serde_json::json;

use kanji_core::{build_document, BuildOptions, Document};

/// kanjidic table behind [`sample_document`].
///
/// Built order (ids): 一 0, 日 1, 悪 2, 猫 3, 亜 4, 丼 5.
pub const SAMPLE_TSV: &str = "kanji\tstrokes\tgrade\tjlpt\tfreq\tref_sh_kk\ton'yomi\tkun'yomi\tmeanings\n\
亜\t7\t8\t1\t1509\t1616\tア\tつ.ぐ\tAsia\n\
日\t4\t1\t4\t1\t42\tニチ、ジツ\tひ\tday, sun\n\
丼\t5\t\t\t\t\tトン\tどんぶり\tbowl\n\
一\t1\t1\t4\t2\t1\tイチ\tひと.つ\tone\n\
猫\t11\t\t2\t1702\t2000\tビョウ\t\tcat\n\
悪\t11\t3\t3\t530\t449\tアク\tわる.い\tbad\n";

/// Fixture document with a fixed build timestamp.
pub fn sample_document() -> Document {
    let options = BuildOptions {
        source_url: "test://kanjidic".to_string(),
        built_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };
    build_document(SAMPLE_TSV, &options).unwrap()
}

/// JLPT selection body fragment: levels to include, plus the sentinel.
pub fn jlpt_selection(levels: &[i64], other: bool) -> serde_json::Value {
    let mut choices = serde_json::Map::new();
    for level in [4, 3, 2, 1] {
        choices.insert(level.to_string(), json!(levels.contains(&level)));
    }
    choices.insert("null".to_string(), json!(other));
    json!({ "JLPT": choices })
}

/// Create a session request body.
pub fn create_session_request(
    mode: Option<&str>,
    selection: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(m) = mode {
        obj.insert("mode".to_string(), json!(m));
    }
    if let Some(s) = selection {
        obj.insert("selection".to_string(), s);
    }
    serde_json::Value::Object(obj)
}

/// Update selection request body.
pub fn update_selection_request(selection: serde_json::Value) -> serde_json::Value {
    json!({ "selection": selection })
}

/// Update mode request body.
pub fn update_mode_request(mode: &str) -> serde_json::Value {
    json!({ "mode": mode })
}
