/*!
 * Common test utilities for the folio test suite
 */

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Route library logs to the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, relative_path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(relative_path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a scene document
pub fn scene_document(play_id: Option<&str>, play_title: Option<&str>, act: Value, scene: Value) -> Value {
    let mut play = serde_json::Map::new();
    if let Some(id) = play_id {
        play.insert("id".to_string(), json!(id));
    }
    if let Some(title) = play_title {
        play.insert("title".to_string(), json!(title));
    }

    json!({
        "meta": {
            "play": play,
            "unit": {"type": "scene", "act": act, "scene": scene, "title": format!("Act {} Scene {}", act, scene)}
        },
        "lines": []
    })
}

/// Writes a scene document under `dir`
pub fn create_scene_file(
    dir: &Path,
    relative_path: &str,
    play_id: Option<&str>,
    play_title: Option<&str>,
    act: Value,
    scene: Value,
) -> Result<PathBuf> {
    let document = scene_document(play_id, play_title, act, scene);
    create_test_file(dir, relative_path, &serde_json::to_string_pretty(&document)?)
}

/// Reads and parses the index written under `dir`
pub fn read_index(dir: &Path) -> Result<Value> {
    let content = fs::read_to_string(dir.join("index.json"))?;
    Ok(serde_json::from_str(&content)?)
}
