/*!
 * Scene document classification and metadata extraction.
 *
 * A scene document is any JSON file carrying `meta.unit.type == "scene"`
 * (case-insensitive). Everything else about the document is optional: each
 * field is looked up through an explicit path and missing pieces fall back
 * in a fixed order. Malformed input never raises, it just yields `None`.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::file_utils::FileManager;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

static NON_SLUG_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_-]").expect("Invalid slug regex")
});

/// Metadata extracted from one scene document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneRecord {
    /// Grouping key of the play
    #[serde(skip)]
    pub play_id: String,

    /// Human readable play title
    #[serde(skip)]
    pub play_title: String,

    /// Act label exactly as written in the document
    pub act: Option<Value>,

    /// Scene label exactly as written in the document
    pub scene: Option<Value>,

    /// Unit title, or its label when no title is given
    pub title: Option<String>,

    /// Root-relative path with forward slashes
    pub path: String,
}

/// Follow `keys` through nested objects, returning `None` on the first miss.
pub fn lookup<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().try_fold(value, |current, key| current.get(*key))
}

/// Non-empty string at `keys`
fn lookup_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    lookup(value, keys)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Raw label at `keys`; JSON null counts as absent
fn lookup_label(value: &Value, keys: &[&str]) -> Option<Value> {
    lookup(value, keys).filter(|v| !v.is_null()).cloned()
}

/// Check whether a parsed document is a scene
pub fn is_scene_document(document: &Value) -> bool {
    lookup(document, &["meta", "unit", "type"])
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.to_lowercase() == "scene")
}

/// Turn a play title into a grouping key.
///
/// Lower-cases, turns each whitespace run into a single `-`, then drops
/// every character outside `[A-Za-z0-9_-]`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHAR.replace_all(&hyphenated, "").into_owned()
}

/// Play id: explicit `meta.play.id`, else the slug of `meta.play.title`
fn play_id(document: &Value) -> String {
    match lookup(document, &["meta", "play", "id"]) {
        Some(Value::String(id)) if !id.is_empty() => return id.clone(),
        Some(Value::Number(id)) if id.as_f64() != Some(0.0) => return id.to_string(),
        _ => {}
    }

    lookup_str(document, &["meta", "play", "title"])
        .map(slugify)
        .unwrap_or_default()
}

/// Build a record from already parsed JSON.
pub fn extract_from_value(root: &Path, path: &Path, document: &Value) -> Option<SceneRecord> {
    if !is_scene_document(document) {
        return None;
    }

    let play_id = play_id(document);
    let play_title = lookup_str(document, &["meta", "play", "title"])
        .map(str::to_string)
        .unwrap_or_else(|| play_id.clone());
    let title = lookup_str(document, &["meta", "unit", "title"])
        .or_else(|| lookup_str(document, &["meta", "unit", "label"]))
        .map(str::to_string);

    Some(SceneRecord {
        play_id,
        play_title,
        act: lookup_label(document, &["meta", "unit", "act"]),
        scene: lookup_label(document, &["meta", "unit", "scene"]),
        title,
        path: FileManager::relative_posix_path(root, path),
    })
}

/// Classify raw file content and extract a record if it is a scene.
///
/// Content that is not UTF-8 JSON, or JSON of any other shape, yields `None`.
pub fn extract(root: &Path, path: &Path, content: &[u8]) -> Option<SceneRecord> {
    let document: Value = serde_json::from_slice(content).ok()?;
    extract_from_value(root, path, &document)
}
