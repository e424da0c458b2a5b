/*!
 * End-to-end tests for building the scene index
 */

use anyhow::Result;
use serde_json::json;
use std::fs;
use folio::app_controller::Controller;
use crate::common;

/// Test a full run over a small library
#[test]
fn test_run_withMixedLibrary_shouldWriteSortedIndex() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();

    common::create_scene_file(root, "hamlet/2-1.json", Some("hamlet"), Some("Hamlet"), json!(2), json!(1))?;
    common::create_scene_file(root, "hamlet/1-2.json", Some("hamlet"), Some("Hamlet"), json!(1), json!("II"))?;
    common::create_scene_file(root, "hamlet/1-1.json", Some("hamlet"), Some("Hamlet"), json!(1), json!(1))?;
    common::create_scene_file(root, "hamlet/1-10.json", Some("hamlet"), Some("Hamlet"), json!("I"), json!(10))?;
    common::create_scene_file(root, "zz/antony.json", None, Some("Antony and Cleopatra"), json!("I"), json!("i"))?;
    common::create_test_file(root, "hamlet/broken.json", "{ this is not json")?;
    common::create_test_file(root, "package.json", r#"{"name": "library"}"#)?;
    common::create_test_file(root, "hamlet/act.json", r#"{"meta": {"play": {"id": "hamlet"}, "unit": {"type": "act"}}}"#)?;

    let controller = Controller::new(root)?;
    let summary = tokio_test::block_on(controller.run())?;

    assert_eq!(summary.files_scanned, 8);
    assert_eq!(summary.plays, 2);
    assert_eq!(summary.scenes, 5);

    let index = common::read_index(root)?;
    let plays = index["plays"].as_array().expect("plays should be an array");
    assert_eq!(plays[0]["title"], "Antony and Cleopatra");
    assert_eq!(plays[0]["id"], "antony-and-cleopatra");
    assert_eq!(plays[0]["scene_count"], 1);
    assert_eq!(plays[1]["title"], "Hamlet");
    assert_eq!(plays[1]["scene_count"], 4);

    let paths: Vec<&str> = plays[1]["scenes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["hamlet/1-1.json", "hamlet/1-2.json", "hamlet/1-10.json", "hamlet/2-1.json"]
    );

    // Raw labels are written unchanged
    assert_eq!(plays[1]["scenes"][1]["scene"], json!("II"));
    assert_eq!(plays[1]["scenes"][2]["act"], json!("I"));
    Ok(())
}

/// Test that a second run over an unchanged tree is byte-identical
#[test]
fn test_run_twice_withUnchangedTree_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_scene_file(root, "lear/1-1.json", Some("lear"), Some("King Lear"), json!(1), json!(1))?;
    common::create_scene_file(root, "lear/1-2.json", Some("lear"), Some("King Lear"), json!(1), json!(2))?;

    let controller = Controller::new(root)?;
    tokio_test::block_on(controller.run())?;
    let first = fs::read(root.join("index.json"))?;

    let summary = tokio_test::block_on(controller.run())?;
    let second = fs::read(root.join("index.json"))?;

    assert_eq!(first, second);
    assert_eq!(summary.files_scanned, 2);
    Ok(())
}

/// Test that scenes without play metadata end up in one unnamed play
#[test]
fn test_run_withoutPlayMetadata_shouldGroupUnderEmptyId() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_scene_file(root, "a.json", None, None, json!(1), json!(1))?;
    common::create_scene_file(root, "b.json", None, None, json!(1), json!(2))?;

    let controller = Controller::new(root)?;
    tokio_test::block_on(controller.run())?;

    let index = common::read_index(root)?;
    assert_eq!(index["plays"].as_array().unwrap().len(), 1);
    assert_eq!(index["plays"][0]["id"], "");
    assert_eq!(index["plays"][0]["title"], "");
    assert_eq!(index["plays"][0]["scene_count"], 2);
    Ok(())
}

/// Test that an empty tree still produces a valid index
#[test]
fn test_run_withEmptyTree_shouldWriteEmptyIndex() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let controller = Controller::new(temp_dir.path())?;
    let summary = tokio_test::block_on(controller.run())?;

    assert_eq!(summary.plays, 0);
    assert_eq!(fs::read_to_string(temp_dir.path().join("index.json"))?, "{\n  \"plays\": []\n}\n");
    Ok(())
}

/// Test that parallel reads keep the first-seen title independent of scheduling
#[test]
fn test_run_withSingleReader_shouldMatchParallelOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    for i in 1..=20 {
        let title = if i % 2 == 0 { "The Tempest" } else { "Tempest" };
        common::create_scene_file(root, &format!("tempest/{:02}.json", i), Some("tmp"), Some(title), json!(1), json!(i))?;
    }

    let mut config = folio::IndexerConfig::default();
    config.concurrent_reads = 1;
    let sequential = Controller::with_config(root, config)?;
    let (sequential_doc, _) = tokio_test::block_on(sequential.build())?;

    let parallel = Controller::new(root)?;
    let (parallel_doc, _) = tokio_test::block_on(parallel.build())?;

    assert_eq!(sequential_doc, parallel_doc);
    assert_eq!(parallel_doc.plays[0].title, "Tempest");
    assert_eq!(parallel_doc.plays[0].scene_count, 20);
    Ok(())
}
