//! Graph command integration tests.

use predicates::prelude::*;

use super::common::archive_env;

#[test]
fn graph_prints_actions() {
  let env = archive_env();

  env
    .modgraph_cmd("graph")
    .assert()
    .success()
    .stdout(predicate::str::contains("archive → out/archives/test-archive.zip"))
    .stdout(predicate::str::contains("Build test-archive as zip archive"));

  assert!(!env.build_file().exists());
}

#[test]
fn graph_json_has_stable_id() {
  let env = archive_env();

  let run = || {
    let output = env.modgraph_cmd("graph").args(["--format", "json"]).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice::<serde_json::Value>(&output.stdout).unwrap()
  };
  let first = run();
  let second = run();

  assert_eq!(first["id"], second["id"]);
  assert_eq!(first["id"].as_str().unwrap().len(), 20);
  let actions = first["graph"]["actions"].as_array().unwrap();
  assert_eq!(actions.len(), 1);
  assert_eq!(actions[0]["rule"], "archive");
  assert_eq!(
    actions[0]["args"]["inputFiles"],
    "test3.txt,test1/test11/test1.txt,test2/test2.txt"
  );
  assert!(actions[0].get("implicits").is_none());
}
