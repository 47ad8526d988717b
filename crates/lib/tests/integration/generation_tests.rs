//! Whole-run properties of generation.

use modgraph_lib::generate::ModuleError;
use modgraph_lib::ninja::render_ninja;

use super::common::{generate, workspace, write};

const MIXED: &str = r#"{
  "modules": [
    { "type": "zip_archive", "name": "docs", "srcs": ["docs/*.md"] },
    { "type": "zip_archive", "name": "broken", "srcs": ["docs/*.md", "docs/[", "src/a**"] },
    { "type": "go_tested_binary", "name": "server", "dir": "server",
      "pkg": ".", "test_pkg": "./...", "srcs": ["*.go"] }
  ]
}"#;

#[test]
fn failing_module_is_isolated() {
  let ws = workspace(&["docs/a.md", "server/main.go"]);

  let (graph, report) = generate(ws.path(), MIXED);

  assert_eq!(report.emitted, vec!["docs", "server"]);
  assert_eq!(graph.len(), 3);
  assert!(graph.producer_of("out/archives/broken.zip").is_none());

  assert_eq!(report.errors.len(), 1);
  match &report.errors[0] {
    ModuleError::Properties { module, errors } => {
      assert_eq!(module, "broken");
      let patterns: Vec<_> = errors.iter().map(|e| e.pattern.as_deref().unwrap()).collect();
      assert_eq!(patterns, vec!["docs/[", "src/a**"]);
    }
    other => panic!("Expected Properties, got {other:?}"),
  }
}

#[test]
fn identical_inputs_give_identical_build_files() {
  let ws = workspace(&["docs/b.md", "docs/a.md", "server/main.go", "server/main_test.go"]);

  let (first, _) = generate(ws.path(), MIXED);
  let (second, _) = generate(ws.path(), MIXED);

  assert_eq!(render_ninja(&first, None).unwrap(), render_ninja(&second, None).unwrap());
}

#[test]
fn new_files_change_recorded_dependencies() {
  let ws = workspace(&["docs/a.md"]);

  let (_, before) = generate(ws.path(), MIXED);
  write(ws.path(), "docs/c.md", "");
  let (graph, after) = generate(ws.path(), MIXED);

  assert!(!before.deps.paths().contains(&"docs/c.md".to_string()));
  assert!(after.deps.paths().contains(&"docs/c.md".to_string()));
  assert!(after.deps.paths().contains(&"docs".to_string()));
  assert_eq!(
    graph.producer_of("out/archives/docs.zip").unwrap().args["inputFiles"],
    "docs/a.md,docs/c.md"
  );
}
