//! End-to-end behaviour of the module drivers.

use modgraph_lib::classify::classify;
use modgraph_lib::resolve::PatternResolver;
use modgraph_lib::rules::RuleName;

use super::common::{generate, workspace};

mod archive {
  use super::*;

  #[test]
  fn inputs_follow_first_match_order() {
    let ws = workspace(&["test3.txt", "test2/test2.txt", "test1/test11/test1.txt"]);

    let (graph, report) = generate(
      ws.path(),
      r#"{ "modules": [ { "type": "zip_archive", "name": "test-archive", "srcs": ["**/*.txt"] } ] }"#,
    );

    assert!(report.is_success());
    let action = graph.producer_of("out/archives/test-archive.zip").unwrap();
    assert_eq!(action.rule, RuleName::Archive);
    assert_eq!(
      action.args["inputFiles"],
      "test3.txt,test1/test11/test1.txt,test2/test2.txt"
    );
    assert_eq!(
      action.command(graph.rules()).unwrap(),
      "cd . && zip out/archives/test-archive.zip -j test3.txt,test1/test11/test1.txt,test2/test2.txt"
    );
  }

  #[test]
  fn archive_has_no_implicit_inputs() {
    // Editing an archived file does not make the archive stale; only a change
    // in the matched file list does.
    let ws = workspace(&["a.txt"]);

    let (graph, _) = generate(
      ws.path(),
      r#"{ "modules": [ { "type": "zip_archive", "name": "docs", "srcs": ["*.txt"] } ] }"#,
    );

    assert!(graph.actions()[0].implicits.is_empty());
  }

  #[test]
  fn exclusions_apply_to_archives() {
    let ws = workspace(&["keep.txt", "drafts/skip.txt"]);

    let (graph, _) = generate(
      ws.path(),
      r#"{ "modules": [ { "type": "zip_archive", "name": "docs", "srcs": ["**/*.txt"], "srcs_exclude": ["drafts/*"] } ] }"#,
    );

    assert_eq!(graph.actions()[0].args["inputFiles"], "keep.txt");
  }
}

mod tested_binary {
  use super::*;

  #[test]
  fn test_sources_only_feed_the_test_action() {
    let ws = workspace(&["foo.go", "foo_test.go"]);
    let mut resolver = PatternResolver::new(ws.path());
    let matches = resolver.resolve("*.go", &[], ".").unwrap();

    let classified = classify(&[matches]);

    assert_eq!(classified.build_inputs, vec!["foo.go"]);
    assert_eq!(classified.test_inputs, vec!["foo.go", "foo_test.go"]);
  }

  #[test]
  fn vendor_output_is_appended_to_build_inputs() {
    let ws = workspace(&["app/go.mod", "app/b.go", "app/a.go", "app/a_test.go"]);

    let (graph, report) = generate(
      ws.path(),
      r#"{ "modules": [ { "type": "go_tested_binary", "name": "app", "dir": "app",
           "pkg": ".", "test_pkg": "./...", "srcs": ["*.go"], "vendor_first": true } ] }"#,
    );

    assert!(report.is_success());
    let vendor = graph.producer_of("app/vendor").unwrap();
    assert_eq!(vendor.implicits, vec!["app/go.mod"]);
    assert!(vendor.optional);

    let build = graph.producer_of("out/bin/app").unwrap();
    assert_eq!(build.implicits, vec!["app/a.go", "app/b.go", "app/vendor"]);

    let order: Vec<_> = graph
      .execution_order()
      .unwrap()
      .iter()
      .map(|a| a.outputs[0].as_str())
      .collect();
    let vendor_pos = order.iter().position(|o| *o == "app/vendor").unwrap();
    let build_pos = order.iter().position(|o| *o == "out/bin/app").unwrap();
    assert!(vendor_pos < build_pos);
  }

  #[test]
  fn missing_manifest_is_reported_but_not_fatal() {
    let ws = workspace(&["app/main.go"]);

    let (graph, report) = generate(
      ws.path(),
      r#"{ "modules": [ { "type": "go_tested_binary", "name": "app", "dir": "app",
           "pkg": ".", "test_pkg": "./...", "srcs": ["*.go"], "vendor_first": true } ] }"#,
    );

    assert!(report.is_success());
    let missing = graph.missing_inputs(ws.path());
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].input, "app/go.mod");
  }
}
