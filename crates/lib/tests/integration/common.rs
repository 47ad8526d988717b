//! Shared helpers for library integration tests.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use modgraph_lib::config::GeneratorConfig;
use modgraph_lib::generate::{GenerateReport, Generator};
use modgraph_lib::graph::ActionGraph;
use modgraph_lib::load::parse_modules;
use modgraph_lib::rules::RuleSet;

/// Create a workspace containing `files` (empty content).
pub fn workspace(files: &[&str]) -> TempDir {
  let temp = TempDir::new().unwrap();
  for file in files {
    write(temp.path(), file, "");
  }
  temp
}

pub fn write(root: &Path, relative: &str, content: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}

/// Parse `modules` and generate them against `root`.
pub fn generate(root: &Path, modules: &str) -> (ActionGraph, GenerateReport) {
  let rules = Arc::new(RuleSet::standard().unwrap());
  let mut graph = ActionGraph::new(rules.clone());
  let generator = Generator::new(GeneratorConfig::default().with_root(root), rules);
  let modules = parse_modules(modules).unwrap();
  let report = generator.generate(&modules, &mut graph);
  (graph, report)
}
