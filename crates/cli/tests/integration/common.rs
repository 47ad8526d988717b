//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated workspace.
///
/// Each test gets its own temporary root holding the module file and sources.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create a workspace with the given `modules.json` content.
  pub fn with_modules(modules: &str) -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("modules.json", modules);
    env
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the workspace root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn build_file(&self) -> PathBuf {
    self.temp.path().join("build.ninja")
  }

  pub fn read_build_file(&self) -> String {
    std::fs::read_to_string(self.build_file()).unwrap()
  }

  /// A modgraph command rooted at this workspace, isolated from the caller's env.
  pub fn modgraph_cmd(&self, subcommand: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("modgraph");
    cmd
      .env_remove("MODGRAPH_ROOT")
      .env_remove("MODGRAPH_OUTPUT_DIR")
      .env_remove("RUST_LOG")
      .arg(subcommand)
      .arg("--root")
      .arg(self.root());
    cmd
  }
}

/// A go_tested_binary module in `server/`.
pub const SERVER_MODULES: &str = r#"{
  "modules": [
    {
      "type": "go_tested_binary",
      "name": "server",
      "dir": "server",
      "pkg": ".",
      "test_pkg": "./...",
      "srcs": ["*.go"],
      "vendor_first": true
    }
  ]
}"#;

/// A zip_archive over every text file.
pub const ARCHIVE_MODULES: &str = r#"{
  "modules": [
    { "type": "zip_archive", "name": "test-archive", "srcs": ["**/*.txt"] }
  ]
}"#;

pub fn archive_env() -> TestEnv {
  let env = TestEnv::with_modules(ARCHIVE_MODULES);
  env.write_file("test3.txt", "3");
  env.write_file("test2/test2.txt", "2");
  env.write_file("test1/test11/test1.txt", "1");
  env
}
