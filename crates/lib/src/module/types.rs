use serde::{Deserialize, Serialize};

use super::Module;

fn current_dir() -> String {
  ".".to_string()
}

/// A declared module: its name, directory and type-specific properties.
///
/// # Example
///
/// ```json
/// {
///   "type": "go_tested_binary",
///   "name": "server",
///   "dir": "cmd/server",
///   "pkg": ".",
///   "test_pkg": "./...",
///   "srcs": ["**/*.go"],
///   "vendor_first": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDef {
  pub name: String,
  /// Directory of the module, relative to the workspace root.
  #[serde(default = "current_dir")]
  pub dir: String,
  #[serde(flatten)]
  pub kind: ModuleKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModuleKind {
  GoTestedBinary(TestedBinaryProps),
  ZipArchive(ZipArchiveProps),
}

impl ModuleKind {
  pub fn type_name(&self) -> &'static str {
    match self {
      ModuleKind::GoTestedBinary(_) => "go_tested_binary",
      ModuleKind::ZipArchive(_) => "zip_archive",
    }
  }

  pub fn driver(&self) -> &dyn Module {
    match self {
      ModuleKind::GoTestedBinary(props) => props,
      ModuleKind::ZipArchive(props) => props,
    }
  }

  /// Keys a definition of type `type_name` may carry, including the shared
  /// `type`, `name` and `dir`. `None` for an unknown type.
  pub fn known_keys(type_name: &str) -> Option<&'static [&'static str]> {
    match type_name {
      "go_tested_binary" => Some(&[
        "type",
        "name",
        "dir",
        "pkg",
        "test_pkg",
        "srcs",
        "srcs_exclude",
        "vendor_first",
        "deps",
      ]),
      "zip_archive" => Some(&["type", "name", "dir", "srcs", "srcs_exclude"]),
      _ => None,
    }
  }

  /// Names of other modules this one declares a dependency on.
  pub fn deps(&self) -> &[String] {
    match self {
      ModuleKind::GoTestedBinary(props) => &props.deps,
      ModuleKind::ZipArchive(_) => &[],
    }
  }
}

/// Properties of a Go binary built together with a test report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestedBinaryProps {
  /// Package passed to `go build`.
  pub pkg: String,
  /// Package passed to `go test`.
  pub test_pkg: String,
  pub srcs: Vec<String>,
  #[serde(default)]
  pub srcs_exclude: Vec<String>,
  /// Run `go mod vendor` before building.
  #[serde(default)]
  pub vendor_first: bool,
  #[serde(default)]
  pub deps: Vec<String>,
}

/// Properties of a zip archive module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipArchiveProps {
  pub srcs: Vec<String>,
  #[serde(default)]
  pub srcs_exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tested_binary_deserializes_with_defaults() {
    let def: ModuleDef = serde_json::from_str(
      r#"{ "type": "go_tested_binary", "name": "app", "pkg": ".", "test_pkg": "./...", "srcs": ["*.go"] }"#,
    )
    .unwrap();

    assert_eq!(def.name, "app");
    assert_eq!(def.dir, ".");
    assert_eq!(
      def.kind,
      ModuleKind::GoTestedBinary(TestedBinaryProps {
        pkg: ".".to_string(),
        test_pkg: "./...".to_string(),
        srcs: vec!["*.go".to_string()],
        ..Default::default()
      })
    );
  }

  #[test]
  fn zip_archive_deserializes() {
    let def: ModuleDef = serde_json::from_str(
      r#"{ "type": "zip_archive", "name": "docs", "dir": "docs", "srcs": ["**/*.md"], "srcs_exclude": ["draft/*"] }"#,
    )
    .unwrap();

    assert_eq!(def.kind.type_name(), "zip_archive");
    assert!(def.kind.deps().is_empty());
    match def.kind {
      ModuleKind::ZipArchive(props) => assert_eq!(props.srcs_exclude, vec!["draft/*".to_string()]),
      _ => panic!("Expected ZipArchive"),
    }
  }

  #[test]
  fn known_keys_cover_every_serialized_field() {
    let defs = [
      ModuleDef {
        name: "app".to_string(),
        dir: ".".to_string(),
        kind: ModuleKind::GoTestedBinary(TestedBinaryProps::default()),
      },
      ModuleDef {
        name: "docs".to_string(),
        dir: ".".to_string(),
        kind: ModuleKind::ZipArchive(ZipArchiveProps::default()),
      },
    ];

    for def in defs {
      let value = serde_json::to_value(&def).unwrap();
      let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
      keys.sort();
      let mut known = ModuleKind::known_keys(def.kind.type_name()).unwrap().to_vec();
      known.sort();
      assert_eq!(keys, known);
    }
    assert!(ModuleKind::known_keys("cc_library").is_none());
  }

  #[test]
  fn unknown_type_is_rejected() {
    let result: Result<ModuleDef, _> = serde_json::from_str(r#"{ "type": "cc_library", "name": "x", "srcs": [] }"#);
    assert!(result.is_err());
  }
}
