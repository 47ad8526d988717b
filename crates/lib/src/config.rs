//! Generator configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! environment variables (`MODGRAPH_ROOT`, `MODGRAPH_OUTPUT_DIR`) and explicit
//! overrides from the caller (usually CLI flags).

use std::path::PathBuf;

use serde::Serialize;

use crate::consts::{DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV, ROOT_ENV};
use crate::util::path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
  /// Workspace root; patterns and graph paths are relative to it.
  pub root: PathBuf,
  /// Base output directory, relative to `root`.
  pub base_output_dir: String,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      root: PathBuf::from("."),
      base_output_dir: DEFAULT_OUTPUT_DIR.to_string(),
    }
  }
}

impl GeneratorConfig {
  /// Defaults overridden by the environment. Empty variables are ignored.
  pub fn from_env() -> Self {
    let mut config = Self::default();
    if let Some(root) = non_empty_var(ROOT_ENV) {
      config.root = PathBuf::from(root);
    }
    if let Some(out) = non_empty_var(OUTPUT_DIR_ENV) {
      config = config.with_output_dir(&out);
    }
    config
  }

  pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.root = root.into();
    self
  }

  pub fn with_output_dir(mut self, dir: &str) -> Self {
    self.base_output_dir = path::clean(dir);
    self
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.is_empty())
}
