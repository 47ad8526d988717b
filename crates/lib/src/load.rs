//! Module definitions file.
//!
//! ```json
//! {
//!   "modules": [
//!     { "type": "zip_archive", "name": "docs", "srcs": ["**/*.md"] }
//!   ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::module::{ModuleDef, ModuleKind};

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read module file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse module file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleFile {
  pub modules: Vec<ModuleDef>,
}

/// Read and parse the module definitions at `path`.
pub fn load_modules(path: &Path) -> Result<Vec<ModuleDef>, LoadError> {
  let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  parse_modules(&content).map_err(|source| LoadError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Parse module definitions. Keys a module's type does not define are
/// ignored with a warning.
pub fn parse_modules(content: &str) -> Result<Vec<ModuleDef>, serde_json::Error> {
  let value: Value = serde_json::from_str(content)?;
  for key in unknown_keys(&value) {
    warn!(module = %key.0, key = %key.1, "ignoring unknown module property");
  }
  let file: ModuleFile = serde_json::from_value(value)?;
  Ok(file.modules)
}

/// `(module name, key)` for every key outside its module type's properties.
fn unknown_keys(value: &Value) -> Vec<(String, String)> {
  let Some(modules) = value.get("modules").and_then(Value::as_array) else {
    return Vec::new();
  };

  let mut unknown = Vec::new();
  for module in modules {
    let Some(fields) = module.as_object() else {
      continue;
    };
    let Some(known) = fields
      .get("type")
      .and_then(Value::as_str)
      .and_then(ModuleKind::known_keys)
    else {
      continue;
    };
    let name = fields.get("name").and_then(Value::as_str).unwrap_or_default();
    for key in fields.keys().filter(|k| !known.contains(&k.as_str())) {
      unknown.push((name.to_string(), key.clone()));
    }
  }
  unknown
}
