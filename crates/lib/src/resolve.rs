//! Source pattern resolution.
//!
//! Expands glob patterns against the workspace tree. Patterns are relative to
//! the module directory and matched against slash-separated paths relative to
//! the workspace root, so results can be used directly as graph paths.
//!
//! # Ordering
//!
//! Each directory lists its files (by name) before descending into its
//! subdirectories (by name). For `**/*.txt` over `b.txt`, `a/x.txt` the
//! result is `b.txt, a/x.txt`. The order is reproducible over an unchanged
//! tree, but it is not lexical and callers must not assume it is.
//!
//! # Dependency tracking
//!
//! Every successful resolution is recorded in [`GlobDeps`]: the pattern, the
//! matched files and every directory that was scanned. Adding or removing a
//! file changes the mtime of a scanned directory, which lets the engine rerun
//! generation when a match set may have changed.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::util::path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Errors that can occur while resolving a source pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("invalid pattern '{pattern}': {message}")]
  InvalidPattern { pattern: String, message: String },

  #[error("invalid exclude pattern '{exclude}' for '{pattern}': {message}")]
  InvalidExclude {
    pattern: String,
    exclude: String,
    message: String,
  },

  #[error("cannot scan for pattern '{pattern}': {message}")]
  Walk { pattern: String, message: String },

  #[error("module directory '{dir}' for '{pattern}' must be relative to the workspace root")]
  AbsoluteDir { pattern: String, dir: String },
}

impl ResolveError {
  /// The source pattern that failed to resolve.
  pub fn pattern(&self) -> &str {
    match self {
      ResolveError::InvalidPattern { pattern, .. }
      | ResolveError::InvalidExclude { pattern, .. }
      | ResolveError::Walk { pattern, .. }
      | ResolveError::AbsoluteDir { pattern, .. } => pattern,
    }
  }
}

/// One recorded resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobRecord {
  pub pattern: String,
  pub excludes: Vec<String>,
  pub matches: Vec<String>,
  pub dirs: Vec<String>,
}

/// Files and directories the generated graph depends on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GlobDeps {
  records: Vec<GlobRecord>,
}

impl GlobDeps {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&mut self, record: GlobRecord) {
    if !self.records.contains(&record) {
      self.records.push(record);
    }
  }

  pub fn records(&self) -> &[GlobRecord] {
    &self.records
  }

  /// Every matched file and scanned directory, deduplicated and sorted.
  pub fn paths(&self) -> Vec<String> {
    let mut paths: Vec<String> = self
      .records
      .iter()
      .flat_map(|r| r.matches.iter().chain(r.dirs.iter()).cloned())
      .collect();
    paths.sort();
    paths.dedup();
    paths
  }

  pub fn extend(&mut self, other: GlobDeps) {
    for record in other.records {
      self.record(record);
    }
  }
}

/// Resolves patterns against a workspace root.
pub struct PatternResolver {
  root: PathBuf,
  deps: GlobDeps,
}

impl PatternResolver {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      deps: GlobDeps::new(),
    }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn deps(&self) -> &GlobDeps {
    &self.deps
  }

  pub fn into_deps(self) -> GlobDeps {
    self.deps
  }

  /// Expand `pattern` inside `module_dir`, dropping matches that satisfy any
  /// of `excludes`.
  ///
  /// Only regular files (and symlinks to them) match. A pattern whose base
  /// directory does not exist matches nothing.
  ///
  /// # Errors
  ///
  /// Fails with the offending source pattern when the pattern or one of the
  /// exclusions is not valid glob syntax, or when the tree cannot be read.
  pub fn resolve(&mut self, pattern: &str, excludes: &[String], module_dir: &str) -> Result<Vec<String>, ResolveError> {
    if pattern.is_empty() {
      return Err(ResolveError::InvalidPattern {
        pattern: pattern.to_string(),
        message: "pattern is empty".to_string(),
      });
    }

    if Path::new(module_dir).is_absolute() || module_dir.starts_with('/') {
      return Err(ResolveError::AbsoluteDir {
        pattern: pattern.to_string(),
        dir: module_dir.to_string(),
      });
    }

    // The directory is literal text; only the pattern carries glob syntax.
    let escaped_dir = Pattern::escape(module_dir);
    let full = path::join(&[module_dir, pattern]);
    let compiled = Pattern::new(&path::join(&[&escaped_dir, pattern])).map_err(|e| ResolveError::InvalidPattern {
      pattern: pattern.to_string(),
      message: e.to_string(),
    })?;

    let mut exclusions = Vec::with_capacity(excludes.len());
    for exclude in excludes {
      let compiled_exclude =
        Pattern::new(&path::join(&[&escaped_dir, exclude])).map_err(|e| ResolveError::InvalidExclude {
          pattern: pattern.to_string(),
          exclude: exclude.clone(),
          message: e.to_string(),
        })?;
      exclusions.push(compiled_exclude);
    }

    let (pattern_base, max_depth) = walk_scope(&path::clean(pattern));
    let base = path::join(&[module_dir, &pattern_base]);
    let base = if base == "." { String::new() } else { base };
    let base_path = if base.is_empty() { self.root.clone() } else { self.root.join(&base) };

    let mut matches = Vec::new();
    let mut dirs = Vec::new();

    if base_path.is_dir() {
      let mut walker = WalkDir::new(&base_path).sort_by(|a, b| {
        a.file_type()
          .is_dir()
          .cmp(&b.file_type().is_dir())
          .then_with(|| a.file_name().cmp(b.file_name()))
      });
      if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
      }

      for entry in walker {
        let entry = entry.map_err(|e| ResolveError::Walk {
          pattern: pattern.to_string(),
          message: e.to_string(),
        })?;
        let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
        let rel = path::to_slash(relative);

        if entry.file_type().is_dir() {
          dirs.push(if rel.is_empty() { ".".to_string() } else { rel });
          continue;
        }

        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file || !compiled.matches_with(&rel, MATCH_OPTIONS) {
          continue;
        }
        if exclusions.iter().any(|ex| ex.matches_with(&rel, MATCH_OPTIONS)) {
          debug!(pattern = %pattern, path = %rel, "excluded");
          continue;
        }
        matches.push(rel);
      }
    }

    debug!(pattern = %pattern, module_dir = %module_dir, matches = matches.len(), "resolved pattern");

    self.deps.record(GlobRecord {
      pattern: full,
      excludes: excludes.to_vec(),
      matches: matches.clone(),
      dirs,
    });

    Ok(matches)
  }
}

fn has_meta(component: &str) -> bool {
  component.contains(['*', '?', '['])
}

/// Split a normalized pattern into the literal directory to walk and the
/// maximum walk depth (`None` when the pattern is recursive).
fn walk_scope(full: &str) -> (String, Option<usize>) {
  let components: Vec<&str> = full.split('/').collect();
  let literal = components.iter().take_while(|c| !has_meta(c)).count();
  // A fully literal pattern names a file; walk its parent.
  let base_len = literal.min(components.len().saturating_sub(1));

  let base = components[..base_len].join("/");
  let base = if base == "." { String::new() } else { base };
  let recursive = components[base_len..].contains(&"**");
  let depth = components.len() - base_len;

  (base, if recursive { None } else { Some(depth) })
}
