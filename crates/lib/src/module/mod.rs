//! Module drivers.
//!
//! A module is one declared unit of build configuration. Its driver turns the
//! module's properties into build actions through a [`ModuleContext`], which
//! resolves patterns (recording them as generation dependencies), collects
//! property errors and buffers the emitted actions.
//!
//! # Drivers
//!
//! - [`TestedBinaryProps`] - Go binary with a test report and optional vendoring
//! - [`ZipArchiveProps`] - zip archive of matched files
//!
//! # Atomicity
//!
//! Actions are buffered in the context and only handed to the graph by the
//! generator when the module recorded no property errors. A driver that hits
//! an error may keep going to report more of them; nothing it emitted leaks.

mod tested_binary;
mod types;
mod zip_archive;

pub use types::*;

use std::fmt;

use serde::Serialize;

use crate::action::BuildAction;
use crate::config::GeneratorConfig;
use crate::resolve::{PatternResolver, ResolveError};
use crate::rules::RuleSet;

/// An error in one property of a module definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyError {
  pub property: String,
  /// The offending pattern, when the error comes from resolution.
  pub pattern: Option<String>,
  pub message: String,
}

impl PropertyError {
  pub fn new(property: &str, message: impl Into<String>) -> Self {
    Self {
      property: property.to_string(),
      pattern: None,
      message: message.into(),
    }
  }

  /// A source pattern that could not be resolved.
  pub fn unresolved(property: &str, err: &ResolveError) -> Self {
    Self {
      property: property.to_string(),
      pattern: Some(err.pattern().to_string()),
      message: format!("cannot resolve files that match pattern {}: {}", err.pattern(), err),
    }
  }
}

impl fmt::Display for PropertyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.property, self.message)
  }
}

/// A module driver.
pub trait Module {
  /// Emit this module's actions into `ctx`.
  fn generate_build_actions(&self, ctx: &mut ModuleContext<'_>);
}

/// Per-module view of a generation run.
pub struct ModuleContext<'a> {
  name: &'a str,
  dir: &'a str,
  config: &'a GeneratorConfig,
  rules: &'a RuleSet,
  resolver: &'a mut PatternResolver,
  actions: Vec<BuildAction>,
  errors: Vec<PropertyError>,
}

impl<'a> ModuleContext<'a> {
  pub fn new(
    name: &'a str,
    dir: &'a str,
    config: &'a GeneratorConfig,
    rules: &'a RuleSet,
    resolver: &'a mut PatternResolver,
  ) -> Self {
    Self {
      name,
      dir,
      config,
      rules,
      resolver,
      actions: Vec::new(),
      errors: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    self.name
  }

  /// Module directory, relative to the workspace root.
  pub fn dir(&self) -> &str {
    self.dir
  }

  pub fn config(&self) -> &GeneratorConfig {
    self.config
  }

  pub fn rules(&self) -> &RuleSet {
    self.rules
  }

  /// Resolve `pattern` in the module directory and record the result as a
  /// generation dependency.
  pub fn glob_with_deps(&mut self, pattern: &str, excludes: &[String]) -> Result<Vec<String>, ResolveError> {
    self.resolver.resolve(pattern, excludes, self.dir)
  }

  pub fn property_error(&mut self, error: PropertyError) {
    self.errors.push(error);
  }

  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// Buffer an action for this module.
  ///
  /// An action whose arguments do not bind exactly its rule's parameters is
  /// dropped and recorded as an error against the rule name.
  pub fn build(&mut self, action: BuildAction) {
    if let Err(err) = self.rules.validate_args(action.rule, &action.args) {
      self.property_error(PropertyError::new(action.rule.as_str(), err.to_string()));
      return;
    }
    self.actions.push(action);
  }

  /// The buffered actions, or every recorded property error.
  pub fn finish(self) -> Result<Vec<BuildAction>, Vec<PropertyError>> {
    if self.errors.is_empty() {
      Ok(self.actions)
    } else {
      Err(self.errors)
    }
  }
}

/// Resolve every source pattern of a module, one match list per pattern.
///
/// Every failing pattern is reported (once, even if listed twice) before
/// giving up; `None` means at least one failed.
pub(crate) fn resolve_sources(ctx: &mut ModuleContext<'_>, srcs: &[String], excludes: &[String]) -> Option<Vec<Vec<String>>> {
  let mut resolved = Vec::with_capacity(srcs.len());
  let mut failed: Vec<&str> = Vec::new();

  for src in srcs {
    match ctx.glob_with_deps(src, excludes) {
      Ok(matches) => resolved.push(matches),
      Err(err) => {
        if !failed.contains(&src.as_str()) {
          failed.push(src);
          ctx.property_error(PropertyError::unresolved("srcs", &err));
        }
      }
    }
  }

  if failed.is_empty() { Some(resolved) } else { None }
}
