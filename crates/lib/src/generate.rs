//! Generation driver.
//!
//! Runs every declared module through its driver and flushes the result into
//! a [`BuildGraph`]. A module either contributes all of its actions or none:
//! property errors and graph rejections both leave the graph untouched for
//! that module, and the remaining modules still run.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::graph::{BuildGraph, GraphError};
use crate::module::{ModuleContext, ModuleDef, PropertyError};
use crate::resolve::{GlobDeps, PatternResolver};
use crate::rules::RuleSet;

/// A module that could not contribute to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ModuleError {
  #[error("module '{module}': {}", join_errors(.errors))]
  Properties { module: String, errors: Vec<PropertyError> },

  #[error("module '{module}': {source}")]
  Graph {
    module: String,
    #[serde(serialize_with = "serialize_display")]
    source: GraphError,
  },

  #[error("module '{0}' is declared more than once")]
  DuplicateName(String),

  #[error("module in '{dir}' has an invalid name '{name}'")]
  InvalidName { name: String, dir: String },

  #[error("module '{name}' has directory '{dir}', which is not relative to the workspace root")]
  InvalidDir { name: String, dir: String },
}

impl ModuleError {
  pub fn module(&self) -> &str {
    match self {
      ModuleError::Properties { module, .. } | ModuleError::Graph { module, .. } => module,
      ModuleError::DuplicateName(name)
      | ModuleError::InvalidName { name, .. }
      | ModuleError::InvalidDir { name, .. } => name,
    }
  }
}

fn join_errors(errors: &[PropertyError]) -> String {
  errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

fn serialize_display<S: serde::Serializer>(value: &GraphError, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_str(value)
}

/// Outcome of a generation run.
#[derive(Debug, Default, Serialize)]
pub struct GenerateReport {
  /// Modules whose actions were added to the graph, in declaration order.
  pub emitted: Vec<String>,
  pub errors: Vec<ModuleError>,
  /// Everything pattern resolution read while generating.
  pub deps: GlobDeps,
}

impl GenerateReport {
  pub fn is_success(&self) -> bool {
    self.errors.is_empty()
  }
}

pub struct Generator {
  config: GeneratorConfig,
  rules: Arc<RuleSet>,
}

impl Generator {
  pub fn new(config: GeneratorConfig, rules: Arc<RuleSet>) -> Self {
    Self { config, rules }
  }

  pub fn config(&self) -> &GeneratorConfig {
    &self.config
  }

  pub fn rules(&self) -> &Arc<RuleSet> {
    &self.rules
  }

  /// Emit the actions of every module in `modules` into `graph`.
  pub fn generate(&self, modules: &[ModuleDef], graph: &mut impl BuildGraph) -> GenerateReport {
    let mut report = GenerateReport::default();
    let mut resolver = PatternResolver::new(&self.config.root);

    let known: HashSet<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for module in modules {
      if !is_valid_name(&module.name) {
        warn!(name = %module.name, dir = %module.dir, "skipping module with invalid name");
        report.errors.push(ModuleError::InvalidName {
          name: module.name.clone(),
          dir: module.dir.clone(),
        });
        continue;
      }
      if is_absolute_dir(&module.dir) {
        warn!(module = %module.name, dir = %module.dir, "skipping module with absolute directory");
        report.errors.push(ModuleError::InvalidDir {
          name: module.name.clone(),
          dir: module.dir.clone(),
        });
        continue;
      }
      if !seen.insert(&module.name) {
        warn!(module = %module.name, "skipping duplicate module");
        report.errors.push(ModuleError::DuplicateName(module.name.clone()));
        continue;
      }
      for dep in module.kind.deps() {
        if !known.contains(dep.as_str()) {
          warn!(module = %module.name, dep = %dep, "dependency names an unknown module");
        }
      }

      debug!(module = %module.name, kind = module.kind.type_name(), "generating module");
      let mut ctx = ModuleContext::new(&module.name, &module.dir, &self.config, &self.rules, &mut resolver);
      module.kind.driver().generate_build_actions(&mut ctx);

      let actions = match ctx.finish() {
        Ok(actions) => actions,
        Err(errors) => {
          for error in &errors {
            warn!(module = %module.name, property = %error.property, "{}", error.message);
          }
          report.errors.push(ModuleError::Properties {
            module: module.name.clone(),
            errors,
          });
          continue;
        }
      };

      let count = actions.len();
      match graph.add_actions(actions) {
        Ok(()) => {
          info!(module = %module.name, actions = count, "module added to graph");
          report.emitted.push(module.name.clone());
        }
        Err(source) => {
          warn!(module = %module.name, error = %source, "graph rejected module actions");
          report.errors.push(ModuleError::Graph {
            module: module.name.clone(),
            source,
          });
        }
      }
    }

    report.deps = resolver.into_deps();
    report
  }
}

/// Names end up in output paths, so they must be a single path component.
fn is_valid_name(name: &str) -> bool {
  !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\']) && !name.chars().any(char::is_whitespace)
}

fn is_absolute_dir(dir: &str) -> bool {
  Path::new(dir).is_absolute() || dir.starts_with(['/', '\\'])
}
