//! Ninja build file writer.
//!
//! Renders an [`ActionGraph`] into the engine's input format: one `rule`
//! block per rule in use, one `build` statement per action with its implicit
//! inputs after `|`, and a `default` line listing every non-optional output.

use std::io::Write;

use thiserror::Error;

use crate::graph::ActionGraph;
use crate::placeholder;

/// Errors that can occur while writing a build file.
#[derive(Debug, Error)]
pub enum NinjaError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("value contains a newline: {0:?}")]
  Newline(String),
}

/// A rule that reruns generation when any of `inputs` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regeneration {
  /// Shell command that regenerates the build file.
  pub command: String,
  /// Path of the build file itself.
  pub build_file: String,
  /// Files and directories the generation read.
  pub inputs: Vec<String>,
}

/// Escape a path for use in a `build` line.
fn escape_path(path: &str) -> Result<String, NinjaError> {
  reject_newline(path)?;
  Ok(path.replace('$', "$$").replace(' ', "$ ").replace(':', "$:"))
}

/// Escape a variable value.
fn escape_value(value: &str) -> Result<String, NinjaError> {
  reject_newline(value)?;
  Ok(value.replace('$', "$$"))
}

fn reject_newline(value: &str) -> Result<(), NinjaError> {
  if value.contains('\n') {
    return Err(NinjaError::Newline(value.to_string()));
  }
  Ok(())
}

fn join_paths(paths: &[String]) -> Result<String, NinjaError> {
  let escaped = paths.iter().map(|p| escape_path(p)).collect::<Result<Vec<_>, _>>()?;
  Ok(escaped.join(" "))
}

/// Write `graph` as a ninja build file.
pub fn write_ninja<W: Write>(graph: &ActionGraph, regen: Option<&Regeneration>, out: &mut W) -> Result<(), NinjaError> {
  writeln!(out, "# Generated by {}. Do not edit.", crate::consts::APP_NAME)?;
  writeln!(out, "ninja_required_version = 1.7")?;

  let document = graph.document();
  for rule in &document.rules {
    writeln!(out)?;
    writeln!(out, "rule {}", rule.name())?;
    writeln!(out, "  command = {}", placeholder::render(rule.command_segments()))?;
    writeln!(out, "  description = {}", placeholder::render(rule.description_segments()))?;
  }

  for action in graph.actions() {
    writeln!(out)?;
    let mut line = format!("build {}: {}", join_paths(&action.outputs)?, action.rule);
    if !action.implicits.is_empty() {
      line.push_str(" | ");
      line.push_str(&join_paths(&action.implicits)?);
    }
    writeln!(out, "{line}")?;
    writeln!(out, "  description = {}", escape_value(&action.description)?)?;
    for (name, value) in &action.args {
      writeln!(out, "  {} = {}", name, escape_value(value)?)?;
    }
  }

  if let Some(regen) = regen {
    writeln!(out)?;
    writeln!(out, "rule regenerate")?;
    writeln!(out, "  command = {}", escape_value(&regen.command)?)?;
    writeln!(out, "  description = regenerate {}", escape_value(&regen.build_file)?)?;
    writeln!(out, "  generator = 1")?;
    writeln!(out)?;
    let mut line = format!("build {}: regenerate", escape_path(&regen.build_file)?);
    if !regen.inputs.is_empty() {
      line.push_str(" | ");
      line.push_str(&join_paths(&regen.inputs)?);
    }
    writeln!(out, "{line}")?;
  }

  let targets = graph.default_targets();
  if !targets.is_empty() {
    let targets: Vec<String> = targets.into_iter().map(String::from).collect();
    writeln!(out)?;
    writeln!(out, "default {}", join_paths(&targets)?)?;
  }

  Ok(())
}

/// Render `graph` into a string.
pub fn render_ninja(graph: &ActionGraph, regen: Option<&Regeneration>) -> Result<String, NinjaError> {
  let mut buffer = Vec::new();
  write_ninja(graph, regen, &mut buffer)?;
  Ok(String::from_utf8_lossy(&buffer).into_owned())
}
