//! Implementation of the `modgraph generate` command.
//!
//! Runs every module into an action graph and writes it as a ninja build file
//! under the workspace root. Modules that fail are reported and left out; the
//! rest of the graph is still written.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use modgraph_lib::ninja::{Regeneration, render_ninja};
use modgraph_lib::util::hash::Hashable;

use super::{Generation, WorkspaceArgs, print_module_errors, relative_to, run_generation};
use crate::output::{print_info, print_stat, print_success, print_warning, truncate_hash};

pub fn cmd_generate(workspace: &WorkspaceArgs, ninja: &Path, verbose: bool) -> Result<ExitCode> {
  let Generation {
    config,
    modules_path,
    graph,
    report,
  } = run_generation(workspace)?;

  let build_file = if ninja.is_absolute() {
    ninja.to_path_buf()
  } else {
    config.root.join(ninja)
  };
  let modules_path = dunce::canonicalize(&modules_path).unwrap_or(modules_path);

  let mut inputs = vec![relative_to(&config.root, &modules_path)];
  inputs.extend(report.deps.paths());
  let regen = Regeneration {
    command: regenerate_command(&config.root, &modules_path, &config.base_output_dir, &build_file),
    build_file: relative_to(&config.root, &build_file),
    inputs,
  };

  debug!(build_file = %build_file.display(), inputs = regen.inputs.len(), "writing build file");
  let content = render_ninja(&graph, Some(&regen)).context("Failed to render build file")?;
  if let Some(parent) = build_file.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory: {}", parent.display()))?;
  }
  fs::write(&build_file, content).with_context(|| format!("Failed to write build file: {}", build_file.display()))?;

  let hash = graph.document().compute_hash().context("Failed to compute graph hash")?;

  print_module_errors(&report);
  if report.is_success() {
    print_success(&format!("Generated {}", build_file.display()));
  } else {
    print_warning(&format!(
      "Generated {} with {} failed module(s)",
      build_file.display(),
      report.errors.len()
    ));
  }
  print_stat("Graph", truncate_hash(&hash.0));
  print_stat("Modules", &report.emitted.len().to_string());
  print_stat("Actions", &graph.len().to_string());
  print_stat("Dependencies", &regen.inputs.len().to_string());

  if verbose {
    for missing in graph.missing_inputs(&config.root) {
      print_info(&format!("{} needs {} which nothing provides yet", missing.action, missing.input));
    }
  }

  Ok(if report.is_success() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}

/// Shell command that reruns this generation with the same settings.
fn regenerate_command(root: &Path, modules: &Path, out_dir: &str, build_file: &Path) -> String {
  let exe = std::env::current_exe()
    .map(|p| p.display().to_string())
    .unwrap_or_else(|_| modgraph_lib::consts::APP_NAME.to_string());
  [
    shell_quote(&exe),
    "generate".to_string(),
    "--root".to_string(),
    shell_quote(&root.display().to_string()),
    "--modules".to_string(),
    shell_quote(&modules.display().to_string()),
    "--out-dir".to_string(),
    shell_quote(out_dir),
    "--ninja".to_string(),
    shell_quote(&build_file.display().to_string()),
  ]
  .join(" ")
}

fn shell_quote(value: &str) -> String {
  if !value.is_empty()
    && value
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | ':' | '\\'))
  {
    value.to_string()
  } else {
    format!("'{}'", value.replace('\'', r"'\''"))
  }
}
