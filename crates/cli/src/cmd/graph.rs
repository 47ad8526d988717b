//! Implementation of the `modgraph graph` command.

use std::process::ExitCode;

use anyhow::{Context, Result};

use modgraph_lib::util::hash::Hashable;

use super::{Generation, WorkspaceArgs, print_module_errors, run_generation};
use crate::output::{OutputFormat, print_json, print_stat, symbols};

pub fn cmd_graph(workspace: &WorkspaceArgs, format: OutputFormat) -> Result<ExitCode> {
  let Generation { graph, report, .. } = run_generation(workspace)?;

  let document = graph.document();
  let hash = document.compute_hash().context("Failed to compute graph hash")?;

  if format.is_json() {
    let json_output = serde_json::json!({
      "id": hash.0,
      "graph": document,
      "emitted": report.emitted,
      "errors": report.errors,
    });
    print_json(&json_output)?;
  } else {
    println!("Graph: {}", hash);
    for action in graph.actions() {
      println!();
      println!("{} {} {}", action.rule, symbols::ARROW, action.outputs.join(" "));
      print_stat("description", &action.description);
      if !action.implicits.is_empty() {
        print_stat("implicits", &action.implicits.join(" "));
      }
      for (name, value) in &action.args {
        print_stat(name, value);
      }
      if action.optional {
        print_stat("optional", "true");
      }
    }
    print_module_errors(&report);
  }

  Ok(if report.is_success() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}
