//! Implementation of the `modgraph rules` command.

use anyhow::{Context, Result};

use modgraph_lib::rules::RuleSet;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_rules(format: OutputFormat) -> Result<()> {
  let rules = RuleSet::standard().context("Failed to build the standard rule set")?;

  if format.is_json() {
    let list: Vec<_> = rules.iter().collect();
    print_json(&list)?;
    return Ok(());
  }

  for (i, rule) in rules.iter().enumerate() {
    if i > 0 {
      println!();
    }
    println!("{}", rule.name());
    print_stat("command", rule.command());
    print_stat("description", rule.description());
    print_stat("params", &rule.params().join(", "));
  }

  Ok(())
}
