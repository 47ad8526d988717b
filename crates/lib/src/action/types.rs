use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::RuleName;

/// One unit of work handed to the build engine.
///
/// An action binds a [`Rule`](crate::rules::Rule) to concrete arguments and
/// declares what it produces (`outputs`) and what must exist or be rebuilt
/// before it runs (`implicits`). Implicit inputs are graph edges only; they
/// are never substituted into the command.
///
/// # Optional actions
///
/// An `optional` action is only run when something downstream needs one of
/// its outputs. It is left out of the engine's default targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildAction {
  pub rule: RuleName,
  pub description: String,
  pub outputs: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub implicits: Vec<String>,
  pub args: BTreeMap<String, String>,
  #[serde(default)]
  pub optional: bool,
}

impl BuildAction {
  pub fn new(rule: RuleName, description: impl Into<String>) -> Self {
    Self {
      rule,
      description: description.into(),
      outputs: Vec::new(),
      implicits: Vec::new(),
      args: BTreeMap::new(),
      optional: false,
    }
  }

  pub fn with_output(mut self, output: impl Into<String>) -> Self {
    self.outputs.push(output.into());
    self
  }

  pub fn with_implicits(mut self, implicits: Vec<String>) -> Self {
    self.implicits = implicits;
    self
  }

  pub fn with_arg(mut self, name: &str, value: impl Into<String>) -> Self {
    self.args.insert(name.to_string(), value.into());
    self
  }

  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }
}
