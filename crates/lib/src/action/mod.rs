//! Build actions.
//!
//! Actions are what module drivers produce: a rule, its bound arguments, the
//! declared outputs and the implicit inputs that order it after other work.
//!
//! # Command Expansion
//!
//! The engine expands the rule's command template with the action's
//! arguments when it runs the action. [`expand_command`] performs the same
//! expansion here so a generated graph can be inspected without an engine.
//! See [`crate::placeholder`] for the template syntax.

mod types;

pub use types::*;

use thiserror::Error;

use crate::placeholder::{self, PlaceholderError};
use crate::rules::{RuleError, RuleSet};

/// Errors that can occur while expanding an action's templates.
#[derive(Debug, Error)]
pub enum ExpandError {
  #[error(transparent)]
  Rule(#[from] RuleError),

  #[error("placeholder error: {0}")]
  Placeholder(#[from] PlaceholderError),
}

/// Expand the command an action would run.
///
/// The arguments must bind exactly the rule's declared parameters.
pub fn expand_command(action: &BuildAction, rules: &RuleSet) -> Result<String, ExpandError> {
  rules.validate_args(action.rule, &action.args)?;
  let rule = rules.get(action.rule)?;
  Ok(placeholder::substitute_segments(rule.command_segments(), &action.args)?)
}

/// Expand the rule-level description of an action (the engine's status line).
pub fn expand_description(action: &BuildAction, rules: &RuleSet) -> Result<String, ExpandError> {
  let rule = rules.get(action.rule)?;
  Ok(placeholder::substitute_segments(rule.description_segments(), &action.args)?)
}

impl BuildAction {
  /// The command this action runs, see [`expand_command`].
  pub fn command(&self, rules: &RuleSet) -> Result<String, ExpandError> {
    expand_command(self, rules)
  }
}
