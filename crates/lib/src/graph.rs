//! The action graph handed to the build engine.
//!
//! Module drivers never talk to an engine directly; they emit into a
//! [`BuildGraph`]. [`ActionGraph`] is the in-memory implementation used to
//! write build files and to inspect a generation run.
//!
//! # Invariants
//!
//! - Every output path is produced by exactly one action.
//! - Every action binds exactly the parameters of its rule.
//!
//! Implicit inputs that are neither on disk nor produced by another action are
//! not rejected at insertion time (the vendor manifest, for example, is only
//! needed when the engine runs the vendor step). [`ActionGraph::missing_inputs`]
//! reports them on request.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use thiserror::Error;

use crate::action::BuildAction;
use crate::rules::{Rule, RuleError, RuleName, RuleSet};
use crate::util::hash::Hashable;

/// Errors raised by the graph when accepting or ordering actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  #[error("output '{output}' is already produced by another action")]
  DuplicateOutput { output: String },

  #[error("{rule} action '{description}' declares no outputs")]
  NoOutputs { rule: RuleName, description: String },

  #[error(transparent)]
  Rule(#[from] RuleError),

  #[error("dependency cycle detected at '{0}'")]
  Cycle(String),
}

/// Sink for build actions.
pub trait BuildGraph {
  /// Add a batch of actions atomically: either all are accepted or none.
  fn add_actions(&mut self, actions: Vec<BuildAction>) -> Result<(), GraphError>;

  fn add_action(&mut self, action: BuildAction) -> Result<(), GraphError> {
    self.add_actions(vec![action])
  }
}

/// An implicit input nobody provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingInput {
  /// First output of the action that needs the input.
  pub action: String,
  pub input: String,
}

/// In-memory action graph.
#[derive(Debug, Clone)]
pub struct ActionGraph {
  rules: Arc<RuleSet>,
  actions: Vec<BuildAction>,
  producers: HashMap<String, usize>,
}

impl ActionGraph {
  pub fn new(rules: Arc<RuleSet>) -> Self {
    Self {
      rules,
      actions: Vec::new(),
      producers: HashMap::new(),
    }
  }

  pub fn rules(&self) -> &RuleSet {
    &self.rules
  }

  pub fn actions(&self) -> &[BuildAction] {
    &self.actions
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  /// The action producing `output`, if any.
  pub fn producer_of(&self, output: &str) -> Option<&BuildAction> {
    self.producers.get(output).map(|&idx| &self.actions[idx])
  }

  /// Outputs the engine builds when no target is named: every output of
  /// every non-optional action, in insertion order.
  pub fn default_targets(&self) -> Vec<&str> {
    self
      .actions
      .iter()
      .filter(|a| !a.optional)
      .flat_map(|a| a.outputs.iter().map(|o| o.as_str()))
      .collect()
  }

  /// Implicit inputs that do not exist under `root` and are not produced by
  /// any action.
  pub fn missing_inputs(&self, root: &Path) -> Vec<MissingInput> {
    let mut missing = Vec::new();
    for action in &self.actions {
      for input in &action.implicits {
        if self.producers.contains_key(input) || root.join(input).exists() {
          continue;
        }
        missing.push(MissingInput {
          action: action.outputs.first().cloned().unwrap_or_default(),
          input: input.clone(),
        });
      }
    }
    missing
  }

  /// Actions ordered so that every producer comes before its consumers.
  pub fn execution_order(&self) -> Result<Vec<&BuildAction>, GraphError> {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..self.actions.len()).map(|idx| graph.add_node(idx)).collect();

    for (consumer, action) in self.actions.iter().enumerate() {
      for input in &action.implicits {
        if let Some(&producer) = self.producers.get(input) {
          graph.add_edge(nodes[producer], nodes[consumer], ());
        }
      }
    }

    let sorted = toposort(&graph, None).map_err(|cycle| {
      let action = &self.actions[graph[cycle.node_id()]];
      GraphError::Cycle(action.outputs.first().cloned().unwrap_or_default())
    })?;

    Ok(sorted.into_iter().map(|node| &self.actions[graph[node]]).collect())
  }

  /// Serializable view of the graph and the rules it uses.
  pub fn document(&self) -> GraphDocument<'_> {
    let mut used: Vec<RuleName> = self.actions.iter().map(|a| a.rule).collect();
    used.sort();
    used.dedup();

    GraphDocument {
      rules: used.into_iter().filter_map(|name| self.rules.get(name).ok()).collect(),
      actions: &self.actions,
    }
  }

  fn check(&self, actions: &[BuildAction]) -> Result<(), GraphError> {
    let mut pending: HashSet<&str> = HashSet::new();

    for action in actions {
      if action.outputs.is_empty() {
        return Err(GraphError::NoOutputs {
          rule: action.rule,
          description: action.description.clone(),
        });
      }
      self.rules.validate_args(action.rule, &action.args)?;

      for output in &action.outputs {
        if self.producers.contains_key(output) || !pending.insert(output.as_str()) {
          return Err(GraphError::DuplicateOutput { output: output.clone() });
        }
      }
    }

    Ok(())
  }
}

impl BuildGraph for ActionGraph {
  fn add_actions(&mut self, actions: Vec<BuildAction>) -> Result<(), GraphError> {
    self.check(&actions)?;

    for action in actions {
      let idx = self.actions.len();
      for output in &action.outputs {
        self.producers.insert(output.clone(), idx);
      }
      self.actions.push(action);
    }

    Ok(())
  }
}

/// JSON form of a generated graph.
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
  pub rules: Vec<&'a Rule>,
  pub actions: &'a [BuildAction],
}

impl Hashable for GraphDocument<'_> {}
