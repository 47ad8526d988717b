//! Build rule templates.
//!
//! A [`Rule`] is a named command template with a fixed set of declared
//! parameters. Every action bound to a rule must supply exactly those
//! parameters. Rules live in a [`RuleSet`] that is constructed once and then
//! shared read-only by every module driver.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::placeholder::{self, PlaceholderError, Segment};

/// The closed set of rules a module driver can emit actions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
  Vendor,
  Build,
  Test,
  Archive,
}

impl RuleName {
  pub const ALL: [RuleName; 4] = [RuleName::Vendor, RuleName::Build, RuleName::Test, RuleName::Archive];

  pub fn as_str(&self) -> &'static str {
    match self {
      RuleName::Vendor => "vendor",
      RuleName::Build => "build",
      RuleName::Test => "test",
      RuleName::Archive => "archive",
    }
  }
}

impl fmt::Display for RuleName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Errors raised while defining rules or binding actions to them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
  #[error("rule {rule}: invalid template: {source}")]
  Template {
    rule: RuleName,
    #[source]
    source: PlaceholderError,
  },

  #[error("rule {rule}: template references undeclared parameter '{param}'")]
  UndeclaredParameter { rule: RuleName, param: String },

  #[error("rule {0} is already registered")]
  DuplicateRule(RuleName),

  #[error("rule {0} is not registered")]
  UnknownRule(RuleName),

  #[error("rule {rule}: arguments do not match parameters (missing: {missing:?}, unexpected: {unexpected:?})")]
  ArgumentMismatch {
    rule: RuleName,
    missing: Vec<String>,
    unexpected: Vec<String>,
  },
}

/// A parameterized command template.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
  name: RuleName,
  command: String,
  description: String,
  params: Vec<String>,
  #[serde(skip)]
  command_segments: Vec<Segment>,
  #[serde(skip)]
  description_segments: Vec<Segment>,
}

impl Rule {
  /// Define a rule.
  ///
  /// Both templates are parsed up front; any parameter they reference must be
  /// listed in `params`.
  pub fn new(name: RuleName, command: &str, description: &str, params: &[&str]) -> Result<Self, RuleError> {
    let parse = |template: &str| placeholder::parse(template).map_err(|source| RuleError::Template { rule: name, source });
    let command_segments = parse(command)?;
    let description_segments = parse(description)?;

    for segments in [&command_segments, &description_segments] {
      if let Some(param) = placeholder::params(segments)
        .into_iter()
        .find(|p| !params.contains(p))
      {
        return Err(RuleError::UndeclaredParameter {
          rule: name,
          param: param.to_string(),
        });
      }
    }

    Ok(Self {
      name,
      command: command.to_string(),
      description: description.to_string(),
      params: params.iter().map(|p| p.to_string()).collect(),
      command_segments,
      description_segments,
    })
  }

  pub fn name(&self) -> RuleName {
    self.name
  }

  pub fn command(&self) -> &str {
    &self.command
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn params(&self) -> &[String] {
    &self.params
  }

  pub fn command_segments(&self) -> &[Segment] {
    &self.command_segments
  }

  pub fn description_segments(&self) -> &[Segment] {
    &self.description_segments
  }
}

/// Read-only registry of rules keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
  rules: BTreeMap<RuleName, Rule>,
}

impl RuleSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// The rules used by the built-in module drivers.
  pub fn standard() -> Result<Self, RuleError> {
    let mut rules = Self::new();
    rules.register(Rule::new(
      RuleName::Vendor,
      "cd $workDir && go mod vendor",
      "vendor dependencies of $name",
      &["workDir", "name"],
    )?)?;
    rules.register(Rule::new(
      RuleName::Build,
      "cd $workDir && go build -o $outputPath $pkg",
      "build go command $pkg",
      &["workDir", "outputPath", "pkg"],
    )?)?;
    rules.register(Rule::new(
      RuleName::Test,
      "cd $workDir && go test -v $testPkg > $outReportPath",
      "test $testPkg",
      &["workDir", "testPkg", "outReportPath"],
    )?)?;
    rules.register(Rule::new(
      RuleName::Archive,
      "cd $workDir && zip $outputPath -j $inputFiles",
      "make archive from $inputFiles",
      &["workDir", "outputPath", "inputFiles"],
    )?)?;
    Ok(rules)
  }

  pub fn register(&mut self, rule: Rule) -> Result<(), RuleError> {
    if self.rules.contains_key(&rule.name) {
      return Err(RuleError::DuplicateRule(rule.name));
    }
    self.rules.insert(rule.name, rule);
    Ok(())
  }

  pub fn get(&self, name: RuleName) -> Result<&Rule, RuleError> {
    self.rules.get(&name).ok_or(RuleError::UnknownRule(name))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Rule> {
    self.rules.values()
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Check that `args` binds exactly the parameters declared by the rule.
  pub fn validate_args(&self, name: RuleName, args: &BTreeMap<String, String>) -> Result<(), RuleError> {
    let rule = self.get(name)?;
    let declared: BTreeSet<&str> = rule.params.iter().map(|p| p.as_str()).collect();
    let given: BTreeSet<&str> = args.keys().map(|k| k.as_str()).collect();

    if declared == given {
      return Ok(());
    }

    Err(RuleError::ArgumentMismatch {
      rule: name,
      missing: declared.difference(&given).map(|s| s.to_string()).collect(),
      unexpected: given.difference(&declared).map(|s| s.to_string()).collect(),
    })
  }
}
