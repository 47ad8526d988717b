//! Partitioning of resolved sources into build and test inputs.

use serde::Serialize;

use crate::consts::TEST_SOURCE_SUFFIX;

/// Inputs for the build and test actions of a tested binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedInputs {
  /// Non-test sources, deduplicated, first-seen order.
  pub build_inputs: Vec<String>,
  /// Every match of every pattern, in match order.
  pub test_inputs: Vec<String>,
}

/// Whether `path` is a test-only source.
pub fn is_test_source(path: &str) -> bool {
  path.ends_with(TEST_SOURCE_SUFFIX)
}

/// Partition per-pattern match lists.
///
/// `test_inputs` keeps every match, so a file matched by two patterns is
/// listed twice. `build_inputs` drops test sources and keeps only the first
/// occurrence of each path.
pub fn classify<S: AsRef<str>>(matches_per_pattern: &[Vec<S>]) -> ClassifiedInputs {
  let mut inputs = ClassifiedInputs::default();

  for matches in matches_per_pattern {
    for input in matches {
      let input = input.as_ref();
      inputs.test_inputs.push(input.to_string());

      if !is_test_source(input) && !inputs.build_inputs.iter().any(|seen| seen == input) {
        inputs.build_inputs.push(input.to_string());
      }
    }
  }

  inputs
}
