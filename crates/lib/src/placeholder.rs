//! Placeholder parsing and substitution for rule templates.
//!
//! Rule commands and descriptions are templates with named parameters that
//! are bound per action. The syntax is the one the build engine understands,
//! so templates can be rendered into the build file unchanged.
//!
//! # Placeholder Formats
//!
//! - `$name` - parameter `name`; the name runs over `[A-Za-z0-9_-]`
//! - `${name}` - parameter `name`; the braced form also allows `.`
//!
//! # Escaping
//!
//! `$$` produces a literal `$`. Any other `$` that does not start a
//! parameter is rejected.
//!
//! # Example
//!
//! ```
//! use modgraph_lib::placeholder::{parse, Segment};
//!
//! let segments = parse("cd $workDir && go mod vendor").unwrap();
//! assert_eq!(segments, vec![
//!     Segment::Literal("cd ".to_string()),
//!     Segment::Param("workDir".to_string()),
//!     Segment::Literal(" && go mod vendor".to_string()),
//! ]);
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

/// A segment of parsed template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no placeholders)
  Literal(String),

  /// A named parameter to be bound
  Param(String),
}

/// Errors that can occur during placeholder parsing or resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  #[error("empty placeholder name at position {0}")]
  EmptyName(usize),

  #[error("invalid character in placeholder name: '{0}'")]
  InvalidName(String),

  #[error("stray '$' at position {0}")]
  Stray(usize),

  #[error("unresolved parameter: {0}")]
  Unresolved(String),
}

fn is_simple_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_braced_name_char(c: char) -> bool {
  is_simple_name_char(c) || c == '.'
}

/// Parse a template string into segments.
///
/// # Errors
///
/// Returns an error for an unclosed `${`, an empty name, an invalid character
/// inside braces, or a `$` that starts neither a parameter nor an escape.
pub fn parse(input: &str) -> Result<Vec<Segment>, PlaceholderError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '$' {
      literal.push(ch);
      continue;
    }

    match chars.peek() {
      Some((_, '$')) => {
        chars.next();
        literal.push('$');
      }
      Some((_, '{')) => {
        chars.next();

        let mut name = String::new();
        let mut found_close = false;
        for (_, c) in chars.by_ref() {
          if c == '}' {
            found_close = true;
            break;
          }
          name.push(c);
        }

        if !found_close {
          return Err(PlaceholderError::Unclosed(pos));
        }
        if name.is_empty() {
          return Err(PlaceholderError::EmptyName(pos));
        }
        if !name.chars().all(is_braced_name_char) {
          return Err(PlaceholderError::InvalidName(name));
        }

        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Param(name));
      }
      Some((_, c)) if is_simple_name_char(*c) => {
        let mut name = String::new();
        while let Some((_, c)) = chars.peek() {
          if !is_simple_name_char(*c) {
            break;
          }
          name.push(*c);
          chars.next();
        }

        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Param(name));
      }
      _ => return Err(PlaceholderError::Stray(pos)),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Names of all parameters referenced by the segments, in order of first use.
pub fn params(segments: &[Segment]) -> Vec<&str> {
  let mut names: Vec<&str> = Vec::new();
  for segment in segments {
    if let Segment::Param(name) = segment
      && !names.contains(&name.as_str())
    {
      names.push(name);
    }
  }
  names
}

/// Bind every parameter in `segments` to its value in `args`.
///
/// # Errors
///
/// Returns [`PlaceholderError::Unresolved`] for the first parameter missing
/// from `args`. Values are inserted as-is and never reparsed.
pub fn substitute_segments(segments: &[Segment], args: &BTreeMap<String, String>) -> Result<String, PlaceholderError> {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Param(name) => {
        let value = args
          .get(name)
          .ok_or_else(|| PlaceholderError::Unresolved(name.to_string()))?;
        result.push_str(value);
      }
    }
  }

  Ok(result)
}

/// Render segments back into engine syntax, using the braced form for every
/// parameter and re-escaping literal `$`.
pub fn render(segments: &[Segment]) -> String {
  let mut result = String::new();

  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(&s.replace('$', "$$")),
      Segment::Param(name) => {
        result.push_str("${");
        result.push_str(name);
        result.push('}');
      }
    }
  }

  result
}
