//! Slash-separated path helpers.
//!
//! Paths in the action graph are plain strings relative to the workspace
//! root, always using `/`. They are compared as strings, so they must be
//! normalized the same way everywhere they are built.

/// Normalize a slash-separated path lexically.
///
/// Removes empty and `.` components and folds `..` into its parent where
/// possible. An empty result becomes `"."`.
pub fn clean(path: &str) -> String {
  let rooted = path.starts_with('/');
  let mut parts: Vec<&str> = Vec::new();

  for part in path.split('/') {
    match part {
      "" | "." => {}
      ".." => match parts.last() {
        Some(&last) if last != ".." => {
          parts.pop();
        }
        _ if rooted => {}
        _ => parts.push(".."),
      },
      other => parts.push(other),
    }
  }

  let joined = parts.join("/");
  match (rooted, joined.is_empty()) {
    (true, _) => format!("/{joined}"),
    (false, true) => ".".to_string(),
    (false, false) => joined,
  }
}

/// Join path segments with `/` and normalize the result.
///
/// Empty segments are skipped.
pub fn join(segments: &[&str]) -> String {
  let joined = segments
    .iter()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join("/");
  if joined.is_empty() {
    return String::new();
  }
  clean(&joined)
}

/// Convert an OS path relative to the walk root into slash form.
pub fn to_slash(path: &std::path::Path) -> String {
  path
    .components()
    .map(|c| c.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
}
