//! Shared utilities.
//!
//! Common utilities used across the crate including hashing, path joining and
//! test helpers.

pub mod hash;
pub mod path;

#[cfg(test)]
pub mod testutil;
