//! modgraph-lib: Core types and logic for modgraph
//!
//! This crate turns declared modules into a build-action graph:
//! - `resolve`: glob patterns with exclusions, recorded as generation dependencies
//! - `classify`: splits matched sources into build and test inputs
//! - `module`: drivers for Go tested binaries and zip archives
//! - `rules`: the fixed rule templates actions bind to
//! - `graph`: the action sink and its in-memory implementation
//! - `ninja`: writes a graph as a ninja build file

pub mod action;
pub mod classify;
pub mod config;
pub mod consts;
pub mod generate;
pub mod graph;
pub mod load;
pub mod module;
pub mod ninja;
pub mod placeholder;
pub mod resolve;
pub mod rules;
pub mod util;
