mod generate;
mod graph;
mod rules;

pub use generate::cmd_generate;
pub use graph::cmd_graph;
pub use rules::cmd_rules;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use modgraph_lib::config::GeneratorConfig;
use modgraph_lib::consts::DEFAULT_MODULES_FILE;
use modgraph_lib::generate::{GenerateReport, Generator};
use modgraph_lib::graph::ActionGraph;
use modgraph_lib::load::load_modules;
use modgraph_lib::rules::RuleSet;
use modgraph_lib::util::path::to_slash;

use crate::output::print_error;

/// Where the workspace and its module definitions live.
#[derive(Debug, Args)]
pub struct WorkspaceArgs {
  /// Module definitions file (default: <root>/modules.json)
  #[arg(short, long)]
  pub modules: Option<PathBuf>,

  /// Workspace root (default: $MODGRAPH_ROOT or the current directory)
  #[arg(short, long)]
  pub root: Option<PathBuf>,

  /// Base output directory, relative to the root (default: $MODGRAPH_OUTPUT_DIR or "out")
  #[arg(short, long = "out-dir")]
  pub out_dir: Option<String>,
}

impl WorkspaceArgs {
  /// Environment config with the flags applied on top, root made absolute.
  pub fn config(&self) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::from_env();
    if let Some(root) = &self.root {
      config = config.with_root(root.clone());
    }
    if let Some(out) = &self.out_dir {
      config = config.with_output_dir(out);
    }
    let root = dunce::canonicalize(&config.root)
      .with_context(|| format!("Workspace root not found: {}", config.root.display()))?;
    Ok(config.with_root(root))
  }

  pub fn modules_path(&self, config: &GeneratorConfig) -> PathBuf {
    match &self.modules {
      Some(path) => path.clone(),
      None => config.root.join(DEFAULT_MODULES_FILE),
    }
  }
}

/// Everything one generation run produced.
pub struct Generation {
  pub config: GeneratorConfig,
  pub modules_path: PathBuf,
  pub graph: ActionGraph,
  pub report: GenerateReport,
}

/// Load the module definitions and run them into a fresh graph.
pub fn run_generation(workspace: &WorkspaceArgs) -> Result<Generation> {
  let config = workspace.config()?;
  let modules_path = workspace.modules_path(&config);
  let modules = load_modules(&modules_path)?;

  let rules = Arc::new(RuleSet::standard().context("Failed to build the standard rule set")?);
  let mut graph = ActionGraph::new(rules.clone());
  let generator = Generator::new(config.clone(), rules);
  let report = generator.generate(&modules, &mut graph);

  Ok(Generation {
    config,
    modules_path,
    graph,
    report,
  })
}

/// Print every module error of a run.
pub fn print_module_errors(report: &GenerateReport) {
  for error in &report.errors {
    print_error(&error.to_string());
  }
}

/// `path` relative to `root` in slash form, or as given when it lies outside.
pub fn relative_to(root: &Path, path: &Path) -> String {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    root.join(path)
  };
  let absolute = dunce::canonicalize(&absolute).unwrap_or(absolute);
  match absolute.strip_prefix(root) {
    Ok(rel) => to_slash(rel),
    Err(_) => absolute.display().to_string(),
  }
}
