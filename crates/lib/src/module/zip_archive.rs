//! Zip archive of matched files.
//!
//! Emits a single `archive` action writing `<out>/archives/<name>.zip`. The
//! inputs are passed to the archiver as one comma-joined argument, in match
//! order and without deduplication.
//!
//! The action declares no implicit inputs, so the engine only notices a
//! change when the joined input list itself changes, not when the content of
//! an archived file does.

use tracing::debug;

use super::{Module, ModuleContext, ZipArchiveProps, resolve_sources};
use crate::action::BuildAction;
use crate::consts::{ARCHIVE_INPUT_DELIMITER, ARCHIVES_DIR};
use crate::rules::RuleName;
use crate::util::path;

impl Module for ZipArchiveProps {
  fn generate_build_actions(&self, ctx: &mut ModuleContext<'_>) {
    let name = ctx.name().to_string();
    let dir = ctx.dir().to_string();
    let archive_name = format!("{name}.zip");
    let output_path = path::join(&[&ctx.config().base_output_dir, ARCHIVES_DIR, &archive_name]);
    debug!(module = %name, "adding build actions for zip archive module");

    let Some(matches) = resolve_sources(ctx, &self.srcs, &self.srcs_exclude) else {
      return;
    };
    let inputs = matches.concat();

    ctx.build(
      BuildAction::new(RuleName::Archive, format!("Build {name} as zip archive"))
        .with_output(&output_path)
        .with_arg("workDir", &dir)
        .with_arg("outputPath", &output_path)
        .with_arg("inputFiles", inputs.join(ARCHIVE_INPUT_DELIMITER)),
    );
  }
}
