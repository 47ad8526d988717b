//! Go binary with a test report.
//!
//! Emits up to three actions:
//!
//! 1. `vendor` (only with `vendor_first`, optional): `go mod vendor` in the
//!    module directory, producing `<dir>/vendor` from `<dir>/go.mod`.
//! 2. `build`: `go build` into `<out>/bin/<name>`, depending on every
//!    non-test source and on the vendor directory when present.
//! 3. `test`: `go test` into `<out>/reports/<name>.txt`, depending on every
//!    matched source including tests.

use tracing::debug;

use super::{Module, ModuleContext, TestedBinaryProps, resolve_sources};
use crate::action::BuildAction;
use crate::classify::{ClassifiedInputs, classify};
use crate::consts::{BIN_DIR, DEPENDENCY_MANIFEST, REPORTS_DIR, VENDOR_DIR};
use crate::rules::RuleName;
use crate::util::path;

impl Module for TestedBinaryProps {
  fn generate_build_actions(&self, ctx: &mut ModuleContext<'_>) {
    let name = ctx.name().to_string();
    let dir = ctx.dir().to_string();
    let out = ctx.config().base_output_dir.clone();
    debug!(module = %name, "adding build actions for go binary module");

    let output_path = path::join(&[&out, BIN_DIR, &name]);
    let report_name = format!("{name}.txt");
    let report_path = path::join(&[&out, REPORTS_DIR, &report_name]);

    let Some(matches) = resolve_sources(ctx, &self.srcs, &self.srcs_exclude) else {
      return;
    };
    let ClassifiedInputs {
      mut build_inputs,
      test_inputs,
    } = classify(&matches);

    if self.vendor_first {
      let vendor_path = path::join(&[&dir, VENDOR_DIR]);
      ctx.build(
        BuildAction::new(RuleName::Vendor, format!("Vendor dependencies of {name}"))
          .with_output(&vendor_path)
          .with_implicits(vec![path::join(&[&dir, DEPENDENCY_MANIFEST])])
          .with_arg("workDir", &dir)
          .with_arg("name", &name)
          .optional(),
      );
      build_inputs.push(vendor_path);
    }

    ctx.build(
      BuildAction::new(RuleName::Build, format!("Build {name} as Go binary"))
        .with_output(&output_path)
        .with_implicits(build_inputs)
        .with_arg("outputPath", &output_path)
        .with_arg("workDir", &dir)
        .with_arg("pkg", &self.pkg),
    );

    ctx.build(
      BuildAction::new(RuleName::Test, format!("Build {report_name} as Go test report"))
        .with_output(&report_path)
        .with_implicits(test_inputs)
        .with_arg("outReportPath", &report_path)
        .with_arg("workDir", &dir)
        .with_arg("testPkg", &self.test_pkg),
    );
  }
}
