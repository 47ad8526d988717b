//! Generate command integration tests.

use predicates::prelude::*;

use super::common::{SERVER_MODULES, TestEnv, archive_env};

#[test]
fn generate_archive_build_file() {
  let env = archive_env();

  env.modgraph_cmd("generate").assert().success();

  let ninja = env.read_build_file();
  assert!(ninja.contains("rule archive\n  command = cd ${workDir} && zip ${outputPath} -j ${inputFiles}\n"));
  assert!(ninja.contains("build out/archives/test-archive.zip: archive\n"));
  assert!(ninja.contains("  inputFiles = test3.txt,test1/test11/test1.txt,test2/test2.txt\n"));
  assert!(ninja.contains("default out/archives/test-archive.zip\n"));
}

#[test]
fn generate_binary_with_vendor() {
  let env = TestEnv::with_modules(SERVER_MODULES);
  env.write_file("server/go.mod", "module example.com/server\n");
  env.write_file("server/main.go", "package main\n");
  env.write_file("server/main_test.go", "package main\n");

  env.modgraph_cmd("generate").assert().success();

  let ninja = env.read_build_file();
  assert!(ninja.contains("build server/vendor: vendor | server/go.mod\n"));
  assert!(ninja.contains("build out/bin/server: build | server/main.go server/vendor\n"));
  assert!(ninja.contains("build out/reports/server.txt: test | server/main.go server/main_test.go\n"));
  // The optional vendor step is not a default target.
  assert!(ninja.contains("default out/bin/server out/reports/server.txt\n"));
}

#[test]
fn generate_emits_regeneration_rule() {
  let env = archive_env();

  env.modgraph_cmd("generate").assert().success();

  let ninja = env.read_build_file();
  assert!(ninja.contains("rule regenerate\n"));
  assert!(ninja.contains("  generator = 1\n"));
  let regen_line = ninja
    .lines()
    .find(|l| l.starts_with("build build.ninja: regenerate"))
    .unwrap();
  assert!(regen_line.contains("modules.json"));
  assert!(regen_line.contains("test1/test11/test1.txt"));
  assert!(regen_line.contains("test1/test11 "));
}

#[test]
fn generate_respects_output_dir_flag_and_env() {
  let env = archive_env();

  env.modgraph_cmd("generate").args(["--out-dir", "dist"]).assert().success();
  assert!(env.read_build_file().contains("build dist/archives/test-archive.zip: archive\n"));

  env
    .modgraph_cmd("generate")
    .env("MODGRAPH_OUTPUT_DIR", "env-out")
    .assert()
    .success();
  assert!(env.read_build_file().contains("build env-out/archives/test-archive.zip: archive\n"));
}

#[test]
fn generate_writes_successful_modules_and_fails() {
  let env = TestEnv::with_modules(
    r#"{
      "modules": [
        { "type": "zip_archive", "name": "good", "srcs": ["*.txt"] },
        { "type": "zip_archive", "name": "bad", "srcs": ["*.txt", "[oops"] }
      ]
    }"#,
  );
  env.write_file("a.txt", "a");

  env
    .modgraph_cmd("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains("module 'bad'"))
    .stderr(predicate::str::contains("[oops"));

  let ninja = env.read_build_file();
  assert!(ninja.contains("build out/archives/good.zip: archive\n"));
  assert!(!ninja.contains("bad.zip"));
}

#[test]
fn generate_is_idempotent() {
  let env = archive_env();

  env.modgraph_cmd("generate").assert().success();
  let first = env.read_build_file();
  env.modgraph_cmd("generate").assert().success();

  assert_eq!(first, env.read_build_file());
}

#[test]
fn generate_rejects_invalid_module_file() {
  let env = TestEnv::with_modules(r#"{ "modules": [ { "type": "cc_binary", "name": "x" } ] }"#);

  env
    .modgraph_cmd("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse module file"));
}
