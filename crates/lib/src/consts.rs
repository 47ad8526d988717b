pub const APP_NAME: &str = "modgraph";

/// Default base output directory, relative to the workspace root.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Default module definitions file name.
pub const DEFAULT_MODULES_FILE: &str = "modules.json";

/// Default generated build file name.
pub const DEFAULT_BUILD_FILE: &str = "build.ninja";

/// Environment variable overriding the base output directory.
pub const OUTPUT_DIR_ENV: &str = "MODGRAPH_OUTPUT_DIR";

/// Environment variable overriding the workspace root.
pub const ROOT_ENV: &str = "MODGRAPH_ROOT";

/// Suffix identifying test-only Go sources.
pub const TEST_SOURCE_SUFFIX: &str = "_test.go";

/// Dependency manifest consumed by the vendor step.
pub const DEPENDENCY_MANIFEST: &str = "go.mod";

/// Directory produced by the vendor step, inside the module directory.
pub const VENDOR_DIR: &str = "vendor";

/// Delimiter used to join archive inputs into a single argument.
pub const ARCHIVE_INPUT_DELIMITER: &str = ",";

pub const BIN_DIR: &str = "bin";
pub const REPORTS_DIR: &str = "reports";
pub const ARCHIVES_DIR: &str = "archives";

/// Length of truncated graph hashes.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;
