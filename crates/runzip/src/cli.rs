use std::path::PathBuf;

use clap::Parser;

/// Version line: crate version plus the short commit hash and build date
/// captured by the build script. Assembled at compile time so there is no
/// mutable process-level metadata.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("RUNZIP_COMMIT"),
    ", ",
    env!("RUNZIP_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:
  runzip ./archive.zip
  runzip ./archive.tar.gz ./unpacked/";

#[derive(Clone, Debug, Parser)]
#[command(
    name = "runzip",
    version = LONG_VERSION,
    about = "Extract an archive safely and atomically, unwrapping redundant nesting",
    after_help = EXAMPLES
)]
pub struct App {
    /// Archive to extract (zip, tar, tar.gz)
    pub archive: PathBuf,

    /// Destination path; defaults to the current directory. An existing
    /// directory is used as the parent, named after the archive.
    pub destination: Option<PathBuf>,
}
