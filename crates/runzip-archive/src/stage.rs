use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where an extraction will stage and finally land.
#[derive(Clone, Debug)]
pub struct ExtractPlan {
    /// Absolute destination the finalize step aims at.
    pub final_dest: PathBuf,
    /// Private staging directory, `<final_dest>.tmp`.
    pub staging_root: PathBuf,
    /// True when `final_dest` was derived from the archive's filename
    /// because the requested destination already existed as a parent.
    pub use_inner_name: bool,
}

impl ExtractPlan {
    /// Plan the destination for extracting `archive_path`.
    ///
    /// `requested` defaults to the current directory. An existing
    /// destination is treated as a parent to extract into: the archive's
    /// base name, last extension stripped, is appended and the inner-name
    /// flag is set. Paths are resolved lexically; nothing is created.
    pub fn new(archive_path: &Path, requested: Option<&Path>) -> Result<Self> {
        let requested = requested.unwrap_or(Path::new("."));
        let mut final_dest = std::path::absolute(requested)?;
        let mut use_inner_name = false;

        if final_dest.exists() {
            use_inner_name = true;
            let name = archive_path
                .file_stem()
                .map(|s| s.to_os_string())
                .unwrap_or_else(|| OsString::from("extracted"));
            final_dest = final_dest.join(name);
        }

        let mut staging = final_dest.clone().into_os_string();
        staging.push(".tmp");

        Ok(Self {
            final_dest,
            staging_root: PathBuf::from(staging),
            use_inner_name,
        })
    }

    /// Create the staging root, idempotently.
    pub fn create_staging_root(&self) -> Result<()> {
        fs::create_dir_all(&self.staging_root).map_err(|e| Error::DirCreate {
            path: self.staging_root.clone(),
            source: e,
        })
    }
}
