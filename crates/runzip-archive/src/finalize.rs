use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Move staged content into its final resting place.
///
/// With zero or several top-level entries the staging root is renamed
/// onto `requested_dest` as a whole. With exactly one entry the redundant
/// nesting level is unwrapped: a lone file (or, under `use_inner_name`, a
/// lone directory) takes the place of `requested_dest` under its own
/// name, while a lone directory extracted to an explicitly named
/// destination lands inside it.
///
/// Renames are atomic only within one filesystem volume; a cross-volume
/// rename surfaces as an error and leaves the staging root where it was.
/// Returns the final destination path.
pub fn finalize(
    staging_root: &Path,
    requested_dest: &Path,
    top_level: &[String],
    use_inner_name: bool,
) -> Result<PathBuf> {
    if top_level.len() != 1 {
        debug!(
            entries = top_level.len(),
            dest = %requested_dest.display(),
            "moving staging root as a whole"
        );
        rename(staging_root, requested_dest)?;
        return Ok(requested_dest.to_path_buf());
    }

    let name = top_level[0].as_str();
    let staged = staging_root.join(name);
    let staged_meta = fs::metadata(&staged).map_err(|e| Error::Finalize {
        from: staged.clone(),
        to: requested_dest.to_path_buf(),
        source: e,
    })?;

    let final_path = if use_inner_name || !staged_meta.is_dir() {
        // The entry's own name replaces the destination's.
        match requested_dest.parent() {
            Some(parent) => parent.join(name),
            None => requested_dest.join(name),
        }
    } else {
        requested_dest.join(name)
    };

    debug!(from = %staged.display(), to = %final_path.display(), "unwrapping single entry");

    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::DirCreate {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    rename(&staged, &final_path)?;

    // The staging root should be empty now. If the user's file browser
    // dropped something in it (.DS_Store, thumbs.db, files of their own)
    // the removal fails and the leftovers stay put; never an error.
    let _ = fs::remove_dir(staging_root);

    Ok(final_path)
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| Error::Finalize {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })
}
