use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive-supplied entry path against an extraction root.
///
/// The entry path is untrusted: it may contain `..` segments or be
/// absolute. It is joined to `root` first and only then normalized, so a
/// leading `..` escapes the root and fails the containment check instead
/// of being silently swallowed. `root` must already be absolute and
/// normalized.
///
/// Returns the resolved absolute path when it is equal to or nested under
/// `root`, and a traversal error naming the resolved path otherwise.
pub fn sanitize_entry_path(root: &Path, entry_path: &Path) -> Result<PathBuf> {
    let resolved = normalize_lexically(&root.join(entry_path));

    // Component-wise comparison, so a sibling of `root` whose name merely
    // shares a prefix (`/data/out` vs `/data/outside`) does not pass.
    if resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(Error::Traversal {
            entry: entry_path.to_path_buf(),
            resolved,
        })
    }
}

/// Resolve `.` and `..` structurally, without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                // Popping at the filesystem root is a no-op, like
                // `/..` resolving to `/`.
                result.pop();
            }
            Component::CurDir => {}
            other => result.push(other.as_os_str()),
        }
    }

    result
}
