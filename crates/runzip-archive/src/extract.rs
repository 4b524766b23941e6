use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, Codec, detect_from_reader};
use crate::sanitize::sanitize_entry_path;

/// Extract every entry of the archive at `archive_path` into
/// `staging_root`, returning the names observed at depth 1.
///
/// Entry order is not trusted: a file's parent directories are created on
/// demand whether or not the archive carried directory records for them.
/// Every entry path is sanitized against the staging root before any
/// filesystem mutation; a traversal hit, a read failure, or a filesystem
/// failure aborts the whole pass. `staging_root` must be absolute.
pub fn extract(archive_path: &Path, staging_root: &Path) -> Result<Vec<String>> {
    let mut file = File::open(archive_path).map_err(|e| Error::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    let format = detect_from_reader(&mut file)?.ok_or(Error::UnsupportedFormat)?;
    debug!(?format, archive = %archive_path.display(), "detected container format");

    match format {
        ArchiveFormat::Zip => extract_zip(file, staging_root),
        ArchiveFormat::Tar(codec) => extract_tar(file, codec, staging_root),
    }
}

fn extract_zip(file: File, staging_root: &Path) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(file).map_err(|_| Error::Corrupted)?;
    let mut top_level = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|_| Error::Corrupted)?;

        // The raw stored name goes through the sanitizer, not through
        // zip's own enclosed_name pre-filter, so hostile entries surface
        // as traversal errors instead of being silently dropped.
        let raw_path = PathBuf::from(entry.name());
        let is_dir = entry.is_dir();

        let resolved = sanitize_entry_path(staging_root, &raw_path)?;
        record_top_level(&mut top_level, staging_root, &resolved);

        if is_dir {
            make_dir(&resolved)?;
        } else {
            write_file(&resolved, &mut entry)?;
        }
    }

    Ok(top_level)
}

fn extract_tar(file: File, codec: Codec, staging_root: &Path) -> Result<Vec<String>> {
    let decoder = codec.decoder(BufReader::new(file))?;
    let mut archive = tar::Archive::new(decoder);

    let mut top_level = Vec::new();

    for entry in archive.entries().map_err(|e| Error::Read { source: e })? {
        let mut entry = entry.map_err(|e| Error::Read { source: e })?;

        let raw_path = entry
            .path()
            .map_err(|e| Error::Read { source: e })?
            .into_owned();
        // Entries are classified by the directory flag only; symlink and
        // other special records come out as ordinary (empty) files.
        let is_dir = entry.header().entry_type().is_dir();

        let resolved = sanitize_entry_path(staging_root, &raw_path)?;
        record_top_level(&mut top_level, staging_root, &resolved);

        if is_dir {
            make_dir(&resolved)?;
        } else {
            write_file(&resolved, &mut entry)?;
        }
    }

    Ok(top_level)
}

/// Append the entry's name when it sits at depth 1 under the staging
/// root. Duplicate records keep their first occurrence only, so an
/// archive that lists `foo/` more than once cannot defeat the
/// single-entry check in finalize.
fn record_top_level(names: &mut Vec<String>, staging_root: &Path, resolved: &Path) {
    let Ok(relative) = resolved.strip_prefix(staging_root) else {
        return;
    };

    let mut components = relative.components();
    if let (Some(Component::Normal(first)), None) = (components.next(), components.next()) {
        let name = first.to_string_lossy().into_owned();
        if !names.iter().any(|n| n == &name) {
            debug!(name, "top-level entry");
            names.push(name);
        }
    }
}

fn make_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::DirCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_file<R: Read>(path: &Path, content: &mut R) -> Result<()> {
    if let Some(parent) = path.parent() {
        make_dir(parent)?;
    }

    let mut out = File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    io::copy(content, &mut out).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
