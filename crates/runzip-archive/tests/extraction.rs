use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use runzip_archive::{Error, ExtractPlan, extract, finalize};

/// Build a gzipped tar archive in memory. `None` contents mark a
/// directory entry.
fn tar_gz_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let tar_bytes = tar_bytes(entries);
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&tar_bytes).unwrap();
    encoder.finish().unwrap()
}

fn tar_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        match contents {
            Some(data) => {
                header.set_size(data.len() as u64);
                header.set_mode(0o644);
                builder.append_data(&mut header, path, *data).unwrap();
            }
            None => {
                header.set_entry_type(tar::EntryType::Directory);
                header.set_size(0);
                header.set_mode(0o755);
                builder.append_data(&mut header, path, io::empty()).unwrap();
            }
        }
    }
    builder.into_inner().unwrap()
}

fn zip_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (path, contents) in entries {
        match contents {
            Some(data) => {
                writer.start_file(*path, options).unwrap();
                writer.write_all(data).unwrap();
            }
            None => {
                writer.add_directory(*path, options).unwrap();
            }
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Write archive bytes under the working dir and run the full
/// plan-extract-finalize pipeline against it.
fn run_pipeline(work: &Path, archive_name: &str, bytes: &[u8]) -> runzip_archive::Result<PathBuf> {
    let archive_path = work.join(archive_name);
    fs::write(&archive_path, bytes).unwrap();

    let plan = ExtractPlan::new(&archive_path, Some(work))?;
    plan.create_staging_root()?;
    let top_level = extract(&archive_path, &plan.staging_root)?;
    let final_path = finalize(
        &plan.staging_root,
        &plan.final_dest,
        &top_level,
        plan.use_inner_name,
    )?;
    Ok(final_path)
}

#[test]
fn tar_single_directory_unwraps_into_existing_destination() {
    let work = tempfile::tempdir().unwrap();
    let bytes = tar_gz_bytes(&[
        ("photos/", None),
        ("photos/a.jpg", Some(b"jpeg-a".as_slice())),
        ("photos/b.jpg", Some(b"jpeg-b".as_slice())),
    ]);

    let final_path = run_pipeline(work.path(), "album.tar.gz", &bytes).unwrap();

    assert_eq!(final_path, work.path().join("photos"));
    assert_eq!(fs::read(final_path.join("a.jpg")).unwrap(), b"jpeg-a");
    assert_eq!(fs::read(final_path.join("b.jpg")).unwrap(), b"jpeg-b");
    // No intermediate derived directory survives, staging included.
    assert!(!work.path().join("album.tar").exists());
    assert!(!work.path().join("album.tar.tmp").exists());
}

#[test]
fn zip_single_file_stands_alone() {
    let work = tempfile::tempdir().unwrap();
    let bytes = zip_bytes(&[("report.pdf", Some(b"pdf bytes".as_slice()))]);

    let final_path = run_pipeline(work.path(), "report.zip", &bytes).unwrap();

    assert_eq!(final_path, work.path().join("report.pdf"));
    assert!(final_path.is_file());
    assert_eq!(fs::read(&final_path).unwrap(), b"pdf bytes");
    assert!(!work.path().join("report").exists());
}

#[test]
fn zip_multiple_top_level_entries_move_as_a_unit() {
    let work = tempfile::tempdir().unwrap();
    let bytes = zip_bytes(&[
        ("readme.txt", Some(b"read me".as_slice())),
        ("src/", None),
        ("src/main.rs", Some(b"fn main() {}".as_slice())),
    ]);

    let final_path = run_pipeline(work.path(), "bundle.zip", &bytes).unwrap();

    assert_eq!(final_path, work.path().join("bundle"));
    assert_eq!(fs::read(final_path.join("readme.txt")).unwrap(), b"read me");
    assert!(final_path.join("src/main.rs").is_file());
}

#[test]
fn tar_missing_parent_directories_created_on_demand() {
    let work = tempfile::tempdir().unwrap();
    // No directory records at all, only a deeply nested file.
    let bytes = tar_gz_bytes(&[("a/b/c.txt", Some(b"deep".as_slice()))]);

    let final_path = run_pipeline(work.path(), "deep.tar.gz", &bytes).unwrap();

    // The lone record sits at depth 3, so no top-level name was observed
    // and the staging root moves as a whole.
    assert_eq!(final_path, work.path().join("deep.tar"));
    assert_eq!(fs::read(final_path.join("a/b/c.txt")).unwrap(), b"deep");
}

#[test]
fn zip_traversal_entry_aborts_and_leaves_destination_untouched() {
    let work = tempfile::tempdir().unwrap();
    let bytes = zip_bytes(&[
        ("good.txt", Some(b"fine".as_slice())),
        ("../evil.txt", Some(b"escape".as_slice())),
    ]);
    let archive_path = work.path().join("hostile.zip");
    fs::write(&archive_path, &bytes).unwrap();

    let plan = ExtractPlan::new(&archive_path, Some(work.path())).unwrap();
    plan.create_staging_root().unwrap();
    let err = extract(&archive_path, &plan.staging_root).unwrap_err();

    assert!(matches!(err, Error::Traversal { .. }));
    // The hostile write never happened and the final destination was
    // never populated; only the clearly-named staging path holds the
    // partial output.
    assert!(!work.path().join("evil.txt").exists());
    assert!(!plan.final_dest.exists());
    assert!(plan.staging_root.join("good.txt").is_file());
}

#[test]
fn plain_tar_archives_extract_too() {
    let work = tempfile::tempdir().unwrap();
    let bytes = tar_bytes(&[("notes.txt", Some(b"plain tar".as_slice()))]);

    let final_path = run_pipeline(work.path(), "notes.tar", &bytes).unwrap();

    assert_eq!(final_path, work.path().join("notes.txt"));
    assert_eq!(fs::read(&final_path).unwrap(), b"plain tar");
}

#[test]
fn repeated_directory_records_stay_idempotent_and_unwrap_once() {
    let work = tempfile::tempdir().unwrap();
    let bytes = tar_gz_bytes(&[
        ("photos/", None),
        ("photos/a.jpg", Some(b"jpeg".as_slice())),
        ("photos/", None),
    ]);

    let final_path = run_pipeline(work.path(), "album.tar.gz", &bytes).unwrap();

    assert_eq!(final_path, work.path().join("photos"));
    assert!(final_path.join("a.jpg").is_file());
}

#[test]
fn unrecognized_container_bytes_rejected() {
    let work = tempfile::tempdir().unwrap();
    let archive_path = work.path().join("noise.bin");
    fs::write(&archive_path, [0xDEu8, 0xAD, 0xBE, 0xEF, 0x00, 0x01]).unwrap();

    let staging = work.path().join("noise.tmp");
    fs::create_dir_all(&staging).unwrap();

    assert!(matches!(
        extract(&archive_path, &staging),
        Err(Error::UnsupportedFormat)
    ));
}

#[test]
fn missing_archive_is_an_open_error() {
    let work = tempfile::tempdir().unwrap();
    let staging = work.path().join("gone.tmp");
    fs::create_dir_all(&staging).unwrap();

    assert!(matches!(
        extract(&work.path().join("gone.zip"), &staging),
        Err(Error::Open { .. })
    ));
}
