use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format")]
    UnsupportedFormat,

    #[error("path traversal detected: entry '{entry}' resolves to '{resolved}'")]
    Traversal { entry: PathBuf, resolved: PathBuf },

    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read archive entry: {source}")]
    Read { source: io::Error },

    #[error("archive is corrupted")]
    Corrupted,

    #[error("failed to create directory '{path}': {source}")]
    DirCreate { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    FileWrite { path: PathBuf, source: io::Error },

    #[error("failed to rename '{from}' to '{to}': {source}")]
    Finalize {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
