use std::io::{Read, Seek};

use crate::error::{Error, Result};

/// Container format, detected from an archive's leading bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar(Codec),
}

/// Compression codec wrapping a tar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    None,
    Gzip,
    Xz,
    Zstd,
}

impl Codec {
    /// Wrap a raw archive reader in the matching decompressor.
    pub fn decoder<R: Read>(self, reader: R) -> Result<Decoder<R>> {
        match self {
            Self::None => Ok(Decoder::Passthrough(reader)),
            Self::Gzip => Ok(Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(
                reader,
            )))),
            #[cfg(feature = "xz")]
            Self::Xz => Ok(Decoder::Xz(Box::new(xz2::read::XzDecoder::new(reader)))),
            #[cfg(not(feature = "xz"))]
            Self::Xz => Err(Error::UnsupportedFormat),
            #[cfg(feature = "zstd")]
            Self::Zstd => {
                // zstd's decoder wants 'static, so box the reader for it
                let reader: Box<dyn Read + Send + Sync> = Box::new(reader);
                let decoder =
                    Box::new(zstd::stream::Decoder::new(reader).map_err(|_| Error::Corrupted)?);
                Ok(Decoder::Zstd(decoder))
            }
            #[cfg(not(feature = "zstd"))]
            Self::Zstd => Err(Error::UnsupportedFormat),
        }
    }
}

/// Decompressing reader over the raw archive bytes.
pub enum Decoder<R> {
    Passthrough(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
    #[cfg(feature = "xz")]
    Xz(Box<xz2::read::XzDecoder<R>>),
    #[cfg(feature = "zstd")]
    Zstd(Box<zstd::stream::Decoder<'static, std::io::BufReader<Box<dyn Read + Send + Sync>>>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
            #[cfg(feature = "xz")]
            Self::Xz(d) => d.read(buf),
            #[cfg(feature = "zstd")]
            Self::Zstd(d) => d.read(buf),
        }
    }
}

pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] => Some(ArchiveFormat::Zip),
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::Tar(Codec::Gzip)),
        [0x28, 0xB5, 0x2F, 0xFD, ..] => Some(ArchiveFormat::Tar(Codec::Zstd)),
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Some(ArchiveFormat::Tar(Codec::Xz)),
        _ => {
            if is_tar_header(data) {
                Some(ArchiveFormat::Tar(Codec::None))
            } else {
                None
            }
        }
    }
}

fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= 512 && data[257..263] == *b"ustar\0"
}

/// Sniff the container format from a seekable reader, rewinding it.
///
/// Reads up to one tar header block; short files simply fail detection.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> Result<Option<ArchiveFormat>> {
    let mut header = [0u8; 512];
    let mut filled = 0;
    while filled < header.len() {
        let n = reader.read(&mut header[filled..]).map_err(Error::Io)?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.rewind().map_err(Error::Io)?;
    Ok(detect_format(&header[..filled]))
}
