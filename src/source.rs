//! Where the raw bytes come from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::decoder::PcmDecoder;
use crate::error::{LoadError, SourceError};
use crate::wav::inspect_header;
use crate::PcmSpecs;

/// Location of the audio file relative to the asset directory.
pub const DEFAULT_ASSET_PATH: &str = "Audios/myfile.wav";

/// Provides the complete bytes of an audio file.
pub trait ByteSource {
    fn read_bytes(&self) -> Result<Vec<u8>, SourceError>;
}

/// Reads the audio file from the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<assets_dir>/Audios/myfile.wav`
    pub fn in_assets(assets_dir: impl AsRef<Path>) -> Self {
        Self::new(assets_dir.as_ref().join(DEFAULT_ASSET_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read_bytes(&self) -> Result<Vec<u8>, SourceError> {
        log::debug!("reading audio file {}", self.path.display());
        fs::read(&self.path).map_err(|source| SourceError::SourceUnavailable {
            path: self.path.clone(),
            source,
        })
    }
}

impl ByteSource for [u8] {
    fn read_bytes(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.to_vec())
    }
}

impl ByteSource for Vec<u8> {
    fn read_bytes(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.clone())
    }
}

/// Reads the bytes from `source` and decodes them.
///
/// The header is inspected only to warn when the file does not look like what `decoder`
/// assumes. Decoding does not depend on it.
pub fn load_samples<S>(source: &S, decoder: &PcmDecoder) -> Result<Vec<f32>, LoadError>
where
    S: ByteSource + ?Sized,
{
    let raw = source.read_bytes()?;

    match inspect_header(&raw) {
        Ok(format) => {
            if !format.matches(&PcmSpecs::ASSUMED) {
                log::warn!(
                    "declared format {:?} differs from the assumed {:?}",
                    format,
                    PcmSpecs::ASSUMED
                );
            }
            if let Some(offset) = format.data_offset {
                if offset != decoder.header_offset() {
                    log::warn!(
                        "data chunk starts at byte {} but decoding starts at byte {}",
                        offset,
                        decoder.header_offset()
                    );
                }
            }
        }
        Err(e) => log::warn!("could not inspect the header: {}", e),
    }

    Ok(decoder.decode(&raw)?)
}
