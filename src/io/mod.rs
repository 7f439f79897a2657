//! Whole-file access to archives on disk.
//!
//! The codec works on complete in-memory buffers, so archives are read and
//! written in one piece.

use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::pak::{PakArchive, decode, encode};

/// Read the full contents of an archive file.
///
/// A file that yields no bytes is rejected before decoding.
pub async fn read_archive_bytes(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).await?;
    if data.is_empty() {
        return Err(Error::Empty);
    }
    debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Read and decode an archive file.
pub async fn load_archive(path: &Path) -> Result<PakArchive> {
    let data = read_archive_bytes(path).await?;
    decode(&data)
}

/// Encode an archive and write it to `path`, replacing any existing file.
///
/// Nothing is written if encoding fails.
pub async fn store_archive(path: &Path, archive: &PakArchive) -> Result<u64> {
    let data = encode(archive)?;

    let mut file = fs::File::create(path).await?;
    file.write_all(&data).await?;
    file.flush().await?;

    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(data.len() as u64)
}
