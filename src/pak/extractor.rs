use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::archive::{PakArchive, PakEntry};

/// Outcome of extracting a whole archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Entries written as new files.
    pub written: usize,
    /// Entries skipped because their destination already existed.
    pub skipped: usize,
}

/// Writes archive entries out as files under a root directory.
///
/// Existing files are never overwritten. When an archive holds the same name
/// twice, the first entry wins and later ones are skipped.
pub struct PakExtractor {
    root: PathBuf,
}

impl PakExtractor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Destination of `name` under the root.
    ///
    /// Returns `None` when the name has no normal components, so it refers to
    /// the root itself. The root always counts as an existing destination.
    ///
    /// # Errors
    ///
    /// Rejects names that are absolute or contain `..`.
    pub fn output_path(&self, name: &str) -> Result<Option<PathBuf>> {
        let relative = Path::new(name);
        let mut has_normal = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => has_normal = true,
                Component::CurDir => {}
                _ => {
                    return Err(Error::UnsafeName {
                        name: name.to_string(),
                    });
                }
            }
        }
        Ok(has_normal.then(|| self.root.join(relative)))
    }

    /// Extract every entry in archive order.
    ///
    /// All names are checked before the first file is written, so an unsafe
    /// name leaves the output root untouched.
    pub async fn extract(&self, archive: &PakArchive) -> Result<ExtractSummary> {
        let destinations = archive
            .iter()
            .map(|entry| self.output_path(&entry.name))
            .collect::<Result<Vec<_>>>()?;

        let mut summary = ExtractSummary::default();
        for (entry, destination) in archive.iter().zip(destinations) {
            if self.write_entry(entry, destination).await? {
                summary.written += 1;
            } else {
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }

    /// Extract one entry. Returns `false` if the destination already existed.
    pub async fn extract_entry(&self, entry: &PakEntry) -> Result<bool> {
        let destination = self.output_path(&entry.name)?;
        self.write_entry(entry, destination).await
    }

    async fn write_entry(&self, entry: &PakEntry, destination: Option<PathBuf>) -> Result<bool> {
        let Some(output_path) = destination else {
            warn!("Skipping: {:?} (names the output root)", entry.name);
            return Ok(false);
        };

        if fs::symlink_metadata(&output_path).await.is_ok() {
            warn!("Skipping: {} (file exists)", entry.name);
            return Ok(false);
        }

        // Create parent directories if needed
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dirs(parent).await?;
            }
        }

        info!("  extracting: {}", entry.name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&output_path)
            .await?;
        file.write_all(&entry.data).await?;
        file.flush().await?;

        debug!("wrote {} bytes to {}", entry.size(), output_path.display());
        Ok(true)
    }
}

async fn create_dirs(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o770);
    builder.create(path).await?;
    Ok(())
}
