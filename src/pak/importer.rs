use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::archive::{PakArchive, PakEntry};
use super::structures::MAX_NAME_LEN;

/// What to do with zero-byte files found during import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyFilePolicy {
    /// Treat an empty read as a failure.
    #[default]
    Reject,
    /// Store the file as an empty entry.
    Include,
}

/// Builds archive entries from the regular files under a directory.
///
/// Entry names are paths relative to the directory, joined with `/`. Files are
/// visited in file-name order at every level, so the result does not depend on
/// the order the filesystem returns them in.
#[derive(Debug, Clone, Default)]
pub struct PakImporter {
    empty_files: EmptyFilePolicy,
}

impl PakImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty_files(mut self, policy: EmptyFilePolicy) -> Self {
        self.empty_files = policy;
        self
    }

    /// Read every file under `root` and append it to `archive`.
    ///
    /// Nothing is appended unless the whole directory imports cleanly.
    /// Returns the number of entries added.
    pub async fn import(&self, root: &Path, archive: &mut PakArchive) -> Result<usize> {
        let entries = self.read_entries(root).await?;
        let count = entries.len();
        archive.extend(entries);
        Ok(count)
    }

    /// Read every file under `root` into a list of entries.
    pub async fn read_entries(&self, root: &Path) -> Result<Vec<PakEntry>> {
        let is_dir = fs::metadata(root).await.map(|m| m.is_dir()).unwrap_or(false);
        if !is_dir {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let mut entries = Vec::new();
        for (name, path) in collect_files(root)? {
            let data = fs::read(&path).await?;
            if data.is_empty() && self.empty_files == EmptyFilePolicy::Reject {
                return Err(Error::EmptyRead { path: name });
            }

            debug!("adding {} ({} bytes)", name, data.len());
            entries.push(PakEntry::new(name, data));
        }

        Ok(entries)
    }
}

/// List `(entry name, path)` for every regular file below `root`.
fn collect_files(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let name = entry_name(relative)?;
        if name.len() > MAX_NAME_LEN {
            return Err(Error::PathTooLong {
                len: name.len(),
                path: name,
            });
        }

        files.push((name, path.to_path_buf()));
    }

    Ok(files)
}

/// Join the components of a relative path with forward slashes.
fn entry_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(relative.to_path_buf()))?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}
