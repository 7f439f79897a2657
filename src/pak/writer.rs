//! PAK archive encoder.
//!
//! The output is laid out as header, then every entry's bytes back to back
//! starting at offset 12, then the directory. The directory offset is only
//! known once all payloads are placed, so records are built in a separate
//! buffer and appended last.

use std::io::Write;

use crate::error::{Error, Result};

use super::archive::PakArchive;
use super::structures::{DirectoryRecord, Header, MAX_ADDRESSABLE};

/// Where each entry's data lands, plus the resulting directory position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Absolute offset of each entry's data, in archive order.
    pub offsets: Vec<u32>,
    /// Offset of the directory, equal to `12 + total data bytes`.
    pub dir_offset: u32,
    /// Size of the directory in bytes.
    pub dir_size: u32,
}

impl Layout {
    /// Place entries of the given sizes one after another.
    ///
    /// # Errors
    ///
    /// Fails with a limit error if the directory offset or size would not fit
    /// a signed 32-bit integer.
    pub fn plan<I>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut offsets = Vec::new();
        let mut cursor = Header::SIZE as u64;

        for size in sizes {
            // Bail early so the running total cannot overflow.
            if cursor > MAX_ADDRESSABLE {
                return Err(Error::DirectoryTooFar { offset: cursor });
            }
            offsets.push(cursor as u32);
            cursor = cursor.saturating_add(size);
        }

        if cursor > MAX_ADDRESSABLE {
            return Err(Error::DirectoryTooFar { offset: cursor });
        }

        let dir_size = offsets.len() as u64 * DirectoryRecord::SIZE as u64;
        if dir_size > MAX_ADDRESSABLE {
            return Err(Error::DirectoryTooLarge { size: dir_size });
        }

        Ok(Self {
            offsets,
            dir_offset: cursor as u32,
            dir_size: dir_size as u32,
        })
    }

    /// Total length of the encoded archive.
    pub fn total_size(&self) -> u64 {
        self.dir_offset as u64 + self.dir_size as u64
    }
}

/// Encoder for a [`PakArchive`].
pub struct PakWriter<'a> {
    archive: &'a PakArchive,
}

impl<'a> PakWriter<'a> {
    pub fn new(archive: &'a PakArchive) -> Self {
        Self { archive }
    }

    /// Build the directory records and the data layout without writing
    /// any payload bytes.
    ///
    /// # Errors
    ///
    /// Fails if an entry name does not fit the name field, or if the archive
    /// would be too large for the format.
    pub fn directory(&self) -> Result<(Layout, Vec<DirectoryRecord>)> {
        let layout = Layout::plan(self.archive.iter().map(|e| e.size() as u64))?;

        let records = self
            .archive
            .iter()
            .zip(&layout.offsets)
            .map(|(entry, &offset)| DirectoryRecord::new(&entry.name, offset, entry.size() as u32))
            .collect::<Result<Vec<_>>>()?;

        Ok((layout, records))
    }

    /// Write the encoded archive to `out`.
    ///
    /// Validation happens before the first byte is written, so a failed call
    /// leaves `out` untouched.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let (layout, records) = self.directory()?;
        self.write_planned(&layout, &records, out)
    }

    /// Encode into a freshly allocated buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (layout, records) = self.directory()?;
        let mut out = Vec::with_capacity(layout.total_size() as usize);
        self.write_planned(&layout, &records, &mut out)?;
        Ok(out)
    }

    fn write_planned<W: Write>(
        &self,
        layout: &Layout,
        records: &[DirectoryRecord],
        out: &mut W,
    ) -> Result<()> {
        let header = Header {
            dir_offset: layout.dir_offset,
            dir_size: layout.dir_size,
        };
        header.write_to(out)?;

        for entry in self.archive {
            out.write_all(&entry.data)?;
        }

        for record in records {
            record.write_to(out)?;
        }

        Ok(())
    }
}

/// Encode an archive into PAK bytes.
pub fn encode(archive: &PakArchive) -> Result<Vec<u8>> {
    PakWriter::new(archive).to_bytes()
}
