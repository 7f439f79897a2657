//! PAK archive decoder.
//!
//! ## Parsing Strategy
//!
//! A PAK file is read front to back:
//! 1. Parse the 12-byte header and check the `PACK` magic
//! 2. Check that the directory described by the header lies inside the buffer
//! 3. Read each 64-byte directory record in order
//! 4. Slice every entry's bytes out of the data section
//!
//! The whole archive must already be in memory; there is no streaming mode.

use crate::error::{Error, Result};

use super::archive::{PakArchive, PakEntry};
use super::structures::{DirectoryRecord, Header};

/// Decoder over a complete in-memory PAK image.
///
/// ## Example
///
/// ```
/// use kpak::{PakArchive, PakEntry, PakParser};
///
/// let mut archive = PakArchive::new();
/// archive.push(PakEntry::new("a.txt", b"hi".to_vec()));
/// let bytes = kpak::encode(&archive)?;
///
/// let parser = PakParser::new(&bytes)?;
/// assert_eq!(parser.entry_count(), 1);
/// assert_eq!(parser.parse()?, archive);
/// # Ok::<(), kpak::Error>(())
/// ```
pub struct PakParser<'a> {
    /// The raw archive bytes
    data: &'a [u8],
    /// Header parsed from the first 12 bytes
    header: Header,
}

impl<'a> PakParser<'a> {
    /// Parse the header and validate the directory bounds.
    ///
    /// # Errors
    ///
    /// Fails if the buffer is too short for a header, the magic tag is not
    /// `PACK`, or the directory extends past the end of the buffer.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = Header::from_bytes(data)?;

        let offset = header.dir_offset as u64;
        let size = header.dir_size as u64;
        if offset + size > data.len() as u64 {
            return Err(Error::DirectoryOutOfBounds {
                offset,
                size,
                len: data.len(),
            });
        }

        Ok(Self { data, header })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn entry_count(&self) -> usize {
        self.header.entry_count()
    }

    /// Read the directory record at `index`.
    ///
    /// `index` must be below [`entry_count`](Self::entry_count).
    pub fn record(&self, index: usize) -> Result<DirectoryRecord> {
        let start = self.header.dir_offset as usize + index * DirectoryRecord::SIZE;
        DirectoryRecord::from_bytes(&self.data[start..start + DirectoryRecord::SIZE])
    }

    /// Turn the record at `index` into an owned entry.
    ///
    /// # Errors
    ///
    /// Fails if the stored name is not UTF-8, or if the entry's data region
    /// is not inside the buffer.
    pub fn entry(&self, index: usize, record: &DirectoryRecord) -> Result<PakEntry> {
        let name = std::str::from_utf8(record.name_bytes())
            .map_err(|source| Error::BadName { index, source })?;

        if record.end() > self.data.len() as u64 {
            return Err(Error::EntryOutOfBounds {
                index,
                offset: record.offset as u64,
                size: record.size as u64,
                len: self.data.len(),
            });
        }

        let start = record.offset as usize;
        let end = start + record.size as usize;
        Ok(PakEntry::new(name, &self.data[start..end]))
    }

    /// Decode the whole archive.
    pub fn parse(&self) -> Result<PakArchive> {
        let mut archive = PakArchive::new();
        for index in 0..self.entry_count() {
            let record = self.record(index)?;
            archive.push(self.entry(index, &record)?);
        }
        Ok(archive)
    }
}

/// Decode a complete PAK image into an archive.
pub fn decode(data: &[u8]) -> Result<PakArchive> {
    PakParser::new(data)?.parse()
}
