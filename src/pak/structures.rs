use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

use crate::error::{Error, Result};

/// Largest offset or size the format can address (`i32::MAX`).
pub const MAX_ADDRESSABLE: u64 = i32::MAX as u64;

/// Width of the fixed name field in a directory record, terminator included.
pub const NAME_FIELD_SIZE: usize = 56;

/// Longest entry name that fits the name field next to its terminator.
pub const MAX_NAME_LEN: usize = NAME_FIELD_SIZE - 1;

/// PAK header - 12 bytes at the start of the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub dir_offset: u32,
    pub dir_size: u32,
}

impl Header {
    pub const MAGIC: &'static [u8; 4] = b"PACK";
    pub const SIZE: usize = 12;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Empty);
        }
        if data.len() < Self::SIZE {
            return Err(Error::TooShort { len: data.len() });
        }

        if &data[0..4] != Self::MAGIC {
            return Err(Error::BadMagic {
                found: String::from_utf8_lossy(&data[0..4]).into_owned(),
            });
        }

        let mut cursor = Cursor::new(&data[4..Self::SIZE]);

        Ok(Self {
            dir_offset: cursor.read_u32::<LittleEndian>()?,
            dir_size: cursor.read_u32::<LittleEndian>()?,
        })
    }

    /// Number of whole directory records described by `dir_size`.
    ///
    /// A trailing partial record is ignored.
    pub fn entry_count(&self) -> usize {
        self.dir_size as usize / DirectoryRecord::SIZE
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(Self::MAGIC)?;
        out.write_u32::<LittleEndian>(self.dir_offset)?;
        out.write_u32::<LittleEndian>(self.dir_size)?;
        Ok(())
    }
}

/// Directory record - 64 bytes per entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryRecord {
    pub name: [u8; NAME_FIELD_SIZE],
    pub offset: u32,
    pub size: u32,
}

impl DirectoryRecord {
    pub const SIZE: usize = 64;

    /// Build a record for `name`, rejecting names the field cannot hold.
    pub fn new(name: &str, offset: u32, size: u32) -> Result<Self> {
        Ok(Self {
            name: encode_name(name)?,
            offset,
            size,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut name = [0u8; NAME_FIELD_SIZE];
        name.copy_from_slice(&data[..NAME_FIELD_SIZE]);

        let mut cursor = Cursor::new(&data[NAME_FIELD_SIZE..Self::SIZE]);

        Ok(Self {
            name,
            offset: cursor.read_u32::<LittleEndian>()?,
            size: cursor.read_u32::<LittleEndian>()?,
        })
    }

    /// The stored name, cut at the first null byte.
    pub fn name_bytes(&self) -> &[u8] {
        decode_name(&self.name)
    }

    /// Absolute end of the entry data, computed without overflow.
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.name)?;
        out.write_u32::<LittleEndian>(self.offset)?;
        out.write_u32::<LittleEndian>(self.size)?;
        Ok(())
    }
}

/// Encode `name` into a zero-padded, null-terminated fixed-width field.
pub fn encode_name(name: &str) -> Result<[u8; NAME_FIELD_SIZE]> {
    let bytes = name.as_bytes();
    if bytes.contains(&0) {
        return Err(Error::NameContainsNul {
            name: name.to_string(),
        });
    }
    if bytes.len() > MAX_NAME_LEN {
        return Err(Error::NameTooLong {
            name: name.to_string(),
            len: bytes.len(),
        });
    }

    let mut field = [0u8; NAME_FIELD_SIZE];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

/// Strip the terminator and padding from a fixed-width name field.
///
/// A field without any null byte is taken whole.
pub fn decode_name(field: &[u8]) -> &[u8] {
    match field.iter().position(|&b| b == 0) {
        Some(end) => &field[..end],
        None => field,
    }
}
