//! Error types for PAK archive operations.

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of an [`Error`].
///
/// Callers that only care about the category of a failure (for example to
/// pick an exit code) can match on this instead of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed header, magic tag or entry name.
    Format,
    /// A directory or entry region lies outside the buffer.
    Bounds,
    /// An entry name does not fit the fixed-width name field.
    Encoding,
    /// The serialized archive exceeds the addressable range of the format.
    Limit,
    /// An import source path is too long to be stored as an entry name.
    PathLength,
    /// A file read during import produced no bytes.
    EmptyRead,
    /// Underlying filesystem failure.
    Io,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("PAK data is empty")]
    Empty,

    #[error("Size of data isn't big enough to fit the PAK header ({len} < 12)")]
    TooShort { len: usize },

    #[error("PAK data is invalid ('{found}' != 'PACK')")]
    BadMagic { found: String },

    #[error("PAK entry {index} has a name that is not valid UTF-8")]
    BadName {
        index: usize,
        #[source]
        source: Utf8Error,
    },

    #[error("PAK entry name '{name}' escapes the output directory")]
    UnsafeName { name: String },

    #[error("PAK directory out of range! ({offset}+{size} > {len})")]
    DirectoryOutOfBounds { offset: u64, size: u64, len: usize },

    #[error("PAK entry {index} out of range! ({offset}+{size} > {len})")]
    EntryOutOfBounds {
        index: usize,
        offset: u64,
        size: u64,
        len: usize,
    },

    #[error("Entry name '{name}' is {len} bytes long, the PAK format allows at most 55")]
    NameTooLong { name: String, len: usize },

    #[error("Entry name {name:?} contains a null byte")]
    NameContainsNul { name: String },

    #[error("Directory offset position (total file size + 12) is too far for PAK format ({offset} > 2147483647)")]
    DirectoryTooFar { offset: u64 },

    #[error("Directory size is too large for PAK format ({size} > 2147483647)")]
    DirectoryTooLarge { size: u64 },

    #[error("File path {path} is longer than 55 bytes ({len})")]
    PathTooLong { path: String, len: usize },

    #[error("File path {} cannot be stored as a UTF-8 entry name", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Couldn't read the file {path}")]
    EmptyRead { path: String },

    #[error("Folder path '{}' does not point to a valid folder!", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Empty
            | Error::TooShort { .. }
            | Error::BadMagic { .. }
            | Error::BadName { .. }
            | Error::UnsafeName { .. } => ErrorKind::Format,
            Error::DirectoryOutOfBounds { .. } | Error::EntryOutOfBounds { .. } => {
                ErrorKind::Bounds
            }
            Error::NameTooLong { .. } | Error::NameContainsNul { .. } | Error::NonUtf8Path(_) => {
                ErrorKind::Encoding
            }
            Error::DirectoryTooFar { .. } | Error::DirectoryTooLarge { .. } => ErrorKind::Limit,
            Error::PathTooLong { .. } => ErrorKind::PathLength,
            Error::EmptyRead { .. } => ErrorKind::EmptyRead,
            Error::NotADirectory(_) | Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}
