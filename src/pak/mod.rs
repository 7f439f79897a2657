//! Quake PAK archive reading and writing.
//!
//! ## Architecture
//!
//! - [`structures`]: Binary layout of the header and directory records
//! - [`archive`]: The in-memory archive model
//! - [`parser`]: Decoding raw bytes into an archive
//! - [`writer`]: Encoding an archive back into raw bytes
//! - [`extractor`]: Writing entries out to a directory tree
//! - [`importer`]: Building entries from a directory tree
//!
//! ## PAK Format Overview
//!
//! A PAK file consists of:
//! 1. A 12-byte header: `PACK` magic, directory offset, directory size
//! 2. The raw bytes of every entry, concatenated
//! 3. The directory: one 64-byte record per entry holding a null-padded
//!    56-byte name, the entry's absolute offset and its size
//!
//! All integers are little-endian. Offsets and sizes are limited to the
//! signed 32-bit range.
//!
//! ## Limitations
//!
//! - No compression or encryption
//! - Entry names are at most 55 bytes

mod archive;
mod extractor;
mod importer;
mod parser;
mod structures;
mod writer;

pub use archive::{PakArchive, PakEntry};
pub use extractor::{ExtractSummary, PakExtractor};
pub use importer::{EmptyFilePolicy, PakImporter};
pub use parser::{PakParser, decode};
pub use structures::*;
pub use writer::{Layout, PakWriter, encode};
