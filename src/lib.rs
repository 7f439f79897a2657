//! # kpak
//!
//! A Rust tool for reading, listing and building Quake PAK archives.
//!
//! The core is a pure in-memory codec: [`decode`] turns a complete archive
//! image into a [`PakArchive`], and [`encode`] turns an archive back into
//! bytes. Filesystem helpers build archives from a directory tree
//! ([`PakImporter`]) and write them back out ([`PakExtractor`]).
//!
//! ## Features
//!
//! - Bit-exact PAK header and directory encoding
//! - Bounds checking for the directory and every entry on decode
//! - Name and size limits enforced before anything is written
//! - First-write-wins extraction that never overwrites existing files
//!
//! ## Example
//!
//! ```
//! use kpak::{PakArchive, PakEntry};
//!
//! let mut archive = PakArchive::new();
//! archive.push(PakEntry::new("a.txt", b"hi".to_vec()));
//! archive.push(PakEntry::new("dir/b.bin", vec![0, 1, 2]));
//!
//! let bytes = kpak::encode(&archive)?;
//! assert_eq!(bytes.len(), 12 + 5 + 2 * 64);
//!
//! let decoded = kpak::decode(&bytes)?;
//! assert_eq!(decoded, archive);
//! # Ok::<(), kpak::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod io;
pub mod pak;

pub use cli::Cli;
pub use error::{Error, ErrorKind, Result};
pub use io::{load_archive, read_archive_bytes, store_archive};
pub use pak::{
    EmptyFilePolicy, ExtractSummary, PakArchive, PakEntry, PakExtractor, PakImporter, PakParser,
    PakWriter, decode, encode,
};
