use std::fmt;

/// A single named blob stored in a PAK archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PakEntry {
    /// Relative path with forward-slash separators.
    pub name: String,
    pub data: Vec<u8>,
}

impl PakEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Display for PakEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry [path = \"{}\", size = {}]", self.name, self.size())
    }
}

/// In-memory PAK archive: an ordered list of entries.
///
/// Order decides the byte layout when the archive is written. Names are not
/// required to be unique; validation happens in the codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PakArchive {
    entries: Vec<PakEntry>,
}

impl PakArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PakEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PakEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PakEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry called `name`. Later duplicates are shadowed.
    pub fn find(&self, name: &str) -> Option<&PakEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Total payload bytes across all entries.
    pub fn data_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size() as u64).sum()
    }

}

impl From<Vec<PakEntry>> for PakArchive {
    fn from(entries: Vec<PakEntry>) -> Self {
        Self { entries }
    }
}

impl Extend<PakEntry> for PakArchive {
    fn extend<T: IntoIterator<Item = PakEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PakArchive {
    type Item = &'a PakEntry;
    type IntoIter = std::slice::Iter<'a, PakEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for PakArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PakFile: {{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f, ",")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "\n}}")
    }
}
