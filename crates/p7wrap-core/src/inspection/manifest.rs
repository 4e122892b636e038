//! Archive manifest data structures.

use std::fmt;

use crate::inspection::timestamp::Timestamp;

/// Container format reported by the archiver's `Type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArchiveFormat {
    /// 7z archive.
    SevenZ,
    /// ZIP archive.
    Zip,
    /// Gzip stream.
    Gzip,
    /// XZ stream.
    Xz,
    /// Bzip2 stream.
    Bzip2,
    /// Any other or missing type.
    #[default]
    Unknown,
}

impl ArchiveFormat {
    /// Maps the archiver's `Type` value to a format.
    ///
    /// Matching is exact, as the archiver prints these tags in lowercase.
    ///
    /// # Examples
    ///
    /// ```
    /// use p7wrap_core::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::from_tag("7z"), ArchiveFormat::SevenZ);
    /// assert_eq!(ArchiveFormat::from_tag("rar"), ArchiveFormat::Unknown);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "7z" => Self::SevenZ,
            "zip" => Self::Zip,
            "gzip" => Self::Gzip,
            "xz" => Self::Xz,
            "bzip2" => Self::Bzip2,
            _ => Self::Unknown,
        }
    }

    /// Returns the tag the archiver uses for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SevenZ => "7z",
            Self::Zip => "zip",
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Bzip2 => "bzip2",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container-level metadata plus every entry, in listing order.
///
/// The entry order mirrors the physical layout of the archive; for solid
/// 7z archives consecutive entries share a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Archive path as printed by the archiver.
    pub path: String,

    /// Container format.
    pub format: ArchiveFormat,

    /// Compression methods, e.g. `["LZMA2:24", "BCJ"]`.
    pub methods: Vec<String>,

    /// Whether the archive is solid. Only set for 7z archives.
    pub solid: bool,

    /// Number of compressed blocks (7z only).
    pub blocks: u64,

    /// Size of the archive file in bytes (7z only).
    pub physical_size: u64,

    /// Size of the archive headers in bytes (7z only).
    pub headers_size: u64,

    /// Entries in the order they were listed.
    pub entries: Vec<ArchiveEntry>,
}

impl ArchiveManifest {
    /// Returns the number of entries.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of uncompressed entry sizes, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).fold(0, u64::saturating_add)
    }

    /// Returns the sum of compressed entry sizes, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_packed_size(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| e.packed_size)
            .fold(0, u64::saturating_add)
    }

    /// Returns the entries stored in the given block.
    pub fn entries_in_block(&self, block: u64) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter().filter(move |e| e.block == block)
    }
}

/// Metadata for one file or directory inside an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive.
    pub path: String,

    /// Value of the `Folder` field (`+` for directories in 7z listings).
    pub folder: String,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub packed_size: u64,

    /// Modification time, if recorded.
    pub modified: Option<Timestamp>,

    /// Creation time, if recorded.
    pub created: Option<Timestamp>,

    /// Access time, if recorded.
    pub accessed: Option<Timestamp>,

    /// Platform attribute string, e.g. `A_ -rw-r--r--`.
    pub attributes: String,

    /// CRC-32 of the uncompressed data.
    pub crc: u32,

    /// Whether the entry is encrypted.
    pub encrypted: bool,

    /// Compression methods for this entry.
    pub methods: Vec<String>,

    /// Index of the block holding this entry.
    pub block: u64,

    /// Entry comment.
    pub comment: String,

    /// Operating system that created the entry.
    pub host_os: String,

    /// Format version needed to extract the entry.
    pub version: u32,
}

impl ArchiveEntry {
    /// Returns `true` if the entry describes a directory.
    ///
    /// 7z listings mark directories with `Folder = +`; other formats set a
    /// `D` in the attribute string.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.folder == "+" || self.attributes.starts_with('D')
    }
}
