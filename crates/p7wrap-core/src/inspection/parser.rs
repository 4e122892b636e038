//! Parser for the archiver's technical listing (`l -slt`).
//!
//! The report looks like this:
//!
//! ```text
//! 7-Zip (a) 16.02 : Copyright (c) 1999-2016 Igor Pavlov : 2016-05-21
//!
//! Listing archive: data.7z
//!
//! --
//! Path = data.7z
//! Type = 7z
//! Physical Size = 1234
//!
//! ----------
//! Path = docs/readme.txt
//! Size = 42
//!
//! Path = docs
//! Folder = +
//!
//! ```
//!
//! Everything after the last `--` line up to the `----------` line is the
//! archive header. After that, each entry is a block of `key = value` lines
//! closed by a blank line. The final line of the report is a trailing
//! boundary and never part of a block.

use std::collections::HashMap;

use crate::Error;
use crate::Result;
use crate::inspection::manifest::ArchiveEntry;
use crate::inspection::manifest::ArchiveFormat;
use crate::inspection::manifest::ArchiveManifest;
use crate::inspection::timestamp::Timestamp;

/// Line that precedes the archive header.
const HEADER_START: &str = "--";
/// Line that ends the archive header and starts the entry list.
const HEADER_END: &str = "----------";
/// Separator between a field name and its value.
const FIELD_SEPARATOR: &str = " = ";

/// How malformed listing data is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Tolerate damage: malformed lines are skipped, unreadable numbers
    /// become zero, missing sentinels produce an empty header.
    #[default]
    Lenient,
    /// Reject damage with [`Error::Parse`].
    Strict,
}

/// Turns technical-listing text into an [`ArchiveManifest`].
///
/// # Examples
///
/// ```
/// use p7wrap_core::ArchiveFormat;
/// use p7wrap_core::ListingParser;
/// use p7wrap_core::ParseMode;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let text = "--\nPath = a.7z\nType = 7z\nSolid = +\nBlocks = 1\n\n\
///             ----------\nPath = a.txt\nSize = 3\nCRC = 1A2B\n\n";
///
/// let manifest = ListingParser::new(ParseMode::Strict).parse(text)?;
/// assert_eq!(manifest.format, ArchiveFormat::SevenZ);
/// assert!(manifest.solid);
/// assert_eq!(manifest.entries[0].crc, 6699);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingParser {
    mode: ParseMode,
}

/// Parses a technical listing leniently.
///
/// Shorthand for `ListingParser::default().parse(text)`; lenient parsing
/// never fails.
#[must_use]
pub fn parse_listing(text: &str) -> ArchiveManifest {
    ListingParser::default().parse(text).unwrap_or_default()
}

impl ListingParser {
    /// Creates a parser with the given mode.
    #[must_use]
    pub const fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// Returns the parse mode.
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parses the full text of a technical listing.
    ///
    /// # Errors
    ///
    /// Only in [`ParseMode::Strict`]: returns [`Error::Parse`] when a
    /// sentinel is missing, a line is not `key = value`, or a field value
    /// cannot be converted.
    pub fn parse(&self, text: &str) -> Result<ArchiveManifest> {
        let lines = split_lines(text);
        self.assemble(&lines)
    }

    fn assemble(&self, lines: &[&str]) -> Result<ArchiveManifest> {
        let (header, body_start) = self.locate_header(lines)?;
        let header = self.decode_fields(header)?;

        let mut manifest = ArchiveManifest {
            path: text_field(&header, "Path"),
            format: ArchiveFormat::from_tag(header.get("Type").copied().unwrap_or_default()),
            methods: split_methods(header.get("Method").copied().unwrap_or_default()),
            ..ArchiveManifest::default()
        };

        if manifest.format == ArchiveFormat::SevenZ {
            manifest.solid = flag_field(&header, "Solid");
            manifest.blocks = self.number_field(&header, "Blocks")?;
            manifest.physical_size = self.number_field(&header, "Physical Size")?;
            manifest.headers_size = self.number_field(&header, "Headers Size")?;
        }

        if let Some(start) = body_start {
            // The last line is a trailing boundary, never entry data.
            let end = lines.len().saturating_sub(1).max(start);
            manifest.entries = self.decode_entries(&lines[start..end])?;
        }

        tracing::debug!(
            path = %manifest.path,
            format = %manifest.format,
            entries = manifest.entries.len(),
            "parsed archive listing"
        );

        Ok(manifest)
    }

    /// Returns the header lines and the index of the first entry line.
    ///
    /// The entry index is `None` when the `----------` line is missing.
    fn locate_header<'a>(&self, lines: &'a [&'a str]) -> Result<(&'a [&'a str], Option<usize>)> {
        let start = lines.iter().rposition(|l| *l == HEADER_START).map(|i| i + 1);
        let end = lines.iter().position(|l| *l == HEADER_END);

        if self.mode == ParseMode::Strict {
            if start.is_none() {
                return Err(Error::Parse(format!("missing {HEADER_START:?} header line")));
            }
            if end.is_none() {
                return Err(Error::Parse(format!("missing {HEADER_END:?} header line")));
            }
        }

        match end {
            Some(end) => {
                let start = start.unwrap_or(0);
                if start > end {
                    if self.mode == ParseMode::Strict {
                        return Err(Error::Parse("archive header ends before it starts".into()));
                    }
                    tracing::warn!("listing header markers out of order, header ignored");
                    return Ok((&[], Some(end + 1)));
                }
                // The line just above `----------` is the header's closing
                // blank line and is never decoded.
                let header_end = end.saturating_sub(1).max(start);
                Ok((&lines[start..header_end], Some(end + 1)))
            }
            None => {
                tracing::warn!("listing has no {HEADER_END:?} line, header and entries ignored");
                Ok((&[], None))
            }
        }
    }

    fn decode_entries(&self, lines: &[&str]) -> Result<Vec<ArchiveEntry>> {
        let mut entries = Vec::new();
        let mut block_start = 0;

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                if i > block_start {
                    entries.push(self.decode_entry(&lines[block_start..i])?);
                }
                block_start = i + 1;
            }
        }

        if block_start < lines.len() {
            entries.push(self.decode_entry(&lines[block_start..])?);
        }

        Ok(entries)
    }

    fn decode_entry(&self, lines: &[&str]) -> Result<ArchiveEntry> {
        let fields = self.decode_fields(lines)?;

        Ok(ArchiveEntry {
            path: text_field(&fields, "Path"),
            folder: text_field(&fields, "Folder"),
            size: self.number_field(&fields, "Size")?,
            packed_size: self.number_field(&fields, "Packed Size")?,
            modified: self.timestamp_field(&fields, "Modified")?,
            created: self.timestamp_field(&fields, "Created")?,
            accessed: self.timestamp_field(&fields, "Accessed")?,
            attributes: text_field(&fields, "Attributes"),
            crc: self.crc_field(&fields, "CRC")?,
            encrypted: flag_field(&fields, "Encrypted"),
            methods: split_methods(fields.get("Method").copied().unwrap_or_default()),
            block: self.number_field(&fields, "Block")?,
            comment: text_field(&fields, "Comment"),
            host_os: text_field(&fields, "Host OS"),
            version: self.number_field(&fields, "Version")?,
        })
    }

    /// Splits `key = value` lines into a map. Later duplicates win.
    fn decode_fields<'a>(&self, lines: &[&'a str]) -> Result<HashMap<&'a str, &'a str>> {
        let mut fields = HashMap::with_capacity(lines.len());

        for &line in lines.iter().filter(|l| !l.is_empty()) {
            let mut parts = line.split(FIELD_SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => {
                    fields.insert(key, value);
                }
                _ if self.mode == ParseMode::Strict => {
                    return Err(Error::Parse(format!("malformed listing line: {line:?}")));
                }
                _ => tracing::debug!(line = %line, "skipping malformed listing line"),
            }
        }

        Ok(fields)
    }

    fn number_field<T>(&self, fields: &HashMap<&str, &str>, key: &str) -> Result<T>
    where
        T: std::str::FromStr + Default,
    {
        match fields.get(key) {
            None => Ok(T::default()),
            Some(value) if value.is_empty() => Ok(T::default()),
            Some(value) => match value.parse() {
                Ok(n) => Ok(n),
                Err(_) if self.mode == ParseMode::Strict => {
                    Err(Error::Parse(format!("field {key:?} is not a number: {value:?}")))
                }
                Err(_) => Ok(T::default()),
            },
        }
    }

    fn crc_field(&self, fields: &HashMap<&str, &str>, key: &str) -> Result<u32> {
        match fields.get(key) {
            None => Ok(0),
            // Directories carry an empty CRC.
            Some(value) if value.is_empty() => Ok(0),
            Some(value) => match u32::from_str_radix(value, 16) {
                Ok(crc) => Ok(crc),
                Err(_) if self.mode == ParseMode::Strict => {
                    Err(Error::Parse(format!("field {key:?} is not hexadecimal: {value:?}")))
                }
                Err(_) => Ok(0),
            },
        }
    }

    fn timestamp_field(
        &self,
        fields: &HashMap<&str, &str>,
        key: &str,
    ) -> Result<Option<Timestamp>> {
        let value = fields.get(key).copied().unwrap_or_default();
        match self.mode {
            ParseMode::Lenient => Ok(Timestamp::parse_lenient(value)),
            ParseMode::Strict => Timestamp::parse_strict(value),
        }
    }
}

/// Splits on `\n`, keeping a trailing empty line, and drops `\r`.
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

fn text_field(fields: &HashMap<&str, &str>, key: &str) -> String {
    fields.get(key).copied().unwrap_or_default().to_string()
}

fn flag_field(fields: &HashMap<&str, &str>, key: &str) -> bool {
    fields.get(key).is_some_and(|v| *v == "+")
}

fn split_methods(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(' ').map(str::to_string).collect()
}
