//! Git index (staging area) reader
//!
//! The index records a snapshot of tracked paths together with the stat
//! metadata and blob ID they had when staged.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: Tracked files with metadata, in file order
//! - Checksum: SHA-1 hash of the entire index for integrity verification
//!
//! Decoding validates the checksum first, then the header, then walks the
//! entries. Entries are returned in the order they appear in the file; the
//! decoder does not check that they are sorted.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, MIN_INDEX_SIZE};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the index file
    ///
    /// A missing index file is an empty index.
    pub fn load(&self) -> Result<Vec<IndexEntry>> {
        match std::fs::read(self.path()) {
            Ok(data) => Self::decode(&data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path().display(), "no index file, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Decode the bytes of an index file into its entries
    pub fn decode(data: &[u8]) -> Result<Vec<IndexEntry>> {
        if data.len() < MIN_INDEX_SIZE {
            return Err(Error::TruncatedIndex);
        }

        let body = Checksum::verify(data)?;

        let header = IndexHeader::deserialize(&body[..HEADER_SIZE])?;
        header.validate()?;

        let entries = Self::parse_entries(&body[HEADER_SIZE..])?;
        if entries.len() != header.entries_count as usize {
            return Err(Error::EntryCountMismatch {
                expected: header.entries_count,
                actual: entries.len() as u32,
            });
        }

        tracing::debug!(entries = entries.len(), "decoded index");
        Ok(entries)
    }

    /// Walk the entry region, stopping once too few bytes remain for an entry
    fn parse_entries(region: &[u8]) -> Result<Vec<IndexEntry>> {
        let mut entries = Vec::new();
        let mut offset = 0;

        while region.len().saturating_sub(offset) >= ENTRY_MIN_SIZE {
            let entry = IndexEntry::parse_at(&region[offset..], HEADER_SIZE + offset)?;
            tracing::trace!(path = %entry.path, oid = %entry.oid, "decoded index entry");

            offset += entry.encoded_len();
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Encode entries, in the given order, as a complete index file
    pub fn encode(entries: &[IndexEntry]) -> Result<Bytes> {
        let mut data = Vec::new();
        let mut checksum = Checksum::new();

        let count = u32::try_from(entries.len())
            .map_err(|_| Error::TooManyIndexEntries(entries.len()))?;
        let header = IndexHeader::for_entries(count).serialize()?;
        checksum.update(&header);
        data.extend_from_slice(&header);

        for entry in entries {
            let entry_bytes = entry.serialize()?;
            checksum.update(&entry_bytes);
            data.extend_from_slice(&entry_bytes);
        }

        data.extend_from_slice(&checksum.finalize());
        Ok(Bytes::from(data))
    }
}
