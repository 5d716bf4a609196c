//! Index entry representation
//!
//! Each entry in the index represents a tracked file with:
//! - File path
//! - Content hash (object ID)
//! - File metadata (mode, size, timestamps)
//!
//! ## Entry Format
//!
//! ```text
//! 10 x u32   ctime_s, ctime_n, mtime_s, mtime_n, dev, ino, mode, uid, gid, size
//! 20 bytes   object id
//! u16        flags
//! variable   path, NUL-terminated and padded with NULs to a multiple of 8
//! ```

use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Size of the fixed-width fields preceding the path
pub const ENTRY_FIXED_SIZE: usize = 62;

/// Minimum size of an index entry: fixed fields plus the path terminator
pub const ENTRY_MIN_SIZE: usize = ENTRY_FIXED_SIZE + 1;

/// Largest path length representable in the flags field
const MAX_NAME_LENGTH: u16 = 0x0fff;

/// Index entry representing a tracked file
///
/// Holds the file path, content hash, and the stat metadata recorded when
/// the file was staged. Entries are immutable once decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Change time (seconds since Unix epoch)
    pub ctime_sec: u32,
    /// Change time nanoseconds
    pub ctime_nsec: u32,
    /// Modification time (seconds since Unix epoch)
    pub mtime_sec: u32,
    /// Modification time nanoseconds
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    /// File mode (type and permission bits)
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    /// File size in bytes (truncated to 32 bits)
    pub size: u32,
    /// SHA-1 hash of the staged blob
    pub oid: ObjectId,
    /// Stage in bits 12-13, path length in the low 12 bits
    pub flags: u16,
    /// File path relative to repository root
    pub path: String,
}

impl IndexEntry {
    /// Merge stage (0 for a normal entry, 1-3 during a conflicted merge)
    pub fn stage(&self) -> u16 {
        (self.flags >> 12) & 0b11
    }

    /// Path length recorded in the flags, saturated at 0xfff
    pub fn name_length(&self) -> u16 {
        self.flags & MAX_NAME_LENGTH
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.mode.into()
    }

    /// Flags value for a stage-0 entry with the given path
    pub fn flags_for_path(path: &str) -> u16 {
        path.len().min(MAX_NAME_LENGTH as usize) as u16
    }

    /// Number of bytes this entry occupies in the index, padding included
    pub fn encoded_len(&self) -> usize {
        Self::padded_len(self.path.len())
    }

    fn padded_len(path_len: usize) -> usize {
        (ENTRY_FIXED_SIZE + path_len + ENTRY_BLOCK) / ENTRY_BLOCK * ENTRY_BLOCK
    }

    /// Decode the entry starting at the front of `bytes`
    ///
    /// `offset` is the position of `bytes` within the index file and is only
    /// used for error reporting.
    pub fn parse_at(bytes: &[u8], offset: usize) -> Result<Self> {
        if bytes.len() < ENTRY_MIN_SIZE {
            return Err(Error::TruncatedIndex);
        }

        let field = |i: usize| NetworkEndian::read_u32(&bytes[4 * i..4 * i + 4]);
        let oid = ObjectId::read_raw_from(&bytes[40..40 + OBJECT_ID_RAW_LENGTH])
            .ok_or(Error::TruncatedIndex)?;
        let flags = NetworkEndian::read_u16(&bytes[60..ENTRY_FIXED_SIZE]);

        // Extract the entry path, which is null-terminated
        let path_end = bytes[ENTRY_FIXED_SIZE..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::TruncatedIndex)?;
        let path = std::str::from_utf8(&bytes[ENTRY_FIXED_SIZE..ENTRY_FIXED_SIZE + path_end])
            .map_err(|_| Error::MalformedIndexEntry {
                offset,
                reason: "path is not valid UTF-8".to_string(),
            })?
            .to_string();

        Ok(IndexEntry {
            ctime_sec: field(0),
            ctime_nsec: field(1),
            mtime_sec: field(2),
            mtime_nsec: field(3),
            dev: field(4),
            ino: field(5),
            mode: field(6),
            uid: field(7),
            gid: field(8),
            size: field(9),
            oid,
            flags,
            path,
        })
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Result<Bytes> {
        // A NUL inside the path would end it early when read back
        if self.path.contains('\0') {
            return Err(Error::InvalidIndexPath(self.path.clone()));
        }

        let mut entry_bytes = Vec::with_capacity(self.encoded_len());
        for field in [
            self.ctime_sec,
            self.ctime_nsec,
            self.mtime_sec,
            self.mtime_nsec,
            self.dev,
            self.ino,
            self.mode,
            self.uid,
            self.gid,
            self.size,
        ] {
            entry_bytes.write_u32::<NetworkEndian>(field)?;
        }
        entry_bytes.extend_from_slice(&self.oid.to_raw());
        entry_bytes.write_u16::<NetworkEndian>(self.flags)?;
        entry_bytes.extend_from_slice(self.path.as_bytes());

        // There must be at least one null byte at the end
        entry_bytes.resize(self.encoded_len(), 0);

        Ok(Bytes::from(entry_bytes))
    }
}
