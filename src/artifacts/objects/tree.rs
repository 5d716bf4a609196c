//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files
//! (blobs) and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<octal mode> <name>\0<20-byte-sha1>`
//!
//! Entries are decoded in payload order. The number of entries decoded from
//! one payload is capped by a configurable ceiling so a malformed payload
//! is reported instead of being walked without bound.

use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

/// Default ceiling on the number of entries decoded from a single tree
pub const DEFAULT_MAX_TREE_ENTRIES: usize = 1000;

/// One child of a tree object
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    /// Raw mode bits, e.g. `0o100644` or `0o40000`
    pub mode: u32,
    /// Single path segment, never containing a slash
    pub path: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn entry_mode(&self) -> EntryMode {
        self.mode.into()
    }

    pub fn is_tree(&self) -> bool {
        self.entry_mode().is_tree()
    }
}

impl Packable for TreeEntry {
    fn serialize(&self) -> Result<Bytes> {
        let mut entry_bytes = Vec::new();
        write!(entry_bytes, "{:o} {}", self.mode, self.path)?;
        entry_bytes.push(0);
        entry_bytes.extend_from_slice(&self.oid.to_raw());

        Ok(Bytes::from(entry_bytes))
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:06o} {} {}\t{}",
            self.mode,
            self.entry_mode().object_kind(),
            self.oid,
            self.path
        )
    }
}

/// Decoded tree object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Decode a tree payload (the bytes after the object header)
    ///
    /// Fails with [`Error::MalformedTree`] if an entry cannot be tokenized or
    /// if the payload holds more than `max_entries` entries.
    pub fn decode(payload: &[u8], max_entries: usize) -> Result<Self> {
        let mut entries = Vec::new();
        let mut offset = 0;

        while let Some(null_index) = payload[offset..].iter().position(|&b| b == 0) {
            if entries.len() == max_entries {
                return Err(Error::MalformedTree(format!(
                    "more than {max_entries} entries"
                )));
            }

            let header_end = offset + null_index;
            let (mode, path) = Self::parse_entry_header(&payload[offset..header_end])?;

            let oid_start = header_end + 1;
            let oid = ObjectId::read_raw_from(&payload[oid_start..]).ok_or_else(|| {
                Error::MalformedTree(format!("truncated object id for entry {path:?}"))
            })?;

            tracing::trace!(%path, %oid, "decoded tree entry with mode {mode:o}");
            entries.push(TreeEntry::new(mode, path, oid));
            offset = oid_start + OBJECT_ID_RAW_LENGTH;
        }

        Ok(Self { entries })
    }

    fn parse_entry_header(header: &[u8]) -> Result<(u32, String)> {
        let header = std::str::from_utf8(header)
            .map_err(|_| Error::MalformedTree("entry header is not valid UTF-8".to_string()))?;
        let (mode, path) = header
            .split_once(' ')
            .ok_or_else(|| Error::MalformedTree(format!("missing space in entry {header:?}")))?;

        // Octal digits only, no sign
        if mode.is_empty() || !mode.bytes().all(|b| matches!(b, b'0'..=b'7')) {
            return Err(Error::MalformedTree(format!("invalid octal mode {mode:?}")));
        }
        let mode = u32::from_str_radix(mode, 8)
            .map_err(|_| Error::MalformedTree(format!("invalid octal mode {mode:?}")))?;
        if path.is_empty() {
            return Err(Error::MalformedTree("empty entry path".to_string()));
        }
        if path.contains('/') {
            return Err(Error::MalformedTree(format!("entry path {path:?} contains a slash")));
        }

        Ok((mode, path.to_string()))
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<TreeEntry> for Tree {
    fn from_iter<I: IntoIterator<Item = TreeEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Packable for Tree {
    /// Serialize the entries in their current order, without object header
    fn serialize(&self) -> Result<Bytes> {
        let mut payload = Vec::new();
        for entry in &self.entries {
            payload.extend_from_slice(&entry.serialize()?);
        }

        Ok(Bytes::from(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn blob_oid() -> ObjectId {
        ObjectId::try_parse("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0").unwrap()
    }

    #[fixture]
    fn tree_oid() -> ObjectId {
        ObjectId::try_parse("4b825dc642cb6eb9a060e54bf8d69288fbee4904").unwrap()
    }

    #[test]
    fn empty_payload_decodes_to_empty_tree() {
        let tree = Tree::decode(b"", DEFAULT_MAX_TREE_ENTRIES).unwrap();

        assert!(tree.is_empty());
    }

    #[test]
    fn decodes_single_entry() {
        let mut payload = b"100644 a.txt\0".to_vec();
        payload.extend_from_slice(&[0u8; 20]);

        let tree = Tree::decode(&payload, DEFAULT_MAX_TREE_ENTRIES).unwrap();

        assert_eq!(
            tree.entries(),
            &[TreeEntry::new(
                0o100644,
                "a.txt".to_string(),
                ObjectId::try_parse("00".repeat(20)).unwrap()
            )]
        );
    }

    #[rstest]
    fn decodes_entries_in_payload_order(blob_oid: ObjectId, tree_oid: ObjectId) {
        let entries = vec![
            TreeEntry::new(0o100755, "run.sh".to_string(), blob_oid.clone()),
            TreeEntry::new(0o40000, "docs".to_string(), tree_oid),
            TreeEntry::new(0o100644, "a file.txt".to_string(), blob_oid),
        ];
        let payload = entries.iter().cloned().collect::<Tree>().serialize().unwrap();

        let tree = Tree::decode(&payload, DEFAULT_MAX_TREE_ENTRIES).unwrap();

        assert_eq!(tree.entries(), entries.as_slice());
        assert!(tree.entries()[1].is_tree());
        assert!(!tree.entries()[0].is_tree());
    }

    #[rstest]
    fn directory_mode_serializes_without_leading_zero(tree_oid: ObjectId) {
        let entry = TreeEntry::new(0o40000, "src".to_string(), tree_oid);
        let bytes = entry.serialize().unwrap();

        assert!(bytes.starts_with(b"40000 src\0"));
        assert_eq!(bytes.len(), "40000 src\0".len() + 20);
    }

    #[rstest]
    fn enforces_entry_ceiling(blob_oid: ObjectId) {
        let payload = (0..3)
            .map(|i| TreeEntry::new(0o100644, format!("f{i}"), blob_oid.clone()))
            .collect::<Tree>()
            .serialize()
            .unwrap();

        assert_eq!(Tree::decode(&payload, 3).unwrap().len(), 3);
        assert!(matches!(
            Tree::decode(&payload, 2),
            Err(Error::MalformedTree(_))
        ));
    }

    #[rstest]
    #[case(b"100644a.txt\0".to_vec())]
    #[case(b"10x644 a.txt\0".to_vec())]
    #[case(b"100644 \0".to_vec())]
    #[case(b"100644 a.txt\0\x01\x02".to_vec())]
    #[case([b"100644 a/b\0".as_slice(), &[0u8; 20][..]].concat())]
    #[case([b"+100644 x\0".as_slice(), &[0u8; 20][..]].concat())]
    #[case([b" x\0".as_slice(), &[0u8; 20][..]].concat())]
    fn rejects_malformed_entries(#[case] payload: Vec<u8>) {
        assert!(matches!(
            Tree::decode(&payload, DEFAULT_MAX_TREE_ENTRIES),
            Err(Error::MalformedTree(_))
        ));
    }

    #[rstest]
    fn displays_like_ls_tree(blob_oid: ObjectId, tree_oid: ObjectId) {
        let blob = TreeEntry::new(0o100644, "hello.txt".to_string(), blob_oid);
        let tree = TreeEntry::new(0o40000, "src".to_string(), tree_oid);

        assert_eq!(
            blob.to_string(),
            "100644 blob b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0\thello.txt"
        );
        assert_eq!(
            tree.to_string(),
            "040000 tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\tsrc"
        );
    }
}
