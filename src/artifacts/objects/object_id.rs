//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes.
//! They identify every object in the store and every index entry's content.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Raw: 20 bytes, as embedded in tree payloads and index entries
//!
//! ## Storage
//!
//! Objects are stored in `objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use crate::errors::{Error, Result};

/// Git object identifier (SHA-1 hash)
///
/// Always holds 40 lower-case hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case hex digits are accepted and normalized to lower case.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidObjectId(id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from its raw 20-byte form
    pub fn from_raw(raw: &[u8; OBJECT_ID_RAW_LENGTH]) -> Self {
        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        Self(hex40)
    }

    /// Read an object ID from the first 20 bytes of a slice
    pub fn read_raw_from(bytes: &[u8]) -> Option<Self> {
        let raw: &[u8; OBJECT_ID_RAW_LENGTH] = bytes.get(..OBJECT_ID_RAW_LENGTH)?.try_into().ok()?;
        Some(Self::from_raw(raw))
    }

    /// Convert to the raw 20-byte form
    pub fn to_raw(&self) -> [u8; OBJECT_ID_RAW_LENGTH] {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        // try_parse guarantees 40 hex characters, so every pair decodes
        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&self.0[2 * i..2 * i + 2], 16).unwrap_or_default();
        }
        raw
    }

    /// Name of the shard directory holding this object
    pub fn shard(&self) -> &str {
        &self.0[..2]
    }

    /// File name of this object inside its shard directory
    pub fn file_name(&self) -> &str {
        &self.0[2..]
    }
}

/// The all-zero id, as written for placeholder index entries
impl Default for ObjectId {
    fn default() -> Self {
        Self::from_raw(&[0u8; OBJECT_ID_RAW_LENGTH])
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const HELLO_OID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

    #[rstest]
    #[case("abc")]
    #[case("zz6fc4c620b67d95f953a5c1c1230aaab5db5a1b0")]
    #[case("g6fc4c620b67d95f953a5c1c1230aaab5db5a1b0")]
    fn rejects_invalid_ids(#[case] id: &str) {
        assert!(matches!(
            ObjectId::try_parse(id),
            Err(Error::InvalidObjectId(_))
        ));
    }

    #[test]
    fn normalizes_upper_case_hex() {
        let oid = ObjectId::try_parse(HELLO_OID.to_ascii_uppercase()).unwrap();
        assert_eq!(oid.as_ref(), HELLO_OID);
    }

    #[test]
    fn raw_form_matches_hex_form() {
        let oid = ObjectId::try_parse(HELLO_OID).unwrap();
        let raw = oid.to_raw();

        assert_eq!(raw[0], 0xb6);
        assert_eq!(raw[19], 0xb0);
        assert_eq!(ObjectId::from_raw(&raw), oid);
    }

    #[test]
    fn read_raw_requires_twenty_bytes() {
        assert_eq!(ObjectId::read_raw_from(&[0u8; 19]), None);
        assert_eq!(
            ObjectId::read_raw_from(&[0u8; 24]).unwrap().as_ref(),
            "00".repeat(20)
        );
    }

    #[test]
    fn splits_into_shard_and_file_name() {
        let oid = ObjectId::try_parse(HELLO_OID).unwrap();

        assert_eq!(oid.shard(), "b6");
        assert_eq!(oid.file_name(), &HELLO_OID[2..]);
    }

    #[test]
    fn default_id_is_all_zeros() {
        let oid = ObjectId::default();

        assert_eq!(oid, ObjectId::try_parse("0".repeat(40)).unwrap());
        assert_eq!(oid.shard(), "00");
        assert_eq!(oid.file_name(), "0".repeat(38));
        assert_eq!(oid.to_raw(), [0u8; 20]);
    }
}
