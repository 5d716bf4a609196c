use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub marker: [u8; 4],
    pub version: u32,
    pub entries_count: u32,
}

impl IndexHeader {
    pub fn for_entries(entries_count: u32) -> Self {
        IndexHeader::new(*SIGNATURE, VERSION, entries_count)
    }

    /// Reject headers this decoder does not understand
    pub fn validate(&self) -> Result<()> {
        if &self.marker != SIGNATURE {
            return Err(Error::BadSignature(
                String::from_utf8_lossy(&self.marker).into_owned(),
            ));
        }

        if self.version != VERSION {
            return Err(Error::UnsupportedVersion(self.version));
        }

        Ok(())
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> Result<Bytes> {
        // pack!(self.marker, self.version, self.entries_count => "a4N2")
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.extend_from_slice(&self.marker);
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedIndex);
        }

        let mut marker = [0u8; 4];
        marker.copy_from_slice(&bytes[0..4]);
        let version = NetworkEndian::read_u32(&bytes[4..8]);
        let entries_count = NetworkEndian::read_u32(&bytes[8..12]);

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_big_endian_fields() {
        let header = IndexHeader::deserialize(b"DIRC\0\0\0\x02\0\0\x01\x03").unwrap();

        assert_eq!(header, IndexHeader::new(*b"DIRC", 2, 259));
        assert!(header.validate().is_ok());
    }

    #[test]
    fn serializes_to_twelve_bytes() {
        let bytes = IndexHeader::for_entries(3).serialize().unwrap();

        assert_eq!(bytes.as_ref(), b"DIRC\0\0\0\x02\0\0\0\x03");
    }

    #[test]
    fn rejects_unknown_signature() {
        let header = IndexHeader::new(*b"CRID", 2, 0);

        assert!(matches!(header.validate(), Err(Error::BadSignature(s)) if s == "CRID"));
    }

    #[test]
    fn rejects_other_versions() {
        let header = IndexHeader::new(*b"DIRC", 3, 0);

        assert!(matches!(
            header.validate(),
            Err(Error::UnsupportedVersion(3))
        ));
    }
}
