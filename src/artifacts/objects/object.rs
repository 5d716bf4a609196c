use crate::errors::Result;
use bytes::Bytes;

/// Types with a fixed binary wire representation
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Types that can be decoded from the front of a byte slice
pub trait Unpackable {
    fn deserialize(bytes: &[u8]) -> Result<Self>
    where
        Self: Sized;
}
