use crate::artifacts::index::CHECKSUM_SIZE;
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};

/// Running SHA-1 over the bytes of an index file
#[derive(Debug, Clone, Default)]
pub struct Checksum {
    digest: Sha1,
}

impl Checksum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    pub fn finalize(self) -> [u8; CHECKSUM_SIZE] {
        self.digest.finalize().into()
    }

    /// Split `data` into body and trailing checksum and verify the trailer
    ///
    /// Returns the body on success. `data` must be at least
    /// [`CHECKSUM_SIZE`] bytes long.
    pub fn verify(data: &[u8]) -> Result<&[u8]> {
        let split = data
            .len()
            .checked_sub(CHECKSUM_SIZE)
            .ok_or(Error::TruncatedIndex)?;
        let (body, expected_checksum) = data.split_at(split);

        let mut checksum = Self::new();
        checksum.update(body);

        if checksum.finalize().as_slice() != expected_checksum {
            return Err(Error::ChecksumMismatch);
        }

        Ok(body)
    }
}
