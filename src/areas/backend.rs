//! Storage backends for the object database
//!
//! The database never touches the filesystem directly. It stores opaque
//! byte blobs addressed by a shard (the first two hex characters of the
//! object ID) and a name inside that shard (the remaining characters).
//!
//! - [`FsBackend`]: the on-disk layout `objects/<shard>/<name>`
//! - [`MemoryBackend`]: an in-memory map, for tests and embedding

use crate::errors::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

pub trait Backend {
    /// Check whether a blob is stored under `shard/name`
    fn contains(&self, shard: &str, name: &str) -> Result<bool>;

    /// Read the blob stored under `shard/name`
    ///
    /// Fails with [`Error::ObjectNotFound`] if nothing is stored there.
    fn get(&self, shard: &str, name: &str) -> Result<Bytes>;

    /// Store a blob under `shard/name`
    ///
    /// The blob must never be observable half-written under its final key.
    fn put(&self, shard: &str, name: &str, data: &[u8]) -> Result<()>;

    /// List the names stored in a shard; a missing shard is empty
    fn list(&self, shard: &str) -> Result<Vec<String>>;
}

/// Filesystem backend rooted at an `objects` directory
#[derive(Debug, Clone)]
pub struct FsBackend {
    path: Box<Path>,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FsBackend {
            path: path.into().into_boxed_path(),
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    fn object_path(&self, shard: &str, name: &str) -> PathBuf {
        self.path.join(shard).join(name)
    }
}

impl Backend for FsBackend {
    fn contains(&self, shard: &str, name: &str) -> Result<bool> {
        Ok(self.object_path(shard, name).try_exists()?)
    }

    fn get(&self, shard: &str, name: &str) -> Result<Bytes> {
        let object_path = self.object_path(shard, name);

        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::ObjectNotFound(format!("{shard}{name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, shard: &str, name: &str, data: &[u8]) -> Result<()> {
        let object_dir = self.path.join(shard);
        std::fs::create_dir_all(&object_dir)?;

        // write to a temp file in the same directory, then rename it into
        // place so the final path only ever holds complete content
        let mut temp_file = tempfile::Builder::new()
            .prefix("tmp-obj-")
            .tempfile_in(&object_dir)?;
        temp_file.write_all(data)?;
        temp_file
            .persist(object_dir.join(name))
            .map_err(|e| Error::Io(e.error))?;

        Ok(())
    }

    fn list(&self, shard: &str) -> Result<Vec<String>> {
        let dir_path = self.path.join(shard);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            // skip leftovers of interrupted writes
            if !file_name.starts_with("tmp-obj-") {
                names.push(file_name.into_owned());
            }
        }

        Ok(names)
    }
}

/// In-memory backend keyed by shard, then name
#[derive(Debug, Default)]
pub struct MemoryBackend {
    shards: RwLock<BTreeMap<String, BTreeMap<String, Bytes>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs stored across all shards
    pub fn len(&self) -> usize {
        self.shards
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for MemoryBackend {
    fn contains(&self, shard: &str, name: &str) -> Result<bool> {
        let shards = self.shards.read().unwrap_or_else(PoisonError::into_inner);

        Ok(shards.get(shard).is_some_and(|names| names.contains_key(name)))
    }

    fn get(&self, shard: &str, name: &str) -> Result<Bytes> {
        let shards = self.shards.read().unwrap_or_else(PoisonError::into_inner);

        shards
            .get(shard)
            .and_then(|names| names.get(name))
            .cloned()
            .ok_or_else(|| Error::ObjectNotFound(format!("{shard}{name}")))
    }

    fn put(&self, shard: &str, name: &str, data: &[u8]) -> Result<()> {
        let mut shards = self.shards.write().unwrap_or_else(PoisonError::into_inner);
        shards
            .entry(shard.to_string())
            .or_default()
            .insert(name.to_string(), Bytes::copy_from_slice(data));

        Ok(())
    }

    fn list(&self, shard: &str) -> Result<Vec<String>> {
        let shards = self.shards.read().unwrap_or_else(PoisonError::into_inner);

        Ok(shards
            .get(shard)
            .map(|names| names.keys().cloned().collect())
            .unwrap_or_default())
    }
}
