//! Object database
//!
//! Objects are framed, hashed and compressed by the codec, then handed to a
//! [`Backend`] under their sharded location. Writes are idempotent: an object
//! that is already stored is never rewritten, since equal IDs imply equal
//! content. Reads accept abbreviated IDs and resolve them by scanning the
//! single shard the prefix points to.

use crate::areas::backend::{Backend, FsBackend};
use crate::artifacts::core::config::Config;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::codec;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::path::Path;

#[derive(Debug)]
pub struct Database<B: Backend = FsBackend> {
    backend: B,
    max_tree_entries: usize,
}

impl Database<FsBackend> {
    /// Open the on-disk database rooted at an `objects` directory
    pub fn open(objects_path: &Path, config: &Config) -> Self {
        Database::new(FsBackend::new(objects_path), config)
    }
}

impl<B: Backend> Database<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        Database {
            backend,
            max_tree_entries: config.max_tree_entries,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Compute the ID an object would be stored under, without storing it
    pub fn hash(&self, object_type: ObjectType, payload: &[u8]) -> ObjectId {
        codec::frame(object_type, payload).0
    }

    /// Store an object and return its ID
    ///
    /// Storing an object that already exists is a no-op; the existing file
    /// is not re-read or validated.
    pub fn write(&self, object_type: ObjectType, payload: &[u8]) -> Result<ObjectId> {
        let (object_id, framed) = codec::frame(object_type, payload);

        if self.exists(&object_id)? {
            tracing::debug!(oid = %object_id, "object already stored, skipping write");
            return Ok(object_id);
        }

        let compressed = codec::compress(&framed)?;
        self.backend
            .put(object_id.shard(), object_id.file_name(), &compressed)?;
        tracing::debug!(
            oid = %object_id,
            %object_type,
            size = payload.len(),
            "stored object"
        );

        Ok(object_id)
    }

    pub fn exists(&self, object_id: &ObjectId) -> Result<bool> {
        self.backend
            .contains(object_id.shard(), object_id.file_name())
    }

    /// Resolve an abbreviated object ID to the unique full ID it names
    ///
    /// The prefix must be 2 to 40 characters long. Only the shard named by
    /// its first two characters is scanned.
    pub fn resolve(&self, prefix: &str) -> Result<ObjectId> {
        if prefix.len() < 2 || prefix.len() > OBJECT_ID_LENGTH {
            return Err(Error::InvalidPrefix(prefix.to_string()));
        }

        // only hex names are ever stored, so anything else cannot match
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::ObjectNotFound(prefix.to_string()));
        }

        let prefix = prefix.to_ascii_lowercase();
        let (shard, rest) = prefix.split_at(2);
        let candidates = self
            .backend
            .list(shard)?
            .into_iter()
            .filter(|name| name.starts_with(rest))
            .collect::<Vec<_>>();

        match candidates.as_slice() {
            [] => Err(Error::ObjectNotFound(prefix)),
            [name] => {
                let object_id = ObjectId::try_parse(format!("{shard}{name}"))?;
                tracing::debug!(%prefix, oid = %object_id, "resolved object prefix");
                Ok(object_id)
            }
            _ => Err(Error::AmbiguousPrefix {
                count: candidates.len(),
                prefix,
            }),
        }
    }

    /// Read an object by full or abbreviated ID
    pub fn read(&self, prefix: &str) -> Result<(ObjectType, Bytes)> {
        let object_id = self.resolve(prefix)?;
        let compressed = self
            .backend
            .get(object_id.shard(), object_id.file_name())?;

        let framed = codec::decompress(&compressed)?;
        codec::unframe(&framed)
    }

    /// Read an object and decode it as a tree
    pub fn read_tree(&self, prefix: &str) -> Result<Tree> {
        let (object_type, payload) = self.read(prefix)?;
        if object_type != ObjectType::Tree {
            return Err(Error::UnexpectedObjectType {
                expected: ObjectType::Tree,
                actual: object_type,
            });
        }

        Tree::decode(&payload, self.max_tree_entries)
    }
}
