use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Error;
use std::io::Write;

/// What `cat-file` prints for an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CatFileMode {
    /// Raw payload, the object must be a blob
    Blob,
    /// Raw payload, the object must be a tree
    Tree,
    /// Raw payload, the object must be a commit
    Commit,
    /// Payload size in bytes
    Size,
    /// Object type
    Type,
    /// Human readable payload, trees listed one entry per line
    Pretty,
}

impl CatFileMode {
    fn expected_type(&self) -> Option<ObjectType> {
        match self {
            CatFileMode::Blob => Some(ObjectType::Blob),
            CatFileMode::Tree => Some(ObjectType::Tree),
            CatFileMode::Commit => Some(ObjectType::Commit),
            _ => None,
        }
    }
}

impl Repository {
    pub fn cat_file(&mut self, mode: CatFileMode, object_sha: &str) -> anyhow::Result<()> {
        let (object_type, payload) = self.database().read(object_sha)?;

        if let Some(expected) = mode.expected_type() {
            if object_type != expected {
                return Err(Error::UnexpectedObjectType {
                    expected,
                    actual: object_type,
                }
                .into());
            }
            self.writer().write_all(&payload)?;
            return Ok(());
        }

        match (mode, object_type) {
            (CatFileMode::Size, _) => writeln!(self.writer(), "{}", payload.len())?,
            (CatFileMode::Type, _) => writeln!(self.writer(), "{object_type}")?,
            (_, ObjectType::Tree) => {
                let tree = Tree::decode(&payload, self.config().max_tree_entries)?;
                for entry in tree.entries() {
                    writeln!(self.writer(), "{entry}")?;
                }
            }
            _ => self.writer().write_all(&payload)?,
        }

        Ok(())
    }
}
