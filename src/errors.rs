//! Error taxonomy for the object store and the binary decoders
//!
//! Every decoding step validates eagerly and reports one of these variants;
//! nothing is ever returned half-decoded.

use crate::artifacts::objects::object_type::ObjectType;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No stored object matches the given prefix.
    #[error("object {0:?} not found")]
    ObjectNotFound(String),

    /// Two or more stored objects match the given prefix.
    #[error("multiple objects ({count}) with prefix {prefix:?}")]
    AmbiguousPrefix { prefix: String, count: usize },

    /// The prefix is too short or too long to name an object.
    #[error("invalid object prefix {0:?}: must be between 2 and 40 characters")]
    InvalidPrefix(String),

    /// A full object ID failed validation.
    #[error("invalid object id {0:?}")]
    InvalidObjectId(String),

    /// The stored bytes are not valid compressed data.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// The `<type> <size>` header cannot be parsed.
    #[error("malformed object header: {0}")]
    MalformedHeader(String),

    /// The payload length differs from the length declared in the header.
    #[error("expected size {declared}, got {actual} bytes")]
    SizeMismatch { declared: usize, actual: usize },

    /// The object exists but has a different type than requested.
    #[error("expected {expected} object, got {actual}")]
    UnexpectedObjectType {
        expected: ObjectType,
        actual: ObjectType,
    },

    /// The index file is too short to hold its header and trailer, or an
    /// entry runs past the end of the entry region.
    #[error("truncated index file")]
    TruncatedIndex,

    /// The trailing SHA-1 of the index does not match its contents.
    #[error("invalid index checksum")]
    ChecksumMismatch,

    #[error("invalid index signature {0:?}")]
    BadSignature(String),

    #[error("unsupported index version {0}")]
    UnsupportedVersion(u32),

    /// The number of decoded entries differs from the header's count.
    #[error("index header declares {expected} entries, decoded {actual}")]
    EntryCountMismatch { expected: u32, actual: u32 },

    #[error("malformed index entry at offset {offset}: {reason}")]
    MalformedIndexEntry { offset: usize, reason: String },

    /// An entry path that the index format cannot represent.
    #[error("index path {0:?} contains a NUL byte")]
    InvalidIndexPath(String),

    #[error("cannot encode {0} entries in a single index")]
    TooManyIndexEntries(usize),

    /// The tree payload cannot be tokenized or exceeds the entry ceiling.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
