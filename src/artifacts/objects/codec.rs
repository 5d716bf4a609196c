//! Object framing and compression
//!
//! An object of type `t` with payload `p` is framed as `"<t> <len(p)>\0" + p`.
//! Its ID is the SHA-1 of the framed bytes and the stored file holds the
//! zlib-compressed framed bytes.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Frame a payload with its header and compute the object ID
pub fn frame(object_type: ObjectType, payload: &[u8]) -> (ObjectId, Bytes) {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);

    (digest(&framed), Bytes::from(framed))
}

/// SHA-1 of the given bytes as an object ID
pub fn digest(data: &[u8]) -> ObjectId {
    let raw: [u8; 20] = Sha1::digest(data).into();
    ObjectId::from_raw(&raw)
}

/// Split framed bytes into object type and payload, validating the header
pub fn unframe(framed: &[u8]) -> Result<(ObjectType, Bytes)> {
    let null_index = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::MalformedHeader("missing NUL after header".to_string()))?;

    let header = std::str::from_utf8(&framed[..null_index])
        .map_err(|_| Error::MalformedHeader("header is not valid UTF-8".to_string()))?;
    let tokens = header.split(' ').collect::<Vec<_>>();
    let [object_type, size] = tokens.as_slice() else {
        return Err(Error::MalformedHeader(format!(
            "expected \"<type> <size>\", got {header:?}"
        )));
    };

    let object_type = object_type.parse::<ObjectType>()?;
    let declared = size
        .parse::<usize>()
        .map_err(|_| Error::MalformedHeader(format!("invalid object size {size:?}")))?;

    let payload = &framed[null_index + 1..];
    if payload.len() != declared {
        return Err(Error::SizeMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok((object_type, Bytes::copy_from_slice(payload)))
}

pub fn compress(data: &[u8]) -> Result<Bytes> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;

    Ok(encoder.finish()?.into())
}

pub fn decompress(data: &[u8]) -> Result<Bytes> {
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut decompressed_content = Vec::new();
    decoder
        .read_to_end(&mut decompressed_content)
        .map_err(|e| Error::CorruptObject(format!("unable to decompress object content: {e}")))?;

    Ok(decompressed_content.into())
}
