//! A content-addressable object store and index reader
//!
//! - `areas`: the object database, its storage backends, the index file and
//!   the repository handle that ties them together
//! - `artifacts`: object, tree and index data structures and their codecs
//! - `commands`: plumbing commands exposed through the `bitstore` binary
//! - `errors`: the typed error taxonomy shared by everything above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
