//! Git data structures and their binary formats
//!
//! - `core`: shared configuration
//! - `index`: index file header, entries and checksum
//! - `objects`: object IDs, types, framing codec and tree entries

pub mod core;
pub mod index;
pub mod objects;
