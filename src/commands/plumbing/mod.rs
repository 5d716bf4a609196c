//! Plumbing commands (low-level Git operations)
//!
//! ## Commands
//!
//! - `cat-file`: Print an object's payload, type or size
//! - `hash-object`: Compute object ID and optionally store in database
//! - `ls-files`: List the paths recorded in the index
//! - `ls-tree`: List contents of a tree object

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
