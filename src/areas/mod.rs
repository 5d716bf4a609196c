//! Core repository components
//!
//! - `backend`: pluggable byte storage addressed by shard and name
//! - `database`: object database for storing blobs, trees, and commits
//! - `index`: reader for the staging area (index/cache) file
//! - `repository`: handle wiring the areas together for the commands

pub mod backend;
pub mod database;
pub mod index;
pub mod repository;
