//! Shared configuration
//!
//! `Config` carries the settings every area needs: where the repository
//! metadata lives and how many entries a tree may hold.

pub mod config;
