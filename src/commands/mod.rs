//! Command implementations
//!
//! Only plumbing commands exist: low-level access to the object database
//! and the index, used for scripting and inspection.

pub mod plumbing;
