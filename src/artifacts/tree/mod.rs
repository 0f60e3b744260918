//! In-memory snapshot model
//!
//! A snapshot is a path-keyed tree of directories and files built by replaying
//! ordered changes onto an empty tree. Later changes for a path override earlier
//! ones, and directories vanish as soon as their last entry is removed.

pub mod node;
pub mod snapshot;
