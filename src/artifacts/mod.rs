//! Repository data structures and algorithms
//!
//! - `objects`: content-addressed object ids
//! - `changes`: file changes and their text encoding
//! - `tree`: snapshots rebuilt from change lists
//! - `checkpoint`: checkpoint records and lineages
//! - `branch`: ref names and revision resolution
//! - `merge`: merge outcomes and collision detection
//! - `status`: working directory status classification

pub mod branch;
pub mod changes;
pub mod checkpoint;
pub mod merge;
pub mod objects;
pub mod status;
pub mod tree;
