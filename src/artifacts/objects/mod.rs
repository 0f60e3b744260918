//! Content-addressed objects
//!
//! Every stored blob and every checkpoint record is identified by the SHA-256
//! digest of its raw bytes, written as 64 lowercase hexadecimal characters.

pub mod object_id;

/// Length of a SHA-256 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 64;

/// Shortest prefix accepted when resolving abbreviated ids
pub const MIN_PREFIX_LENGTH: usize = 4;
