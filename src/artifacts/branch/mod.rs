//! Branch names and revisions
//!
//! Refs are validated with the usual git ref rules; revisions resolve a
//! command line argument to a checkpoint through the refs, full ids or
//! abbreviated ids.

pub mod ref_name;
pub mod revision;

pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
