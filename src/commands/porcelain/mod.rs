//! User-facing repository operations
//!
//! Each file extends [`Repository`](crate::areas::repository::Repository) with
//! one operation. Operations mutate the loaded repository state and persist
//! it before returning; none of them print anything.
//!
//! ## Operations
//!
//! - `init`: create a repository
//! - `add`: stage files, write the index
//! - `rm`: delete files and stage their removal
//! - `save`: record the index as a checkpoint
//! - `branch`: create and list refs
//! - `log`: read the current lineage
//! - `status`: reconcile saved, staged and live content
//! - `load`: check out a ref or checkpoint
//! - `restore`: bring paths back from a revision
//! - `merge`: merge a revision into the current branch

pub mod add;
pub mod branch;
pub mod init;
pub mod load;
pub mod log;
pub mod merge;
pub mod restore;
pub mod rm;
pub mod save;
pub mod status;
