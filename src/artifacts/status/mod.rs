//! Working directory status
//!
//! Status reconciles three views of every path: the head snapshot, the index
//! and the live working directory. Staged changes are reported from the index
//! entry tag; working directory changes compare live content against the
//! index entry when there is one, or against the head snapshot otherwise.

pub mod file_change;
pub mod status_info;
