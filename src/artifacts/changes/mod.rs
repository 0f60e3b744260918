//! Path-keyed changes
//!
//! A change records what happened to a single path: it was created, modified,
//! removed, or left in conflict. Checkpoints and the index both store ordered
//! lists of changes, using the same line-oriented text layout:
//!
//! ```text
//! <path>\t(created)
//! <object id>
//! <path>\t(removed)
//! ```

pub mod change;
pub mod change_list;
