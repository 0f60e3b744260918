//! Repository command implementations
//!
//! - `porcelain`: the user-facing operations (add, save, merge, ...)

pub mod porcelain;
