//! Checkpoints and lineages
//!
//! A checkpoint is an immutable record of a message, a creation time, a parent
//! pointer and the ordered changes it introduced. It is identified by the
//! SHA-256 of its serialized body. Following parent pointers from a tip back to
//! a root yields a [`save::Save`], the full lineage of that tip.

pub mod checkpoint;
pub mod save;
