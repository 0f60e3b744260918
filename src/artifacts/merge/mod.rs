//! Merging lineages
//!
//! A merge either moves the current ref (fast-forward), does nothing (the
//! incoming lineage is already contained) or replays both sides on top of
//! their first common ancestor. In the replay the incoming side wins every
//! path touched by both; those paths are reported as collisions.

pub mod collisions;
pub mod outcome;
