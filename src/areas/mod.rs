//! On-disk areas of a repository
//!
//! - `database`: content-addressed object store
//! - `saves`: checkpoint records and lineages
//! - `refs`: branch refs and the head pointer
//! - `index`: changes staged for the next checkpoint
//! - `workspace`: working directory walks and materialization
//! - `repository`: the façade tying the areas together

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod saves;
pub mod workspace;
