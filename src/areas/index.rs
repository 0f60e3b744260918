//! Index (staging area)
//!
//! The index holds the changes pending for the next checkpoint, in the order
//! they were staged, with at most one change per path.
//!
//! ## Index File Format
//!
//! ```text
//! Tracked files:
//!
//! <change lines>
//! ```

use crate::areas::database::write_atomically;
use crate::artifacts::changes::change::Change;
use crate::artifacts::changes::change_list::{parse_changes, write_changes};
use anyhow::Context;
use std::path::{Path, PathBuf};

const INDEX_HEADER: &str = "Tracked files:\n\n";

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.repository/index`)
    path: Box<Path>,
    entries: Vec<Change>,
    /// Whether the entries differ from the file contents
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the entries from disk, an absent file reads as an empty index
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read index file at {:?}", self.path))?;
        let body = content
            .strip_prefix(INDEX_HEADER)
            .with_context(|| format!("index file at {:?} has no header", self.path))?;
        self.entries = parse_changes(body)
            .with_context(|| format!("malformed index file at {:?}", self.path))?;

        Ok(())
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut content = String::from(INDEX_HEADER);
        write_changes(&self.entries, &mut content);

        write_atomically(&self.path, content.as_bytes())?;
        self.changed = false;

        Ok(())
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn entries(&self) -> impl Iterator<Item = &Change> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&Change> {
        self.entries.iter().find(|entry| entry.path() == path)
    }

    /// Stage a change, replacing in place any entry for the same path
    ///
    /// Returns the replaced entry.
    pub fn add(&mut self, change: Change) -> Option<Change> {
        self.changed = true;

        let position = self
            .entries
            .iter()
            .position(|entry| entry.path() == change.path());

        match position {
            Some(position) => Some(std::mem::replace(&mut self.entries[position], change)),
            None => {
                self.entries.push(change);
                None
            }
        }
    }

    pub fn remove(&mut self, path: &Path) -> Option<Change> {
        let position = self.entries.iter().position(|entry| entry.path() == path)?;
        self.changed = true;

        Some(self.entries.remove(position))
    }

    /// Paths of the entries at or below `path`; the empty path covers everything
    pub fn entries_under_path(&self, path: &Path) -> Vec<PathBuf> {
        self.entries
            .iter()
            .map(Change::path)
            .filter(|entry_path| entry_path.starts_with(path))
            .map(Path::to_path_buf)
            .collect()
    }

    pub fn remove_under_path(&mut self, path: &Path) -> Vec<Change> {
        let (removed, kept) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition::<Vec<_>, _>(|entry| entry.path().starts_with(path));

        self.changed |= !removed.is_empty();
        self.entries = kept;

        removed
    }

    /// Drop every entry, handing them back in staging order
    pub fn clear(&mut self) -> Vec<Change> {
        self.changed |= !self.entries.is_empty();
        std::mem::take(&mut self.entries)
    }
}
