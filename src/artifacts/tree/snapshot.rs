use crate::artifacts::changes::change::{Change, File};
use crate::artifacts::checkpoint::save::Save;
use crate::artifacts::tree::node::{Dir, Node, path_segments};
use crate::errors::{RepositoryError, Result};
use std::path::{Component, Path, PathBuf};

/// Snapshot of the tracked files of a repository rooted at `root`
#[derive(Debug, Clone)]
pub struct Tree {
    root: Box<Path>,
    top: Node,
}

impl Tree {
    pub fn new(root: &Path) -> Self {
        Tree {
            root: root.into(),
            top: Node::Dir(Dir::default()),
        }
    }

    /// Rebuild the snapshot at the tip of a lineage, oldest checkpoint first
    pub fn from_save(root: &Path, save: &Save) -> Self {
        let mut tree = Self::new(root);
        tree.replay(save.changes());
        tree
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn top(&self) -> &Node {
        &self.top
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.top, Node::Dir(dir) if dir.is_empty())
    }

    pub fn replay<'c>(&mut self, changes: impl IntoIterator<Item = &'c Change>) {
        for change in changes {
            self.add_node(change.path(), change);
        }
    }

    pub fn add_node(&mut self, path: &Path, change: &Change) {
        if let Node::Dir(dir) = &mut self.top {
            dir.add_node(path, change);
        }
    }

    pub fn find_node(&self, path: &Path) -> Option<&Node> {
        self.top.find(&path_segments(path))
    }

    pub fn find_file(&self, path: &Path) -> Option<&File> {
        match self.find_node(path)? {
            Node::File(file) => Some(file),
            Node::Dir(_) => None,
        }
    }

    pub fn collect_all_files(&self) -> Vec<&File> {
        self.top.collect_all_files()
    }

    /// Tracked files at or below `path`
    pub fn files_under(&self, path: &Path) -> Vec<&File> {
        self.find_node(path)
            .map(Node::collect_all_files)
            .unwrap_or_default()
    }

    pub fn pre_order_traversal(&self) -> Vec<&Node> {
        self.top.pre_order_traversal()
    }

    /// Resolve a relative or absolute path to a path relative to the root
    ///
    /// Resolution is lexical so that paths which no longer exist on disk can
    /// still be named. Anything landing outside of the root is rejected.
    pub fn normalize_path(&self, path: &Path) -> Result<PathBuf> {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        let mut normalized = PathBuf::new();
        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(RepositoryError::PathEscapesRoot(path.to_path_buf()));
                    }
                }
                other => normalized.push(other.as_os_str()),
            }
        }

        normalized
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| RepositoryError::PathEscapesRoot(path.to_path_buf()))
    }

    pub fn abs_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.root.join(self.normalize_path(path)?))
    }
}
