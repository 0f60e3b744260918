use crate::areas::database::Database;
use crate::artifacts::tree::node::Node;
use crate::config::METADATA_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            matches!(component, std::path::Component::Normal(name) if name == METADATA_DIR)
        })
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).exists()
    }

    /// Symlinked directories are not descended into, by staging or by the walk
    pub fn is_dir(&self, file_path: &Path) -> bool {
        let path = self.path.join(file_path);
        path.is_dir() && !path.is_symlink()
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    /// Every file of the working directory, relative to the root
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        self.list_files_under(Path::new(""))
    }

    /// Files at or below `root_file_path`, skipping the metadata directory
    pub fn list_files_under(&self, root_file_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let start = self.path.join(root_file_path);

        if !start.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", start);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR);

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {:?}", start))?;
            // links to files are tracked by the content they point to
            if !entry.path().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(self.path.as_ref())
                .with_context(|| format!("{:?} is outside of the workspace", entry.path()))?;
            if !Self::is_ignored(relative) {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let path = self.path.join(file_path);

        let content = std::fs::read(&path).with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    pub fn make_directory(&self, dir_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(dir_path);

        // a file standing where the directory belongs is replaced
        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", dir_path))?;
        }

        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {:?}", dir_path))
    }

    /// Delete a file, tolerating one that is already gone, then prune the
    /// directories it leaves empty
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                return Err(error).with_context(|| format!("Failed to remove file: {:?}", file_path));
            }
        }

        self.prune_empty_parent_dirs(file_path)
    }

    fn prune_empty_parent_dirs(&self, file_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            let dir = self.path.join(parent);
            if dir.is_dir() && dir.read_dir()?.next().is_none() {
                std::fs::remove_dir(&dir)
                    .with_context(|| format!("Failed to remove empty directory: {:?}", parent))?;
                self.prune_empty_parent_dirs(parent)?;
            }
        }

        Ok(())
    }

    /// Delete whatever lives at `file_path`; the empty path clears the workspace
    pub fn remove_path(&self, file_path: &Path) -> anyhow::Result<()> {
        if file_path.as_os_str().is_empty() {
            return self.clear();
        }

        let path = self.path.join(file_path);
        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove directory: {:?}", file_path))?;
        } else if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }

    /// Remove every entry of the working directory except the metadata directory
    pub fn clear(&self) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            if entry.file_name() == METADATA_DIR {
                continue;
            }

            let path = entry.path();
            if entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove directory: {:?}", path))?;
            } else {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove file: {:?}", path))?;
            }
        }

        log::debug!("cleared working directory {:?}", self.path);
        Ok(())
    }

    /// Recreate a snapshot node on disk, directories before their files
    pub fn materialize(&self, node: &Node, database: &Database) -> anyhow::Result<()> {
        if let Some(parent) = node.path().parent()
            && !parent.as_os_str().is_empty()
        {
            self.make_directory(parent)?;
        }

        for node in node.pre_order_traversal() {
            match node {
                Node::Dir(dir) => {
                    if !dir.path.as_os_str().is_empty() {
                        self.make_directory(&dir.path)?;
                    }
                }
                Node::File(file) => {
                    let data = database.load(&file.oid)?;
                    self.write_file(&file.path, &data)?;
                }
            }
        }

        Ok(())
    }

    /// Replace whatever lives at `file_path` with the given snapshot node
    ///
    /// Everything under the path is destroyed first. Without a node the path
    /// is left absent.
    pub fn restore(
        &self,
        file_path: &Path,
        node: Option<&Node>,
        database: &Database,
    ) -> anyhow::Result<()> {
        self.remove_path(file_path)?;

        match node {
            Some(node) => self.materialize(node, database),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::changes::change::Change;
    use crate::artifacts::tree::snapshot::Tree;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn lists_files_but_not_metadata() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        dir.child("nested/b.txt").write_str("b").unwrap();
        dir.child(".repository/objects/x").write_str("x").unwrap();
        let workspace = Workspace::new(dir.path().into());

        let files = workspace.list_files().unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("a.txt"), PathBuf::from("nested/b.txt")]
        );
    }

    #[test]
    fn clear_spares_the_metadata_directory() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        dir.child("nested/b.txt").write_str("b").unwrap();
        dir.child(".repository/head").write_str("master").unwrap();
        let workspace = Workspace::new(dir.path().into());

        workspace.clear().unwrap();

        dir.child("a.txt").assert(predicates::path::missing());
        dir.child("nested").assert(predicates::path::missing());
        dir.child(".repository/head").assert("master");
    }

    #[test]
    fn removing_a_file_prunes_empty_directories() {
        let dir = TempDir::new().unwrap();
        dir.child("a/b/c.txt").write_str("c").unwrap();
        dir.child("a/d.txt").write_str("d").unwrap();
        let workspace = Workspace::new(dir.path().into());

        workspace.remove_file(Path::new("a/b/c.txt")).unwrap();
        workspace.remove_file(Path::new("a/b/c.txt")).unwrap();

        dir.child("a/b").assert(predicates::path::missing());
        dir.child("a/d.txt").assert("d");
    }

    #[test]
    fn materializes_a_snapshot() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().into());
        let database = Database::new(dir.path().join(".repository/objects").into_boxed_path());
        let one = database.store(b"one").unwrap();
        let two = database.store(b"two").unwrap();

        let mut tree = Tree::new(dir.path());
        tree.replay(&[
            Change::creation("1.txt", one),
            Change::creation("a/b/2.txt", two),
        ]);
        workspace.materialize(tree.top(), &database).unwrap();

        dir.child("1.txt").assert("one");
        dir.child("a/b/2.txt").assert("two");
    }
}
