use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{
    FileChange, FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type ChangeSet = BTreeMap<PathBuf, FileChangeType>;
pub type HeadTree = BTreeMap<PathBuf, ObjectId>;

/// Classification of every path that differs from the head snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) changed_files: BTreeMap<PathBuf, FileChange>,
}

impl StatusInfo {
    pub fn changed_files(&self) -> &BTreeMap<PathBuf, FileChange> {
        &self.changed_files
    }

    pub fn file_change(&self, path: impl AsRef<Path>) -> Option<&FileChange> {
        self.changed_files.get(path.as_ref())
    }

    pub fn is_clean(&self) -> bool {
        self.changed_files.values().all(FileChange::is_unchanged)
    }

    pub fn index_changeset(&self) -> ChangeSet {
        self.changed_files
            .iter()
            .filter(|(_, change)| change.index_change != IndexChangeType::None)
            .map(|(path, change)| (path.clone(), FileChangeType::Index(change.index_change)))
            .collect()
    }

    /// Tracked paths whose working copy differs from what is staged or saved
    pub fn workspace_changeset(&self) -> ChangeSet {
        self.changed_files
            .iter()
            .filter(|(_, change)| {
                !matches!(
                    change.workspace_change,
                    WorkspaceChangeType::None | WorkspaceChangeType::Untracked
                )
            })
            .map(|(path, change)| {
                (
                    path.clone(),
                    FileChangeType::Workspace(change.workspace_change),
                )
            })
            .collect()
    }

    pub fn untracked_files(&self) -> BTreeSet<PathBuf> {
        self.changed_files
            .iter()
            .filter(|(_, change)| change.workspace_change == WorkspaceChangeType::Untracked)
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let head_tree = self.load_head_tree();
        let mut tracked = head_tree.keys().cloned().collect::<BTreeSet<_>>();
        tracked.extend(
            self.repository
                .index()
                .entries()
                .map(|entry| entry.path().to_path_buf()),
        );

        let mut changed_files = BTreeMap::<PathBuf, FileChange>::new();
        let visited = self.scan_workspace(&head_tree, &tracked, &mut changed_files)?;
        self.collect_missing_files(&tracked, &visited, &mut changed_files);

        Ok(StatusInfo { changed_files })
    }

    fn load_head_tree(&self) -> HeadTree {
        self.repository
            .tree()
            .collect_all_files()
            .into_iter()
            .map(|file| (file.path.clone(), file.oid.clone()))
            .collect()
    }

    fn scan_workspace(
        &self,
        head_tree: &HeadTree,
        tracked: &BTreeSet<PathBuf>,
        changed_files: &mut BTreeMap<PathBuf, FileChange>,
    ) -> anyhow::Result<BTreeSet<PathBuf>> {
        let workspace = self.repository.workspace();
        let index = self.repository.index();
        let mut visited = BTreeSet::new();

        for path in workspace.list_files()? {
            if !tracked.contains(&path) {
                changed_files.entry(path).or_default().workspace_change =
                    WorkspaceChangeType::Untracked;
                continue;
            }

            let live_oid = ObjectId::hash(&workspace.read_file(&path)?);

            let (index_change, recorded_oid) = match index.entry_by_path(&path) {
                Some(entry) => (entry.tag().into(), entry.content_hash()),
                None => (IndexChangeType::None, head_tree.get(&path)),
            };
            let workspace_change = if recorded_oid == Some(&live_oid) {
                WorkspaceChangeType::None
            } else {
                WorkspaceChangeType::Modified
            };

            let change = FileChange {
                index_change,
                workspace_change,
            };
            if !change.is_unchanged() {
                changed_files.insert(path.clone(), change);
            }
            visited.insert(path);
        }

        Ok(visited)
    }

    /// Tracked paths deleted out of band
    fn collect_missing_files(
        &self,
        tracked: &BTreeSet<PathBuf>,
        visited: &BTreeSet<PathBuf>,
        changed_files: &mut BTreeMap<PathBuf, FileChange>,
    ) {
        let index = self.repository.index();

        for path in tracked.difference(visited) {
            let change = changed_files.entry(path.clone()).or_default();
            if index.entry_by_path(path).is_some() {
                change.index_change = IndexChangeType::Removed;
            } else {
                change.workspace_change = WorkspaceChangeType::Removed;
            }
        }
    }
}
