use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::{Head, RefMap, Refs};
use crate::areas::saves::Saves;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::changes::change::Change;
use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use crate::artifacts::checkpoint::save::Save;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use crate::artifacts::tree::snapshot::Tree;
use crate::config::{Config, METADATA_DIR};
use crate::errors::{RepositoryError, Result};
use std::cell::OnceCell;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Everything a command reads at its start and writes back at its end
#[derive(Debug)]
pub struct RepositoryState {
    pub(crate) refs: RefMap,
    pub(crate) head: Head,
    pub(crate) index: Index,
    /// Snapshot of the checkpoint head resolves to
    pub(crate) tree: Tree,
}

#[derive(Debug)]
pub struct Repository {
    config: Config,
    database: Database,
    saves: Saves,
    refs: Refs,
    workspace: Workspace,
    /// Objects recorded by any checkpoint, read on the first release
    referenced_objects: OnceCell<HashSet<ObjectId>>,
    pub(crate) state: RepositoryState,
}

impl Repository {
    /// Open the repository whose metadata directory lives directly under `root`
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .map_err(|_| RepositoryError::NotARepository(root.join(METADATA_DIR)))?;

        let config = Config::new(root.into_boxed_path());
        if !config.metadata_path().is_dir() {
            return Err(RepositoryError::NotARepository(config.metadata_path()));
        }

        let database = Database::new(config.objects_path().into_boxed_path());
        let saves = Saves::new(config.saves_path().into_boxed_path());
        let refs = Refs::new(
            config.refs_path().into_boxed_path(),
            config.head_path().into_boxed_path(),
        );
        let workspace = Workspace::new(config.root().into());

        let ref_map = refs.read_refs()?;
        let head = refs.read_head(&ref_map)?;
        let mut index = Index::new(config.index_path().into_boxed_path());
        index.rehydrate()?;

        let tree = match head.checkpoint_id(&ref_map) {
            Some(id) => Tree::from_save(config.root(), &saves.read_save(id)?),
            None => Tree::new(config.root()),
        };

        log::debug!("opened repository at {:?}, head is {head}", config.root());

        Ok(Repository {
            config,
            database,
            saves,
            refs,
            workspace,
            referenced_objects: OnceCell::new(),
            state: RepositoryState {
                refs: ref_map,
                head,
                index,
                tree,
            },
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &Path {
        self.config.root()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn saves(&self) -> &Saves {
        &self.saves
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn index(&self) -> &Index {
        &self.state.index
    }

    pub fn tree(&self) -> &Tree {
        &self.state.tree
    }

    pub fn head(&self) -> &Head {
        &self.state.head
    }

    pub fn status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn is_detached(&self) -> bool {
        self.state.head.is_detached()
    }

    pub fn current_checkpoint_id(&self) -> Option<&ObjectId> {
        self.state.head.checkpoint_id(&self.state.refs)
    }

    /// Lineage ending at head, empty before the first save
    pub(crate) fn current_save(&self) -> Result<Save> {
        match self.current_checkpoint_id() {
            Some(id) => Ok(self.saves.read_save(id)?),
            None => Ok(Save::default()),
        }
    }

    pub(crate) fn resolve_revision(&self, revision: &str) -> Result<Revision> {
        Revision::resolve(revision, &self.state.refs, &self.saves)
    }

    /// Resolve a user supplied path to a path relative to the root
    pub(crate) fn resolve_path(&self, path: &Path) -> Result<PathBuf> {
        let relative = self.state.tree.normalize_path(path)?;

        let in_metadata = relative
            .components()
            .any(|component| matches!(component, Component::Normal(name) if name == METADATA_DIR));
        if in_metadata {
            return Err(RepositoryError::MetadataPath(path.to_path_buf()));
        }
        Self::ensure_storable(&relative)?;

        Ok(relative)
    }

    /// Change lists are line based UTF-8 text, a path must fit on one line
    pub(crate) fn ensure_storable(relative: &Path) -> Result<()> {
        match relative.to_str() {
            Some(name) if !name.contains(['\n', '\r']) => Ok(()),
            _ => Err(RepositoryError::InvalidPath(relative.to_path_buf())),
        }
    }

    /// Record a checkpoint and the objects it now keeps alive
    pub(crate) fn write_save(&mut self, checkpoint: &Checkpoint) -> Result<ObjectId> {
        let id = self.saves.write_save(checkpoint)?;

        if let Some(objects) = self.referenced_objects.get_mut() {
            objects.extend(
                checkpoint
                    .changes()
                    .iter()
                    .filter_map(|change| change.content_hash().cloned()),
            );
        }

        Ok(id)
    }

    fn referenced_objects(&self) -> Result<&HashSet<ObjectId>> {
        if let Some(objects) = self.referenced_objects.get() {
            return Ok(objects);
        }

        let objects = self.saves.referenced_objects()?;
        Ok(self.referenced_objects.get_or_init(|| objects))
    }

    /// Free the object of a change just dropped from the index
    ///
    /// Objects still staged under another path or recorded by any checkpoint
    /// stay in the store.
    pub(crate) fn release(&self, change: &Change) -> Result<()> {
        let Some(object_id) = change.releasable_object() else {
            return Ok(());
        };

        let staged_elsewhere = self
            .state
            .index
            .entries()
            .any(|entry| entry.content_hash() == Some(object_id));
        if staged_elsewhere || self.referenced_objects()?.contains(object_id) {
            log::debug!("keeping object {} still in use", object_id.to_short_oid());
            return Ok(());
        }

        self.database.remove(object_id)?;
        Ok(())
    }

    /// Refuse to go on while status reports anything
    pub(crate) fn ensure_clean(&self) -> Result<()> {
        if self.get_status()?.is_clean() {
            Ok(())
        } else {
            Err(RepositoryError::UncommittedChanges)
        }
    }

    /// Write refs, head and a changed index back to disk
    pub(crate) fn persist(&mut self) -> Result<()> {
        self.refs.write_refs(&self.state.refs)?;
        self.refs.write_head(&self.state.head)?;

        if self.state.index.is_changed() {
            self.state.index.write_updates()?;
        }

        Ok(())
    }

    /// Replace the working directory with a snapshot and make it the head tree
    pub(crate) fn check_out_tree(&mut self, tree: Tree) -> Result<()> {
        self.workspace.clear()?;
        self.workspace.materialize(tree.top(), &self.database)?;
        self.state.tree = tree;

        Ok(())
    }
}
