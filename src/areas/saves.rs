//! Checkpoint records
//!
//! Each checkpoint is stored as plain text under `saves/<id>`, where the id is
//! the SHA-256 of that text. Lineages are read by following parent pointers
//! from a tip back to the root.

use crate::areas::database::write_atomically;
use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use crate::artifacts::checkpoint::save::Save;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Saves {
    path: Box<Path>,
}

impl Saves {
    pub fn saves_path(&self) -> &Path {
        &self.path
    }

    fn checkpoint_path(&self, id: &ObjectId) -> PathBuf {
        self.path.join(id.as_ref())
    }

    pub fn exists(&self, id: &ObjectId) -> bool {
        self.checkpoint_path(id).is_file()
    }

    pub fn write_save(&self, checkpoint: &Checkpoint) -> anyhow::Result<ObjectId> {
        let path = self.checkpoint_path(checkpoint.id());

        if !path.exists() {
            write_atomically(&path, checkpoint.serialize().as_bytes())?;
            log::debug!("wrote checkpoint {}", checkpoint.id().to_short_oid());
        }

        Ok(checkpoint.id().clone())
    }

    pub fn read_checkpoint(&self, id: &ObjectId) -> anyhow::Result<Checkpoint> {
        let path = self.checkpoint_path(id);
        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("Unable to read checkpoint {}", path.display()))?;

        let checkpoint = Checkpoint::deserialize(&body)
            .with_context(|| format!("Malformed checkpoint {}", path.display()))?;
        if checkpoint.id() != id {
            anyhow::bail!("checkpoint {} does not match its content hash", id);
        }

        Ok(checkpoint)
    }

    /// Lineage ending at `tip`, root first
    pub fn read_save(&self, tip: &ObjectId) -> anyhow::Result<Save> {
        let mut checkpoints = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(tip.clone());

        while let Some(id) = next {
            if !visited.insert(id.clone()) {
                anyhow::bail!("checkpoint {} appears twice in its own lineage", id);
            }

            let checkpoint = self.read_checkpoint(&id)?;
            next = checkpoint.parent().cloned();
            checkpoints.push(checkpoint);
        }

        checkpoints.reverse();
        Ok(Save::new(checkpoints))
    }

    pub fn list_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let file_name = entry?.file_name();
            if let Ok(id) = ObjectId::try_parse(file_name.to_string_lossy().into_owned()) {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    /// Checkpoint ids starting with the given hexadecimal prefix
    pub fn find_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .list_ids()?
            .into_iter()
            .filter(|id| id.as_ref().starts_with(prefix))
            .collect())
    }

    /// Every object referred to by a recorded checkpoint
    pub fn referenced_objects(&self) -> anyhow::Result<HashSet<ObjectId>> {
        let mut objects = HashSet::new();
        for id in self.list_ids()? {
            let checkpoint = self.read_checkpoint(&id)?;
            objects.extend(
                checkpoint
                    .changes()
                    .iter()
                    .filter_map(|change| change.content_hash().cloned()),
            );
        }

        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::changes::change::Change;
    use assert_fs::TempDir;
    use rstest::{fixture, rstest};

    #[fixture]
    fn saves_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    fn saves(dir: &TempDir) -> Saves {
        Saves::new(dir.path().join("saves").into_boxed_path())
    }

    #[rstest]
    fn reads_back_a_lineage_root_first(saves_dir: TempDir) {
        let saves = saves(&saves_dir);
        let root = Checkpoint::new(
            "s0".into(),
            None,
            vec![Change::creation("1.txt", ObjectId::hash(b"1 content"))],
        );
        let tip = Checkpoint::new(
            "s1".into(),
            Some(root.id().clone()),
            vec![Change::modification("1.txt", ObjectId::hash(b"1 new content"))],
        );
        saves.write_save(&root).unwrap();
        let tip_id = saves.write_save(&tip).unwrap();

        let save = saves.read_save(&tip_id).unwrap();

        assert_eq!(save.checkpoints(), &[root, tip]);
    }

    #[rstest]
    fn resolves_prefixes_and_object_references(saves_dir: TempDir) {
        let saves = saves(&saves_dir);
        let oid = ObjectId::hash(b"content");
        let checkpoint = Checkpoint::new("s0".into(), None, vec![Change::creation("a", oid.clone())]);
        let id = saves.write_save(&checkpoint).unwrap();

        assert_eq!(saves.find_by_prefix(&id.as_ref()[..6]).unwrap(), vec![id.clone()]);
        assert!(saves.exists(&id));
        let referenced = saves.referenced_objects().unwrap();
        assert!(referenced.contains(&oid));
        assert!(!referenced.contains(&ObjectId::hash(b"other")));
    }

    #[rstest]
    fn rejects_tampered_records(saves_dir: TempDir) {
        let saves = saves(&saves_dir);
        let checkpoint = Checkpoint::new("s0".into(), None, vec![Change::removal("a")]);
        let id = saves.write_save(&checkpoint).unwrap();

        let path = saves.saves_path().join(id.as_ref());
        let tampered = std::fs::read_to_string(&path).unwrap().replace("s0", "s9");
        std::fs::write(&path, tampered).unwrap();

        assert!(saves.read_checkpoint(&id).is_err());
    }
}
