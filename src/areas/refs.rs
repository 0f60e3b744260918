//! Refs and head
//!
//! Refs map branch names to checkpoint ids, head names the checkpoint the
//! working directory is checked out against.
//!
//! ## File Format
//!
//! `refs`:
//!
//! ```text
//! Refs:
//!
//! <name>
//! <checkpoint id, empty while the branch has no saves>
//! ```
//!
//! `head` holds either a branch name (attached) or a raw checkpoint id
//! (detached), with no trailing newline.

use crate::areas::database::write_atomically;
use crate::artifacts::branch::ref_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::Path;

const REFS_HEADER: &str = "Refs:\n\n";

pub type RefMap = BTreeMap<RefName, Option<ObjectId>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Head follows a branch present in the refs
    Attached(RefName),
    /// Head points straight at a checkpoint
    Detached(ObjectId),
}

impl Head {
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }

    /// The checkpoint head resolves to, if any save exists yet
    pub fn checkpoint_id<'r>(&'r self, refs: &'r RefMap) -> Option<&'r ObjectId> {
        match self {
            Head::Attached(name) => refs.get(name).and_then(Option::as_ref),
            Head::Detached(id) => Some(id),
        }
    }
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Attached(name) => write!(f, "{name}"),
            Head::Detached(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, new)]
pub struct Refs {
    refs_path: Box<Path>,
    head_path: Box<Path>,
}

impl Refs {
    pub fn read_refs(&self) -> anyhow::Result<RefMap> {
        let content = std::fs::read_to_string(&self.refs_path)
            .with_context(|| format!("failed to read refs file at {:?}", self.refs_path))?;
        let body = content
            .strip_prefix(REFS_HEADER)
            .with_context(|| format!("refs file at {:?} has no header", self.refs_path))?;

        let mut refs = RefMap::new();
        let mut lines = body.lines();
        while let Some(name) = lines.next() {
            if name.is_empty() {
                continue;
            }

            let id = match lines.next().unwrap_or_default() {
                "" => None,
                id => Some(ObjectId::try_parse(id)?),
            };
            let name = RefName::try_parse(name)
                .map_err(|error| anyhow::anyhow!("corrupt refs file: {error}"))?;
            refs.insert(name, id);
        }

        Ok(refs)
    }

    pub fn write_refs(&self, refs: &RefMap) -> anyhow::Result<()> {
        let mut content = String::from(REFS_HEADER);
        for (name, id) in refs {
            content.push_str(name.as_ref());
            content.push('\n');
            if let Some(id) = id {
                content.push_str(id.as_ref());
            }
            content.push('\n');
        }

        write_atomically(&self.refs_path, content.as_bytes())
    }

    pub fn read_head(&self, refs: &RefMap) -> anyhow::Result<Head> {
        let content = std::fs::read_to_string(&self.head_path)
            .with_context(|| format!("failed to read head file at {:?}", self.head_path))?;
        let content = content.trim();

        if let Some((name, _)) = refs.iter().find(|(name, _)| name.as_ref() == content) {
            return Ok(Head::Attached(name.clone()));
        }

        ObjectId::try_parse(content)
            .map(Head::Detached)
            .with_context(|| format!("head {content:?} is neither a ref nor a checkpoint id"))
    }

    pub fn write_head(&self, head: &Head) -> anyhow::Result<()> {
        write_atomically(&self.head_path, head.to_string().as_bytes())?;
        log::debug!("head moved to {head}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn refs(dir: &TempDir) -> Refs {
        Refs::new(
            dir.path().join("refs").into_boxed_path(),
            dir.path().join("head").into_boxed_path(),
        )
    }

    fn name(name: &str) -> RefName {
        RefName::try_parse(name).unwrap()
    }

    #[test]
    fn writes_names_and_ids_in_pairs() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);
        let id = ObjectId::hash(b"checkpoint");
        let map = RefMap::from([(name("a"), Some(id.clone())), (name("master"), None)]);

        refs.write_refs(&map).unwrap();

        let content = std::fs::read_to_string(dir.path().join("refs")).unwrap();
        assert_eq!(content, format!("Refs:\n\na\n{id}\nmaster\n\n"));
        assert_eq!(refs.read_refs().unwrap(), map);
    }

    #[test]
    fn head_is_attached_only_to_known_refs() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);
        let id = ObjectId::hash(b"checkpoint");
        let map = RefMap::from([(name("master"), Some(id.clone()))]);

        refs.write_head(&Head::Attached(name("master"))).unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("head")).unwrap(), "master");
        let head = refs.read_head(&map).unwrap();
        assert_eq!(head, Head::Attached(name("master")));
        assert_eq!(head.checkpoint_id(&map), Some(&id));

        refs.write_head(&Head::Detached(id.clone())).unwrap();
        let head = refs.read_head(&map).unwrap();
        assert!(head.is_detached());
        assert_eq!(head.checkpoint_id(&map), Some(&id));
    }

    #[test]
    fn unknown_head_names_are_corrupt() {
        let dir = TempDir::new().unwrap();
        let refs = refs(&dir);
        std::fs::write(dir.path().join("head"), "deleted-branch").unwrap();

        assert!(refs.read_head(&RefMap::new()).is_err());
    }
}
