use crate::areas::refs::RefMap;
use crate::areas::saves::Saves;
use crate::artifacts::branch::ref_name::RefName;
use crate::artifacts::objects::MIN_PREFIX_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};

/// A checkpoint named on the command line.
///
/// Supported forms, tried in order:
/// - Ref names: `master`, `feature/login`; a ref without saves does not resolve
/// - Full ids: 64 lowercase hexadecimal characters of a recorded checkpoint
/// - Abbreviated ids: at least 4 hexadecimal characters matching exactly one
///   recorded checkpoint
///
/// # Examples
///
/// ```ignore
/// let revision = Revision::resolve("master", &refs, &saves)?;
/// assert!(revision.ref_name().is_some());
///
/// let revision = Revision::resolve("3f2a", &refs, &saves)?;
/// assert!(revision.ref_name().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A branch and the checkpoint it points to
    Ref(RefName, ObjectId),
    /// A raw checkpoint id, loading it detaches head
    Checkpoint(ObjectId),
}

impl Revision {
    pub fn resolve(revision: &str, refs: &RefMap, saves: &Saves) -> Result<Self> {
        let revision = revision.trim();

        if let Some((name, id)) = refs.iter().find(|(name, _)| name.as_ref() == revision) {
            return match id {
                Some(id) => Ok(Revision::Ref(name.clone(), id.clone())),
                None => Err(RepositoryError::UnknownRevision(revision.to_string())),
            };
        }

        if ObjectId::is_valid(revision) {
            let id = ObjectId::try_parse(revision)?;
            return if saves.exists(&id) {
                Ok(Revision::Checkpoint(id))
            } else {
                Err(RepositoryError::UnknownRevision(revision.to_string()))
            };
        }

        if Self::looks_like_prefix(revision) {
            return Self::resolve_prefix(revision, saves);
        }

        Err(RepositoryError::UnknownRevision(revision.to_string()))
    }

    fn looks_like_prefix(revision: &str) -> bool {
        revision.len() >= MIN_PREFIX_LENGTH
            && revision
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    fn resolve_prefix(prefix: &str, saves: &Saves) -> Result<Self> {
        let mut candidates = saves.find_by_prefix(prefix)?;

        match candidates.len() {
            0 => Err(RepositoryError::UnknownRevision(prefix.to_string())),
            1 => Ok(Revision::Checkpoint(candidates.remove(0))),
            _ => {
                candidates.sort();
                Err(RepositoryError::AmbiguousRevision {
                    prefix: prefix.to_string(),
                    candidates: candidates.iter().map(ObjectId::to_short_oid).collect(),
                })
            }
        }
    }

    pub fn id(&self) -> &ObjectId {
        match self {
            Revision::Ref(_, id) | Revision::Checkpoint(id) => id,
        }
    }

    pub fn ref_name(&self) -> Option<&RefName> {
        match self {
            Revision::Ref(name, _) => Some(name),
            Revision::Checkpoint(_) => None,
        }
    }

    /// Human readable name, the ref name or the abbreviated id
    pub fn label(&self) -> String {
        match self {
            Revision::Ref(name, _) => name.to_string(),
            Revision::Checkpoint(id) => id.to_short_oid(),
        }
    }
}
