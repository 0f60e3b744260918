use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::{Path, PathBuf};

/// A tracked path together with the hash of its content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct File {
    pub path: PathBuf,
    pub oid: ObjectId,
}

/// Marker that a path was deleted
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileRemoval {
    pub path: PathBuf,
}

/// An unresolved collision on a path
///
/// A temporary conflict object only exists so the user can inspect the
/// colliding content and may be dropped once the conflict is resolved. A
/// permanent one is part of committed history and must outlive the conflict.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileConflict {
    pub path: PathBuf,
    pub oid: ObjectId,
    pub message: String,
    pub temporary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeTag {
    Created,
    Modified,
    Removed,
    Conflicted,
}

impl ChangeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeTag::Created => "(created)",
            ChangeTag::Modified => "(modified)",
            ChangeTag::Removed => "(removed)",
            ChangeTag::Conflicted => "(conflicted)",
        }
    }

    pub fn try_parse(tag: &str) -> anyhow::Result<Self> {
        match tag {
            "(created)" => Ok(ChangeTag::Created),
            "(modified)" => Ok(ChangeTag::Modified),
            "(removed)" => Ok(ChangeTag::Removed),
            "(conflicted)" => Ok(ChangeTag::Conflicted),
            _ => anyhow::bail!("unknown change tag {tag}"),
        }
    }

    /// Every tag but `(removed)` is followed by an object id line
    pub fn has_object(&self) -> bool {
        !matches!(self, ChangeTag::Removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Creation(File),
    Modification(File),
    Removal(FileRemoval),
    Conflict(FileConflict),
}

impl Change {
    pub fn creation(path: impl Into<PathBuf>, oid: ObjectId) -> Self {
        Change::Creation(File::new(path.into(), oid))
    }

    pub fn modification(path: impl Into<PathBuf>, oid: ObjectId) -> Self {
        Change::Modification(File::new(path.into(), oid))
    }

    pub fn removal(path: impl Into<PathBuf>) -> Self {
        Change::Removal(FileRemoval::new(path.into()))
    }

    pub fn path(&self) -> &Path {
        match self {
            Change::Creation(file) | Change::Modification(file) => &file.path,
            Change::Removal(removal) => &removal.path,
            Change::Conflict(conflict) => &conflict.path,
        }
    }

    pub fn content_hash(&self) -> Option<&ObjectId> {
        match self {
            Change::Creation(file) | Change::Modification(file) => Some(&file.oid),
            Change::Removal(_) => None,
            Change::Conflict(conflict) => Some(&conflict.oid),
        }
    }

    pub fn tag(&self) -> ChangeTag {
        match self {
            Change::Creation(_) => ChangeTag::Created,
            Change::Modification(_) => ChangeTag::Modified,
            Change::Removal(_) => ChangeTag::Removed,
            Change::Conflict(_) => ChangeTag::Conflicted,
        }
    }

    pub fn is_removal(&self) -> bool {
        matches!(self, Change::Removal(_))
    }

    /// Two changes conflict when they target the same path, are not both
    /// removals, and leave the path with different content
    pub fn conflicts_with(&self, other: &Change) -> bool {
        self.path() == other.path()
            && !(self.is_removal() && other.is_removal())
            && self.content_hash() != other.content_hash()
    }

    /// The object this change allows to be freed once it is dropped from the index
    ///
    /// Removals own no object and permanent conflicts point into history.
    pub fn releasable_object(&self) -> Option<&ObjectId> {
        match self {
            Change::Creation(file) | Change::Modification(file) => Some(&file.oid),
            Change::Conflict(conflict) if conflict.temporary => Some(&conflict.oid),
            Change::Conflict(_) | Change::Removal(_) => None,
        }
    }

    pub(crate) fn from_parts(
        path: PathBuf,
        tag: ChangeTag,
        oid: Option<ObjectId>,
    ) -> anyhow::Result<Self> {
        match (tag, oid) {
            (ChangeTag::Removed, None) => Ok(Change::removal(path)),
            (ChangeTag::Created, Some(oid)) => Ok(Change::creation(path, oid)),
            (ChangeTag::Modified, Some(oid)) => Ok(Change::modification(path, oid)),
            (ChangeTag::Conflicted, Some(oid)) => Ok(Change::Conflict(FileConflict::new(
                path,
                oid,
                String::new(),
                true,
            ))),
            (tag, _) => anyhow::bail!(
                "malformed {} change for {}",
                tag.as_str(),
                path.display()
            ),
        }
    }
}
