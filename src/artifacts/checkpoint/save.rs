use crate::artifacts::changes::change::Change;
use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Lineage of checkpoints from a root up to a tip, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Save {
    checkpoints: Vec<Checkpoint>,
}

impl Save {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        Save { checkpoints }
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn tip(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    pub fn tip_id(&self) -> Option<&ObjectId> {
        self.tip().map(Checkpoint::id)
    }

    pub fn contains_id(&self, id: &ObjectId) -> bool {
        self.checkpoints.iter().any(|checkpoint| checkpoint.id() == id)
    }

    /// Whether the tip of `other` is part of this lineage
    ///
    /// An empty lineage is contained in every other one.
    pub fn contains(&self, other: &Save) -> bool {
        other.tip_id().is_none_or(|tip| self.contains_id(tip))
    }

    /// Nearest checkpoint of this lineage that also belongs to `other`
    ///
    /// The scan runs from this tip backwards; the tip of `other` is not a
    /// candidate, so a lineage merged into itself has no common ancestor.
    pub fn first_common_ancestor(&self, other: &Save) -> Option<&Checkpoint> {
        let candidates = other
            .checkpoints
            .iter()
            .take(other.len().saturating_sub(1))
            .map(Checkpoint::id)
            .collect::<HashSet<_>>();

        self.checkpoints
            .iter()
            .rev()
            .find(|checkpoint| candidates.contains(checkpoint.id()))
    }

    /// The lineage truncated right after `id`
    pub fn until(&self, id: &ObjectId) -> Save {
        let end = self
            .checkpoints
            .iter()
            .position(|checkpoint| checkpoint.id() == id)
            .map_or(0, |position| position + 1);

        Save::new(self.checkpoints[..end].to_vec())
    }

    /// Checkpoints strictly after `id`, or the whole lineage without one
    pub fn after(&self, id: Option<&ObjectId>) -> &[Checkpoint] {
        let start = id
            .and_then(|id| {
                self.checkpoints
                    .iter()
                    .position(|checkpoint| checkpoint.id() == id)
            })
            .map_or(0, |position| position + 1);

        &self.checkpoints[start..]
    }

    /// Every change of the lineage in chronological order
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.checkpoints
            .iter()
            .flat_map(|checkpoint| checkpoint.changes())
    }
}
