use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The incoming lineage is already part of the current one
    UpToDate(Checkpoint),
    /// The current ref moved to the incoming tip, no checkpoint was written
    FastForward(Checkpoint),
    /// A merge checkpoint was written on top of the current tip
    Merged {
        checkpoint: Checkpoint,
        collisions: Vec<PathBuf>,
    },
}

impl MergeOutcome {
    /// The checkpoint the current ref points to after the merge
    pub fn checkpoint(&self) -> &Checkpoint {
        match self {
            MergeOutcome::UpToDate(checkpoint)
            | MergeOutcome::FastForward(checkpoint)
            | MergeOutcome::Merged { checkpoint, .. } => checkpoint,
        }
    }

    pub fn collisions(&self) -> &[PathBuf] {
        match self {
            MergeOutcome::Merged { collisions, .. } => collisions,
            _ => &[],
        }
    }
}
