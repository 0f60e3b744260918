use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::changes::change::ChangeTag;
use crate::artifacts::changes::change_list::path_to_string;
use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// Record the staged changes as a checkpoint on top of the current branch
    pub fn create_save(&mut self, message: &str) -> Result<Checkpoint> {
        let Head::Attached(branch) = &self.state.head else {
            return Err(RepositoryError::DetachedHead { action: "save" });
        };
        let branch = branch.clone();

        let message = message.trim();
        if message.is_empty() {
            return Err(RepositoryError::InvalidMessage("the message is empty".into()));
        }
        if message.contains('\n') {
            return Err(RepositoryError::InvalidMessage(
                "the message must fit on a single line".into(),
            ));
        }

        if self.state.index.is_empty() {
            return Err(RepositoryError::EmptyIndex);
        }
        let conflicts = self
            .state
            .index
            .entries()
            .filter(|entry| entry.tag() == ChangeTag::Conflicted)
            .map(|entry| path_to_string(entry.path()))
            .collect::<Vec<_>>();
        if !conflicts.is_empty() {
            return Err(RepositoryError::UnresolvedConflicts(conflicts));
        }

        let parent = self.current_checkpoint_id().cloned();
        let checkpoint = Checkpoint::new(message.to_string(), parent, self.state.index.clear());
        self.write_save(&checkpoint)?;

        self.state.tree.replay(checkpoint.changes());
        self.state
            .refs
            .insert(branch.clone(), Some(checkpoint.id().clone()));
        self.persist()?;

        log::info!(
            "saved {} on {} with {} change(s)",
            checkpoint.id().to_short_oid(),
            branch,
            checkpoint.changes().len()
        );

        Ok(checkpoint)
    }
}
