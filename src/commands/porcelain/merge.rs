use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use crate::artifacts::merge::collisions::find_collisions;
use crate::artifacts::merge::outcome::MergeOutcome;
use crate::artifacts::tree::snapshot::Tree;
use crate::errors::{RepositoryError, Result};
use anyhow::Context;

impl Repository {
    /// Merge a revision into the current branch
    ///
    /// When histories diverged, both sides are replayed on top of their first
    /// common ancestor and the incoming side wins every path changed by both.
    pub fn merge(&mut self, revision: &str) -> Result<MergeOutcome> {
        let Head::Attached(current_ref) = &self.state.head else {
            return Err(RepositoryError::DetachedHead { action: "merge" });
        };
        let current_ref = current_ref.clone();

        let revision = self.resolve_revision(revision)?;
        self.ensure_clean()?;

        let current = self.current_save()?;
        let incoming = self.saves().read_save(revision.id())?;
        let incoming_tip = incoming
            .tip()
            .cloned()
            .with_context(|| format!("checkpoint {} has an empty lineage", revision.id()))?;

        if let Some(tip) = current.tip()
            && current.contains(&incoming)
        {
            log::info!("{} is already merged into {}", revision.label(), current_ref);
            return Ok(MergeOutcome::UpToDate(tip.clone()));
        }

        if current
            .tip_id()
            .is_none_or(|tip| incoming.contains_id(tip))
        {
            let tree = Tree::from_save(self.path(), &incoming);
            self.check_out_tree(tree)?;
            self.state
                .refs
                .insert(current_ref.clone(), Some(incoming_tip.id().clone()));
            self.persist()?;

            log::info!(
                "fast-forwarded {} to {}",
                current_ref,
                incoming_tip.id().to_short_oid()
            );
            return Ok(MergeOutcome::FastForward(incoming_tip));
        }

        let ancestor_id = current
            .first_common_ancestor(&incoming)
            .map(|checkpoint| checkpoint.id().clone());
        log::debug!(
            "merge base of {} and {} is {}",
            current_ref,
            revision.label(),
            ancestor_id
                .as_ref()
                .map_or_else(|| "the empty tree".to_string(), |id| id.to_short_oid())
        );

        let mut tree = match &ancestor_id {
            Some(id) => Tree::from_save(self.path(), &current.until(id)),
            None => Tree::new(self.path()),
        };

        let ours = current.after(ancestor_id.as_ref());
        let theirs = incoming
            .after(ancestor_id.as_ref())
            .iter()
            .flat_map(|checkpoint| checkpoint.changes().iter().cloned())
            .collect::<Vec<_>>();

        let collisions = find_collisions(
            ours.iter().flat_map(|checkpoint| checkpoint.changes()),
            &theirs,
        );
        for path in &collisions {
            log::warn!(
                "{:?} changed on both sides, keeping the version from {}",
                path,
                revision.label()
            );
        }

        tree.replay(ours.iter().flat_map(|checkpoint| checkpoint.changes()));
        tree.replay(&theirs);

        let message = format!("Merge {} into {}", revision.label(), current_ref);
        let checkpoint = Checkpoint::new(message, current.tip_id().cloned(), theirs);
        self.write_save(&checkpoint)?;

        self.check_out_tree(tree)?;
        self.state
            .refs
            .insert(current_ref.clone(), Some(checkpoint.id().clone()));
        self.persist()?;

        log::info!(
            "merged {} into {} as {}",
            revision.label(),
            current_ref,
            checkpoint.id().to_short_oid()
        );

        Ok(MergeOutcome::Merged {
            checkpoint,
            collisions,
        })
    }
}
