use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::checkpoint::checkpoint::Checkpoint;
use crate::artifacts::tree::snapshot::Tree;
use crate::errors::Result;
use anyhow::Context;

impl Repository {
    /// Check out a ref or a checkpoint id into the working directory
    ///
    /// Loading a ref attaches head to it, loading a raw id detaches head.
    pub fn load(&mut self, revision: &str) -> Result<Checkpoint> {
        let revision = self.resolve_revision(revision)?;
        self.ensure_clean()?;

        let save = self.saves().read_save(revision.id())?;
        let tip = save
            .tip()
            .cloned()
            .with_context(|| format!("checkpoint {} has an empty lineage", revision.id()))?;

        let tree = Tree::from_save(self.path(), &save);
        self.check_out_tree(tree)?;
        self.state.head = match revision.ref_name() {
            Some(name) => Head::Attached(name.clone()),
            None => Head::Detached(revision.id().clone()),
        };
        self.persist()?;

        log::info!("loaded {}", revision.label());
        Ok(tip)
    }
}
