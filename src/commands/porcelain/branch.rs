use crate::areas::refs::{Head, RefMap};
use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RefName;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// Bind a new ref to the current checkpoint and attach head to it
    ///
    /// Naming a ref that already points to the current checkpoint just
    /// attaches head to it.
    pub fn create_ref(&mut self, name: &str) -> Result<()> {
        let name = RefName::try_parse(name)?;
        let current = self
            .current_checkpoint_id()
            .cloned()
            .ok_or(RepositoryError::NoSaveHistory)?;

        match self.state.refs.get(&name) {
            Some(Some(existing)) if *existing == current => {}
            Some(_) => return Err(RepositoryError::RefCollision(name.to_string())),
            None => {
                self.state.refs.insert(name.clone(), Some(current));
            }
        }

        log::info!("created ref {name}");
        self.state.head = Head::Attached(name);
        self.persist()
    }

    pub fn get_refs(&self) -> &RefMap {
        &self.state.refs
    }
}
