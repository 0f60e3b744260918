use crate::areas::repository::Repository;
use crate::artifacts::checkpoint::save::Save;
use crate::errors::Result;

impl Repository {
    /// Lineage ending at head, root first
    pub fn get_logs(&self) -> Result<Save> {
        self.current_save()
    }
}
