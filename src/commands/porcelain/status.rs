use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use crate::errors::Result;

impl Repository {
    pub fn get_status(&self) -> Result<StatusInfo> {
        Ok(self.status().initialize()?)
    }
}
