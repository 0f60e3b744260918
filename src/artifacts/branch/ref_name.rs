use crate::artifacts::branch::INVALID_REF_NAME_REGEX;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use anyhow::Context;

/// Name of the pseudo-revision standing for the head snapshot plus the index
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() || name == HEAD_REF_NAME || ObjectId::is_valid(&name) {
            return Err(RepositoryError::InvalidRefName(name));
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidRefName(name))
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
