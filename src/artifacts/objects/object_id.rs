//! Object identifier (SHA-256 hash)
//!
//! Object IDs are 64-character hexadecimal strings. They identify both file
//! contents in `objects/` and checkpoint records in `saves/`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    pub fn try_parse(id: impl Into<String>) -> anyhow::Result<Self> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("Invalid object ID length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            anyhow::bail!("Invalid object ID characters: {}", id);
        }

        Ok(Self(id))
    }

    /// Compute the ID of the given raw content
    pub fn hash(data: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(data)))
    }

    pub fn is_valid(id: &str) -> bool {
        Self::try_parse(id).is_ok()
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0[..7].to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
