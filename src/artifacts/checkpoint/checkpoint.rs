//! Checkpoint record
//!
//! ## Format
//!
//! ```text
//! <message>
//! <parent checkpoint id, empty for a root>
//! <created at>
//!
//! Please do not edit the lines below.
//!
//!
//! Files:
//!
//! <change lines>
//! ```

use crate::artifacts::changes::change::Change;
use crate::artifacts::changes::change_list::{parse_changes, write_changes};
use crate::artifacts::objects::object_id::ObjectId;
use crate::config::TIMESTAMP_FORMAT;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};

const FILES_MARKER: &str = "\n\nPlease do not edit the lines below.\n\n\nFiles:\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    id: ObjectId,
    message: String,
    created_at: DateTime<FixedOffset>,
    parent: Option<ObjectId>,
    changes: Vec<Change>,
}

impl Checkpoint {
    /// Create a checkpoint stamped with the current local time
    pub fn new(message: String, parent: Option<ObjectId>, changes: Vec<Change>) -> Self {
        Self::new_with_timestamp(
            message,
            parent,
            chrono::Local::now().fixed_offset(),
            changes,
        )
    }

    pub fn new_with_timestamp(
        message: String,
        parent: Option<ObjectId>,
        created_at: DateTime<FixedOffset>,
        changes: Vec<Change>,
    ) -> Self {
        let body = Self::render(&message, parent.as_ref(), &created_at, &changes);

        Checkpoint {
            id: ObjectId::hash(body.as_bytes()),
            message,
            created_at,
            parent,
            changes,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> &DateTime<FixedOffset> {
        &self.created_at
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn readable_timestamp(&self) -> String {
        self.created_at
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn serialize(&self) -> String {
        Self::render(
            &self.message,
            self.parent.as_ref(),
            &self.created_at,
            &self.changes,
        )
    }

    pub fn deserialize(body: &str) -> anyhow::Result<Self> {
        let (header, files) = body
            .split_once(FILES_MARKER)
            .context("checkpoint record is missing its files section")?;

        let mut lines = header.split('\n');
        let message = lines.next().context("checkpoint record is missing its message")?;
        let parent = lines.next().context("checkpoint record is missing its parent")?;
        let created_at = lines
            .next()
            .context("checkpoint record is missing its timestamp")?;
        if lines.next().is_some() {
            anyhow::bail!("checkpoint record has an unexpected header line");
        }

        let parent = match parent {
            "" => None,
            parent => Some(ObjectId::try_parse(parent)?),
        };
        let created_at = DateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
            .with_context(|| format!("invalid checkpoint timestamp {created_at:?}"))?;
        let changes = parse_changes(files)?;

        Ok(Checkpoint {
            id: ObjectId::hash(body.as_bytes()),
            message: message.to_string(),
            created_at,
            parent,
            changes,
        })
    }

    fn render(
        message: &str,
        parent: Option<&ObjectId>,
        created_at: &DateTime<FixedOffset>,
        changes: &[Change],
    ) -> String {
        let mut body = String::new();
        body.push_str(message);
        body.push('\n');
        if let Some(parent) = parent {
            body.push_str(parent.as_ref());
        }
        body.push('\n');
        body.push_str(&created_at.format(TIMESTAMP_FORMAT).to_string());
        body.push_str(FILES_MARKER);
        write_changes(changes, &mut body);
        body
    }
}
