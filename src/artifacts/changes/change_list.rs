use crate::artifacts::changes::change::{Change, ChangeTag};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::path::{Component, Path, PathBuf};

/// Render a relative path with `/` separators, the form stored on disk
pub fn path_to_string(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn write_changes(changes: &[Change], out: &mut String) {
    for change in changes {
        out.push_str(&path_to_string(change.path()));
        out.push('\t');
        out.push_str(change.tag().as_str());
        out.push('\n');

        if let Some(oid) = change.content_hash() {
            out.push_str(oid.as_ref());
            out.push('\n');
        }
    }
}

pub fn parse_changes(text: &str) -> anyhow::Result<Vec<Change>> {
    let mut changes = Vec::new();
    let mut lines = text.lines().filter(|line| !line.is_empty());

    while let Some(line) = lines.next() {
        let (path, tag) = line
            .rsplit_once('\t')
            .with_context(|| format!("malformed change line {line:?}"))?;
        let tag = ChangeTag::try_parse(tag)?;

        let oid = if tag.has_object() {
            let oid_line = lines
                .next()
                .with_context(|| format!("missing object id for {path}"))?;
            Some(ObjectId::try_parse(oid_line)?)
        } else {
            None
        };

        changes.push(Change::from_parts(PathBuf::from(path), tag, oid)?);
    }

    Ok(changes)
}
