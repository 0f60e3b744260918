use crate::artifacts::changes::change::{Change, File};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Split a relative path into its named segments
///
/// `.` and root components are dropped, so both the empty path and `/`
/// resolve to no segments at all.
pub fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(File),
    Dir(Dir),
}

impl Node {
    pub fn path(&self) -> &Path {
        match self {
            Node::File(file) => &file.path,
            Node::Dir(dir) => &dir.path,
        }
    }

    pub fn find(&self, segments: &[String]) -> Option<&Node> {
        match (segments, self) {
            ([], _) => Some(self),
            ([name, rest @ ..], Node::Dir(dir)) => dir.children.get(name)?.find(rest),
            (_, Node::File(_)) => None,
        }
    }

    pub fn collect_all_files(&self) -> Vec<&File> {
        let mut files = Vec::new();
        self.collect_files_into(&mut files);
        files
    }

    fn collect_files_into<'n>(&'n self, files: &mut Vec<&'n File>) {
        match self {
            Node::File(file) => files.push(file),
            Node::Dir(dir) => dir
                .children
                .values()
                .for_each(|child| child.collect_files_into(files)),
        }
    }

    /// Every node with parents listed before their children
    pub fn pre_order_traversal(&self) -> Vec<&Node> {
        let mut nodes = vec![self];
        if let Node::Dir(dir) = self {
            for child in dir.children.values() {
                nodes.extend(child.pre_order_traversal());
            }
        }
        nodes
    }
}

/// A directory node owning its children by path segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dir {
    pub path: PathBuf,
    children: BTreeMap<String, Node>,
}

impl Dir {
    pub fn new(path: PathBuf) -> Self {
        Dir {
            path,
            children: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_node(&mut self, path: &Path, change: &Change) {
        self.insert(&path_segments(path), change);
    }

    fn insert(&mut self, segments: &[String], change: &Change) {
        match segments {
            [] => {}
            [name] => match change.content_hash() {
                None => {
                    self.children.remove(name);
                }
                Some(oid) => {
                    let file = File::new(self.path.join(name), oid.clone());
                    self.children.insert(name.clone(), Node::File(file));
                }
            },
            [name, rest @ ..] => {
                if change.is_removal() && !matches!(self.children.get(name), Some(Node::Dir(_))) {
                    return;
                }

                let child_path = self.path.join(name);
                let child = self
                    .children
                    .entry(name.clone())
                    .or_insert_with(|| Node::Dir(Dir::new(child_path.clone())));
                // a file standing where a directory is needed gets replaced
                if matches!(*child, Node::File(_)) {
                    *child = Node::Dir(Dir::new(child_path));
                }

                let now_empty = match child {
                    Node::Dir(dir) => {
                        dir.insert(rest, change);
                        dir.is_empty()
                    }
                    Node::File(_) => false,
                };
                if now_empty {
                    self.children.remove(name);
                }
            }
        }
    }
}
