use crate::artifacts::changes::change::ChangeTag;
use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// State of a path in the working directory relative to what is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WorkspaceChangeType {
    #[default]
    None,
    Untracked,
    Modified,
    Removed,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::None => " ",
            WorkspaceChangeType::Untracked => "?",
            WorkspaceChangeType::Modified => "M",
            WorkspaceChangeType::Removed => "D",
        }
    }
}

/// State of a path in the index relative to the head snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IndexChangeType {
    #[default]
    None,
    Created,
    Modified,
    Removed,
    Conflicted,
}

impl From<ChangeTag> for IndexChangeType {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Created => IndexChangeType::Created,
            ChangeTag::Modified => IndexChangeType::Modified,
            ChangeTag::Removed => IndexChangeType::Removed,
            ChangeTag::Conflicted => IndexChangeType::Conflicted,
        }
    }
}

impl From<&IndexChangeType> for &str {
    fn from(change: &IndexChangeType) -> Self {
        match change {
            IndexChangeType::None => " ",
            IndexChangeType::Created => "A",
            IndexChangeType::Modified => "M",
            IndexChangeType::Removed => "D",
            IndexChangeType::Conflicted => "U",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Workspace(WorkspaceChangeType),
    Index(IndexChangeType),
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let colored_str = match self {
            FileChangeType::Workspace(workspace_change) => match workspace_change {
                WorkspaceChangeType::None | WorkspaceChangeType::Untracked => "".normal(),
                WorkspaceChangeType::Modified => "modified:   ".red(),
                WorkspaceChangeType::Removed => "deleted:    ".red(),
            },
            FileChangeType::Index(index_change) => match index_change {
                IndexChangeType::None => "".normal(),
                IndexChangeType::Created => "new file:   ".green(),
                IndexChangeType::Modified => "modified:   ".green(),
                IndexChangeType::Removed => "deleted:    ".green(),
                IndexChangeType::Conflicted => "conflicted: ".yellow(),
            },
        };
        write!(f, "{:>width$}{}", "", colored_str, width = LABEL_WIDTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileChange {
    pub(crate) index_change: IndexChangeType,
    pub(crate) workspace_change: WorkspaceChangeType,
}

impl FileChange {
    pub fn index_change(&self) -> IndexChangeType {
        self.index_change
    }

    pub fn workspace_change(&self) -> WorkspaceChangeType {
        self.workspace_change
    }

    pub fn is_unchanged(&self) -> bool {
        self.index_change == IndexChangeType::None
            && self.workspace_change == WorkspaceChangeType::None
    }
}

impl From<&FileChange> for String {
    fn from(change: &FileChange) -> Self {
        if change.workspace_change == WorkspaceChangeType::Untracked {
            return "??".to_string();
        }

        let index_str: &str = (&change.index_change).into();
        let workspace_str: &str = (&change.workspace_change).into();
        format!("{}{}", index_str, workspace_str)
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change_str: String = self.into();
        write!(f, "{}", change_str)
    }
}
