//! Virtual file system records.

use serde::{Deserialize, Serialize};

use crate::session::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Identifier of a virtual file or folder.
pub struct FileId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Virtual entry kind.
pub enum FileKind {
    /// Leaf entry with optional text content.
    File,
    /// Container entry.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A file or folder in the in-memory tree.
pub struct VirtualFile {
    /// Entry id.
    pub id: FileId,
    /// Display name (unique names are a UI convention, not enforced).
    pub name: String,
    /// Entry kind.
    pub kind: FileKind,
    /// Text content for files.
    pub content: Option<String>,
    /// Parent folder, `None` for the desktop root.
    pub parent_id: Option<FileId>,
    /// Creation time in unix milliseconds.
    pub created_ms: u64,
    /// Last modification time in unix milliseconds.
    pub modified_ms: u64,
    /// Reported size in bytes.
    pub size: u64,
    /// Owning user.
    pub owner: Option<UserId>,
}

impl VirtualFile {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, FileKind::Folder)
    }

    /// Lowercased extension of the entry name, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Creation request; ids and timestamps are assigned by the store.
pub struct NewFile {
    pub name: String,
    pub kind: FileKind,
    pub content: Option<String>,
    pub parent_id: Option<FileId>,
    pub size: u64,
    pub owner: Option<UserId>,
}

impl NewFile {
    /// Empty folder under `parent_id`.
    pub fn folder(name: impl Into<String>, parent_id: Option<FileId>) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::Folder,
            content: None,
            parent_id,
            size: 0,
            owner: None,
        }
    }

    /// Text file under `parent_id`; size is the content's byte length.
    pub fn text(name: impl Into<String>, content: impl Into<String>, parent_id: Option<FileId>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            kind: FileKind::File,
            size: content.len() as u64,
            content: Some(content),
            parent_id,
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Partial update applied by [`crate::VirtualFileSystem::update`]; `None` fields are kept.
pub struct FileUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub parent_id: Option<Option<FileId>>,
    pub size: Option<u64>,
}

impl FileUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replaces text content and keeps `size` in step with it.
    pub fn content(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            size: Some(content.len() as u64),
            content: Some(content),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Naming scheme for de-duplicated entry names.
pub enum NameStyle {
    /// `New Folder`, `New Folder 1`, `New Folder 2`, ...
    Suffix,
    /// `New Text Document.txt`, `New Text Document (1).txt`, ...
    ParenthesizedBeforeExtension,
}
