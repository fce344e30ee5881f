//! In-memory virtual file system backing the explorer, editor and desktop icons.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::path::{join_virtual_path, path_segments};
use super::types::{FileId, FileUpdate, NameStyle, NewFile, VirtualFile};
use crate::session::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Flat list of entries linked by `parent_id`.
pub struct VirtualFileSystem {
    files: Vec<VirtualFile>,
    next_file_id: u64,
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            next_file_id: 1,
        }
    }
}

impl VirtualFileSystem {
    /// Builds the starter tree created at sign-in.
    pub fn seeded_for(user: &User, now_ms: u64) -> Self {
        let mut vfs = Self::default();
        for request in seed_files(user) {
            vfs.create(request, now_ms);
        }
        vfs
    }

    /// Inserts a new entry and returns its id.
    pub fn create(&mut self, request: NewFile, now_ms: u64) -> FileId {
        let id = FileId(self.next_file_id);
        self.next_file_id = self.next_file_id.saturating_add(1);
        self.files.push(VirtualFile {
            id,
            name: request.name,
            kind: request.kind,
            content: request.content,
            parent_id: request.parent_id,
            created_ms: now_ms,
            modified_ms: now_ms,
            size: request.size,
            owner: request.owner,
        });
        id
    }

    /// Applies a partial update and bumps the modification time.
    ///
    /// Returns `false` when the id is unknown.
    pub fn update(&mut self, id: FileId, update: FileUpdate, now_ms: u64) -> bool {
        let Some(file) = self.files.iter_mut().find(|f| f.id == id) else {
            trace!(file_id = id.0, "ignoring update for unknown file");
            return false;
        };

        if let Some(name) = update.name {
            file.name = name;
        }
        if let Some(content) = update.content {
            file.content = Some(content);
        }
        if let Some(parent_id) = update.parent_id {
            file.parent_id = parent_id;
        }
        if let Some(size) = update.size {
            file.size = size;
        }
        file.modified_ms = now_ms;
        true
    }

    pub fn get(&self, id: FileId) -> Option<&VirtualFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// All entries in creation order.
    pub fn files(&self) -> &[VirtualFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Direct children of `parent_id` (`None` lists the root).
    pub fn children(&self, parent_id: Option<FileId>) -> impl Iterator<Item = &VirtualFile> {
        self.files.iter().filter(move |f| f.parent_id == parent_id)
    }

    /// Absolute path of an entry, e.g. `/Documents/Notes.txt`.
    pub fn path_of(&self, id: FileId) -> Option<String> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                return None;
            }
            let file = self.get(current)?;
            names.push(file.name.as_str());
            cursor = file.parent_id;
        }

        let mut path = "/".to_string();
        for name in names.into_iter().rev() {
            path = join_virtual_path(&path, name);
        }
        Some(path)
    }

    /// Resolves an absolute path to an entry by walking names from the root.
    pub fn find_by_path(&self, path: &str) -> Option<&VirtualFile> {
        let mut parent = None;
        let mut found = None;
        for segment in path_segments(path) {
            let entry = self
                .children(parent)
                .find(|f| f.name == segment)?;
            parent = Some(entry.id);
            found = Some(entry);
        }
        found
    }

    /// Sum of file sizes below a folder, recursively.
    pub fn folder_size(&self, id: FileId) -> u64 {
        let mut visited = HashSet::new();
        self.folder_size_inner(id, &mut visited)
    }

    fn folder_size_inner(&self, id: FileId, visited: &mut HashSet<FileId>) -> u64 {
        if !visited.insert(id) {
            return 0;
        }
        self.children(Some(id))
            .map(|child| {
                if child.is_folder() {
                    self.folder_size_inner(child.id, visited)
                } else {
                    child.size
                }
            })
            .sum()
    }

    /// First free name for a new entry, checked against every entry in the tree.
    pub fn next_available_name(&self, base: &str, style: NameStyle) -> String {
        let taken = |candidate: &str| self.files.iter().any(|f| f.name == candidate);
        if !taken(base) {
            return base.to_string();
        }

        let (stem, ext) = match (style, base.rsplit_once('.')) {
            (NameStyle::ParenthesizedBeforeExtension, Some((stem, ext))) if !stem.is_empty() => {
                (stem, Some(ext))
            }
            _ => (base, None),
        };

        let mut counter = 1u32;
        loop {
            let candidate = match (style, ext) {
                (NameStyle::Suffix, _) => format!("{base} {counter}"),
                (NameStyle::ParenthesizedBeforeExtension, Some(ext)) => {
                    format!("{stem} ({counter}).{ext}")
                }
                (NameStyle::ParenthesizedBeforeExtension, None) => format!("{stem} ({counter})"),
            };
            if !taken(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Entries every new session starts with.
pub fn seed_files(user: &User) -> Vec<NewFile> {
    let welcome = format!(
        "Welcome to WebOS, {}!\n\n\
         This is your personal workspace. Here's how to get started:\n\n\
         1. Click on app icons in the dock to launch applications\n\
         2. Use the File Explorer to manage your files\n\
         3. Try the Calculator for quick calculations\n\
         4. Customize your experience in Settings\n\n\
         Enjoy your WebOS experience!",
        user.username
    );

    vec![
        NewFile::folder("Documents", None).owned_by(user.id),
        NewFile::folder("Pictures", None).owned_by(user.id),
        NewFile::text("Welcome.txt", welcome, None).owned_by(user.id),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fs::types::FileKind;
    use crate::session::UserId;

    fn user() -> User {
        User {
            id: UserId(7),
            username: "ada".to_string(),
            created_ms: 0,
        }
    }

    #[test]
    fn seeded_tree_has_two_folders_and_welcome_note() {
        let vfs = VirtualFileSystem::seeded_for(&user(), 5);
        let names: Vec<_> = vfs.children(None).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Documents", "Pictures", "Welcome.txt"]);

        let welcome = vfs.find_by_path("/Welcome.txt").expect("welcome note");
        assert_eq!(welcome.kind, FileKind::File);
        assert_eq!(welcome.owner, Some(UserId(7)));
        assert!(welcome.content.as_deref().unwrap_or_default().contains("ada"));
        assert_eq!(welcome.created_ms, 5);
    }

    #[test]
    fn path_and_folder_size_follow_parent_links() {
        let mut vfs = VirtualFileSystem::default();
        let docs = vfs.create(NewFile::folder("Documents", None), 1);
        let notes = vfs.create(NewFile::folder("Notes", Some(docs)), 1);
        let a = vfs.create(NewFile::text("a.txt", "12345", Some(docs)), 1);
        vfs.create(NewFile::text("b.txt", "123", Some(notes)), 1);

        assert_eq!(vfs.path_of(a).as_deref(), Some("/Documents/a.txt"));
        assert_eq!(vfs.find_by_path("Documents/Notes/b.txt").map(|f| f.size), Some(3));
        assert_eq!(vfs.folder_size(docs), 8);
        assert_eq!(vfs.folder_size(notes), 3);
    }

    #[test]
    fn parent_cycles_do_not_hang_path_or_size() {
        let mut vfs = VirtualFileSystem::default();
        let a = vfs.create(NewFile::folder("a", None), 1);
        let b = vfs.create(NewFile::folder("b", Some(a)), 1);
        vfs.update(
            a,
            FileUpdate {
                parent_id: Some(Some(b)),
                ..FileUpdate::default()
            },
            2,
        );

        assert_eq!(vfs.path_of(a), None);
        assert_eq!(vfs.folder_size(a), 0);
    }

    #[test]
    fn update_bumps_modified_time_and_ignores_unknown_ids() {
        let mut vfs = VirtualFileSystem::default();
        let id = vfs.create(NewFile::text("draft.txt", "", None), 10);

        assert!(vfs.update(id, FileUpdate::content("hello"), 20));
        assert!(!vfs.update(FileId(404), FileUpdate::rename("x"), 30));

        let file = vfs.get(id).expect("file");
        assert_eq!(file.content.as_deref(), Some("hello"));
        assert_eq!(file.size, 5);
        assert_eq!(file.created_ms, 10);
        assert_eq!(file.modified_ms, 20);
    }

    #[test]
    fn next_available_name_matches_explorer_conventions() {
        let mut vfs = VirtualFileSystem::default();
        assert_eq!(vfs.next_available_name("New Folder", NameStyle::Suffix), "New Folder");

        vfs.create(NewFile::folder("New Folder", None), 1);
        vfs.create(NewFile::folder("New Folder 1", None), 1);
        assert_eq!(vfs.next_available_name("New Folder", NameStyle::Suffix), "New Folder 2");

        vfs.create(NewFile::text("New Text Document.txt", "", None), 1);
        assert_eq!(
            vfs.next_available_name(
                "New Text Document.txt",
                NameStyle::ParenthesizedBeforeExtension
            ),
            "New Text Document (1).txt"
        );
    }
}
