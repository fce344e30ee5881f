//! In-memory notification list shown by the taskbar tray.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Identifier of a notification.
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Severity/flavor of a notification.
pub enum NotificationKind {
    /// Neutral information.
    #[default]
    Info,
    /// Completed operation.
    Success,
    /// Recoverable problem.
    Warning,
    /// Failed operation.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single notification entry.
pub struct Notification {
    /// Entry id.
    pub id: NotificationId,
    /// Entry flavor.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Creation time in unix milliseconds.
    pub timestamp_ms: u64,
    /// Whether the user has acknowledged the entry.
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Notification list, newest entry first.
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl NotificationCenter {
    /// Prepends a new unread notification and returns its id.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        timestamp_ms: u64,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.items.insert(
            0,
            Notification {
                id,
                kind,
                title: title.into(),
                message: message.into(),
                timestamp_ms,
                is_read: false,
            },
        );
        id
    }

    /// Marks a notification as read. Returns `false` when the id is unknown.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    /// All notifications, newest first.
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    /// Unread notifications, newest first.
    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|n| !n.is_read)
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.unread().count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
