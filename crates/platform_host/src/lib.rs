//! Host-domain models the desktop runtime treats as external collaborators.
//!
//! The window manager never inspects these types; the system reducer threads them through
//! sign-in, file and notification actions. Everything here is in-memory and lost on reload.

#![warn(rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod notifications;
pub mod session;
pub mod time;

pub use fs::path::{join_virtual_path, path_segments};
pub use fs::store::{seed_files, VirtualFileSystem};
pub use fs::types::{FileId, FileKind, FileUpdate, NameStyle, NewFile, VirtualFile};
pub use notifications::{Notification, NotificationCenter, NotificationId, NotificationKind};
pub use session::{normalize_username, User, UserId};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now, Clock, FixedClock, SystemClock};
