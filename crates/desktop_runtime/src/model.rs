//! Window entity store: window records, geometry types and the read-only query surface.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

/// Registry key of an installed application, e.g. `textEditor`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Position plus size, as snapshotted by the presentation layer before maximizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub position: WindowPosition,
    pub size: WindowSize,
}

/// Visible desktop area reported by the presentation layer at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Full-width rectangle above a bottom-reserved strip (taskbar/dock chrome).
    pub fn work_area(self, reserved_height: i32) -> WindowGeometry {
        WindowGeometry {
            position: WindowPosition::new(0, 0),
            size: WindowSize::new(self.width, self.height.saturating_sub(reserved_height).max(0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One open window.
///
/// `title`, `icon` and `component_key` are copied from the registry when the window opens and
/// do not follow later registry changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub icon: String,
    pub component_key: String,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub is_active: bool,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u64,
    /// Opaque payload for the hosted app.
    pub params: Value,
}

impl WindowRecord {
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            position: self.position,
            size: self.size,
        }
    }
}

/// Open windows plus the z-index allocation counter.
///
/// Fields are only mutated by [`crate::window_manager`]; everything else reads through the
/// accessors below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStore {
    pub(crate) windows: Vec<WindowRecord>,
    pub(crate) active_window_id: Option<WindowId>,
    pub(crate) max_z_index: u64,
    pub(crate) next_window_id: u64,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            max_z_index: 0,
            next_window_id: 1,
        }
    }
}

impl WindowStore {
    /// All windows in open order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active_window_id
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id.and_then(|id| self.window(id))
    }

    /// Highest z-index ever allocated; never decreases.
    pub fn max_z_index(&self) -> u64 {
        self.max_z_index
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows with the given minimized flag, in open order.
    pub fn windows_by_minimized(&self, minimized: bool) -> impl Iterator<Item = &WindowRecord> {
        self.windows
            .iter()
            .filter(move |w| w.is_minimized == minimized)
    }

    pub fn minimized_windows(&self) -> Vec<&WindowRecord> {
        self.windows_by_minimized(true).collect()
    }

    /// Non-minimized windows, bottom of the stack first.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<_> = self.windows_by_minimized(false).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }
}
