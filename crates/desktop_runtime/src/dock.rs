//! Read-only dock and taskbar projections plus dock click routing.

use serde_json::Value;

use crate::apps::{AppDescriptor, AppRegistry};
use crate::model::{AppId, WindowId, WindowRecord, WindowStore};
use crate::reducer::SystemAction;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One dock button.
pub struct DockItem<'a> {
    pub app: &'a AppDescriptor,
    /// A non-minimized window of this app exists.
    pub is_open: bool,
    /// A window of this app holds focus.
    pub is_active: bool,
}

impl DockItem<'_> {
    /// The "running" dot is shown for open apps that are not focused.
    pub fn shows_indicator(&self) -> bool {
        self.is_open && !self.is_active
    }
}

/// Dock buttons in registry order.
///
/// Windows are matched to apps by component key, so apps sharing a component light up together.
pub fn dock_items<'a>(windows: &WindowStore, registry: &'a AppRegistry) -> Vec<DockItem<'a>> {
    registry
        .iter()
        .map(|app| {
            let (is_open, is_active) = windows
                .windows()
                .iter()
                .filter(|w| w.component_key == app.component_key)
                .fold((false, false), |(open, active), w| {
                    (open || !w.is_minimized, active || w.is_active)
                });
            DockItem {
                app,
                is_open,
                is_active,
            }
        })
        .collect()
}

/// Chooses what a dock click on `app_id` does.
///
/// The first window of the app is un-minimized (if minimized) or focused; without one a new
/// window opens. Returns `None` for apps missing from the registry.
pub fn dock_launch_action(
    windows: &WindowStore,
    registry: &AppRegistry,
    app_id: &AppId,
) -> Option<SystemAction> {
    let app = registry.find_app(app_id)?;
    let existing = windows
        .windows()
        .iter()
        .find(|w| w.component_key == app.component_key);

    Some(match existing {
        Some(window) if window.is_minimized => SystemAction::MaximizeWindow {
            window_id: window.id,
            position: None,
            size: None,
        },
        Some(window) => SystemAction::SetActiveWindow {
            window_id: window.id,
        },
        None => SystemAction::OpenWindow {
            app_id: app.id.clone(),
            params: Value::Null,
        },
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One taskbar button.
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub title: String,
    pub icon: String,
    pub is_minimized: bool,
    pub is_active: bool,
}

impl From<&WindowRecord> for TaskbarEntry {
    fn from(window: &WindowRecord) -> Self {
        Self {
            window_id: window.id,
            title: window.title.clone(),
            icon: window.icon.clone(),
            is_minimized: window.is_minimized,
            is_active: window.is_active,
        }
    }
}

/// Taskbar buttons in the order windows were opened.
pub fn taskbar_entries(windows: &WindowStore) -> Vec<TaskbarEntry> {
    let mut entries: Vec<TaskbarEntry> = windows.windows().iter().map(TaskbarEntry::from).collect();
    entries.sort_by_key(|entry| entry.window_id);
    entries
}
