//! Window lifecycle, focus/z-order policy and geometry clamping.
//!
//! Every command reads a [`WindowStore`] and returns the next one. Unknown window or app ids
//! return an unchanged copy; out-of-bounds geometry is clamped. Nothing here fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::apps::AppRegistry;
use crate::model::{
    AppId, Viewport, WindowId, WindowPosition, WindowRecord, WindowSize, WindowStore,
};

/// Minimum usable window width.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum usable window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Where newly opened windows are placed.
pub const DEFAULT_WINDOW_POSITION: WindowPosition = WindowPosition::new(100, 100);

/// Placement and sizing constants applied by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowPolicy {
    pub default_position: WindowPosition,
    pub min_size: WindowSize,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            default_position: DEFAULT_WINDOW_POSITION,
            min_size: WindowSize::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
        }
    }
}

/// Keeps the whole window rectangle inside the viewport.
///
/// When the window is larger than the viewport the origin is pinned to `0`. Arithmetic
/// saturates, so extreme stored geometry still clamps instead of overflowing.
pub fn clamp_position(position: WindowPosition, size: WindowSize, viewport: Viewport) -> WindowPosition {
    WindowPosition {
        x: position.x.min(viewport.width.saturating_sub(size.width)).max(0),
        y: position.y.min(viewport.height.saturating_sub(size.height)).max(0),
    }
}

/// Bounds a requested size by the space right/below `position`, then by the minimum size.
///
/// The minimum wins when both cannot be met.
pub fn clamp_size(
    size: WindowSize,
    position: WindowPosition,
    viewport: Viewport,
    min_size: WindowSize,
) -> WindowSize {
    WindowSize {
        width: size
            .width
            .min(viewport.width.saturating_sub(position.x))
            .max(min_size.width),
        height: size
            .height
            .min(viewport.height.saturating_sub(position.y))
            .max(min_size.height),
    }
}

/// Command surface over [`WindowStore`] values.
#[derive(Debug, Clone, Copy)]
pub struct WindowManager<'a> {
    registry: &'a AppRegistry,
    policy: WindowPolicy,
}

impl<'a> WindowManager<'a> {
    pub fn new(registry: &'a AppRegistry, policy: WindowPolicy) -> Self {
        Self { registry, policy }
    }

    /// Opens a window for `app_id` on top of the stack and focuses it.
    pub fn open(&self, store: &WindowStore, app_id: &AppId, params: Value) -> WindowStore {
        let Some(app) = self.registry.find_app(app_id) else {
            trace!(app_id = %app_id, "ignoring open for unknown app");
            return store.clone();
        };

        let mut next = store.clone();
        let z_index = allocate_z_index(&mut next);
        let window_id = WindowId(next.next_window_id);
        next.next_window_id = next.next_window_id.saturating_add(1);

        next.windows.push(WindowRecord {
            id: window_id,
            app_id: app.id.clone(),
            title: app.name.clone(),
            icon: app.icon.clone(),
            component_key: app.component_key.clone(),
            position: self.policy.default_position,
            size: app.default_size,
            is_active: false,
            is_minimized: false,
            is_maximized: false,
            z_index,
            params,
        });
        set_active_window(&mut next, Some(window_id));
        debug!(window_id = window_id.0, app_id = %app_id, z_index, "opened window");
        next
    }

    /// Removes a window. Closing the active window focuses the highest remaining window,
    /// minimized or not.
    pub fn close(&self, store: &WindowStore, window_id: WindowId) -> WindowStore {
        let Some(index) = store.windows.iter().position(|w| w.id == window_id) else {
            trace!(window_id = window_id.0, "ignoring close for unknown window");
            return store.clone();
        };

        let mut next = store.clone();
        next.windows.remove(index);

        let active = if next.windows.is_empty() {
            None
        } else if store.active_window_id == Some(window_id) {
            topmost(next.windows.iter())
        } else {
            store.active_window_id
        };
        set_active_window(&mut next, active);
        debug!(window_id = window_id.0, active = ?active.map(|id| id.0), "closed window");
        next
    }

    /// Hides a window and hands focus to the highest other non-minimized window, if any.
    pub fn minimize(&self, store: &WindowStore, window_id: WindowId) -> WindowStore {
        if store.window(window_id).is_none() {
            trace!(window_id = window_id.0, "ignoring minimize for unknown window");
            return store.clone();
        }

        let active = topmost(
            store
                .windows
                .iter()
                .filter(|w| w.id != window_id && !w.is_minimized),
        );

        let mut next = store.clone();
        if let Some(window) = window_mut(&mut next, window_id) {
            window.is_minimized = true;
        }
        set_active_window(&mut next, active);
        debug!(window_id = window_id.0, active = ?active.map(|id| id.0), "minimized window");
        next
    }

    /// Raises, un-minimizes and focuses a window, storing any caller-computed geometry.
    ///
    /// Supplying geometry marks the window maximized. The previous geometry is not kept here;
    /// the caller passes it back through [`WindowManager::restore`].
    pub fn maximize(
        &self,
        store: &WindowStore,
        window_id: WindowId,
        position: Option<WindowPosition>,
        size: Option<WindowSize>,
    ) -> WindowStore {
        if store.window(window_id).is_none() {
            trace!(window_id = window_id.0, "ignoring maximize for unknown window");
            return store.clone();
        }

        let mut next = store.clone();
        let z_index = allocate_z_index(&mut next);
        if let Some(window) = window_mut(&mut next, window_id) {
            window.is_minimized = false;
            window.z_index = z_index;
            if let Some(position) = position {
                window.position = position;
            }
            if let Some(size) = size {
                window.size = size;
            }
            if position.is_some() || size.is_some() {
                window.is_maximized = true;
            }
        }
        set_active_window(&mut next, Some(window_id));
        debug!(window_id = window_id.0, z_index, "maximized window");
        next
    }

    /// Applies caller-owned pre-maximize geometry and clears the maximized flag.
    pub fn restore(
        &self,
        store: &WindowStore,
        window_id: WindowId,
        position: WindowPosition,
        size: WindowSize,
    ) -> WindowStore {
        if store.window(window_id).is_none() {
            trace!(window_id = window_id.0, "ignoring restore for unknown window");
            return store.clone();
        }

        let mut next = store.clone();
        if let Some(window) = window_mut(&mut next, window_id) {
            window.position = position;
            window.size = size;
            window.is_maximized = false;
        }
        debug!(window_id = window_id.0, "restored window geometry");
        next
    }

    /// Raises and focuses a window without touching any minimized flag.
    pub fn set_active(&self, store: &WindowStore, window_id: WindowId) -> WindowStore {
        if store.window(window_id).is_none() {
            trace!(window_id = window_id.0, "ignoring focus for unknown window");
            return store.clone();
        }

        let mut next = store.clone();
        let z_index = allocate_z_index(&mut next);
        if let Some(window) = window_mut(&mut next, window_id) {
            window.z_index = z_index;
        }
        set_active_window(&mut next, Some(window_id));
        debug!(window_id = window_id.0, z_index, "focused window");
        next
    }

    /// Moves a window, keeping its current rectangle inside `viewport`.
    pub fn move_window(
        &self,
        store: &WindowStore,
        window_id: WindowId,
        position: WindowPosition,
        viewport: Viewport,
    ) -> WindowStore {
        let mut next = store.clone();
        match window_mut(&mut next, window_id) {
            Some(window) => window.position = clamp_position(position, window.size, viewport),
            None => trace!(window_id = window_id.0, "ignoring move for unknown window"),
        }
        next
    }

    /// Resizes a window within `viewport` and not below the policy minimum.
    pub fn resize(
        &self,
        store: &WindowStore,
        window_id: WindowId,
        size: WindowSize,
        viewport: Viewport,
    ) -> WindowStore {
        let min_size = self.policy.min_size;
        let mut next = store.clone();
        match window_mut(&mut next, window_id) {
            Some(window) => window.size = clamp_size(size, window.position, viewport, min_size),
            None => trace!(window_id = window_id.0, "ignoring resize for unknown window"),
        }
        next
    }
}

/// The counter is 64-bit; saturating at `u64::MAX` would take centuries of allocations, so
/// every index handed out is unique and above the previous maximum.
fn allocate_z_index(store: &mut WindowStore) -> u64 {
    store.max_z_index = store.max_z_index.saturating_add(1);
    store.max_z_index
}

fn window_mut(store: &mut WindowStore, window_id: WindowId) -> Option<&mut WindowRecord> {
    store.windows.iter_mut().find(|w| w.id == window_id)
}

fn topmost<'w>(windows: impl Iterator<Item = &'w WindowRecord>) -> Option<WindowId> {
    windows.max_by_key(|w| w.z_index).map(|w| w.id)
}

/// Records the active id and makes it the only window flagged active.
fn set_active_window(store: &mut WindowStore, active: Option<WindowId>) {
    store.active_window_id = active;
    for window in &mut store.windows {
        window.is_active = Some(window.id) == active;
    }
}
