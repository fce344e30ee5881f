//! Presentation-side pointer state that turns raw pointer events into window commands.
//!
//! Drags, resizes and pre-maximize geometry live here rather than in the window store; the
//! window manager only ever sees the discrete commands produced below.

use std::collections::HashMap;

use crate::model::{
    PointerPosition, Viewport, WindowGeometry, WindowId, WindowPosition, WindowRecord, WindowSize,
    WindowStore,
};
use crate::reducer::SystemAction;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Title-bar drag in progress.
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position relative to the window origin when the drag began.
    pub offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Corner-handle resize in progress.
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub size_start: WindowSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
    restore_geometry: HashMap<WindowId, WindowGeometry>,
}

impl InteractionState {
    /// Clicking anywhere on an unfocused window focuses it.
    pub fn click_window(&self, window: &WindowRecord) -> Option<SystemAction> {
        (!window.is_active).then_some(SystemAction::SetActiveWindow {
            window_id: window.id,
        })
    }

    /// Starts a title-bar drag. Maximized windows cannot be dragged.
    pub fn begin_drag(&mut self, window: &WindowRecord, pointer: PointerPosition) -> bool {
        if window.is_maximized {
            return false;
        }
        self.resizing = None;
        self.dragging = Some(DragSession {
            window_id: window.id,
            offset: PointerPosition::new(
                pointer.x.saturating_sub(window.position.x),
                pointer.y.saturating_sub(window.position.y),
            ),
        });
        true
    }

    /// Starts a resize from the bottom-right handle. Maximized windows cannot be resized.
    pub fn begin_resize(&mut self, window: &WindowRecord, pointer: PointerPosition) -> bool {
        if window.is_maximized {
            return false;
        }
        self.dragging = None;
        self.resizing = Some(ResizeSession {
            window_id: window.id,
            pointer_start: pointer,
            size_start: window.size,
        });
        true
    }

    /// Translates a pointer move into a geometry command for the active session.
    ///
    /// Requested geometry is unclamped; bounding it to `viewport` is the window manager's job.
    pub fn pointer_moved(&self, pointer: PointerPosition, viewport: Viewport) -> Option<SystemAction> {
        if let Some(drag) = &self.dragging {
            return Some(SystemAction::UpdateWindowPosition {
                window_id: drag.window_id,
                position: WindowPosition::new(
                    pointer.x.saturating_sub(drag.offset.x),
                    pointer.y.saturating_sub(drag.offset.y),
                ),
                viewport,
            });
        }

        let resize = self.resizing.as_ref()?;
        Some(SystemAction::UpdateWindowSize {
            window_id: resize.window_id,
            size: WindowSize::new(
                resize
                    .size_start
                    .width
                    .saturating_add(pointer.x.saturating_sub(resize.pointer_start.x)),
                resize
                    .size_start
                    .height
                    .saturating_add(pointer.y.saturating_sub(resize.pointer_start.y)),
            ),
            viewport,
        })
    }

    pub fn pointer_released(&mut self) {
        self.dragging = None;
        self.resizing = None;
    }

    pub fn is_interacting(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }

    /// Maximize button / title-bar double click.
    ///
    /// Maximizing snapshots the current geometry and fills the viewport above the
    /// `reserved_height` strip; a maximized window with a snapshot is restored from it.
    pub fn toggle_maximize(
        &mut self,
        window: &WindowRecord,
        viewport: Viewport,
        reserved_height: i32,
    ) -> Option<SystemAction> {
        if !window.is_maximized {
            self.restore_geometry.insert(window.id, window.geometry());
            let area = viewport.work_area(reserved_height);
            return Some(SystemAction::MaximizeWindow {
                window_id: window.id,
                position: Some(area.position),
                size: Some(area.size),
            });
        }

        let snapshot = self.restore_geometry.remove(&window.id)?;
        Some(SystemAction::RestoreWindow {
            window_id: window.id,
            position: snapshot.position,
            size: snapshot.size,
        })
    }

    /// Pre-maximize geometry kept for a window, if any.
    pub fn restore_geometry(&self, window_id: WindowId) -> Option<WindowGeometry> {
        self.restore_geometry.get(&window_id).copied()
    }

    /// Drops sessions and snapshots that refer to windows no longer in `store`.
    pub fn retain_open_windows(&mut self, store: &WindowStore) {
        let is_open = |id: WindowId| store.window(id).is_some();
        if self.dragging.as_ref().is_some_and(|d| !is_open(d.window_id)) {
            self.dragging = None;
        }
        if self.resizing.as_ref().is_some_and(|r| !is_open(r.window_id)) {
            self.resizing = None;
        }
        self.restore_geometry.retain(|id, _| is_open(*id));
    }
}
