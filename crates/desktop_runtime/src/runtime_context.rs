//! Long-lived reducer container for a desktop session.
//!
//! Owns the [`SystemState`], the presentation-side [`InteractionState`], and the queue of
//! effects the reducer emits. Pointer helpers feed [`InteractionState`] output straight back
//! into [`DesktopRuntimeContext::dispatch_action`].

use platform_host::{Clock, SystemClock};
use tracing::debug;

use crate::config::DesktopConfig;
use crate::interaction::InteractionState;
use crate::model::{PointerPosition, Viewport, WindowId};
use crate::reducer::{reduce_system, ReducerContext, RuntimeEffect, SystemAction, SystemState};

#[derive(Debug)]
pub struct DesktopRuntimeContext<C: Clock = SystemClock> {
    config: DesktopConfig,
    clock: C,
    state: SystemState,
    interaction: InteractionState,
    effects: Vec<RuntimeEffect>,
}

impl Default for DesktopRuntimeContext<SystemClock> {
    fn default() -> Self {
        Self::new(DesktopConfig::default(), SystemClock)
    }
}

impl<C: Clock> DesktopRuntimeContext<C> {
    pub fn new(config: DesktopConfig, clock: C) -> Self {
        let state = SystemState::new(config.registry());
        Self {
            config,
            clock,
            state,
            interaction: InteractionState::default(),
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Applies an action and queues any effects it produced.
    pub fn dispatch_action(&mut self, action: SystemAction) {
        let ctx = ReducerContext::new(self.config.window, self.clock.now_ms());
        let transition = reduce_system(&self.state, action, &ctx);

        if transition.state.windows() != self.state.windows() {
            self.interaction.retain_open_windows(transition.state.windows());
        }
        if !transition.effects.is_empty() {
            debug!(count = transition.effects.len(), "queued runtime effects");
            self.effects.extend(transition.effects);
        }
        self.state = transition.state;
    }

    /// Takes all queued effects in emission order.
    pub fn drain_effects(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Pointer down on a window body.
    pub fn click_window(&mut self, window_id: WindowId) {
        let action = self
            .state
            .windows()
            .window(window_id)
            .and_then(|window| self.interaction.click_window(window));
        if let Some(action) = action {
            self.dispatch_action(action);
        }
    }

    /// Pointer down on a title bar. Returns whether a drag started.
    pub fn begin_drag(&mut self, window_id: WindowId, pointer: PointerPosition) -> bool {
        match self.state.windows.window(window_id) {
            Some(window) => self.interaction.begin_drag(window, pointer),
            None => false,
        }
    }

    /// Pointer down on a resize handle. Returns whether a resize started.
    pub fn begin_resize(&mut self, window_id: WindowId, pointer: PointerPosition) -> bool {
        match self.state.windows.window(window_id) {
            Some(window) => self.interaction.begin_resize(window, pointer),
            None => false,
        }
    }

    pub fn pointer_moved(&mut self, pointer: PointerPosition, viewport: Viewport) {
        if let Some(action) = self.interaction.pointer_moved(pointer, viewport) {
            self.dispatch_action(action);
        }
    }

    pub fn pointer_released(&mut self) {
        self.interaction.pointer_released();
    }

    /// Maximize button or title-bar double click, leaving the configured taskbar strip free.
    pub fn toggle_maximize(&mut self, window_id: WindowId, viewport: Viewport) {
        let reserved = self.config.taskbar.height;
        let action = match self.state.windows.window(window_id) {
            Some(window) => self.interaction.toggle_maximize(window, viewport, reserved),
            None => None,
        };
        if let Some(action) = action {
            self.dispatch_action(action);
        }
    }
}
