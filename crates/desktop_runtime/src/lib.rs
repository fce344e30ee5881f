//! Headless window-manager core for the simulated desktop.
//!
//! [`window_manager`] holds the pure window commands, [`reducer`] routes system actions through
//! them, and [`runtime_context::DesktopRuntimeContext`] owns the live state for a session.

pub mod apps;
pub mod config;
pub mod dock;
pub mod interaction;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod window_manager;

pub use apps::{AppDescriptor, AppRegistry};
pub use config::{ConfigError, DesktopConfig, TaskbarConfig};
pub use dock::{dock_items, dock_launch_action, taskbar_entries, DockItem, TaskbarEntry};
pub use interaction::{DragSession, InteractionState, ResizeSession};
pub use model::*;
pub use reducer::{
    build_open_action_for_file, reduce_system, ReducerContext, RuntimeEffect, SystemAction,
    SystemState, Transition,
};
pub use runtime_context::DesktopRuntimeContext;
pub use window_manager::{clamp_position, clamp_size, WindowManager, WindowPolicy};
