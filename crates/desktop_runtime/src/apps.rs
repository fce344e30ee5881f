//! Installed-application registry consulted when windows open.
//!
//! The built-in table is generated from `app_registry.toml` at build time; configuration may
//! replace it with its own `[[apps]]` list. Either way the registry is read-only at runtime.

use serde::{Deserialize, Serialize};

use crate::model::{AppId, WindowSize};

/// Row of the build-time generated table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltinApp {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub component: &'static str,
    pub width: i32,
    pub height: i32,
}

include!(concat!(env!("OUT_DIR"), "/app_registry_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub id: AppId,
    /// Display name; becomes the window title.
    pub name: String,
    pub icon: String,
    /// Key the presentation layer uses to pick the hosted component.
    #[serde(rename = "component")]
    pub component_key: String,
    pub default_size: WindowSize,
}

impl From<&BuiltinApp> for AppDescriptor {
    fn from(app: &BuiltinApp) -> Self {
        Self {
            id: AppId::new(app.id),
            name: app.name.to_string(),
            icon: app.icon.to_string(),
            component_key: app.component.to_string(),
            default_size: WindowSize::new(app.width, app.height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AppRegistry {
    /// Registry with the apps shipped in `app_registry.toml`.
    pub fn builtin() -> Self {
        Self {
            apps: BUILTIN_APPS.iter().map(AppDescriptor::from).collect(),
        }
    }

    pub fn from_descriptors(apps: Vec<AppDescriptor>) -> Self {
        Self { apps }
    }

    pub fn find_app(&self, app_id: &AppId) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| &app.id == app_id)
    }

    /// First app whose component key matches.
    pub fn find_by_component(&self, component_key: &str) -> Option<&AppDescriptor> {
        self.apps
            .iter()
            .find(|app| app.component_key == component_key)
    }

    /// Apps in dock order.
    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

pub const FILE_EXPLORER_APP_ID: &str = "fileExplorer";
pub const TEXT_EDITOR_APP_ID: &str = "textEditor";
pub const IMAGE_VIEWER_APP_ID: &str = "imageViewer";
