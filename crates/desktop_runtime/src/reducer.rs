//! System actions, side-effect intents, and the transition function for the whole desktop.
//!
//! Window commands are delegated to [`WindowManager`]; session, file and notification actions
//! operate on the host models from `platform_host`.

use platform_host::{
    normalize_username, FileId, FileUpdate, NewFile, NotificationCenter, NotificationId,
    NotificationKind, User, UserId, VirtualFileSystem,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::apps::{AppRegistry, FILE_EXPLORER_APP_ID, IMAGE_VIEWER_APP_ID, TEXT_EDITOR_APP_ID};
use crate::dock::dock_launch_action;
use crate::model::{AppId, Viewport, WindowId, WindowPosition, WindowSize, WindowStore};
use crate::window_manager::{WindowManager, WindowPolicy};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_system`].
pub enum SystemAction {
    /// Open a window for a registered app.
    OpenWindow {
        app_id: AppId,
        /// Opaque payload forwarded to the app.
        params: Value,
    },
    CloseWindow {
        window_id: WindowId,
    },
    MinimizeWindow {
        window_id: WindowId,
    },
    /// Raise/un-minimize a window, optionally pinning caller-computed maximized geometry.
    MaximizeWindow {
        window_id: WindowId,
        position: Option<WindowPosition>,
        size: Option<WindowSize>,
    },
    /// Put back caller-owned pre-maximize geometry.
    RestoreWindow {
        window_id: WindowId,
        position: WindowPosition,
        size: WindowSize,
    },
    SetActiveWindow {
        window_id: WindowId,
    },
    UpdateWindowPosition {
        window_id: WindowId,
        position: WindowPosition,
        viewport: Viewport,
    },
    UpdateWindowSize {
        window_id: WindowId,
        size: WindowSize,
        viewport: Viewport,
    },
    /// Dock icon click: focus, un-minimize, or open the app.
    LaunchFromDock {
        app_id: AppId,
    },
    /// Open a virtual file with the app that handles its kind.
    OpenFile {
        file_id: FileId,
    },
    AddNotification {
        kind: NotificationKind,
        title: String,
        message: String,
    },
    MarkNotificationRead {
        notification_id: NotificationId,
    },
    ToggleNightMode,
    CreateFile {
        file: NewFile,
    },
    UpdateFile {
        file_id: FileId,
        update: FileUpdate,
    },
    /// Sign in and seed the starter file tree.
    LoginUser {
        username: String,
    },
    /// Drop the session and everything in it except the app registry.
    LogoutUser,
}

impl SystemAction {
    /// Open request without launch parameters.
    pub fn open(app_id: impl Into<String>) -> Self {
        Self::OpenWindow {
            app_id: AppId::new(app_id),
            params: Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents for the presentation layer to execute after a transition.
pub enum RuntimeEffect {
    /// Switch the document color scheme.
    ApplyColorScheme { dark: bool },
    /// Move keyboard focus into the newly active window.
    FocusWindowInput(WindowId),
}

/// Inputs a transition needs besides the state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReducerContext {
    pub policy: WindowPolicy,
    /// Timestamp stamped onto created/modified records.
    pub now_ms: u64,
}

impl ReducerContext {
    pub fn new(policy: WindowPolicy, now_ms: u64) -> Self {
        Self { policy, now_ms }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Complete desktop state owned by the runtime.
pub struct SystemState {
    pub(crate) windows: WindowStore,
    pub(crate) apps: AppRegistry,
    pub(crate) files: VirtualFileSystem,
    pub(crate) notifications: NotificationCenter,
    pub(crate) is_night_mode: bool,
    pub(crate) user: Option<User>,
    pub(crate) next_user_id: u64,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new(AppRegistry::builtin())
    }
}

impl SystemState {
    pub fn new(apps: AppRegistry) -> Self {
        Self {
            windows: WindowStore::default(),
            apps,
            files: VirtualFileSystem::default(),
            notifications: NotificationCenter::default(),
            is_night_mode: false,
            user: None,
            next_user_id: 1,
        }
    }

    pub fn windows(&self) -> &WindowStore {
        &self.windows
    }

    pub fn apps(&self) -> &AppRegistry {
        &self.apps
    }

    pub fn files(&self) -> &VirtualFileSystem {
        &self.files
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn is_night_mode(&self) -> bool {
        self.is_night_mode
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the login gate should be shown instead of the desktop.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of [`reduce_system`].
pub struct Transition {
    pub state: SystemState,
    pub effects: Vec<RuntimeEffect>,
}

/// Applies a [`SystemAction`] and returns the next state plus the effects it implies.
///
/// Actions that reference unknown windows, apps, files or notifications produce an unchanged
/// state.
pub fn reduce_system(
    state: &SystemState,
    action: SystemAction,
    ctx: &ReducerContext,
) -> Transition {
    let wm = WindowManager::new(&state.apps, ctx.policy);
    let mut next = state.clone();

    match action {
        SystemAction::OpenWindow { app_id, params } => {
            next.windows = wm.open(&state.windows, &app_id, params);
        }
        SystemAction::CloseWindow { window_id } => {
            next.windows = wm.close(&state.windows, window_id);
        }
        SystemAction::MinimizeWindow { window_id } => {
            next.windows = wm.minimize(&state.windows, window_id);
        }
        SystemAction::MaximizeWindow {
            window_id,
            position,
            size,
        } => {
            next.windows = wm.maximize(&state.windows, window_id, position, size);
        }
        SystemAction::RestoreWindow {
            window_id,
            position,
            size,
        } => {
            next.windows = wm.restore(&state.windows, window_id, position, size);
        }
        SystemAction::SetActiveWindow { window_id } => {
            next.windows = wm.set_active(&state.windows, window_id);
        }
        SystemAction::UpdateWindowPosition {
            window_id,
            position,
            viewport,
        } => {
            next.windows = wm.move_window(&state.windows, window_id, position, viewport);
        }
        SystemAction::UpdateWindowSize {
            window_id,
            size,
            viewport,
        } => {
            next.windows = wm.resize(&state.windows, window_id, size, viewport);
        }
        SystemAction::LaunchFromDock { app_id } => {
            return match dock_launch_action(&state.windows, &state.apps, &app_id) {
                Some(routed) => reduce_system(state, routed, ctx),
                None => unchanged(state),
            };
        }
        SystemAction::OpenFile { file_id } => {
            return match build_open_action_for_file(&state.files, file_id) {
                Some(routed) => reduce_system(state, routed, ctx),
                None => unchanged(state),
            };
        }
        SystemAction::AddNotification {
            kind,
            title,
            message,
        } => {
            next.notifications.push(kind, title, message, ctx.now_ms);
        }
        SystemAction::MarkNotificationRead { notification_id } => {
            next.notifications.mark_read(notification_id);
        }
        SystemAction::ToggleNightMode => {
            next.is_night_mode = !state.is_night_mode;
        }
        SystemAction::CreateFile { file } => {
            next.files.create(file, ctx.now_ms);
        }
        SystemAction::UpdateFile { file_id, update } => {
            next.files.update(file_id, update, ctx.now_ms);
        }
        SystemAction::LoginUser { username } => {
            let Some(username) = normalize_username(&username) else {
                warn!("ignoring login with blank username");
                return unchanged(state);
            };
            let user = User {
                id: UserId(state.next_user_id),
                username,
                created_ms: ctx.now_ms,
            };
            next.next_user_id = state.next_user_id.saturating_add(1);
            next.files = VirtualFileSystem::seeded_for(&user, ctx.now_ms);
            debug!(user = %user.id, files = next.files.len(), "signed in");
            next.user = Some(user);
        }
        SystemAction::LogoutUser => {
            next = SystemState {
                next_user_id: state.next_user_id,
                ..SystemState::new(state.apps.clone())
            };
            debug!("signed out");
        }
    }

    let effects = collect_effects(state, &next);
    Transition {
        state: next,
        effects,
    }
}

/// Maps a virtual file to the action that opens it, if any app handles it.
///
/// Folders open in the file explorer, `.txt` files in the text editor, and common image
/// formats in the image viewer.
pub fn build_open_action_for_file(files: &VirtualFileSystem, file_id: FileId) -> Option<SystemAction> {
    let file = files.get(file_id)?;
    let (app_id, params) = if file.is_folder() {
        (FILE_EXPLORER_APP_ID, json!({ "currentFolderId": file.id.0 }))
    } else if file.name.ends_with(".txt") {
        (TEXT_EDITOR_APP_ID, json!({ "fileId": file.id.0 }))
    } else if file
        .extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    {
        (IMAGE_VIEWER_APP_ID, json!({ "fileId": file.id.0 }))
    } else {
        return None;
    };

    Some(SystemAction::OpenWindow {
        app_id: AppId::new(app_id),
        params,
    })
}

fn unchanged(state: &SystemState) -> Transition {
    Transition {
        state: state.clone(),
        effects: Vec::new(),
    }
}

fn collect_effects(previous: &SystemState, next: &SystemState) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    if previous.is_night_mode != next.is_night_mode {
        effects.push(RuntimeEffect::ApplyColorScheme {
            dark: next.is_night_mode,
        });
    }
    let active = next.windows.active_window_id();
    if active != previous.windows.active_window_id() {
        if let Some(window_id) = active {
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use platform_host::FileKind;
    use pretty_assertions::assert_eq;

    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    fn ctx() -> ReducerContext {
        ReducerContext::new(WindowPolicy::default(), NOW)
    }

    fn apply(state: &SystemState, action: SystemAction) -> Transition {
        reduce_system(state, action, &ctx())
    }

    fn signed_in() -> SystemState {
        apply(
            &SystemState::default(),
            SystemAction::LoginUser {
                username: "  ada ".to_string(),
            },
        )
        .state
    }

    #[test]
    fn login_creates_user_and_seed_files() {
        let state = signed_in();
        let user = state.user().expect("user");
        assert_eq!(user.username, "ada");
        assert_eq!(user.created_ms, NOW);
        assert!(state.is_signed_in());

        let names: Vec<_> = state.files().children(None).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Documents", "Pictures", "Welcome.txt"]);
        assert!(state.files().files().iter().all(|f| f.owner == Some(user.id)));
    }

    #[test]
    fn blank_login_is_ignored() {
        let transition = apply(
            &SystemState::default(),
            SystemAction::LoginUser {
                username: "   ".to_string(),
            },
        );
        assert_eq!(transition.state, SystemState::default());
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn logout_resets_everything_but_the_registry() {
        let registry = AppRegistry::from_descriptors(
            AppRegistry::builtin().iter().take(2).cloned().collect(),
        );
        let state = apply(
            &SystemState::new(registry.clone()),
            SystemAction::LoginUser {
                username: "ada".to_string(),
            },
        )
        .state;
        let state = apply(&state, SystemAction::open("textEditor")).state;
        let state = apply(&state, SystemAction::ToggleNightMode).state;

        let transition = apply(&state, SystemAction::LogoutUser);
        let state = transition.state;
        assert!(state.user().is_none());
        assert!(state.windows().is_empty());
        assert!(state.files().is_empty());
        assert!(!state.is_night_mode());
        assert_eq!(state.apps(), &registry);
        assert_eq!(
            transition.effects,
            vec![RuntimeEffect::ApplyColorScheme { dark: false }]
        );

        let again = apply(
            &state,
            SystemAction::LoginUser {
                username: "grace".to_string(),
            },
        )
        .state;
        assert_eq!(again.user().map(|u| u.id), Some(UserId(2)));
    }

    #[test]
    fn opening_window_requests_input_focus() {
        let transition = apply(&signed_in(), SystemAction::open("calculator"));
        let window_id = transition
            .state
            .windows()
            .active_window_id()
            .expect("active window");
        assert_eq!(
            transition.effects,
            vec![RuntimeEffect::FocusWindowInput(window_id)]
        );
    }

    #[test]
    fn unknown_app_produces_no_change_and_no_effects() {
        let state = signed_in();
        let transition = apply(&state, SystemAction::open("doesNotExist"));
        assert_eq!(transition.state, state);
        assert!(transition.effects.is_empty());
    }

    #[test]
    fn night_mode_toggle_emits_color_scheme() {
        let transition = apply(&SystemState::default(), SystemAction::ToggleNightMode);
        assert!(transition.state.is_night_mode());
        assert_eq!(
            transition.effects,
            vec![RuntimeEffect::ApplyColorScheme { dark: true }]
        );
    }

    #[test]
    fn notifications_are_stamped_and_marked_read() {
        let state = apply(
            &SystemState::default(),
            SystemAction::AddNotification {
                kind: NotificationKind::Success,
                title: "Saved".to_string(),
                message: "Welcome.txt saved".to_string(),
            },
        )
        .state;
        let entry = state.notifications().all()[0].clone();
        assert_eq!(entry.timestamp_ms, NOW);
        assert_eq!(state.notifications().unread_count(), 1);

        let state = apply(
            &state,
            SystemAction::MarkNotificationRead {
                notification_id: entry.id,
            },
        )
        .state;
        assert_eq!(state.notifications().unread_count(), 0);
    }

    #[test]
    fn file_create_and_update_use_context_time() {
        let state = apply(
            &SystemState::default(),
            SystemAction::CreateFile {
                file: NewFile::text("draft.txt", "", None),
            },
        )
        .state;
        let file_id = state.files().files()[0].id;

        let later = ReducerContext::new(WindowPolicy::default(), NOW + 5);
        let state = reduce_system(
            &state,
            SystemAction::UpdateFile {
                file_id,
                update: FileUpdate::content("hello"),
            },
            &later,
        )
        .state;
        let file = state.files().get(file_id).expect("file");
        assert_eq!(file.created_ms, NOW);
        assert_eq!(file.modified_ms, NOW + 5);
        assert_eq!(file.size, 5);
    }

    #[test]
    fn open_file_routes_by_kind_and_extension() {
        let state = signed_in();
        let mut files = state.files().clone();
        let photo = files.create(NewFile::text("Photo.PNG", "", None), NOW);
        let binary = files.create(NewFile::text("setup.exe", "", None), NOW);
        let docs = files.find_by_path("/Documents").expect("docs").id;
        let welcome = files.find_by_path("/Welcome.txt").expect("welcome").id;

        assert_eq!(
            build_open_action_for_file(&files, docs),
            Some(SystemAction::OpenWindow {
                app_id: AppId::from("fileExplorer"),
                params: json!({ "currentFolderId": docs.0 }),
            })
        );
        assert_eq!(
            build_open_action_for_file(&files, welcome),
            Some(SystemAction::OpenWindow {
                app_id: AppId::from("textEditor"),
                params: json!({ "fileId": welcome.0 }),
            })
        );
        assert_eq!(
            build_open_action_for_file(&files, photo),
            Some(SystemAction::OpenWindow {
                app_id: AppId::from("imageViewer"),
                params: json!({ "fileId": photo.0 }),
            })
        );
        assert_eq!(build_open_action_for_file(&files, binary), None);
        assert_eq!(build_open_action_for_file(&files, FileId(999)), None);
        assert_eq!(
            files.get(docs).map(|f| f.kind),
            Some(FileKind::Folder)
        );
    }

    #[test]
    fn open_file_action_opens_editor_with_file_param() {
        let state = signed_in();
        let welcome = state.files().find_by_path("/Welcome.txt").expect("welcome").id;

        let state = apply(&state, SystemAction::OpenFile { file_id: welcome }).state;
        let window = state.windows().active_window().expect("editor window");
        assert_eq!(window.component_key, "TextEditor");
        assert_eq!(window.params, json!({ "fileId": welcome.0 }));
    }

    #[test]
    fn dock_launch_opens_then_focuses_then_unminimizes() {
        let state = signed_in();
        let state = apply(
            &state,
            SystemAction::LaunchFromDock {
                app_id: AppId::from("terminal"),
            },
        )
        .state;
        assert_eq!(state.windows().len(), 1);
        let terminal = state.windows().windows()[0].id;

        let state = apply(&state, SystemAction::open("calculator")).state;
        let state = apply(
            &state,
            SystemAction::LaunchFromDock {
                app_id: AppId::from("terminal"),
            },
        )
        .state;
        assert_eq!(state.windows().len(), 2);
        assert_eq!(state.windows().active_window_id(), Some(terminal));

        let state = apply(&state, SystemAction::MinimizeWindow { window_id: terminal }).state;
        let state = apply(
            &state,
            SystemAction::LaunchFromDock {
                app_id: AppId::from("terminal"),
            },
        )
        .state;
        let record = state.windows().window(terminal).expect("terminal");
        assert!(!record.is_minimized);
        assert!(record.is_active);
        assert!(!record.is_maximized);
    }

    #[test]
    fn extreme_restore_then_move_is_clamped() {
        let state = apply(&signed_in(), SystemAction::open("textEditor")).state;
        let id = state.windows().active_window_id().expect("editor");
        let viewport = Viewport::new(1000, 800);

        let state = apply(
            &state,
            SystemAction::RestoreWindow {
                window_id: id,
                position: WindowPosition::new(100, 100),
                size: WindowSize::new(i32::MIN, 200),
            },
        )
        .state;
        let state = apply(
            &state,
            SystemAction::UpdateWindowPosition {
                window_id: id,
                position: WindowPosition::new(i32::MAX, i32::MIN),
                viewport,
            },
        )
        .state;
        assert_eq!(
            state.windows().window(id).map(|w| w.position),
            Some(WindowPosition::new(i32::MAX, 0))
        );

        let state = apply(
            &state,
            SystemAction::UpdateWindowSize {
                window_id: id,
                size: WindowSize::new(500, 500),
                viewport,
            },
        )
        .state;
        assert_eq!(
            state.windows().window(id).map(|w| w.size),
            Some(WindowSize::new(300, 500))
        );
    }

    #[test]
    fn bare_txt_name_opens_in_text_editor() {
        let mut files = signed_in().files().clone();
        let bare = files.create(NewFile::text(".txt", "", None), NOW);
        let shouting = files.create(NewFile::text("NOTES.TXT", "", None), NOW);

        assert_eq!(
            build_open_action_for_file(&files, bare),
            Some(SystemAction::OpenWindow {
                app_id: AppId::from("textEditor"),
                params: json!({ "fileId": bare.0 }),
            })
        );
        assert_eq!(build_open_action_for_file(&files, shouting), None);
    }
}
