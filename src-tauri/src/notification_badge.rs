use tauri::{AppHandle, Manager};
use tauri_plugin_notification::NotificationExt;

use crate::{
    append_desktop_log, main_window, tray_presentation, ui_dispatch,
    window_state::{IconState, SurfaceFocus, TitleTransition},
    ShellState,
};

const HIDDEN_SURFACE: SurfaceFocus = SurfaceFocus {
    visible: false,
    focused: false,
};

/// Entry point for root window title updates reported by the engine.
pub fn handle_title_change(app_handle: &AppHandle, title: String) {
    if let Err(error) = ui_dispatch::run_on_main_thread_dispatch(
        app_handle,
        "apply document title change",
        move |main_app| apply_title_change(main_app, &title),
    ) {
        append_desktop_log(&error);
    }
}

fn apply_title_change(app_handle: &AppHandle, title: &str) {
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return;
    };

    let focus = main_window::main_window_focus(app_handle).unwrap_or(HIDDEN_SURFACE);
    let transition = state.with_controller(|controller| controller.on_title_changed(title, focus));

    match transition {
        TitleTransition::Unchanged => {}
        TitleTransition::EnterAlert { .. } => {
            tray_presentation::apply_icon_state(
                app_handle,
                IconState::Alert,
                &state.texts,
                append_desktop_log,
            );
            if should_raise_notification(transition, state.notifications_enabled) {
                raise_notification(app_handle, state.texts.root_window_title, title);
            }
        }
        TitleTransition::LeaveAlert => {
            tray_presentation::apply_icon_state(
                app_handle,
                IconState::Normal,
                &state.texts,
                append_desktop_log,
            );
        }
    }
}

/// Only a fresh alert the user cannot see is announced, and only when
/// notifications are switched on in settings.
fn should_raise_notification(transition: TitleTransition, notifications_enabled: bool) -> bool {
    matches!(transition, TitleTransition::EnterAlert { notify: true }) && notifications_enabled
}

fn raise_notification(app_handle: &AppHandle, heading: &str, title: &str) {
    if let Err(error) = app_handle
        .notification()
        .builder()
        .title(heading)
        .body(title)
        .show()
    {
        append_desktop_log(&format!("failed to show unread notification: {error}"));
    }
}
