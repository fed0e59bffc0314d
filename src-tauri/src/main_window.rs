use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::{
    icon_factory, notification_badge, shared_profile, window_state::SurfaceFocus, ShellState,
    MAIN_WINDOW_LABEL, ROOT_WINDOW_SIZE,
};

pub fn build_main_window(
    app_handle: &AppHandle,
    state: &ShellState,
) -> Result<WebviewWindow, String> {
    let start_url = state.profile.start_url()?;
    let icon = icon_factory::to_tauri_image(icon_factory::render_app_icon(false));

    let builder = WebviewWindowBuilder::new(
        app_handle,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(start_url),
    )
    .title(state.texts.root_window_title)
    .inner_size(ROOT_WINDOW_SIZE.0, ROOT_WINDOW_SIZE.1)
    .visible(true)
    .icon(icon)
    .map_err(|error| format!("Failed to set main window icon: {error}"))?
    .on_document_title_changed(|window, title| {
        notification_badge::handle_title_change(window.app_handle(), title);
    });

    let window = shared_profile::apply_shared_profile(builder, app_handle, &state.profile)
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    shared_profile::grant_page_permissions(&window, &state.profile);
    Ok(window)
}

pub fn main_window_focus(app_handle: &AppHandle) -> Option<SurfaceFocus> {
    let window = app_handle.get_webview_window(MAIN_WINDOW_LABEL)?;
    Some(SurfaceFocus {
        visible: window.is_visible().unwrap_or(false),
        focused: window.is_focused().unwrap_or(false),
    })
}

pub fn main_window_visible(app_handle: &AppHandle) -> Option<bool> {
    app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .and_then(|window| window.is_visible().ok())
}

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("show_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("hide_main_window skipped: main window not found");
        return;
    };

    if let Err(error) = window.hide() {
        log(&format!("failed to hide main window: {error}"));
    }
}
