use std::sync::Arc;

use tauri::{
    webview::{NewWindowFeatures, NewWindowResponse},
    AppHandle, Manager, WebviewUrl, WebviewWindowBuilder, Window, Wry,
};
use url::Url;

use crate::{
    append_desktop_log, icon_factory,
    shared_profile::{self, SharedProfile},
    ShellState, POPUP_WINDOW_SIZE,
};

const POPUP_INITIAL_URL: &str = "about:blank";

/// Builds a child window for an engine popup request. The engine renders the
/// popup content into the returned window's webview.
pub fn open_popup_window(
    app_handle: &AppHandle,
    profile: &Arc<SharedProfile>,
    url: Url,
    features: NewWindowFeatures,
) -> NewWindowResponse<Wry> {
    if profile.filter.is_blocked(url.as_str()) {
        append_desktop_log(&format!("blocked popup window for {url}"));
        return NewWindowResponse::Deny;
    }

    let Some(state) = app_handle.try_state::<ShellState>() else {
        append_desktop_log("popup request ignored: shell state is not ready");
        return NewWindowResponse::Deny;
    };
    if state.is_quitting() {
        return NewWindowResponse::Deny;
    }

    let initial_url = match Url::parse(POPUP_INITIAL_URL) {
        Ok(initial_url) => initial_url,
        Err(error) => {
            append_desktop_log(&format!("invalid popup initial url: {error}"));
            return NewWindowResponse::Deny;
        }
    };

    let label = state.with_children(|children| children.allocate_label());
    let icon = icon_factory::to_tauri_image(icon_factory::render_app_icon(false));
    let builder = match WebviewWindowBuilder::new(
        app_handle,
        &label,
        WebviewUrl::External(initial_url),
    )
    .window_features(features)
    .title(state.texts.popup_window_title)
    .inner_size(POPUP_WINDOW_SIZE.0, POPUP_WINDOW_SIZE.1)
    .visible(true)
    .focused(true)
    .icon(icon)
    {
        Ok(builder) => builder,
        Err(error) => {
            append_desktop_log(&format!("failed to set popup window icon: {error}"));
            return NewWindowResponse::Deny;
        }
    };
    let builder = builder.on_document_title_changed(|window, title| {
        if title.trim().is_empty() {
            return;
        }
        if let Err(error) = window.set_title(&title) {
            append_desktop_log(&format!("failed to update popup title: {error}"));
        }
    });

    match shared_profile::apply_shared_profile(builder, app_handle, profile).build() {
        Ok(window) => {
            shared_profile::grant_page_permissions(&window, profile);
            state.with_children(|children| children.register(label.clone(), url.to_string()));
            append_desktop_log(&format!("opened popup window {label} for {url}"));
            NewWindowResponse::Create { window }
        }
        Err(error) => {
            append_desktop_log(&format!("failed to create popup window for {url}: {error}"));
            NewWindowResponse::Deny
        }
    }
}

pub fn handle_popup_destroyed(window: &Window) {
    let Some(state) = window.app_handle().try_state::<ShellState>() else {
        return;
    };
    let label = window.label();
    let Some(entry) = state.with_children(|children| children.remove(label)) else {
        return;
    };
    let still_open = state.with_children(|children| children.len());
    append_desktop_log(&entry.close_summary(label, still_open));
}
