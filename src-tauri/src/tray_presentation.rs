use tauri::{AppHandle, Manager};

use crate::{
    icon_factory, shell_locale::ShellTexts, window_state::IconState, MAIN_WINDOW_LABEL, TRAY_ID,
};

pub fn tooltip_for(icon_state: IconState, texts: &ShellTexts) -> &'static str {
    match icon_state {
        IconState::Normal => texts.tray_tooltip,
        IconState::Alert => texts.tray_tooltip_unread,
    }
}

pub fn icon_for(icon_state: IconState) -> tauri::image::Image<'static> {
    icon_factory::to_tauri_image(icon_factory::render_app_icon(
        icon_state == IconState::Alert,
    ))
}

/// Swaps tray and root window icons together so both always agree.
pub fn apply_icon_state<F>(
    app_handle: &AppHandle,
    icon_state: IconState,
    texts: &ShellTexts,
    log: F,
) where
    F: Fn(&str),
{
    if let Some(tray) = app_handle.tray_by_id(TRAY_ID) {
        if let Err(error) = tray.set_icon(Some(icon_for(icon_state))) {
            log(&format!("failed to update tray icon: {error}"));
        }
        if let Err(error) = tray.set_tooltip(Some(tooltip_for(icon_state, texts))) {
            log(&format!("failed to update tray tooltip: {error}"));
        }
    }

    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        if let Err(error) = window.set_icon(icon_for(icon_state)) {
            log(&format!("failed to update main window icon: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell_locale;

    #[test]
    fn tooltip_for_reflects_unread_state() {
        let texts = shell_locale::shell_texts_for_locale("en-US");
        assert_eq!(tooltip_for(IconState::Normal, &texts), "Messenger Pro");
        assert_eq!(
            tooltip_for(IconState::Alert, &texts),
            "Messenger Pro (unread messages)"
        );
    }

    #[test]
    fn icon_for_uses_distinct_bitmaps() {
        let normal = icon_for(IconState::Normal);
        let alert = icon_for(IconState::Alert);
        assert_eq!(normal.width(), alert.width());
        assert_ne!(normal.rgba(), alert.rgba());
    }
}
