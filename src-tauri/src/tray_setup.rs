use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle,
};

use crate::{
    append_desktop_log, shell_locale::ShellTexts, tray_actions, tray_menu_handler,
    tray_presentation, window_actions, window_state::IconState, TRAY_ID,
};

pub fn setup_tray(app_handle: &AppHandle, texts: &ShellTexts) -> Result<(), String> {
    let open_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_OPEN,
        texts.tray_open,
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray open menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_QUIT,
        texts.tray_quit,
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(app_handle, &[&open_item, &separator, &quit_item])
        .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(tray_presentation::tooltip_for(IconState::Normal, texts))
        .icon(tray_presentation::icon_for(IconState::Normal))
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                window_actions::toggle_main_window(tray.app_handle(), append_desktop_log);
            }
        })
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;

    Ok(())
}
