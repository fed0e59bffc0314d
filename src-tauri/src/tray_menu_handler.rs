use tauri::AppHandle;

use crate::{append_desktop_log, tray_actions, window_actions};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::Open) => {
            window_actions::show_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::Quit) => {
            window_actions::request_quit(app_handle, append_desktop_log)
        }
        None => append_desktop_log(&format!("unknown tray menu id: {menu_id}")),
    }
}
