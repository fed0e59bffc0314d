use tauri::{AppHandle, Manager};

use crate::{
    append_shutdown_log, main_window, memory_trimmer,
    window_state::{self, CloseDecision, QuitDecision, TrayToggle, WindowRole},
    ShellState, TRAY_ID,
};

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Some(state) = app_handle.try_state::<ShellState>() {
        if !state.with_controller(|controller| controller.mark_shown()) {
            log("show_main_window skipped: shell is quitting");
            return;
        }
    }
    main_window::show_main_window(app_handle, &log);
}

pub fn hide_main_window<F>(app_handle: &AppHandle, reason: &'static str, log: F)
where
    F: Fn(&str),
{
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return;
    };
    if !state.with_controller(|controller| controller.mark_hidden()) {
        return;
    }
    main_window::hide_main_window(app_handle, &log);
    memory_trimmer::trim_in_background(app_handle, reason);
}

pub fn toggle_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(state) = app_handle.try_state::<ShellState>() else {
        log("toggle_main_window skipped: shell state is not ready");
        return;
    };

    let actual_visible = main_window::main_window_visible(app_handle);
    let toggle = state.with_controller(|controller| {
        if let Some(visible) = actual_visible {
            controller.sync_visibility(visible);
        }
        controller.toggle_from_tray()
    });

    match toggle {
        TrayToggle::Hide => {
            main_window::hide_main_window(app_handle, &log);
            memory_trimmer::trim_in_background(app_handle, "hidden from tray");
        }
        TrayToggle::Show => main_window::show_main_window(app_handle, &log),
        TrayToggle::Ignore => log("toggle_main_window ignored: shell is quitting"),
    }
}

/// Decides what a close request on `role` does. The caller must prevent the
/// native close when this returns `HideToTray`.
pub fn handle_close_request<F>(app_handle: &AppHandle, role: WindowRole, log: F) -> CloseDecision
where
    F: Fn(&str),
{
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return window_state::decide_close(role, window_state::CloseLatch::ForceClose);
    };

    let decision = match role {
        WindowRole::Child => {
            window_state::decide_close(role, window_state::CloseLatch::HideOnClose)
        }
        WindowRole::Root => state.with_controller(|controller| controller.request_close()),
    };

    if decision == CloseDecision::HideToTray {
        main_window::hide_main_window(app_handle, &log);
        memory_trimmer::trim_in_background(app_handle, "closed to tray");
    }
    decision
}

pub fn request_quit<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let decision = match app_handle.try_state::<ShellState>() {
        Some(state) => {
            let decision = state.with_controller(|controller| controller.request_quit());
            if decision == QuitDecision::Exit {
                state.stop_memory_watch();
            }
            decision
        }
        None => QuitDecision::Exit,
    };

    if decision == QuitDecision::AlreadyQuitting {
        log("quit ignored: shell is already quitting");
        return;
    }

    if let Some(tray) = app_handle.tray_by_id(TRAY_ID) {
        if let Err(error) = tray.set_visible(false) {
            log(&format!("failed to hide tray icon on quit: {error}"));
        }
    }
    append_shutdown_log("quit requested, exiting desktop process");
    app_handle.exit(0);
}
