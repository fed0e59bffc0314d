use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{append_shutdown_log, ShellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitRequestDecision {
    Allow,
    KeepRunningInTray,
}

/// `code` is `None` when the last window closed on its own and `Some` when
/// the app asked to exit explicitly.
fn decide_exit_request(is_quitting: bool, code: Option<i32>) -> ExitRequestDecision {
    if is_quitting || code.is_some() {
        ExitRequestDecision::Allow
    } else {
        ExitRequestDecision::KeepRunningInTray
    }
}

pub fn handle_exit_requested(app_handle: &AppHandle, code: Option<i32>, api: &ExitRequestApi) {
    let is_quitting = app_handle
        .try_state::<ShellState>()
        .map(|state| state.is_quitting())
        .unwrap_or(false);

    match decide_exit_request(is_quitting, code) {
        ExitRequestDecision::Allow => {
            append_shutdown_log(&format!("exit requested with code {code:?}"));
        }
        ExitRequestDecision::KeepRunningInTray => {
            append_shutdown_log("last window closed, staying in tray");
            api.prevent_exit();
        }
    }
}

pub fn handle_exit_event(app_handle: &AppHandle) {
    if let Some(state) = app_handle.try_state::<ShellState>() {
        if state.stop_memory_watch() {
            append_shutdown_log("memory watch stopped");
        }
    }
    append_shutdown_log("desktop process exiting");
}
