use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::append_startup_log;

/// Fatal startup failures are shown to the user, then the process exits with 1.
pub fn show_startup_error(app_handle: &AppHandle, title: &str, message: &str) {
    eprintln!("Messenger Pro startup failed: {message}");
    append_startup_log(&format!("fatal startup error: {message}"));

    let exit_handle = app_handle.clone();
    app_handle
        .dialog()
        .message(message)
        .title(title)
        .kind(MessageDialogKind::Error)
        .buttons(MessageDialogButtons::Ok)
        .show(move |_| exit_handle.exit(1));
}
