use std::path::Path;

use tauri::{AppHandle, WebviewWindow};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::{append_startup_log, shell_locale::ShellTexts, tour_gate::TourGate};

/// Shows the welcome dialog on first launch. The marker is written once the
/// dialog is dismissed; a failed write only means the tour shows again.
pub fn run_first_time_tour(
    app_handle: &AppHandle,
    window: &WebviewWindow,
    config_dir: &Path,
    texts: &ShellTexts,
) {
    let gate = TourGate::new(config_dir);
    if !gate.should_show() {
        return;
    }

    append_startup_log("first launch detected, showing welcome tour");
    app_handle
        .dialog()
        .message(texts.tour_message)
        .title(texts.tour_title)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::Ok)
        .parent(window)
        .show(move |_| match gate.mark_shown() {
            Ok(()) => append_startup_log("welcome tour completed"),
            Err(error) => append_startup_log(&format!("failed to persist tour marker: {error}")),
        });
}
