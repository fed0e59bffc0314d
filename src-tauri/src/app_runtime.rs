use std::sync::Arc;

use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, child_windows, exit_events, first_run_tour,
    logging, main_window, memory_watch, popup_windows, runtime_paths,
    shared_profile::SharedProfile,
    shell_locale, shell_settings, startup_error, tray_setup, window_actions,
    window_state::{CloseDecision, WindowRole},
    ShellState, DEFAULT_SHELL_LOCALE, DESKTOP_LOG_FILE, MAIN_WINDOW_LABEL,
};

fn fail_startup(app_handle: &AppHandle, configured_locale: Option<&str>, message: &str) {
    let locale = shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE, configured_locale);
    let texts = shell_locale::shell_texts_for_locale(locale);
    startup_error::show_startup_error(app_handle, texts.startup_error_title, message);
}

fn initialize_shell(app_handle: &AppHandle) {
    let config_dir = match runtime_paths::ensure_config_dir() {
        Ok(config_dir) => config_dir,
        Err(error) => {
            fail_startup(app_handle, None, &error);
            return;
        }
    };

    let settings = shell_settings::read_shell_settings(&config_dir, append_startup_log);
    let locale =
        shell_locale::resolve_shell_locale(DEFAULT_SHELL_LOCALE, settings.locale.as_deref());
    let texts = shell_locale::shell_texts_for_locale(locale);

    let profile = match SharedProfile::build(&config_dir, &settings) {
        Ok(profile) => Arc::new(profile),
        Err(error) => {
            fail_startup(app_handle, settings.locale.as_deref(), &error);
            return;
        }
    };
    append_startup_log(&format!(
        "shared profile ready: start_url={} data_dir={} blocked_patterns={}",
        profile.start_url,
        profile.data_dir.display(),
        profile.filter.patterns().len()
    ));

    if !app_handle.manage(ShellState::new(profile, texts, &settings)) {
        append_startup_log("shell state already exists, skipping manage");
    }
    let state = app_handle.state::<ShellState>();

    let window = match main_window::build_main_window(app_handle, &state) {
        Ok(window) => window,
        Err(error) => {
            fail_startup(app_handle, settings.locale.as_deref(), &error);
            return;
        }
    };

    if let Err(error) = tray_setup::setup_tray(app_handle, &state.texts) {
        append_startup_log(&format!("failed to initialize tray: {error}"));
    }

    first_run_tour::run_first_time_tour(app_handle, &window, &config_dir, &state.texts);

    match memory_watch::spawn_memory_watch(app_handle.clone(), state.memory_check_interval) {
        Ok(stop) => state.set_memory_watch_stop(stop),
        Err(error) => append_startup_log(&format!("memory watch unavailable: {error}")),
    }
}

fn handle_window_event(window: &tauri::Window, event: &WindowEvent) {
    let label = window.label();
    let role = if label == MAIN_WINDOW_LABEL {
        WindowRole::Root
    } else if child_windows::is_child_window_label(label) {
        WindowRole::Child
    } else {
        return;
    };

    match event {
        WindowEvent::CloseRequested { api, .. } => {
            let decision =
                window_actions::handle_close_request(window.app_handle(), role, append_desktop_log);
            if decision == CloseDecision::HideToTray {
                api.prevent_close();
            }
        }
        WindowEvent::Focused(false) if role == WindowRole::Root => {
            if let Ok(true) = window.is_minimized() {
                window_actions::hide_main_window(
                    window.app_handle(),
                    "minimized",
                    append_desktop_log,
                );
            }
        }
        WindowEvent::Destroyed if role == WindowRole::Child => {
            popup_windows::handle_popup_destroyed(window);
        }
        _ => {}
    }
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(runtime_paths::default_config_dir(), DESKTOP_LOG_FILE)
            .display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            append_desktop_log("second instance launched, restoring main window");
            window_actions::show_main_window(app, append_desktop_log);
        }))
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .on_window_event(handle_window_event)
        .setup(|app| {
            initialize_shell(app.handle());
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            _ => {}
        });
}
