#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod child_windows;
mod engine_flags;
mod exit_events;
mod first_run_tour;
mod icon_factory;
mod logging;
mod main_window;
mod memory_trimmer;
mod memory_watch;
mod notification_badge;
mod popup_windows;
mod request_filter;
mod runtime_paths;
mod shared_profile;
mod shell_locale;
mod shell_settings;
mod startup_error;
mod tour_gate;
mod tray_actions;
mod tray_menu_handler;
mod tray_presentation;
mod tray_setup;
mod ui_dispatch;
mod window_actions;
mod window_state;

pub(crate) use app_constants::*;
pub(crate) use app_types::{AtomicFlagGuard, ShellState};
pub(crate) use logging::{append_desktop_log, append_shutdown_log, append_startup_log};

fn main() {
    app_runtime::run();
}
