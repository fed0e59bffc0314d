use std::time::Duration;

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const POPUP_WINDOW_LABEL_PREFIX: &str = "popup-";
pub const TRAY_ID: &str = "messenger-pro-tray";

pub const DEFAULT_START_URL: &str = "https://www.messenger.com/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_SHELL_LOCALE: &str = "en-US";

pub const CONFIG_DIR_NAME: &str = ".messengerpro";
pub const CONFIG_DIR_ENV: &str = "MESSENGER_PRO_CONFIG_DIR";
pub const START_URL_ENV: &str = "MESSENGER_PRO_URL";
pub const LOCALE_ENV: &str = "MESSENGER_PRO_LOCALE";
pub const EXTRA_ENGINE_FLAGS_ENV: &str = "MESSENGER_PRO_EXTRA_ENGINE_FLAGS";

pub const SETTINGS_FILE: &str = "settings.json";
pub const TOUR_MARKER_FILE: &str = "opened";
pub const DESKTOP_LOG_FILE: &str = "desktop.log";
pub const WEBVIEW_DATA_DIR: &str = "webview";

pub const ROOT_WINDOW_SIZE: (f64, f64) = (1200.0, 900.0);
pub const POPUP_WINDOW_SIZE: (f64, f64) = (900.0, 700.0);

pub const DEFAULT_MEMORY_CHECK_INTERVAL: Duration = Duration::from_secs(60);
pub const MIN_MEMORY_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Unread counters show up in the page title as `Messenger (3)`.
pub const UNREAD_TITLE_MARKER: &str = "(";
