use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

use crate::{
    DEFAULT_MEMORY_CHECK_INTERVAL, DEFAULT_START_URL, DEFAULT_USER_AGENT,
    MIN_MEMORY_CHECK_INTERVAL, SETTINGS_FILE, START_URL_ENV,
};

/// Optional overrides read from `settings.json` in the config directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellSettings {
    pub start_url: Option<String>,
    pub user_agent: Option<String>,
    pub locale: Option<String>,
    pub notifications_enabled: bool,
    pub memory_check_interval_secs: Option<u64>,
    pub extra_blocked_patterns: Vec<String>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            start_url: None,
            user_agent: None,
            locale: None,
            notifications_enabled: true,
            memory_check_interval_secs: None,
            extra_blocked_patterns: Vec::new(),
        }
    }
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

pub(crate) fn parse_shell_settings(raw: &str) -> Result<ShellSettings, String> {
    serde_json::from_str(raw).map_err(|error| format!("Invalid shell settings: {error}"))
}

pub fn read_shell_settings<F>(config_dir: &Path, log: F) -> ShellSettings
where
    F: Fn(&str),
{
    let path = settings_path(config_dir);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return ShellSettings::default();
        }
        Err(error) => {
            log(&format!(
                "failed to read shell settings {}: {}. using defaults",
                path.display(),
                error
            ));
            return ShellSettings::default();
        }
    };

    match parse_shell_settings(&raw) {
        Ok(settings) => settings,
        Err(error) => {
            log(&format!("{} ({}). using defaults", error, path.display()));
            ShellSettings::default()
        }
    }
}

pub(crate) fn normalize_start_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parsed = Url::parse(trimmed).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    if parsed.path().is_empty() {
        parsed.set_path("/");
    }
    Some(parsed.to_string())
}

pub(crate) fn resolve_start_url_from(env_value: Option<&str>, settings: &ShellSettings) -> String {
    env_value
        .and_then(normalize_start_url)
        .or_else(|| settings.start_url.as_deref().and_then(normalize_start_url))
        .unwrap_or_else(|| DEFAULT_START_URL.to_string())
}

pub fn resolve_start_url(settings: &ShellSettings) -> String {
    let env_value = env::var(START_URL_ENV).ok();
    resolve_start_url_from(env_value.as_deref(), settings)
}

pub fn resolve_user_agent(settings: &ShellSettings) -> String {
    settings
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_USER_AGENT)
        .to_string()
}

pub fn memory_check_interval(settings: &ShellSettings) -> Duration {
    settings
        .memory_check_interval_secs
        .map(Duration::from_secs)
        .map(|interval| interval.max(MIN_MEMORY_CHECK_INTERVAL))
        .unwrap_or(DEFAULT_MEMORY_CHECK_INTERVAL)
}
