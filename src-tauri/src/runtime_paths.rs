use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, WEBVIEW_DATA_DIR};

fn config_dir_from_override(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

pub fn default_config_dir() -> Option<PathBuf> {
    if let Ok(raw) = env::var(CONFIG_DIR_ENV) {
        if let Some(path) = config_dir_from_override(&raw) {
            return Some(path);
        }
    }

    home::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

pub fn ensure_dir(dir: &Path) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|error| format!("Failed to create directory {}: {}", dir.display(), error))
}

pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let config_dir = default_config_dir()
        .ok_or_else(|| "Cannot resolve the user home directory.".to_string())?;
    ensure_dir(&config_dir)?;
    Ok(config_dir)
}

pub fn webview_data_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(WEBVIEW_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_from_override_ignores_blank_values() {
        assert_eq!(config_dir_from_override("   "), None);
        assert_eq!(
            config_dir_from_override(" /tmp/messenger "),
            Some(PathBuf::from("/tmp/messenger"))
        );
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).expect("create nested dir");
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("existing dir is fine");
    }

    #[test]
    fn webview_data_dir_lives_under_config_dir() {
        let dir = webview_data_dir(Path::new("/home/user/.messengerpro"));
        assert_eq!(dir, PathBuf::from("/home/user/.messengerpro/webview"));
    }
}
