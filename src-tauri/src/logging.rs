use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{runtime_paths, DESKTOP_LOG_FILE};

const MAX_LOG_BYTES: u64 = 2 * 1024 * 1024;

static LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

pub fn resolve_desktop_log_path(config_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match config_dir {
        Some(dir) => dir.join("logs").join(file_name),
        None => std::env::temp_dir().join("messenger-pro").join(file_name),
    }
}

fn rotated_log_path(log_path: &Path) -> PathBuf {
    let mut rotated = log_path.as_os_str().to_os_string();
    rotated.push(".1");
    PathBuf::from(rotated)
}

fn rotate_if_oversized(log_path: &Path, max_bytes: u64) -> Result<(), String> {
    let size = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(_) => return Ok(()),
    };
    if size < max_bytes {
        return Ok(());
    }

    fs::rename(log_path, rotated_log_path(log_path)).map_err(|error| {
        format!("Failed to rotate log {}: {}", log_path.display(), error)
    })
}

fn format_log_line(category: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        category,
        message
    )
}

pub(crate) fn append_log_line(
    log_path: &Path,
    category: &str,
    message: &str,
    max_bytes: u64,
) -> Result<(), String> {
    if let Some(parent) = log_path.parent() {
        runtime_paths::ensure_dir(parent)?;
    }
    rotate_if_oversized(log_path, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|error| format!("Failed to open log {}: {}", log_path.display(), error))?;
    file.write_all(format_log_line(category, message).as_bytes())
        .map_err(|error| format!("Failed to write log {}: {}", log_path.display(), error))
}

fn append_log(category: &str, message: &str) {
    if cfg!(debug_assertions) {
        eprintln!("[{category}] {message}");
    }

    let _guard = LOG_WRITE_LOCK.lock();
    let log_path =
        resolve_desktop_log_path(runtime_paths::default_config_dir(), DESKTOP_LOG_FILE);
    if let Err(error) = append_log_line(&log_path, category, message, MAX_LOG_BYTES) {
        eprintln!("{error}");
    }
}

pub fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_desktop_log_path_uses_logs_subdir() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/cfg")), "desktop.log");
        assert_eq!(path, PathBuf::from("/cfg/logs/desktop.log"));
    }

    #[test]
    fn append_log_line_writes_category_and_message() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let log_path = temp.path().join("logs").join("desktop.log");

        append_log_line(&log_path, "desktop", "window hidden", MAX_LOG_BYTES)
            .expect("append log line");
        append_log_line(&log_path, "startup", "tray ready", MAX_LOG_BYTES)
            .expect("append log line");

        let content = fs::read_to_string(&log_path).expect("read log");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[desktop] window hidden"));
        assert!(lines[1].ends_with("[startup] tray ready"));
    }

    #[test]
    fn append_log_line_rotates_oversized_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let log_path = temp.path().join("desktop.log");
        fs::write(&log_path, "x".repeat(64)).expect("seed log");

        append_log_line(&log_path, "desktop", "fresh", 32).expect("append log line");

        let rotated = fs::read_to_string(rotated_log_path(&log_path)).expect("read rotated");
        assert_eq!(rotated.len(), 64);
        let current = fs::read_to_string(&log_path).expect("read current");
        assert!(current.ends_with("[desktop] fresh\n"));
    }
}
