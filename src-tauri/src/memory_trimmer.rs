use std::sync::atomic::AtomicBool;

use tauri::{AppHandle, Manager};

use crate::{append_desktop_log, AtomicFlagGuard, ShellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    Trimmed,
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimAttempt {
    Completed(TrimOutcome),
    Failed,
    SkippedBecauseInProgress,
}

#[cfg(target_os = "windows")]
pub fn trim_working_set() -> Result<TrimOutcome, String> {
    use windows::Win32::System::ProcessStatus::EmptyWorkingSet;
    use windows::Win32::System::Threading::GetCurrentProcess;

    unsafe { EmptyWorkingSet(GetCurrentProcess()) }
        .map(|_| TrimOutcome::Trimmed)
        .map_err(|error| format!("EmptyWorkingSet failed: {error}"))
}

#[cfg(not(target_os = "windows"))]
pub fn trim_working_set() -> Result<TrimOutcome, String> {
    Ok(TrimOutcome::Unsupported)
}

pub(crate) fn trim_once_with<T, F>(
    in_progress: &AtomicBool,
    reason: &str,
    trim: T,
    log: F,
) -> TrimAttempt
where
    T: FnOnce() -> Result<TrimOutcome, String>,
    F: Fn(&str),
{
    let Some(_guard) = AtomicFlagGuard::try_set(in_progress) else {
        return TrimAttempt::SkippedBecauseInProgress;
    };

    match trim() {
        Ok(outcome) => {
            if outcome == TrimOutcome::Trimmed {
                log(&format!("working set trimmed ({reason})"));
            }
            TrimAttempt::Completed(outcome)
        }
        Err(error) => {
            log(&format!("memory trim failed ({reason}): {error}"));
            TrimAttempt::Failed
        }
    }
}

pub fn trim_once<F>(in_progress: &AtomicBool, reason: &str, log: F) -> TrimAttempt
where
    F: Fn(&str),
{
    trim_once_with(in_progress, reason, trim_working_set, log)
}

/// Runs the trim off the calling thread; hide paths call this from the UI thread.
pub fn trim_in_background(app_handle: &AppHandle, reason: &'static str) {
    let app_handle = app_handle.clone();
    let spawn_result = std::thread::Builder::new()
        .name("memory-trim".to_string())
        .spawn(move || {
            let Some(state) = app_handle.try_state::<ShellState>() else {
                return;
            };
            trim_once(&state.trim_in_progress, reason, append_desktop_log);
        });
    if let Err(error) = spawn_result {
        append_desktop_log(&format!("failed to spawn memory trim thread: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, sync::atomic::Ordering};

    use super::*;

    #[test]
    fn trim_once_reports_success_and_releases_flag() {
        let flag = AtomicBool::new(false);
        let logged = RefCell::new(Vec::new());
        let attempt = trim_once_with(
            &flag,
            "hidden",
            || Ok(TrimOutcome::Trimmed),
            |line| logged.borrow_mut().push(line.to_string()),
        );
        assert_eq!(attempt, TrimAttempt::Completed(TrimOutcome::Trimmed));
        assert_eq!(logged.borrow().as_slice(), ["working set trimmed (hidden)"]);
        assert!(!flag.load(Ordering::Relaxed));
    }

    #[test]
    fn trim_once_swallows_failures_after_logging() {
        let flag = AtomicBool::new(false);
        let logged = RefCell::new(Vec::new());
        let attempt = trim_once_with(
            &flag,
            "periodic",
            || Err("access denied".to_string()),
            |line| logged.borrow_mut().push(line.to_string()),
        );
        assert_eq!(attempt, TrimAttempt::Failed);
        assert_eq!(
            logged.borrow().as_slice(),
            ["memory trim failed (periodic): access denied"]
        );
        assert!(!flag.load(Ordering::Relaxed));
    }

    #[test]
    fn trim_once_skips_while_another_trim_runs() {
        let flag = AtomicBool::new(true);
        let attempt = trim_once_with(
            &flag,
            "periodic",
            || panic!("trim must not run while flag is held"),
            |_| {},
        );
        assert_eq!(attempt, TrimAttempt::SkippedBecauseInProgress);
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn unsupported_platforms_are_not_logged() {
        let flag = AtomicBool::new(false);
        let attempt = trim_once_with(
            &flag,
            "hidden",
            || Ok(TrimOutcome::Unsupported),
            |line| panic!("unexpected log line: {line}"),
        );
        assert_eq!(attempt, TrimAttempt::Completed(TrimOutcome::Unsupported));
    }
}
