use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use tauri::{AppHandle, Manager};

use crate::{append_desktop_log, memory_trimmer, window_state, ShellState};

const STOP_POLL_STEP: Duration = Duration::from_millis(500);

/// Sleeps until `interval` elapses. Returns false as soon as `stop` is raised.
pub(crate) fn wait_for_next_tick(stop: &AtomicBool, interval: Duration, step: Duration) -> bool {
    let started = Instant::now();
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let elapsed = started.elapsed();
        if elapsed >= interval {
            return true;
        }
        thread::sleep(step.min(interval - elapsed));
    }
}

fn run_tick(app_handle: &AppHandle) {
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return;
    };
    let visibility = state.with_controller(|controller| controller.visibility());
    if window_state::should_trim_on_tick(visibility) {
        memory_trimmer::trim_once(&state.trim_in_progress, "periodic", append_desktop_log);
    }
}

/// Starts the periodic memory check on its own thread. Raising the returned
/// flag stops it.
pub fn spawn_memory_watch(
    app_handle: AppHandle,
    interval: Duration,
) -> Result<Arc<AtomicBool>, String> {
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop);

    thread::Builder::new()
        .name("memory-watch".to_string())
        .spawn(move || {
            while wait_for_next_tick(&thread_stop, interval, STOP_POLL_STEP) {
                run_tick(&app_handle);
            }
        })
        .map_err(|error| format!("Failed to spawn memory watch thread: {error}"))?;

    Ok(stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_for_next_tick_returns_true_after_interval() {
        let stop = AtomicBool::new(false);
        let started = Instant::now();
        assert!(wait_for_next_tick(
            &stop,
            Duration::from_millis(30),
            Duration::from_millis(5)
        ));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn wait_for_next_tick_returns_false_when_stopped() {
        let stop = AtomicBool::new(true);
        assert!(!wait_for_next_tick(
            &stop,
            Duration::from_secs(60),
            Duration::from_millis(5)
        ));
    }

    #[test]
    fn wait_for_next_tick_notices_stop_raised_from_another_thread() {
        let stop = Arc::new(AtomicBool::new(false));
        let remote = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.store(true, Ordering::Relaxed);
        });

        let started = Instant::now();
        assert!(!wait_for_next_tick(
            &stop,
            Duration::from_secs(60),
            Duration::from_millis(5)
        ));
        assert!(started.elapsed() < Duration::from_secs(5));
        handle.join().expect("join stopper thread");
    }
}
