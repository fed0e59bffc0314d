use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use crate::{
    child_windows::ChildWindowRegistry,
    shared_profile::SharedProfile,
    shell_locale::ShellTexts,
    shell_settings::{self, ShellSettings},
    window_state::WindowController,
};

pub(crate) struct ShellState {
    pub(crate) controller: Mutex<WindowController>,
    pub(crate) children: Mutex<ChildWindowRegistry>,
    pub(crate) profile: Arc<SharedProfile>,
    pub(crate) texts: ShellTexts,
    pub(crate) notifications_enabled: bool,
    pub(crate) memory_check_interval: Duration,
    pub(crate) trim_in_progress: AtomicBool,
    pub(crate) memory_watch_stop: Mutex<Option<Arc<AtomicBool>>>,
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ShellState {
    pub(crate) fn new(
        profile: Arc<SharedProfile>,
        texts: ShellTexts,
        settings: &ShellSettings,
    ) -> Self {
        Self {
            controller: Mutex::new(WindowController::new_root()),
            children: Mutex::new(ChildWindowRegistry::default()),
            profile,
            texts,
            notifications_enabled: settings.notifications_enabled,
            memory_check_interval: shell_settings::memory_check_interval(settings),
            trim_in_progress: AtomicBool::new(false),
            memory_watch_stop: Mutex::new(None),
        }
    }

    /// Runs `f` with the controller locked. Callers must not touch windows
    /// inside `f`: window calls can re-enter the event handlers.
    pub(crate) fn with_controller<T>(&self, f: impl FnOnce(&mut WindowController) -> T) -> T {
        f(&mut lock_or_recover(&self.controller))
    }

    pub(crate) fn with_children<T>(&self, f: impl FnOnce(&mut ChildWindowRegistry) -> T) -> T {
        f(&mut lock_or_recover(&self.children))
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.with_controller(|controller| controller.is_quitting())
    }

    pub(crate) fn set_memory_watch_stop(&self, stop: Arc<AtomicBool>) {
        if let Some(previous) = lock_or_recover(&self.memory_watch_stop).replace(stop) {
            previous.store(true, Ordering::Relaxed);
        }
    }

    pub(crate) fn stop_memory_watch(&self) -> bool {
        match lock_or_recover(&self.memory_watch_stop).take() {
            Some(stop) => {
                stop.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::{shell_locale, window_state::Visibility};

    fn test_state(settings: &ShellSettings) -> (tempfile::TempDir, ShellState) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let profile = SharedProfile::build(temp.path(), settings).expect("build profile");
        let state = ShellState::new(
            Arc::new(profile),
            shell_locale::shell_texts_for_locale("en-US"),
            settings,
        );
        (temp, state)
    }

    #[test]
    fn atomic_flag_guard_try_set_rejects_double_set_until_drop() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first set should succeed");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }

    #[test]
    fn shell_state_starts_visible_and_takes_settings() {
        let settings = ShellSettings {
            notifications_enabled: false,
            memory_check_interval_secs: Some(300),
            ..ShellSettings::default()
        };
        let (_temp, state) = test_state(&settings);
        assert!(!state.notifications_enabled);
        assert_eq!(state.memory_check_interval, Duration::from_secs(300));
        assert_eq!(
            state.with_controller(|controller| controller.visibility()),
            Visibility::Visible
        );
        assert!(!state.is_quitting());
    }

    #[test]
    fn memory_watch_stop_flag_is_raised_once() {
        let (_temp, state) = test_state(&ShellSettings::default());
        let first = Arc::new(AtomicBool::new(false));
        let second = Arc::new(AtomicBool::new(false));

        state.set_memory_watch_stop(Arc::clone(&first));
        state.set_memory_watch_stop(Arc::clone(&second));
        assert!(first.load(Ordering::Relaxed));
        assert!(!second.load(Ordering::Relaxed));

        assert!(state.stop_memory_watch());
        assert!(second.load(Ordering::Relaxed));
        assert!(!state.stop_memory_watch());
    }
}
