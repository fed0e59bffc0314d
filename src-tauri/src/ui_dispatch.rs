use tauri::AppHandle;

/// Marshals `task` onto the UI thread. Engine callbacks use this before they
/// touch shell state.
pub(crate) fn run_on_main_thread_dispatch<F>(
    app_handle: &AppHandle,
    task_name: &str,
    task: F,
) -> Result<(), String>
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let main_app = app_handle.clone();
    app_handle
        .run_on_main_thread(move || task(&main_app))
        .map_err(|error| format!("Failed to dispatch '{task_name}' to main thread: {error}"))
}
