use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use crate::POPUP_WINDOW_LABEL_PREFIX;

#[derive(Debug, Clone)]
pub struct ChildWindowEntry {
    pub opened_url: String,
    pub opened_at: Instant,
}

impl ChildWindowEntry {
    pub fn open_duration(&self) -> Duration {
        self.opened_at.elapsed()
    }

    pub fn close_summary(&self, label: &str, still_open: usize) -> String {
        format!(
            "popup window {label} for {} closed after {}s ({still_open} still open)",
            self.opened_url,
            self.open_duration().as_secs()
        )
    }
}

/// Popup windows raised by the engine, keyed by window label. Entries are
/// removed when the window reports destruction.
#[derive(Debug, Default)]
pub struct ChildWindowRegistry {
    next_id: u64,
    children: BTreeMap<String, ChildWindowEntry>,
}

pub fn is_child_window_label(label: &str) -> bool {
    label.starts_with(POPUP_WINDOW_LABEL_PREFIX)
}

impl ChildWindowRegistry {
    pub fn allocate_label(&mut self) -> String {
        self.next_id += 1;
        format!("{POPUP_WINDOW_LABEL_PREFIX}{}", self.next_id)
    }

    pub fn register(&mut self, label: String, opened_url: String) {
        self.children.insert(
            label,
            ChildWindowEntry {
                opened_url,
                opened_at: Instant::now(),
            },
        );
    }

    pub fn remove(&mut self, label: &str) -> Option<ChildWindowEntry> {
        self.children.remove(label)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }
}
