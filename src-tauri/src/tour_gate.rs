use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{runtime_paths, TOUR_MARKER_FILE};

const TOUR_MARKER_CONTENT: &str = "Tour completed.";

/// One-time welcome flag persisted as the existence of a marker file.
#[derive(Debug, Clone)]
pub struct TourGate {
    marker_path: PathBuf,
}

impl TourGate {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            marker_path: config_dir.join(TOUR_MARKER_FILE),
        }
    }

    pub fn should_show(&self) -> bool {
        !self.marker_path.exists()
    }

    pub fn mark_shown(&self) -> Result<(), String> {
        if let Some(parent) = self.marker_path.parent() {
            runtime_paths::ensure_dir(parent)?;
        }
        fs::write(&self.marker_path, TOUR_MARKER_CONTENT).map_err(|error| {
            format!(
                "Failed to write tour marker {}: {}",
                self.marker_path.display(),
                error
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_construction_shows_tour_and_second_does_not() {
        let temp = tempfile::tempdir().expect("create temp dir");

        let first = TourGate::new(temp.path());
        assert!(first.should_show());
        first.mark_shown().expect("write marker");
        assert!(temp.path().join(TOUR_MARKER_FILE).is_file());

        let second = TourGate::new(temp.path());
        assert!(!second.should_show());
    }

    #[test]
    fn marker_existence_matters_not_content() {
        let temp = tempfile::tempdir().expect("create temp dir");
        fs::write(temp.path().join(TOUR_MARKER_FILE), "").expect("write empty marker");
        assert!(!TourGate::new(temp.path()).should_show());
    }

    #[test]
    fn mark_shown_creates_missing_config_dir() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let config_dir = temp.path().join("fresh");
        let gate = TourGate::new(&config_dir);
        gate.mark_shown().expect("write marker");
        assert!(!gate.should_show());
    }

    #[test]
    fn mark_shown_reports_unwritable_location() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "file").expect("write blocker file");

        let gate = TourGate::new(&blocker);
        assert!(gate.mark_shown().is_err());
        assert!(gate.should_show());
    }
}
