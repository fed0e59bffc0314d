//! Window lifecycle and unread-badge state machine.
//!
//! Holds no toolkit types. Every input returns a decision that the window
//! glue applies to the real window and tray, which keeps close-vs-hide and
//! alert transitions testable on their own.

use crate::UNREAD_TITLE_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRole {
    Root,
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
    Closing,
}

/// Whether the next close request hides to tray or really closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseLatch {
    HideOnClose,
    ForceClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    Normal,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    DestroyChild,
    AcceptAndExit,
    HideToTray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitDecision {
    Exit,
    AlreadyQuitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayToggle {
    Hide,
    Show,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleTransition {
    Unchanged,
    EnterAlert { notify: bool },
    LeaveAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFocus {
    pub visible: bool,
    pub focused: bool,
}

pub fn decide_close(role: WindowRole, latch: CloseLatch) -> CloseDecision {
    match (role, latch) {
        (WindowRole::Child, _) => CloseDecision::DestroyChild,
        (WindowRole::Root, CloseLatch::ForceClose) => CloseDecision::AcceptAndExit,
        (WindowRole::Root, CloseLatch::HideOnClose) => CloseDecision::HideToTray,
    }
}

pub fn title_has_unread_marker(title: &str) -> bool {
    title.contains(UNREAD_TITLE_MARKER)
}

pub fn should_trim_on_tick(visibility: Visibility) -> bool {
    visibility == Visibility::Hidden
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowController {
    visibility: Visibility,
    latch: CloseLatch,
    icon: IconState,
}

impl WindowController {
    pub fn new_root() -> Self {
        Self {
            visibility: Visibility::Visible,
            latch: CloseLatch::HideOnClose,
            icon: IconState::Normal,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn icon_state(&self) -> IconState {
        self.icon
    }

    pub fn is_quitting(&self) -> bool {
        self.latch == CloseLatch::ForceClose
    }

    pub fn request_close(&mut self) -> CloseDecision {
        let decision = decide_close(WindowRole::Root, self.latch);
        match decision {
            CloseDecision::HideToTray => self.visibility = Visibility::Hidden,
            CloseDecision::AcceptAndExit => self.visibility = Visibility::Closing,
            CloseDecision::DestroyChild => {}
        }
        decision
    }

    pub fn request_quit(&mut self) -> QuitDecision {
        if self.is_quitting() {
            return QuitDecision::AlreadyQuitting;
        }
        self.latch = CloseLatch::ForceClose;
        self.visibility = Visibility::Closing;
        QuitDecision::Exit
    }

    pub fn toggle_from_tray(&mut self) -> TrayToggle {
        match self.visibility {
            Visibility::Visible => {
                self.visibility = Visibility::Hidden;
                TrayToggle::Hide
            }
            Visibility::Hidden => {
                self.visibility = Visibility::Visible;
                TrayToggle::Show
            }
            Visibility::Closing => TrayToggle::Ignore,
        }
    }

    /// Returns false once the shell is quitting.
    pub fn mark_shown(&mut self) -> bool {
        if self.visibility == Visibility::Closing {
            return false;
        }
        self.visibility = Visibility::Visible;
        true
    }

    pub fn mark_hidden(&mut self) -> bool {
        if self.visibility == Visibility::Closing {
            return false;
        }
        self.visibility = Visibility::Hidden;
        true
    }

    /// Re-aligns with the real window, which the user can also hide or show
    /// outside the tray (taskbar, minimize-to-tray).
    pub fn sync_visibility(&mut self, visible: bool) {
        if self.visibility == Visibility::Closing {
            return;
        }
        self.visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    pub fn on_title_changed(&mut self, title: &str, focus: SurfaceFocus) -> TitleTransition {
        let has_unread = title_has_unread_marker(title);
        match (has_unread, self.icon) {
            (true, IconState::Normal) => {
                self.icon = IconState::Alert;
                TitleTransition::EnterAlert {
                    notify: !focus.visible || !focus.focused,
                }
            }
            (false, IconState::Alert) => {
                self.icon = IconState::Normal;
                TitleTransition::LeaveAlert
            }
            _ => TitleTransition::Unchanged,
        }
    }
}
