//! Focus-restoring modal dialog.
//!
//! Tracks the open state of a dialog over an ordered list of its focusable
//! elements. Opening records whatever had focus and hands focus to the first
//! focusable element; closing (via the close control, the backdrop, or
//! Escape) hands it back. The host applies the returned focus targets; the
//! widget itself never touches anything.

/// Why the modal is closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// An explicit close control inside the dialog.
    CloseControl,
    /// A click on the backdrop around the dialog.
    Backdrop,
    /// The Escape key.
    Escape,
}

/// Modal dialog state machine.
#[derive(Debug)]
pub struct Modal {
    focusables: Vec<String>,
    open: bool,
    last_focus: Option<String>,
}

impl Modal {
    /// Create a modal over its focusable elements, in tab order.
    pub fn new<I, S>(focusables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            focusables: focusables.into_iter().map(Into::into).collect(),
            open: false,
            last_focus: None,
        }
    }

    /// Open the dialog, recording the element that had focus.
    ///
    /// Returns the element that should receive focus (the first focusable),
    /// or `None` when the dialog has no focusable elements or is already
    /// open (a repeated open is a no-op).
    pub fn open(&mut self, previously_focused: Option<&str>) -> Option<&str> {
        if self.open {
            return None;
        }
        self.open = true;
        self.last_focus = previously_focused.map(str::to_string);
        self.focusables.first().map(String::as_str)
    }

    /// Close the dialog, returning the element to restore focus to.
    pub fn close(&mut self, _reason: CloseReason) -> Option<String> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.last_focus.take()
    }

    /// Escape closes only an open dialog; otherwise this is a no-op.
    pub fn on_escape(&mut self) -> Option<String> {
        if self.open {
            self.close(CloseReason::Escape)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The value the host should project into its hidden-from-assistive-tech
    /// attribute: true whenever the dialog is closed.
    #[inline]
    pub fn aria_hidden(&self) -> bool {
        !self.open
    }

    /// First focusable element, if any.
    pub fn first_focusable(&self) -> Option<&str> {
        self.focusables.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_modal() -> Modal {
        Modal::new(["download-link", "close-button"])
    }

    #[test]
    fn test_open_focuses_first_focusable() {
        let mut modal = resume_modal();
        let target = modal.open(Some("open-resume"));
        assert_eq!(target, Some("download-link"));
        assert!(modal.is_open());
        assert!(!modal.aria_hidden());
    }

    #[test]
    fn test_escape_restores_previous_focus() {
        let mut modal = resume_modal();
        modal.open(Some("open-resume"));
        assert_eq!(modal.on_escape(), Some("open-resume".into()));
        assert!(!modal.is_open());
        assert!(modal.aria_hidden());
    }

    #[test]
    fn test_escape_when_closed_is_noop() {
        let mut modal = resume_modal();
        assert_eq!(modal.on_escape(), None);
    }

    #[test]
    fn test_close_reasons_all_restore() {
        for reason in [CloseReason::CloseControl, CloseReason::Backdrop] {
            let mut modal = resume_modal();
            modal.open(Some("trigger"));
            assert_eq!(modal.close(reason), Some("trigger".into()));
        }
    }

    #[test]
    fn test_double_open_is_noop() {
        let mut modal = resume_modal();
        modal.open(Some("first"));
        assert_eq!(modal.open(Some("second")), None);
        // The first trigger is still the restore target.
        assert_eq!(modal.on_escape(), Some("first".into()));
    }

    #[test]
    fn test_no_focusables_still_opens() {
        let mut modal = Modal::new(Vec::<String>::new());
        assert_eq!(modal.open(Some("trigger")), None);
        assert!(modal.is_open());
    }

    #[test]
    fn test_reopen_after_close() {
        let mut modal = resume_modal();
        modal.open(Some("a"));
        modal.close(CloseReason::Backdrop);
        assert_eq!(modal.open(Some("b")), Some("download-link"));
        assert_eq!(modal.on_escape(), Some("b".into()));
    }
}
