//! Page-fade transitions and internal-navigation interception.
//!
//! The host fades the page in once it signals [`PageFade::ready`], and fades
//! it out when a click on an internal link is intercepted: navigation is
//! deferred by [`LEAVE_DELAY`] so the fade can play, then the pending target
//! is released from [`PageFade::tick`].

use std::time::Duration;

/// How long the fade-out plays before the pending navigation is released.
pub const LEAVE_DELAY: Duration = Duration::from_millis(260);

/// What a clicked link points at. Only [`LinkKind::Internal`] is intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Absolute http(s) URL; leaves the site, no fade.
    External,
    /// In-page fragment (or an empty href): nothing to navigate to.
    Anchor,
    /// `mailto:` / `tel:`, handled by the platform.
    Contact,
    /// Direct file download (`.pdf` or an explicit download attribute).
    Download,
    /// Everything else: an internal page we can fade toward.
    Internal,
}

/// Classify a link target the way the click interceptor does.
pub fn classify(href: &str, has_download: bool) -> LinkKind {
    if href.is_empty() || href.starts_with('#') {
        LinkKind::Anchor
    } else if href.starts_with("http") {
        LinkKind::External
    } else if href.starts_with("mailto:") || href.starts_with("tel:") {
        LinkKind::Contact
    } else if has_download || href.ends_with(".pdf") {
        LinkKind::Download
    } else {
        LinkKind::Internal
    }
}

/// Fade lifecycle of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    /// Freshly constructed; the host has not painted yet.
    Entering,
    /// Page is visible and interactive.
    Ready,
    /// Fading out toward a pending navigation.
    Leaving,
}

/// Page transition state machine.
#[derive(Debug)]
pub struct PageFade {
    state: FadeState,
    pending: Option<String>,
    remaining: Duration,
}

impl PageFade {
    /// A new page starts in [`FadeState::Entering`].
    pub fn new() -> Self {
        Self {
            state: FadeState::Entering,
            pending: None,
            remaining: Duration::ZERO,
        }
    }

    /// Signal that the page has painted; the host's fade-in can play.
    pub fn ready(&mut self) {
        if self.state == FadeState::Entering {
            self.state = FadeState::Ready;
        }
    }

    /// Offer a clicked link. Returns true when the click was intercepted,
    /// in which case the host must suppress its default navigation and start
    /// the fade-out.
    pub fn navigate(&mut self, href: &str, has_download: bool) -> bool {
        if self.state == FadeState::Leaving {
            return false;
        }
        if classify(href, has_download) != LinkKind::Internal {
            return false;
        }
        self.state = FadeState::Leaving;
        self.pending = Some(href.to_string());
        self.remaining = LEAVE_DELAY;
        true
    }

    /// Advance the fade-out countdown. Once the delay has fully elapsed the
    /// pending target is returned exactly once; the host navigates to it.
    pub fn tick(&mut self, dt: Duration) -> Option<String> {
        if self.state != FadeState::Leaving {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.pending.take()
        } else {
            None
        }
    }

    /// Current fade state.
    #[inline]
    pub fn state(&self) -> FadeState {
        self.state
    }

    /// Whether a fade-out is in progress.
    #[inline]
    pub fn is_leaving(&self) -> bool {
        self.state == FadeState::Leaving
    }
}

impl Default for PageFade {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(classify("https://example.com", false), LinkKind::External);
        assert_eq!(classify("http://example.com", false), LinkKind::External);
        assert_eq!(classify("#projects", false), LinkKind::Anchor);
        assert_eq!(classify("", false), LinkKind::Anchor);
        assert_eq!(classify("mailto:me@example.com", false), LinkKind::Contact);
        assert_eq!(classify("tel:+441130000000", false), LinkKind::Contact);
        assert_eq!(classify("cv.pdf", false), LinkKind::Download);
        assert_eq!(classify("cv", true), LinkKind::Download);
        assert_eq!(classify("projects.html", false), LinkKind::Internal);
        assert_eq!(classify("about", false), LinkKind::Internal);
    }

    #[test]
    fn test_only_internal_links_intercepted() {
        let mut fade = PageFade::new();
        fade.ready();
        assert!(!fade.navigate("https://example.com", false));
        assert!(!fade.navigate("#top", false));
        assert!(!fade.navigate("cv.pdf", false));
        assert!(!fade.is_leaving());
        assert!(fade.navigate("about.html", false));
        assert!(fade.is_leaving());
    }

    #[test]
    fn test_release_after_exact_delay() {
        let mut fade = PageFade::new();
        fade.ready();
        assert!(fade.navigate("about.html", false));

        assert_eq!(fade.tick(Duration::from_millis(259)), None);
        assert_eq!(fade.tick(Duration::from_millis(1)), Some("about.html".into()));
        // Released exactly once.
        assert_eq!(fade.tick(Duration::from_millis(100)), None);
    }

    #[test]
    fn test_second_click_while_leaving_ignored() {
        let mut fade = PageFade::new();
        fade.ready();
        assert!(fade.navigate("about.html", false));
        assert!(!fade.navigate("projects.html", false));
        assert_eq!(fade.tick(LEAVE_DELAY), Some("about.html".into()));
    }

    #[test]
    fn test_enter_then_ready() {
        let mut fade = PageFade::new();
        assert_eq!(fade.state(), FadeState::Entering);
        fade.ready();
        assert_eq!(fade.state(), FadeState::Ready);
    }
}
