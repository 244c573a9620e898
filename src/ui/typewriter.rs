//! Cycling typewriter effect for a headline.
//!
//! Types a fixed string one character at a time, holds it, deletes it, holds
//! the empty line, and starts over. Slicing is by `char`, not bytes, so
//! multibyte headlines are safe. Under reduced motion the widget is built in
//! a permanent static state showing the full text.

use std::time::Duration;

/// Delay between typed characters.
pub const TYPE_DELAY: Duration = Duration::from_millis(32);
/// Delay between deleted characters.
pub const DELETE_DELAY: Duration = Duration::from_millis(18);
/// How long the full text is held before deleting begins.
pub const HOLD_FULL: Duration = Duration::from_millis(1100);
/// How long the empty line is held before typing restarts.
pub const HOLD_EMPTY: Duration = Duration::from_millis(500);

/// Where the cycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    HoldFull,
    Deleting,
    HoldEmpty,
    /// Reduced motion (or an empty text): full text, never advances.
    Static,
}

/// The typewriter state machine.
#[derive(Debug)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    phase: Phase,
    remaining: Duration,
}

impl Typewriter {
    /// A cycling typewriter starting from the empty line.
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Self::fixed(text);
        }
        Self {
            chars,
            shown: 0,
            phase: Phase::Typing,
            remaining: TYPE_DELAY,
        }
    }

    /// A static typewriter permanently showing the full text.
    pub fn fixed(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self {
            shown: chars.len(),
            chars,
            phase: Phase::Static,
            remaining: Duration::ZERO,
        }
    }

    /// Pick the cycling or static variant based on the reduced-motion
    /// preference.
    pub fn with_reduced_motion(text: &str, reduced: bool) -> Self {
        if reduced {
            Self::fixed(text)
        } else {
            Self::new(text)
        }
    }

    /// Advance the cycle by `dt`. Large deltas replay every step they cover.
    pub fn tick(&mut self, mut dt: Duration) {
        if self.phase == Phase::Static {
            return;
        }
        while dt >= self.remaining {
            dt -= self.remaining;
            self.step();
        }
        self.remaining -= dt;
    }

    /// The currently visible prefix.
    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of characters currently shown.
    #[inline]
    pub fn shown(&self) -> usize {
        self.shown
    }

    // One step of the cycle. The first deletion fires as the full-hold
    // expires, and the first typed character as the empty-hold expires.
    fn step(&mut self) {
        match self.phase {
            Phase::Typing => {
                self.shown += 1;
                if self.shown == self.chars.len() {
                    self.phase = Phase::HoldFull;
                    self.remaining = HOLD_FULL;
                } else {
                    self.remaining = TYPE_DELAY;
                }
            }
            Phase::HoldFull | Phase::Deleting => {
                self.shown -= 1;
                if self.shown == 0 {
                    self.phase = Phase::HoldEmpty;
                    self.remaining = HOLD_EMPTY;
                } else {
                    self.phase = Phase::Deleting;
                    self.remaining = DELETE_DELAY;
                }
            }
            Phase::HoldEmpty => {
                self.shown += 1;
                if self.shown == self.chars.len() {
                    self.phase = Phase::HoldFull;
                    self.remaining = HOLD_FULL;
                } else {
                    self.phase = Phase::Typing;
                    self.remaining = TYPE_DELAY;
                }
            }
            Phase::Static => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_one_char_per_delay() {
        let mut tw = Typewriter::new("abc");
        assert_eq!(tw.visible(), "");
        tw.tick(TYPE_DELAY);
        assert_eq!(tw.visible(), "a");
        tw.tick(TYPE_DELAY);
        assert_eq!(tw.visible(), "ab");
    }

    #[test]
    fn test_full_cycle() {
        let mut tw = Typewriter::new("hi");
        tw.tick(TYPE_DELAY * 2);
        assert_eq!(tw.visible(), "hi");
        assert_eq!(tw.phase(), Phase::HoldFull);

        // The first deletion fires exactly when the hold expires.
        tw.tick(HOLD_FULL);
        assert_eq!(tw.visible(), "h");
        assert_eq!(tw.phase(), Phase::Deleting);

        tw.tick(DELETE_DELAY);
        assert_eq!(tw.visible(), "");
        assert_eq!(tw.phase(), Phase::HoldEmpty);

        // And the first re-typed character when the empty hold expires.
        tw.tick(HOLD_EMPTY);
        assert_eq!(tw.visible(), "h");
        assert_eq!(tw.phase(), Phase::Typing);
    }

    #[test]
    fn test_large_delta_replays_steps() {
        let mut tw = Typewriter::new("abcd");
        tw.tick(TYPE_DELAY * 3);
        assert_eq!(tw.visible(), "abc");
        assert_eq!(tw.phase(), Phase::Typing);
    }

    #[test]
    fn test_reduced_motion_is_static() {
        let mut tw = Typewriter::with_reduced_motion("headline", true);
        assert_eq!(tw.visible(), "headline");
        assert_eq!(tw.phase(), Phase::Static);
        tw.tick(Duration::from_secs(60));
        assert_eq!(tw.visible(), "headline");
    }

    #[test]
    fn test_multibyte_text() {
        let mut tw = Typewriter::new("Δx—ok");
        tw.tick(TYPE_DELAY * 2);
        assert_eq!(tw.visible(), "Δx");
        tw.tick(TYPE_DELAY * 3);
        assert_eq!(tw.visible(), "Δx—ok");
    }

    #[test]
    fn test_empty_text_never_panics() {
        let mut tw = Typewriter::new("");
        assert_eq!(tw.phase(), Phase::Static);
        tw.tick(Duration::from_secs(1));
        assert_eq!(tw.visible(), "");
    }
}
