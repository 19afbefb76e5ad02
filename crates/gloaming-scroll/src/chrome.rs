//! Page chrome derived from the scroll fraction.

use crate::config::ChromeThresholds;

/// Progress bar, nav bar, scroll hint and entry screen state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChromeState {
    /// Progress bar fill in `[0, 1]`; equals the scroll fraction.
    pub progress: f32,
    pub nav_dark: bool,
    pub hint_visible: bool,
    pub entry_hidden: bool,
}

impl ChromeState {
    pub fn at(t: f32, thresholds: &ChromeThresholds) -> Self {
        let (dark_lo, dark_hi) = thresholds.nav_dark;
        let (hint_lo, hint_hi) = thresholds.hint_visible;
        Self {
            progress: t,
            nav_dark: t > dark_lo && t < dark_hi,
            hint_visible: t > hint_lo && t < hint_hi,
            entry_hidden: t > thresholds.entry_hidden_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_page() {
        let c = ChromeState::at(0.0, &ChromeThresholds::default());
        assert_eq!(c.progress, 0.0);
        assert!(!c.nav_dark && !c.hint_visible && !c.entry_hidden);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let th = ChromeThresholds::default();
        assert!(!ChromeState::at(0.01, &th).entry_hidden);
        assert!(ChromeState::at(0.011, &th).entry_hidden);
        assert!(!ChromeState::at(0.4, &th).nav_dark);
        assert!(ChromeState::at(0.55, &th).nav_dark);
        assert!(!ChromeState::at(0.7, &th).nav_dark);
        assert!(!ChromeState::at(0.15, &th).hint_visible);
        assert!(ChromeState::at(0.5, &th).hint_visible);
        assert!(!ChromeState::at(0.85, &th).hint_visible);
    }
}
