//! Scroll position, extents and nav-driven smooth scrolling.

use crate::zone::Zone;

/// Pixels scrolled per wheel line.
pub const LINE_HEIGHT_PX: f32 = 40.0;

/// Rate of the exponential approach used for smooth scrolling, per second.
pub const SMOOTH_SCROLL_RATE: f32 = 10.0;

/// Distance below which a smooth scroll snaps onto its target.
const SNAP_PX: f32 = 0.5;

/// Raw scroll state as the host layout reports it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollMetrics {
    /// Current top offset in px.
    pub offset: f32,
    pub document_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    #[inline]
    pub fn max_scroll(&self) -> f32 {
        self.document_height - self.viewport_height
    }

    /// Normalized position in `[0, 1]`; 0 when the document does not scroll.
    pub fn fraction(&self) -> f32 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        (self.offset / max).clamp(0.0, 1.0)
    }
}

/// Wheel input in platform-neutral units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScrollDelta {
    Lines(f32),
    Pixels(f32),
}

impl ScrollDelta {
    #[inline]
    pub fn to_pixels(self) -> f32 {
        match self {
            ScrollDelta::Lines(l) => l * LINE_HEIGHT_PX,
            ScrollDelta::Pixels(p) => p,
        }
    }
}

/// A scrollable document.
///
/// Offsets stay within `[0, max_scroll]`. While locked (an overlay is open)
/// wheel and nav input are ignored.
#[derive(Debug, Clone)]
pub struct ScrollDocument {
    metrics: ScrollMetrics,
    target: Option<f32>,
    locked: bool,
}

impl ScrollDocument {
    pub fn new(document_height: f32, viewport_height: f32) -> Self {
        Self {
            metrics: ScrollMetrics {
                offset: 0.0,
                document_height,
                viewport_height,
            },
            target: None,
            locked: false,
        }
    }

    #[inline]
    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.metrics.offset
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.metrics.fraction()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.target = None;
        }
    }

    /// Updates the extents after a resize, keeping the offset in range.
    pub fn resize(&mut self, document_height: f32, viewport_height: f32) {
        self.metrics.document_height = document_height;
        self.metrics.viewport_height = viewport_height;
        self.metrics.offset = self.clamp_offset(self.metrics.offset);
        self.target = self.target.map(|t| self.clamp_offset(t));
    }

    /// Applies wheel input. Returns `true` when the offset changed.
    ///
    /// Wheel input cancels any smooth scroll in progress.
    pub fn scroll_by(&mut self, delta: ScrollDelta) -> bool {
        if self.locked {
            return false;
        }
        self.target = None;
        self.set_offset(self.metrics.offset + delta.to_pixels())
    }

    /// Jumps to `offset`. Returns `true` when the offset changed.
    pub fn set_offset(&mut self, offset: f32) -> bool {
        let next = self.clamp_offset(offset);
        let changed = next != self.metrics.offset;
        self.metrics.offset = next;
        changed
    }

    /// Starts a smooth scroll to the center of `sections[index]`.
    ///
    /// Out-of-range indices are ignored; returns whether a scroll started.
    pub fn scroll_to_section(&mut self, sections: &[Zone], index: usize) -> bool {
        if self.locked {
            return false;
        }
        match nav_target(sections, index, self.metrics.max_scroll()) {
            Some(target) => {
                self.target = Some(target);
                log::debug!("nav to section {index} (offset {target:.0}px)");
                true
            }
            None => {
                log::warn!("nav to section {index} ignored; {} sections", sections.len());
                false
            }
        }
    }

    /// Advances a smooth scroll by `dt` seconds. Returns `true` when the offset changed.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let current = self.metrics.offset;
        let remaining = target - current;
        let next = if remaining.abs() <= SNAP_PX {
            target
        } else {
            current + remaining * (1.0 - (-SMOOTH_SCROLL_RATE * dt.max(0.0)).exp())
        };

        if (target - next).abs() <= SNAP_PX {
            self.target = None;
            return self.set_offset(target);
        }
        self.set_offset(next)
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.metrics.max_scroll().max(0.0))
    }
}

/// Offset that centers the scroll fraction on `sections[index]`.
pub fn nav_target(sections: &[Zone], index: usize, max_scroll: f32) -> Option<f32> {
    let section = sections.get(index)?;
    Some(section.center() * max_scroll.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Zone> {
        vec![
            Zone::new(0.0, 0.22),
            Zone::new(0.22, 0.45),
            Zone::new(0.45, 0.72),
            Zone::new(0.72, 1.0),
        ]
    }

    #[test]
    fn fraction_is_clamped() {
        let m = ScrollMetrics { offset: 250.0, document_height: 1500.0, viewport_height: 500.0 };
        assert_eq!(m.fraction(), 0.25);
        let over = ScrollMetrics { offset: 5000.0, ..m };
        assert_eq!(over.fraction(), 1.0);
        let under = ScrollMetrics { offset: -20.0, ..m };
        assert_eq!(under.fraction(), 0.0);
    }

    #[test]
    fn short_document_has_zero_fraction() {
        let m = ScrollMetrics { offset: 10.0, document_height: 400.0, viewport_height: 800.0 };
        assert_eq!(m.fraction(), 0.0);
        let mut doc = ScrollDocument::new(400.0, 800.0);
        assert!(!doc.scroll_by(ScrollDelta::Pixels(300.0)));
        assert_eq!(doc.offset(), 0.0);
    }

    #[test]
    fn wheel_lines_and_pixels() {
        let mut doc = ScrollDocument::new(3000.0, 1000.0);
        assert!(doc.scroll_by(ScrollDelta::Lines(3.0)));
        assert_eq!(doc.offset(), 3.0 * LINE_HEIGHT_PX);
        doc.scroll_by(ScrollDelta::Pixels(-1000.0));
        assert_eq!(doc.offset(), 0.0);
        doc.scroll_by(ScrollDelta::Pixels(9000.0));
        assert_eq!(doc.offset(), 2000.0);
        assert_eq!(doc.fraction(), 1.0);
    }

    #[test]
    fn nav_targets_section_centers() {
        let s = sections();
        let first = nav_target(&s, 0, 1000.0).unwrap();
        let last = nav_target(&s, 3, 1000.0).unwrap();
        assert!((first - 110.0).abs() < 1e-3);
        assert!((last - 860.0).abs() < 1e-3);
        assert_eq!(nav_target(&s, 4, 1000.0), None);
    }

    #[test]
    fn smooth_scroll_converges_and_stops() {
        let s = sections();
        let mut doc = ScrollDocument::new(2000.0, 1000.0);
        assert!(doc.scroll_to_section(&s, 2));
        let mut steps = 0;
        while doc.is_animating() && steps < 600 {
            doc.step(1.0 / 60.0);
            steps += 1;
        }
        assert!(!doc.is_animating());
        assert!((doc.offset() - 585.0).abs() < 1e-3);
        assert!(!doc.step(1.0 / 60.0));
    }

    #[test]
    fn wheel_cancels_smooth_scroll() {
        let mut doc = ScrollDocument::new(2000.0, 1000.0);
        doc.scroll_to_section(&sections(), 3);
        doc.step(1.0 / 60.0);
        doc.scroll_by(ScrollDelta::Pixels(5.0));
        assert!(!doc.is_animating());
    }

    #[test]
    fn locked_document_ignores_input() {
        let mut doc = ScrollDocument::new(2000.0, 1000.0);
        doc.set_locked(true);
        assert!(doc.is_locked());
        assert!(!doc.scroll_by(ScrollDelta::Lines(2.0)));
        assert!(!doc.scroll_to_section(&sections(), 1));
        doc.set_locked(false);
        assert!(doc.scroll_by(ScrollDelta::Lines(2.0)));
    }

    #[test]
    fn resize_keeps_offset_in_range() {
        let mut doc = ScrollDocument::new(3000.0, 1000.0);
        doc.set_offset(1800.0);
        doc.resize(2000.0, 1000.0);
        assert_eq!(doc.offset(), 1000.0);
    }
}
