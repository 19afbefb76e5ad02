//! Scroll-fraction ranges: sprite zones, the dark zone and content sections.

/// Inclusive sub-range of the scroll fraction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Zone {
    pub start: f32,
    pub end: f32,
}

impl Zone {
    #[inline]
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// `start <= t <= end`.
    #[inline]
    pub fn contains(self, t: f32) -> bool {
        t >= self.start && t <= self.end
    }

    #[inline]
    pub fn center(self) -> f32 {
        (self.start + self.end) / 2.0
    }

    #[inline]
    pub fn half_width(self) -> f32 {
        (self.end - self.start) / 2.0
    }
}

/// The mid-page darkness: ramps up to `peak`, back down to `end`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DarkZone {
    pub start: f32,
    pub peak: f32,
    pub end: f32,
}

impl DarkZone {
    #[inline]
    pub const fn new(start: f32, peak: f32, end: f32) -> Self {
        Self { start, peak, end }
    }

    #[inline]
    pub fn zone(self) -> Zone {
        Zone::new(self.start, self.end)
    }

    #[inline]
    pub fn contains(self, t: f32) -> bool {
        self.zone().contains(t)
    }

    /// Triangular darkness in `[0, 1]`: 0 at `start` and `end`, 1 at `peak`.
    pub fn intensity(self, t: f32) -> f32 {
        if t >= self.start && t <= self.peak {
            ramp(t - self.start, self.peak - self.start)
        } else if t > self.peak && t <= self.end {
            1.0 - ramp(t - self.peak, self.end - self.peak)
        } else {
            0.0
        }
    }
}

// A degenerate ramp is a step straight to full darkness.
#[inline]
fn ramp(offset: f32, span: f32) -> f32 {
    if span <= 0.0 { 1.0 } else { (offset / span).clamp(0.0, 1.0) }
}

/// Scale applied to a section's half width to get its active window.
pub const SECTION_ACTIVE_SPAN: f32 = 0.85;

/// Beyond this fraction the final section is always active.
pub const LAST_SECTION_OVERRIDE: f32 = 0.85;

/// Active flags for each section at fraction `t`.
///
/// A section is active when `|t - center| < 0.85 * half_width`. The last
/// section is also active for any `t > 0.85` so the page end stays marked.
pub fn section_flags(sections: &[Zone], t: f32) -> Vec<bool> {
    let last = sections.len().saturating_sub(1);
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let active = (t - s.center()).abs() < s.half_width() * SECTION_ACTIVE_SPAN;
            active || (i == last && t > LAST_SECTION_OVERRIDE)
        })
        .collect()
}
