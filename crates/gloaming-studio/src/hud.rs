//! Screen-space layout of the page chrome and the excerpt modal.

use gloaming_engine::coords::{Rect, Vec2, Viewport};

pub const PROGRESS_HEIGHT: f32 = 3.0;
pub const NAV_HEIGHT: f32 = 44.0;
const NAV_BUTTON_WIDTH: f32 = 96.0;
const NAV_BUTTON_GAP: f32 = 8.0;

const MARKER_SIZE: f32 = 10.0;
const MARKER_GAP: f32 = 18.0;
const MARKER_MARGIN: f32 = 24.0;

const EXCERPT_BUTTON: Vec2 = Vec2::new(180.0, 40.0);
const EXCERPT_BUTTON_BOTTOM: f32 = 96.0;

const PANEL_MAX_WIDTH: f32 = 720.0;
const PANEL_MARGIN: f32 = 32.0;
const CLOSE_SIZE: f32 = 28.0;

/// Excerpt shown for each section, by section index.
pub const SECTION_EXCERPTS: [&str; 4] = ["the-glade", "the-thicket", "bone-eaters", "the-clearing"];

/// Something a click landed on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HudTarget {
    Nav(usize),
    Excerpt(usize),
    CloseModal,
}

/// Chrome rectangles for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    viewport: Viewport,
    nav: Vec<Rect>,
    markers: Vec<Rect>,
    excerpt_button: Rect,
    panel: Rect,
    close: Rect,
}

impl Hud {
    pub fn new(viewport: Viewport, section_count: usize) -> Self {
        let n = section_count as f32;
        let strip = n * NAV_BUTTON_WIDTH + (n - 1.0).max(0.0) * NAV_BUTTON_GAP;
        let left = ((viewport.width - strip) / 2.0).max(0.0);
        let nav_y = PROGRESS_HEIGHT + 6.0;
        let nav = (0..section_count)
            .map(|i| {
                let x = left + i as f32 * (NAV_BUTTON_WIDTH + NAV_BUTTON_GAP);
                Rect::new(x, nav_y, NAV_BUTTON_WIDTH, NAV_HEIGHT - 12.0)
            })
            .collect();

        let column = n * MARKER_SIZE + (n - 1.0).max(0.0) * MARKER_GAP;
        let top = (viewport.height - column) / 2.0;
        let markers = (0..section_count)
            .map(|i| {
                Rect::new(
                    viewport.width - MARKER_MARGIN - MARKER_SIZE,
                    top + i as f32 * (MARKER_SIZE + MARKER_GAP),
                    MARKER_SIZE,
                    MARKER_SIZE,
                )
            })
            .collect();

        let excerpt_button = Rect::new(
            (viewport.width - EXCERPT_BUTTON.x) / 2.0,
            viewport.height - EXCERPT_BUTTON_BOTTOM - EXCERPT_BUTTON.y,
            EXCERPT_BUTTON.x,
            EXCERPT_BUTTON.y,
        );

        let panel_w = (viewport.width - 2.0 * PANEL_MARGIN).clamp(0.0, PANEL_MAX_WIDTH);
        let panel_h = (viewport.height - 2.0 * PANEL_MARGIN).max(0.0);
        let panel = Rect::new((viewport.width - panel_w) / 2.0, PANEL_MARGIN, panel_w, panel_h);
        let close = Rect::new(
            panel.origin.x + panel.size.x - CLOSE_SIZE - 12.0,
            panel.origin.y + 12.0,
            CLOSE_SIZE,
            CLOSE_SIZE,
        );

        Self {
            viewport,
            nav,
            markers,
            excerpt_button,
            panel,
            close,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn nav_buttons(&self) -> &[Rect] {
        &self.nav
    }

    #[inline]
    pub fn markers(&self) -> &[Rect] {
        &self.markers
    }

    #[inline]
    pub fn excerpt_button(&self) -> Rect {
        self.excerpt_button
    }

    #[inline]
    pub fn panel(&self) -> Rect {
        self.panel
    }

    #[inline]
    pub fn close_button(&self) -> Rect {
        self.close
    }

    /// Resolves a click at `p`.
    ///
    /// With the modal open everything but the panel body closes it. Otherwise
    /// nav buttons navigate and the excerpt button opens the excerpt of
    /// `active_section`.
    pub fn hit(&self, p: Vec2, modal_open: bool, active_section: Option<usize>) -> Option<HudTarget> {
        if modal_open {
            if self.close.contains(p) || !self.panel.contains(p) {
                return Some(HudTarget::CloseModal);
            }
            return None;
        }

        if let Some(i) = self.nav.iter().position(|r| r.contains(p)) {
            return Some(HudTarget::Nav(i));
        }
        match active_section {
            Some(i) if i < SECTION_EXCERPTS.len() && self.excerpt_button.contains(p) => Some(HudTarget::Excerpt(i)),
            _ => None,
        }
    }
}

/// Index of the first active section.
pub fn active_section(flags: &[bool]) -> Option<usize> {
    flags.iter().position(|&on| on)
}
