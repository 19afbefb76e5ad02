use std::time::Duration;

use gloaming_engine::coords::{Vec2, Viewport};
use gloaming_engine::core::{App, AppControl, FrameCtx};
use gloaming_engine::input::{InputFrame, Key, MouseButton, MouseWheelDelta};
use gloaming_engine::render::QuadRenderer;
use gloaming_engine::scene::DrawList;
use gloaming_scroll::{
    DirExcerptSource, ExcerptModal, ExcerptSource, FrameDriver, FrameOutput, NarrativeConfig, ScrollDelta,
    ScrollDocument,
};

use crate::config::StudioConfig;
use crate::draw::{self, Scene};
use crate::hud::{active_section, Hud, HudTarget, SECTION_EXCERPTS};

/// Document height in viewport heights.
pub const DOCUMENT_SCREENS: f32 = 8.0;

/// Fraction of the viewport a page key scrolls.
const PAGE_FRACTION: f32 = 0.9;

const TITLE: &str = "Gloaming";

/// A user intent decoded from one frame of input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Action {
    Scroll(ScrollDelta),
    /// Page up (`-1`) or down (`+1`).
    Page(f32),
    Top,
    Bottom,
    Nav(usize),
    OpenExcerpt(usize),
    CloseExcerpt,
}

/// Decodes this frame's input, in a stable order: keys, wheel, clicks.
pub fn collect_actions(input: &InputFrame, hud: &Hud, modal_open: bool, active: Option<usize>) -> Vec<Action> {
    let mut actions = Vec::new();

    if input.key_pressed(Key::Escape) && modal_open {
        actions.push(Action::CloseExcerpt);
    }
    for key in [Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4] {
        if let Some(i) = key.digit_index().filter(|_| input.key_pressed(key)) {
            actions.push(Action::Nav(i));
        }
    }
    if input.key_pressed(Key::PageDown) || input.key_pressed(Key::Space) {
        actions.push(Action::Page(1.0));
    }
    if input.key_pressed(Key::PageUp) {
        actions.push(Action::Page(-1.0));
    }
    if input.key_pressed(Key::ArrowDown) {
        actions.push(Action::Scroll(ScrollDelta::Lines(1.0)));
    }
    if input.key_pressed(Key::ArrowUp) {
        actions.push(Action::Scroll(ScrollDelta::Lines(-1.0)));
    }
    if input.key_pressed(Key::Home) {
        actions.push(Action::Top);
    }
    if input.key_pressed(Key::End) {
        actions.push(Action::Bottom);
    }
    if input.key_pressed(Key::Enter) && !modal_open {
        if let Some(i) = active {
            actions.push(Action::OpenExcerpt(i));
        }
    }

    // winit reports wheel-up as positive; the document grows downward.
    for delta in input.wheel() {
        actions.push(Action::Scroll(match delta {
            MouseWheelDelta::Line { y, .. } => ScrollDelta::Lines(-y),
            MouseWheelDelta::Pixel { y, .. } => ScrollDelta::Pixels(-y),
        }));
    }

    for (x, y) in input.presses(MouseButton::Left) {
        match hud.hit(Vec2::new(x, y), modal_open, active) {
            Some(HudTarget::Nav(i)) => actions.push(Action::Nav(i)),
            Some(HudTarget::Excerpt(i)) => actions.push(Action::OpenExcerpt(i)),
            Some(HudTarget::CloseModal) => actions.push(Action::CloseExcerpt),
            None => {}
        }
    }

    actions
}

/// One narrative session: created on the first frame, when the viewport
/// width that picks the device profile is known.
pub struct Session {
    pub doc: ScrollDocument,
    pub driver: FrameDriver,
    pub modal: ExcerptModal,
    pub hud: Hud,
    /// Latest recompute; repainted until the next one.
    pub last: Option<FrameOutput>,
}

impl Session {
    pub fn start(viewport: Viewport, seed: Option<u64>) -> Self {
        let driver = FrameDriver::new(NarrativeConfig::default(), viewport.width, seed);
        let hud = Hud::new(viewport, driver.sections().len());
        Self {
            doc: ScrollDocument::new(viewport.height * DOCUMENT_SCREENS, viewport.height),
            driver,
            modal: ExcerptModal::new(),
            hud,
            last: None,
        }
    }

    /// Follows a window resize. The foliage layout is kept.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.hud.viewport() == viewport {
            return;
        }
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
        self.hud = Hud::new(viewport, self.driver.sections().len());
        self.doc.resize(viewport.height * DOCUMENT_SCREENS, viewport.height);
        self.driver.notify_scroll();
    }

    pub fn active_section(&self) -> Option<usize> {
        self.last.as_ref().and_then(|out| active_section(&out.sections))
    }

    /// Applies `action`. Returns `true` when the modal opened or closed.
    pub fn apply<S: ExcerptSource + ?Sized>(&mut self, action: Action, source: &S) -> bool {
        let viewport_h = self.hud.viewport().height;
        let moved = match action {
            Action::Scroll(delta) => self.doc.scroll_by(delta),
            Action::Page(dir) => self.doc.scroll_by(ScrollDelta::Pixels(dir * viewport_h * PAGE_FRACTION)),
            // Offsets clamp, so an oversized jump lands on the end.
            Action::Top => self.doc.scroll_by(ScrollDelta::Pixels(f32::MIN)),
            Action::Bottom => self.doc.scroll_by(ScrollDelta::Pixels(f32::MAX)),
            Action::Nav(i) => {
                let sections = self.driver.sections().to_vec();
                self.doc.scroll_to_section(&sections, i);
                false
            }
            Action::OpenExcerpt(i) => {
                let Some(id) = SECTION_EXCERPTS.get(i) else { return false };
                self.modal.open(id, source);
                self.doc.set_locked(true);
                return true;
            }
            Action::CloseExcerpt => {
                let closed = self.modal.close();
                self.doc.set_locked(self.modal.is_open());
                return closed;
            }
        };
        if moved {
            self.driver.notify_scroll();
        }
        false
    }

    /// Advances smooth scrolling and runs the frame recompute if one is due.
    pub fn tick(&mut self, dt: f32, now: Duration) {
        if self.doc.step(dt) {
            self.driver.notify_scroll();
        }
        if let Some(out) = self.driver.run_frame(self.doc.metrics(), now) {
            self.last = Some(out);
        }
    }
}

/// Hosts the narrative in a window.
pub struct StudioApp {
    config: StudioConfig,
    source: DirExcerptSource,
    session: Option<Session>,
    renderer: QuadRenderer,
    draw_list: DrawList,
}

impl StudioApp {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            source: DirExcerptSource::new(config.content_dir.clone()),
            config,
            session: None,
            renderer: QuadRenderer::new(),
            draw_list: DrawList::new(),
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.logical_size();
        if !viewport.is_valid() {
            return AppControl::Continue;
        }
        let now = ctx.time.elapsed;
        let seed = self.config.seed;

        let session = self.session.get_or_insert_with(|| Session::start(viewport, seed));
        session.resize(viewport);

        let actions = collect_actions(ctx.input_frame, &session.hud, session.modal.is_open(), session.active_section());
        for action in actions {
            if session.apply(action, &self.source) {
                match session.modal.current() {
                    Some(ex) => ctx.window.set_title(&format!("{TITLE} · {}", ex.id)),
                    None => ctx.window.set_title(TITLE),
                }
            }
        }

        session.tick(ctx.time.dt, now);

        let Some(frame) = session.last.as_ref() else {
            return AppControl::Continue;
        };
        let sprites = session.driver.sprites(now);
        draw::paint(
            &mut self.draw_list,
            &Scene {
                hud: &session.hud,
                frame,
                items: session.driver.items(),
                sprites: &sprites,
                excerpt: session.modal.current(),
                now,
            },
        );

        let (renderer, draw_list) = (&mut self.renderer, &mut self.draw_list);
        ctx.render(draw::sky(frame), |rctx, target| renderer.render(rctx, target, draw_list))
    }
}
