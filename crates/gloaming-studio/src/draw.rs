//! Turns one frame of narrative state into a draw list.

use std::time::Duration;

use gloaming_engine::coords::{Rect, Vec2, Viewport};
use gloaming_engine::paint::Color;
use gloaming_engine::scene::{DrawList, QuadCmd, QuadShape, ZIndex};
use gloaming_scroll::excerpt::OpenExcerpt;
use gloaming_scroll::foliage::{FoliageItem, LayerKind};
use gloaming_scroll::{FrameOutput, Rgb, SpriteInstance, SpriteKind, SpritePose};

use crate::hud::{active_section, Hud, NAV_HEIGHT, PROGRESS_HEIGHT};

const CHROME_LAYER: ZIndex = ZIndex(1000);
const ENTRY_LAYER: ZIndex = ZIndex(1500);
const MODAL_LAYER: ZIndex = ZIndex(2000);

/// Characters per rendered body line in the modal.
const MODAL_LINE_CHARS: usize = 72;
const MODAL_LINE_HEIGHT: f32 = 22.0;

/// Hint pulse period.
const HINT_PERIOD: f32 = 1.6;

/// Everything one frame paints.
pub struct Scene<'a> {
    pub hud: &'a Hud,
    pub frame: &'a FrameOutput,
    pub items: &'a [FoliageItem],
    pub sprites: &'a [(&'a SpriteInstance, SpritePose)],
    pub excerpt: Option<&'a OpenExcerpt>,
    pub now: Duration,
}

/// Background clear color for the frame.
pub fn sky(frame: &FrameOutput) -> Color {
    rgb(frame.sky, 1.0)
}

/// Rebuilds `dl` for `scene`.
pub fn paint(dl: &mut DrawList, scene: &Scene<'_>) {
    dl.clear();
    let viewport = scene.hud.viewport();

    paint_foliage(dl, viewport, scene.items, scene.frame);
    paint_sprites(dl, viewport, scene.sprites);
    paint_chrome(dl, scene);
    if let Some(excerpt) = scene.excerpt {
        paint_modal(dl, scene.hud, excerpt);
    }
}

fn paint_foliage(dl: &mut DrawList, viewport: Viewport, items: &[FoliageItem], frame: &FrameOutput) {
    for (item, tr) in items.iter().zip(&frame.transforms) {
        if tr.opacity <= 0.0 {
            continue;
        }
        let anchor = viewport.percent(item.base_x, item.base_y);
        let center = anchor + Vec2::new(item.width / 2.0 + tr.translate.0, item.height / 2.0 + tr.translate.1);
        let quad = QuadCmd::new(
            center,
            Vec2::new(item.width, item.height),
            rgb(tint(item.kind), tr.opacity),
            shape(item.kind),
        )
        .scaled(tr.scale)
        .rotated(tr.rotation)
        .soft(1.0 + item.blur * 2.0);
        dl.push_quad(ZIndex(item.stacking()), quad);
    }
}

fn paint_sprites(dl: &mut DrawList, viewport: Viewport, sprites: &[(&SpriteInstance, SpritePose)]) {
    for (sprite, pose) in sprites {
        if pose.opacity <= 0.0 {
            continue;
        }
        // Same stacking space as foliage, so sprites can pass behind leaves.
        let z = ZIndex(sprite.z_index);
        let center = viewport.percent(pose.x, pose.y);
        let body = Vec2::new(sprite.size, sprite.size * 0.6);
        let (glow, core) = sprite_colors(sprite.variant_name());

        // Halo first, then the body on top within the same layer.
        dl.push_quad(
            z,
            QuadCmd::new(center, body * 2.2, glow.faded(0.35 * pose.opacity), QuadShape::Ellipse)
                .scaled(pose.scale)
                .soft(sprite.size * 0.5),
        );
        dl.push_quad(
            z,
            QuadCmd::new(center, body, core.faded(pose.opacity), QuadShape::Ellipse)
                .scaled(pose.scale)
                .soft(2.0),
        );
        if sprite.kind == SpriteKind::Fairy {
            let wing = Vec2::new(sprite.size * 0.5, sprite.size * 0.8);
            for dir in [-1.0_f32, 1.0] {
                let offset = Vec2::new(0.0, -sprite.size * 0.36 * pose.scale).rotated(dir * 55.0);
                dl.push_quad(
                    z,
                    QuadCmd::new(center + offset, wing, glow.faded(0.6 * pose.opacity), QuadShape::Leaf)
                        .scaled(pose.scale)
                        .rotated(dir * 30.0),
                );
            }
        }
    }
}

fn paint_chrome(dl: &mut DrawList, scene: &Scene<'_>) {
    let hud = scene.hud;
    let viewport = hud.viewport();
    let chrome = scene.frame.chrome;
    let active = active_section(&scene.frame.sections);

    let (bar, ink, accent) = if chrome.nav_dark {
        (Color::from_hex(0x14121c).faded(0.85), Color::from_hex(0xd8d4e8), Color::from_hex(0x9b7fd1))
    } else {
        (Color::from_hex(0xfefdfb).faded(0.85), Color::from_hex(0x2f3b2a), Color::from_hex(0x5a9a52))
    };

    // Nav strip with one button per section.
    dl.push_rect(CHROME_LAYER, Rect::new(0.0, 0.0, viewport.width, NAV_HEIGHT), bar);
    for (i, r) in hud.nav_buttons().iter().enumerate() {
        let color = if Some(i) == active { accent } else { ink.faded(0.25) };
        dl.push_rect(CHROME_LAYER.offset(1), r.inset(4.0), color);
    }

    // Progress bar along the very top.
    let fill = viewport.width * chrome.progress.clamp(0.0, 1.0);
    dl.push_rect(CHROME_LAYER.offset(2), Rect::new(0.0, 0.0, fill, PROGRESS_HEIGHT), accent);

    // Section markers down the right edge.
    for (i, r) in hud.markers().iter().enumerate() {
        let on = scene.frame.sections.get(i).copied().unwrap_or(false);
        let (size, color) = if on { (r.size * 1.4, accent) } else { (r.size, ink.faded(0.4)) };
        dl.push_ellipse(CHROME_LAYER.offset(1), r.center(), size, color);
    }

    // Excerpt call-to-action for the active section.
    if active.is_some() && scene.excerpt.is_none() {
        let b = hud.excerpt_button();
        dl.push_quad(
            CHROME_LAYER,
            QuadCmd::new(b.center(), b.size, bar, QuadShape::Rect).soft(3.0),
        );
        dl.push_rect(CHROME_LAYER.offset(1), Rect::new(b.origin.x, b.origin.y + b.size.y - 3.0, b.size.x, 3.0), accent);
    }

    if chrome.hint_visible {
        let phase = (scene.now.as_secs_f32() / HINT_PERIOD * std::f32::consts::TAU).sin();
        let at = Vec2::new(viewport.width / 2.0, viewport.height - 40.0 + phase * 6.0);
        dl.push_quad(
            CHROME_LAYER,
            QuadCmd::new(at, Vec2::splat(18.0), ink.faded(0.7), QuadShape::Rect).rotated(45.0),
        );
    }

    if !chrome.entry_hidden {
        paint_entry(dl, viewport, scene.now);
    }
}

fn paint_entry(dl: &mut DrawList, viewport: Viewport, now: Duration) {
    let full = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    dl.push_rect(ENTRY_LAYER, full, Color::from_hex(0x0d0d14).faded(0.92));

    let center = viewport.percent(50.0, 45.0);
    dl.push_quad(
        ENTRY_LAYER.offset(1),
        QuadCmd::new(center, Vec2::splat(260.0), Color::from_hex(0xf5d76e).faded(0.18), QuadShape::Ellipse)
            .soft(80.0),
    );
    dl.push_rect(
        ENTRY_LAYER.offset(2),
        Rect::new(center.x - 160.0, center.y - 3.0, 320.0, 6.0),
        Color::from_hex(0xfefdfb).faded(0.9),
    );

    // "Scroll to begin" chevron, breathing.
    let breath = 0.5 + 0.5 * (now.as_secs_f32() / HINT_PERIOD * std::f32::consts::TAU).sin();
    dl.push_quad(
        ENTRY_LAYER.offset(2),
        QuadCmd::new(viewport.percent(50.0, 85.0), Vec2::splat(16.0), Color::from_hex(0xfefdfb).faded(0.4 + 0.5 * breath), QuadShape::Rect)
            .rotated(45.0),
    );
}

fn paint_modal(dl: &mut DrawList, hud: &Hud, excerpt: &OpenExcerpt) {
    let viewport = hud.viewport();
    dl.push_rect(
        MODAL_LAYER,
        Rect::new(0.0, 0.0, viewport.width, viewport.height),
        Color::from_hex(0x000000).faded(0.6),
    );

    let panel = hud.panel();
    dl.push_quad(
        MODAL_LAYER.offset(1),
        QuadCmd::new(panel.center(), panel.size, rgb(excerpt.background, 1.0), QuadShape::Rect).soft(2.0),
    );

    let dark = excerpt.background == gloaming_scroll::excerpt::DARK_BACKGROUND;
    let ink = if dark { Color::from_hex(0xd8d4e8) } else { Color::from_hex(0x2a2620) };

    let close = hud.close_button();
    for angle in [45.0, -45.0] {
        dl.push_quad(
            MODAL_LAYER.offset(2),
            QuadCmd::new(close.center(), Vec2::new(close.size.x, 3.0), ink, QuadShape::Rect).rotated(angle),
        );
    }

    // No glyph renderer: body text is laid out as one bar per wrapped line.
    let body = panel.inset(40.0);
    for (row, width) in line_widths(&excerpt.plain_text(), MODAL_LINE_CHARS).into_iter().enumerate() {
        let y = body.origin.y + row as f32 * MODAL_LINE_HEIGHT;
        if y + MODAL_LINE_HEIGHT > body.origin.y + body.size.y {
            break;
        }
        let w = body.size.x * width;
        dl.push_rect(MODAL_LAYER.offset(2), Rect::new(body.origin.x, y + 7.0, w, 8.0), ink.faded(0.75));
    }
}

/// Greedy word wrap; returns each line's width as a fraction of `max_chars`.
fn line_widths(text: &str, max_chars: usize) -> Vec<f32> {
    let mut lines = Vec::new();
    let mut current = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count().min(max_chars);
        let needed = if current == 0 { len } else { current + 1 + len };
        if needed > max_chars && current > 0 {
            lines.push(current);
            current = len;
        } else {
            current = needed;
        }
    }
    if current > 0 {
        lines.push(current);
    }
    lines.into_iter().map(|n| n as f32 / max_chars as f32).collect()
}

fn rgb(c: Rgb, alpha: f32) -> Color {
    Color::from_srgb8(c.r, c.g, c.b, alpha)
}

fn tint(kind: LayerKind) -> Rgb {
    match kind {
        LayerKind::BackgroundLeaves => Rgb::from_hex(0x2f5d3a),
        LayerKind::MidgroundLeaves => Rgb::from_hex(0x3f7d46),
        LayerKind::ForegroundLeaves => Rgb::from_hex(0x5a9a52),
        LayerKind::PinkFlower => Rgb::from_hex(0xf2a6c4),
        LayerKind::YellowFlower => Rgb::from_hex(0xf5d76e),
        LayerKind::BlueFlower => Rgb::from_hex(0x8fb8f0),
        LayerKind::Trunk => Rgb::from_hex(0x4a3526),
        LayerKind::Web => Rgb::from_hex(0xd8d8e0),
        LayerKind::Bone => Rgb::from_hex(0xe8e0cc),
    }
}

fn shape(kind: LayerKind) -> QuadShape {
    match kind {
        LayerKind::BackgroundLeaves | LayerKind::MidgroundLeaves | LayerKind::ForegroundLeaves => QuadShape::Leaf,
        LayerKind::PinkFlower | LayerKind::YellowFlower | LayerKind::BlueFlower | LayerKind::Web => {
            QuadShape::Ellipse
        }
        LayerKind::Trunk | LayerKind::Bone => QuadShape::Rect,
    }
}

/// `(glow, body)` for a sprite artwork name.
fn sprite_colors(variant: &str) -> (Color, Color) {
    match variant {
        "fairy-pink" => (Color::from_hex(0xffb6d9), Color::from_hex(0xfff0f6)),
        "fairy-yellow" => (Color::from_hex(0xfff1a8), Color::from_hex(0xfffbe6)),
        "dark-fairy-2" => (Color::from_hex(0x3b2450), Color::from_hex(0x120a1c)),
        _ => (Color::from_hex(0x2a1f3d), Color::from_hex(0x0d0914)),
    }
}
