use std::time::Duration;

use rand::Rng;

use crate::foliage::{sample, Span};

/// Extra time a sprite stays in the scene after its flight ends.
pub const SPRITE_LINGER: Duration = Duration::from_millis(500);

/// Horizontal flight runs from just off one edge to just off the other (vw %).
const FLIGHT_START_X: f32 = -10.0;
const FLIGHT_END_X: f32 = 110.0;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SpriteKind {
    Fairy,
    Wraith,
}

impl SpriteKind {
    /// Artwork names, indexed by [`SpriteInstance::variant`].
    pub fn variants(self) -> &'static [&'static str] {
        match self {
            SpriteKind::Fairy => &["fairy-pink", "fairy-yellow"],
            SpriteKind::Wraith => &["dark-fairy", "dark-fairy-2"],
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SpriteId(pub u64);

/// Forced fade-out after the sprite's zone was left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fade {
    pub started: Duration,
    pub length: Duration,
}

/// One transient fairy or wraith.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    pub id: SpriteId,
    pub kind: SpriteKind,
    pub variant: usize,
    pub direction: Direction,
    /// Flight height at the start and end, in vh %.
    pub start_y: f32,
    pub end_y: f32,
    /// Width in px.
    pub size: f32,
    /// Time to cross the viewport.
    pub duration: Duration,
    pub z_index: i32,
    pub scale: f32,
    pub spawned_at: Duration,
    pub fade: Option<Fade>,
}

/// Where and how visible a sprite is at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpritePose {
    /// vw %.
    pub x: f32,
    /// vh %.
    pub y: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl SpriteInstance {
    /// A fairy: level flight at a random height.
    pub fn roll_fairy<R: Rng + ?Sized>(id: SpriteId, now: Duration, rng: &mut R) -> Self {
        let variant = rng.random_range(0..SpriteKind::Fairy.variants().len());
        let direction = roll_direction(rng);
        let y = sample(rng, Span::new(5.0, 95.0));
        let size = sample(rng, Span::new(30.0, 50.0));
        let duration = Duration::from_secs_f32(sample(rng, Span::new(7.0, 11.0)));
        let z_index = sample(rng, Span::new(1.0, 26.0)).floor() as i32;

        Self {
            id,
            kind: SpriteKind::Fairy,
            variant,
            direction,
            start_y: y,
            end_y: y,
            size,
            duration,
            z_index,
            scale: 1.0,
            spawned_at: now,
            fade: None,
        }
    }

    /// A wraith: diagonal flight at up to 30 degrees off level.
    pub fn roll_wraith<R: Rng + ?Sized>(id: SpriteId, now: Duration, rng: &mut R) -> Self {
        let variant = rng.random_range(0..SpriteKind::Wraith.variants().len());
        let direction = roll_direction(rng);
        let angle = sample(rng, Span::new(-30.0, 30.0));
        let drift = angle.to_radians().tan() * 100.0;
        let start_y = sample(rng, Span::new(20.0, 70.0));
        let end_y = (start_y + drift).clamp(5.0, 85.0);
        let size = sample(rng, Span::new(30.0, 50.0));
        let duration = Duration::from_secs_f32(sample(rng, Span::new(7.5, 12.0)));
        let scale = sample(rng, Span::new(0.8, 1.3));
        let z_index = sample(rng, Span::new(5.0, 30.0)).floor() as i32;

        Self {
            id,
            kind: SpriteKind::Wraith,
            variant,
            direction,
            start_y,
            end_y,
            size,
            duration,
            z_index,
            scale,
            spawned_at: now,
            fade: None,
        }
    }

    pub fn roll<R: Rng + ?Sized>(kind: SpriteKind, id: SpriteId, now: Duration, rng: &mut R) -> Self {
        match kind {
            SpriteKind::Fairy => Self::roll_fairy(id, now, rng),
            SpriteKind::Wraith => Self::roll_wraith(id, now, rng),
        }
    }

    /// Time from spawn until the sprite is removed.
    #[inline]
    pub fn lifetime(&self) -> Duration {
        self.duration + SPRITE_LINGER
    }

    #[inline]
    pub fn variant_name(&self) -> &'static str {
        self.kind.variants().get(self.variant).copied().unwrap_or("")
    }

    /// Pose at `now`; progress is clamped so lingering sprites wait off-screen.
    pub fn pose(&self, now: Duration) -> SpritePose {
        let elapsed = now.saturating_sub(self.spawned_at).as_secs_f32();
        let span = self.duration.as_secs_f32();
        let p = if span > 0.0 { (elapsed / span).clamp(0.0, 1.0) } else { 1.0 };

        let (from, to) = match self.direction {
            Direction::LeftToRight => (FLIGHT_START_X, FLIGHT_END_X),
            Direction::RightToLeft => (FLIGHT_END_X, FLIGHT_START_X),
        };

        let opacity = match self.fade {
            None => 1.0,
            Some(fade) => {
                let len = fade.length.as_secs_f32();
                let gone = now.saturating_sub(fade.started).as_secs_f32();
                if len > 0.0 { (1.0 - gone / len).clamp(0.0, 1.0) } else { 0.0 }
            }
        };

        SpritePose {
            x: from + (to - from) * p,
            y: self.start_y + (self.end_y - self.start_y) * p,
            opacity,
            scale: self.scale,
        }
    }
}

fn roll_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    if rng.random_bool(0.5) { Direction::RightToLeft } else { Direction::LeftToRight }
}
