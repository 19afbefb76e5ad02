//! Frame driver: coalesces scroll notifications into one recompute per frame
//! and turns zone membership changes into spawner events.
//!
//! The host owns the clock. It calls [`FrameDriver::notify_scroll`] for every
//! scroll event, [`FrameDriver::run_frame`] once per rendered frame, and may
//! call [`FrameDriver::advance`] between frames to deliver due timers.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::chrome::ChromeState;
use crate::color::{interpolate, Rgb};
use crate::config::{DeviceProfile, NarrativeConfig, ProfileParams};
use crate::foliage::{generate, layers_for, FoliageItem};
use crate::parallax::{transform_all, ItemTransform};
use crate::scroll::ScrollMetrics;
use crate::sprite::{SpawnCtx, SpawnTask, Spawner, SpawnerEvent, SpriteInstance, SpriteKind, SpritePose};
use crate::timer::TimerQueue;
use crate::zone::{section_flags, Zone};

/// Zone membership change between two consecutive frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Edge {
    Entered,
    Exited,
}

/// Remembers last frame's membership for one zone.
#[derive(Debug, Copy, Clone, Default)]
pub struct EdgeTracker {
    inside: bool,
}

impl EdgeTracker {
    #[inline]
    pub fn inside(&self) -> bool {
        self.inside
    }

    /// Records `inside` and reports a change, if any.
    pub fn update(&mut self, inside: bool) -> Option<Edge> {
        let edge = match (self.inside, inside) {
            (false, true) => Some(Edge::Entered),
            (true, false) => Some(Edge::Exited),
            _ => None,
        };
        self.inside = inside;
        edge
    }
}

/// Everything derived from one scroll fraction.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub fraction: f32,
    pub sky: Rgb,
    pub dark_intensity: f32,
    /// One per foliage item, in item order.
    pub transforms: Vec<ItemTransform>,
    /// One per section, in document order.
    pub sections: Vec<bool>,
    pub chrome: ChromeState,
    /// Zone edges detected this frame.
    pub edges: Vec<(SpriteKind, Edge)>,
}

/// Per-session animation state.
pub struct FrameDriver {
    config: NarrativeConfig,
    profile: DeviceProfile,
    params: ProfileParams,
    items: Vec<FoliageItem>,

    fairy: Spawner,
    wraith: Spawner,
    fairy_edge: EdgeTracker,
    wraith_edge: EdgeTracker,

    timers: TimerQueue<SpawnTask>,
    rng: SmallRng,

    fraction: f32,
    frame_pending: bool,
    frames_run: u64,
}

impl FrameDriver {
    /// Builds a session for a viewport `viewport_width` px wide.
    ///
    /// The device profile and foliage layout are fixed here for the whole
    /// session. With `seed` set the layout and every sprite roll repeat.
    pub fn new(config: NarrativeConfig, viewport_width: f32, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        let profile = config.profile_for(viewport_width);
        let items = generate(&layers_for(profile), &mut rng);
        log::info!(
            "narrative session: {:?} profile at {viewport_width}px, {} foliage items, seed {seed:?}",
            profile,
            items.len()
        );

        Self {
            fairy: Spawner::new(config.fairy.clone()),
            wraith: Spawner::new(config.wraith.clone()),
            fairy_edge: EdgeTracker::default(),
            wraith_edge: EdgeTracker::default(),
            params: profile.params(),
            profile,
            items,
            config,
            timers: TimerQueue::new(),
            rng,
            fraction: 0.0,
            // The first frame always renders.
            frame_pending: true,
            frames_run: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &NarrativeConfig {
        &self.config
    }

    #[inline]
    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    #[inline]
    pub fn items(&self) -> &[FoliageItem] {
        &self.items
    }

    #[inline]
    pub fn sections(&self) -> &[Zone] {
        &self.config.sections
    }

    /// Fraction used by the last recompute.
    #[inline]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    #[inline]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Recomputes performed so far.
    #[inline]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    #[inline]
    pub fn spawner(&self, kind: SpriteKind) -> &Spawner {
        match kind {
            SpriteKind::Fairy => &self.fairy,
            SpriteKind::Wraith => &self.wraith,
        }
    }

    /// Earliest pending timer; hosts use it to schedule a wakeup.
    #[inline]
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Queues a recompute for the next frame.
    ///
    /// Returns `false` when one is already queued.
    pub fn notify_scroll(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Delivers every timer due at `now`. Returns how many fired.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some((handle, task)) = self.timers.pop_due(now) {
            self.dispatch(task.kind(), SpawnerEvent::Fired(handle, task));
            fired += 1;
        }
        fired
    }

    /// Runs the queued recompute, if any.
    ///
    /// Timers due at `now` are delivered after the new fraction is known and
    /// before zone edges are evaluated.
    pub fn run_frame(&mut self, metrics: ScrollMetrics, now: Duration) -> Option<FrameOutput> {
        if !self.frame_pending {
            self.advance(now);
            return None;
        }
        self.frame_pending = false;
        self.frames_run += 1;

        let t = metrics.fraction();
        self.fraction = t;
        self.advance(now);

        let dark = self.config.dark;
        let mut edges = Vec::new();
        for kind in [SpriteKind::Fairy, SpriteKind::Wraith] {
            let inside = self.spawner(kind).spec().zone.contains(t);
            let tracker = match kind {
                SpriteKind::Fairy => &mut self.fairy_edge,
                SpriteKind::Wraith => &mut self.wraith_edge,
            };
            if let Some(edge) = tracker.update(inside) {
                log::debug!("{kind:?} zone {edge:?} at t={t:.3}");
                let event = match edge {
                    Edge::Entered => SpawnerEvent::ZoneEntered,
                    Edge::Exited => SpawnerEvent::ZoneExited,
                };
                self.dispatch(kind, event);
                edges.push((kind, edge));
            }
        }

        Some(FrameOutput {
            fraction: t,
            sky: interpolate(&self.config.sky, t),
            dark_intensity: dark.intensity(t),
            transforms: transform_all(t, &self.items, &self.params, &dark),
            sections: section_flags(&self.config.sections, t),
            chrome: ChromeState::at(t, &self.config.chrome),
            edges,
        })
    }

    /// Live and fading sprites with their pose at `now`.
    pub fn sprites(&self, now: Duration) -> Vec<(&SpriteInstance, SpritePose)> {
        self.fairy
            .sprites()
            .chain(self.wraith.sprites())
            .map(|s| (s, s.pose(now)))
            .collect()
    }

    fn dispatch(&mut self, kind: SpriteKind, event: SpawnerEvent) {
        let spawner = match kind {
            SpriteKind::Fairy => &mut self.fairy,
            SpriteKind::Wraith => &mut self.wraith,
        };
        let in_zone = spawner.spec().zone.contains(self.fraction);
        let mut ctx = SpawnCtx {
            now: self.timers.now(),
            in_zone,
            scheduler: &mut self.timers,
            rng: &mut self.rng,
        };
        spawner.handle(event, &mut ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(t: f32) -> ScrollMetrics {
        ScrollMetrics {
            offset: t * 1000.0,
            document_height: 2000.0,
            viewport_height: 1000.0,
        }
    }

    fn driver() -> FrameDriver {
        FrameDriver::new(NarrativeConfig::default(), 1280.0, Some(17))
    }

    #[test]
    fn first_frame_renders_without_scroll() {
        let mut d = driver();
        assert!(d.frame_pending());
        let out = d.run_frame(metrics(0.0), Duration::ZERO).unwrap();
        assert_eq!(out.fraction, 0.0);
        assert!(d.run_frame(metrics(0.0), Duration::ZERO).is_none());
    }

    #[test]
    fn scroll_notifications_coalesce() {
        let mut d = driver();
        d.run_frame(metrics(0.0), Duration::ZERO);
        assert!(d.notify_scroll());
        for _ in 0..50 {
            assert!(!d.notify_scroll());
        }
        assert!(d.run_frame(metrics(0.1), Duration::from_millis(16)).is_some());
        assert!(d.run_frame(metrics(0.2), Duration::from_millis(32)).is_none());
        assert_eq!(d.frames_run(), 2);
    }

    #[test]
    fn edge_tracker_reports_changes_only() {
        let mut e = EdgeTracker::default();
        assert_eq!(e.update(false), None);
        assert_eq!(e.update(true), Some(Edge::Entered));
        assert_eq!(e.update(true), None);
        assert_eq!(e.update(false), Some(Edge::Exited));
        assert_eq!(e.update(false), None);
    }

    #[test]
    fn crossing_a_zone_fires_one_enter_and_one_exit() {
        let mut d = driver();
        let mut now = Duration::ZERO;
        let mut fairy_edges = Vec::new();
        for i in 0..=100 {
            d.notify_scroll();
            now += Duration::from_millis(16);
            let out = d.run_frame(metrics(i as f32 / 100.0), now).unwrap();
            fairy_edges.extend(out.edges.iter().filter(|(k, _)| *k == SpriteKind::Fairy).map(|(_, e)| *e));
        }
        assert_eq!(fairy_edges, vec![Edge::Entered, Edge::Exited]);
    }

    #[test]
    fn lingering_in_fairy_zone_spawns_one_at_a_time() {
        let mut d = driver();
        d.run_frame(metrics(0.25), Duration::ZERO);
        assert_eq!(d.spawner(SpriteKind::Fairy).live_count(), 0);
        let mut seen = false;
        for step in 1..=3000u64 {
            let now = Duration::from_millis(step * 20);
            d.advance(now);
            let live = d.sprites(now).iter().filter(|(s, _)| s.kind == SpriteKind::Fairy).count();
            assert!(live <= 1);
            seen |= live == 1;
        }
        assert!(seen);
        assert_eq!(d.spawner(SpriteKind::Wraith).live_count(), 0);
    }

    #[test]
    fn leaving_the_wraith_zone_clears_it() {
        let mut d = driver();
        d.run_frame(metrics(0.5), Duration::ZERO);
        d.advance(Duration::from_millis(1500));
        assert!(d.spawner(SpriteKind::Wraith).is_active());
        d.notify_scroll();
        let out = d.run_frame(metrics(0.9), Duration::from_millis(1600)).unwrap();
        assert_eq!(out.edges, vec![(SpriteKind::Wraith, Edge::Exited)]);
        assert_eq!(d.spawner(SpriteKind::Wraith).live_count(), 0);
        assert_eq!(d.next_wakeup(), None);
    }

    #[test]
    fn same_seed_same_session() {
        let a = driver();
        let b = driver();
        assert_eq!(a.items(), b.items());
        let c = FrameDriver::new(NarrativeConfig::default(), 1280.0, Some(18));
        assert_ne!(a.items(), c.items());
    }

    #[test]
    fn narrow_viewport_selects_compact_profile() {
        let d = FrameDriver::new(NarrativeConfig::default(), 390.0, Some(1));
        assert_eq!(d.profile(), DeviceProfile::Compact);
        assert_eq!(d.items().len(), 57);
    }
}
