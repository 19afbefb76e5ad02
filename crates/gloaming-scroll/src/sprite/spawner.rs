use std::time::Duration;

use rand::Rng;

use crate::timer::{Scheduler, TimerHandle};
use crate::zone::Zone;

use super::instance::{Fade, SpriteId, SpriteInstance, SpriteKind};

/// Static description of one spawner.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerSpec {
    pub kind: SpriteKind,
    /// Scroll range in which sprites of this kind appear.
    pub zone: Zone,
    /// Delay between entering the zone and the first spawn.
    pub first_delay: Duration,
    /// Recurring spawn interval, sampled uniformly in `[min, max)`.
    pub interval: (Duration, Duration),
    /// Fade-out applied to a live sprite on zone exit; `None` removes it at once.
    pub exit_fade: Option<Duration>,
}

impl SpawnerSpec {
    pub fn fairy() -> Self {
        Self {
            kind: SpriteKind::Fairy,
            zone: Zone::new(0.15, 0.38),
            first_delay: Duration::from_millis(1000),
            interval: (Duration::from_millis(2000), Duration::from_millis(8000)),
            exit_fade: Some(Duration::from_millis(400)),
        }
    }

    pub fn wraith() -> Self {
        Self {
            kind: SpriteKind::Wraith,
            zone: Zone::new(0.42, 0.68),
            first_delay: Duration::from_millis(1500),
            interval: (Duration::from_millis(3000), Duration::from_millis(10000)),
            exit_fade: None,
        }
    }

    fn sample_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (lo, hi) = self.interval;
        lo + hi.saturating_sub(lo).mul_f64(rng.random::<f64>())
    }
}

/// Deferred work owned by a spawner.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpawnTask {
    Spawn(SpriteKind),
    /// Flight plus linger is over.
    Despawn(SpriteKind, SpriteId),
    /// A forced fade-out finished.
    Retire(SpriteKind, SpriteId),
}

impl SpawnTask {
    #[inline]
    pub fn kind(self) -> SpriteKind {
        match self {
            SpawnTask::Spawn(k) | SpawnTask::Despawn(k, _) | SpawnTask::Retire(k, _) => k,
        }
    }
}

/// Inputs to a spawner transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpawnerEvent {
    ZoneEntered,
    ZoneExited,
    Fired(TimerHandle, SpawnTask),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpawnerPhase {
    /// Nothing live, nothing pending.
    Idle,
    /// A spawn is pending.
    Scheduled,
    /// One sprite is flying; its removal is pending.
    Active,
}

/// Collaborators and facts a transition needs.
pub struct SpawnCtx<'a, S, R: ?Sized> {
    pub now: Duration,
    /// Zone membership at the moment the event is handled.
    pub in_zone: bool,
    pub scheduler: &'a mut S,
    pub rng: &'a mut R,
}

/// Single-flight sprite spawner.
///
/// Owns the live sprite slot, at most one pending timer and any sprites
/// still fading out after a zone exit. All state changes go through
/// [`Spawner::handle`].
#[derive(Debug)]
pub struct Spawner {
    spec: SpawnerSpec,
    active: Option<SpriteInstance>,
    pending: Option<TimerHandle>,
    retiring: Vec<SpriteInstance>,
    next_id: u64,
}

impl Spawner {
    pub fn new(spec: SpawnerSpec) -> Self {
        Self {
            spec,
            active: None,
            pending: None,
            retiring: Vec::new(),
            next_id: 0,
        }
    }

    #[inline]
    pub fn spec(&self) -> &SpawnerSpec {
        &self.spec
    }

    #[inline]
    pub fn kind(&self) -> SpriteKind {
        self.spec.kind
    }

    pub fn phase(&self) -> SpawnerPhase {
        if self.active.is_some() {
            SpawnerPhase::Active
        } else if self.pending.is_some() {
            SpawnerPhase::Scheduled
        } else {
            SpawnerPhase::Idle
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[inline]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    #[inline]
    pub fn active(&self) -> Option<&SpriteInstance> {
        self.active.as_ref()
    }

    /// Every sprite that should still be drawn: the live one and any fading out.
    pub fn sprites(&self) -> impl Iterator<Item = &SpriteInstance> {
        self.active.iter().chain(self.retiring.iter())
    }

    /// Number of sprites currently drawn.
    pub fn live_count(&self) -> usize {
        self.active.iter().count() + self.retiring.len()
    }

    /// Applies one event and returns the resulting phase.
    pub fn handle<S, R>(&mut self, event: SpawnerEvent, ctx: &mut SpawnCtx<'_, S, R>) -> SpawnerPhase
    where
        S: Scheduler<SpawnTask>,
        R: Rng + ?Sized,
    {
        match event {
            SpawnerEvent::ZoneEntered => self.on_zone_entered(ctx),
            SpawnerEvent::ZoneExited => self.on_zone_exited(ctx),
            SpawnerEvent::Fired(handle, SpawnTask::Spawn(_)) => self.on_spawn_due(handle, ctx),
            SpawnerEvent::Fired(handle, SpawnTask::Despawn(_, id)) => self.on_despawn_due(handle, id, ctx),
            SpawnerEvent::Fired(_, SpawnTask::Retire(_, id)) => {
                self.retiring.retain(|s| s.id != id);
            }
        }
        self.phase()
    }

    fn on_zone_entered<S, R>(&mut self, ctx: &mut SpawnCtx<'_, S, R>)
    where
        S: Scheduler<SpawnTask>,
        R: Rng + ?Sized,
    {
        if self.active.is_some() {
            return;
        }
        let delay = self.spec.first_delay;
        self.replace_pending(ctx.scheduler, delay, SpawnTask::Spawn(self.spec.kind));
        log::debug!("{:?} zone entered; first spawn in {delay:?}", self.spec.kind);
    }

    fn on_zone_exited<S, R>(&mut self, ctx: &mut SpawnCtx<'_, S, R>)
    where
        S: Scheduler<SpawnTask>,
        R: Rng + ?Sized,
    {
        if let Some(handle) = self.pending.take() {
            ctx.scheduler.cancel(handle);
        }

        if let Some(mut sprite) = self.active.take() {
            match self.spec.exit_fade {
                Some(length) => {
                    sprite.fade = Some(Fade { started: ctx.now, length });
                    ctx.scheduler
                        .schedule(length, SpawnTask::Retire(self.spec.kind, sprite.id));
                    log::debug!("{:?} {:?} fading out", self.spec.kind, sprite.id);
                    self.retiring.push(sprite);
                }
                None => log::debug!("{:?} {:?} removed on zone exit", self.spec.kind, sprite.id),
            }
        }
    }

    fn on_spawn_due<S, R>(&mut self, handle: TimerHandle, ctx: &mut SpawnCtx<'_, S, R>)
    where
        S: Scheduler<SpawnTask>,
        R: Rng + ?Sized,
    {
        if self.pending != Some(handle) {
            log::trace!("{:?} ignoring stale spawn timer", self.spec.kind);
            return;
        }
        self.pending = None;

        if !ctx.in_zone {
            return;
        }

        // A fading sprite still occupies the slot.
        if self.active.is_some() || !self.retiring.is_empty() {
            self.schedule_next(ctx);
            return;
        }

        let id = SpriteId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let sprite = SpriteInstance::roll(self.spec.kind, id, ctx.now, ctx.rng);
        let lifetime = sprite.lifetime();
        self.pending = Some(
            ctx.scheduler
                .schedule(lifetime, SpawnTask::Despawn(self.spec.kind, id)),
        );
        log::debug!(
            "{:?} {:?} spawned ({}, {:?}, {:.1}s)",
            self.spec.kind,
            id,
            sprite.variant_name(),
            sprite.direction,
            sprite.duration.as_secs_f32()
        );
        self.active = Some(sprite);
    }

    fn on_despawn_due<S, R>(&mut self, handle: TimerHandle, id: SpriteId, ctx: &mut SpawnCtx<'_, S, R>)
    where
        S: Scheduler<SpawnTask>,
        R: Rng + ?Sized,
    {
        if self.active.as_ref().map(|s| s.id) != Some(id) {
            return;
        }
        self.active = None;
        if self.pending == Some(handle) {
            self.pending = None;
        }
        log::debug!("{:?} {:?} despawned", self.spec.kind, id);

        if ctx.in_zone && self.pending.is_none() {
            self.schedule_next(ctx);
        }
    }

    fn schedule_next<S, R>(&mut self, ctx: &mut SpawnCtx<'_, S, R>)
    where
        S: Scheduler<SpawnTask>,
        R: Rng + ?Sized,
    {
        let delay = self.spec.sample_interval(ctx.rng);
        self.replace_pending(ctx.scheduler, delay, SpawnTask::Spawn(self.spec.kind));
    }

    fn replace_pending<S: Scheduler<SpawnTask>>(&mut self, scheduler: &mut S, delay: Duration, task: SpawnTask) {
        if let Some(old) = self.pending.take() {
            scheduler.cancel(old);
        }
        self.pending = Some(scheduler.schedule(delay, task));
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::timer::TimerQueue;

    struct Rig {
        spawner: Spawner,
        timers: TimerQueue<SpawnTask>,
        rng: SmallRng,
        in_zone: bool,
    }

    impl Rig {
        fn new(spec: SpawnerSpec) -> Self {
            Self {
                spawner: Spawner::new(spec),
                timers: TimerQueue::new(),
                rng: SmallRng::seed_from_u64(42),
                in_zone: false,
            }
        }

        fn send(&mut self, event: SpawnerEvent) -> SpawnerPhase {
            let now = self.timers.now();
            let mut ctx = SpawnCtx {
                now,
                in_zone: self.in_zone,
                scheduler: &mut self.timers,
                rng: &mut self.rng,
            };
            self.spawner.handle(event, &mut ctx)
        }

        fn enter(&mut self) {
            self.in_zone = true;
            self.send(SpawnerEvent::ZoneEntered);
        }

        fn exit(&mut self) {
            self.in_zone = false;
            self.send(SpawnerEvent::ZoneExited);
        }

        /// Advances to `now`, firing every due task; returns the max live count seen.
        fn run_until(&mut self, now: Duration) -> usize {
            let mut max_live = self.spawner.live_count();
            while let Some((handle, task)) = self.timers.pop_due(now) {
                self.send(SpawnerEvent::Fired(handle, task));
                max_live = max_live.max(self.spawner.live_count());
            }
            max_live
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn enter_schedules_first_spawn_after_fixed_delay() {
        let mut rig = Rig::new(SpawnerSpec::fairy());
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
        rig.enter();
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Scheduled);
        rig.run_until(ms(999));
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Scheduled);
        rig.run_until(ms(1000));
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Active);
        assert!(rig.spawner.pending().is_some());
    }

    #[test]
    fn despawn_then_reschedules_within_interval() {
        let mut rig = Rig::new(SpawnerSpec::wraith());
        rig.enter();
        rig.run_until(ms(1500));
        let lifetime = rig.spawner.active().map(|s| s.lifetime()).unwrap();
        let gone_at = ms(1500) + lifetime;
        rig.run_until(gone_at);
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Scheduled);
        let next = rig.timers.next_deadline().unwrap();
        assert!(next >= gone_at + ms(3000) && next < gone_at + ms(10000), "{next:?}");
    }

    #[test]
    fn exit_cancels_and_clears() {
        let mut rig = Rig::new(SpawnerSpec::wraith());
        rig.enter();
        rig.run_until(ms(2000));
        assert!(rig.spawner.is_active());
        rig.exit();
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
        assert_eq!(rig.spawner.live_count(), 0);
        assert_eq!(rig.timers.pending(), 0);
        rig.run_until(ms(60_000));
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
    }

    #[test]
    fn fairy_fades_before_removal() {
        let mut rig = Rig::new(SpawnerSpec::fairy());
        rig.enter();
        rig.run_until(ms(1000));
        rig.run_until(ms(3000));
        rig.exit();
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
        assert_eq!(rig.spawner.live_count(), 1);
        let fading = rig.spawner.sprites().next().unwrap();
        assert!(fading.fade.is_some());
        rig.run_until(ms(3399));
        assert_eq!(rig.spawner.live_count(), 1);
        rig.run_until(ms(3400));
        assert_eq!(rig.spawner.live_count(), 0);
    }

    #[test]
    fn exit_before_first_spawn_never_spawns() {
        let mut rig = Rig::new(SpawnerSpec::fairy());
        rig.enter();
        rig.run_until(ms(500));
        rig.exit();
        rig.run_until(ms(10_000));
        assert_eq!(rig.spawner.live_count(), 0);
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
    }

    #[test]
    fn stale_spawn_fire_is_ignored() {
        let mut rig = Rig::new(SpawnerSpec::fairy());
        rig.in_zone = true;
        let stale = rig.timers.schedule(ms(0), SpawnTask::Spawn(SpriteKind::Fairy));
        let phase = rig.send(SpawnerEvent::Fired(stale, SpawnTask::Spawn(SpriteKind::Fairy)));
        assert_eq!(phase, SpawnerPhase::Idle);
        assert_eq!(rig.spawner.live_count(), 0);
    }

    #[test]
    fn spawn_fire_out_of_zone_goes_idle() {
        let mut rig = Rig::new(SpawnerSpec::fairy());
        rig.enter();
        // Scroll left the zone but the edge has not been processed yet.
        rig.in_zone = false;
        rig.run_until(ms(1000));
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
        assert_eq!(rig.timers.pending(), 0);
    }

    #[test]
    fn removal_out_of_zone_stays_idle() {
        let mut rig = Rig::new(SpawnerSpec::wraith());
        rig.enter();
        rig.run_until(ms(1500));
        let lifetime = rig.spawner.active().map(|s| s.lifetime()).unwrap();
        // Removal fires in the same frame the zone was left, before the edge.
        rig.in_zone = false;
        rig.run_until(ms(1500) + lifetime);
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Idle);
        assert_eq!(rig.spawner.live_count(), 0);
        assert_eq!(rig.timers.pending(), 0);
    }

    #[test]
    fn reentry_while_fading_defers_spawn() {
        let mut spec = SpawnerSpec::fairy();
        spec.exit_fade = Some(ms(5000));
        let mut rig = Rig::new(spec);
        rig.enter();
        rig.run_until(ms(1000));
        rig.exit();
        rig.enter();
        let max_live = rig.run_until(ms(4000));
        assert_eq!(max_live, 1);
        assert_eq!(rig.spawner.phase(), SpawnerPhase::Scheduled);
    }

    #[test]
    fn single_flight_under_churn() {
        let mut rig = Rig::new(SpawnerSpec::fairy());
        let mut now = ms(0);
        let mut max_live = 0;
        for step in 0..400u64 {
            now += ms(137 + (step * 31) % 900);
            if step % 7 == 0 {
                if rig.in_zone { rig.exit() } else { rig.enter() }
            }
            max_live = max_live.max(rig.run_until(now));
            assert!(rig.spawner.sprites().filter(|s| s.fade.is_none()).count() <= 1);
        }
        assert!(max_live <= 1, "saw {max_live} live sprites");
    }
}
