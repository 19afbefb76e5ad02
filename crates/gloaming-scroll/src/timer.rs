//! Deferred callbacks on a host-driven clock.
//!
//! The queue never reads a wall clock: the host passes `now` (time since the
//! session started) and collects whatever came due. Cancellation is best
//! effort from the caller's point of view; owners still compare handles when
//! a task fires so late deliveries are harmless.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Identifies one scheduled task.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerHandle(u64);

/// Capability to run a task later.
pub trait Scheduler<T> {
    /// Schedules `task` to fire `delay` after the scheduler's current time.
    fn schedule(&mut self, delay: Duration, task: T) -> TimerHandle;

    /// Cancels a pending task. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    handle: TimerHandle,
    task: T,
}

// Min-heap on (deadline, handle); handles are issued in order so equal
// deadlines fire in scheduling order.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.handle.cmp(&self.handle))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<T> Eq for Entry<T> {}

/// Timer queue driven by an external clock.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    heap: BinaryHeap<Entry<T>>,
    cancelled: Vec<TimerHandle>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            heap: BinaryHeap::new(),
            cancelled: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting (cancelled ones excluded).
    pub fn pending(&self) -> usize {
        self.heap
            .iter()
            .filter(|e| !self.cancelled.contains(&e.handle))
            .count()
    }

    /// Earliest live deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap
            .iter()
            .filter(|e| !self.cancelled.contains(&e.handle))
            .map(|e| e.deadline)
            .min()
    }

    /// Moves the clock to `now` and pops the earliest due task.
    ///
    /// Call repeatedly until it returns `None`; tasks scheduled while draining
    /// fire in the same pass if they are already due. The clock never moves
    /// backwards.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerHandle, T)> {
        self.now = self.now.max(now);

        loop {
            let due = self.heap.peek().is_some_and(|e| e.deadline <= self.now);
            if !due {
                return None;
            }
            let entry = self.heap.pop()?;
            if let Some(pos) = self.cancelled.iter().position(|h| *h == entry.handle) {
                self.cancelled.swap_remove(pos);
                continue;
            }
            return Some((entry.handle, entry.task));
        }
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.heap.push(Entry {
            deadline: self.now + delay,
            handle,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.heap.iter().any(|e| e.handle == handle) && !self.cancelled.contains(&handle) {
            self.cancelled.push(handle);
        }
    }
}
