use super::*;
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Current time in ms.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall clock, in ms since the unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}
impl ManualClock {
    pub fn new(now: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}
impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

/// Identifies one requested frame. Never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub type DueFrames = SmallVec<[FrameHandle; 4]>;

/// Request callbacks on the next frame.
///
/// A cancelled handle must never be returned by `take_due`.
pub trait FrameScheduler {
    fn schedule_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Remove and return every frame requested so far.
    fn take_due(&mut self) -> DueFrames;
}

/// Frames requested since the last `take_due`, in request order.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_handle: u64,
    pending: DueFrames,
}
impl FrameQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }
}
impl FrameScheduler for FrameQueue {
    fn schedule_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }

    fn take_due(&mut self) -> DueFrames {
        std::mem::take(&mut self.pending)
    }
}

/// Pace a loop at a fixed interval on the current thread.
pub struct Interval {
    internal_time: Instant,
    max_difference: Duration,
    target_interval: Duration,
}
impl Interval {
    pub fn new(configs: &FrameConfigs) -> Self {
        Self {
            internal_time: Instant::now(),
            max_difference: Duration::from_millis(configs.max_lag),
            target_interval: Duration::from_millis(configs.interval),
        }
    }

    /// Sleep until the next frame is due.
    pub fn step(&mut self) {
        let now = Instant::now();

        self.internal_time += self.target_interval;

        let behind = now.saturating_duration_since(self.internal_time);
        if behind > self.max_difference {
            log::debug!(
                "Frame pacer behind by {}ms which is more than maximum of {}ms",
                behind.as_millis(),
                self.max_difference.as_millis()
            );
            self.internal_time = now.checked_sub(self.max_difference).unwrap_or(now);
        }

        if let Some(delay) = self.internal_time.checked_duration_since(now) {
            std::thread::sleep(delay);
        }
    }
}
