//! Frame scheduler for time-based UI animations
//!
//! The host event loop owns a [`FrameScheduler`] and calls
//! [`FrameScheduler::advance`] with the current time once per frame. Widgets
//! register repeating callbacks with [`FrameScheduler::schedule_interval`]
//! and hold on to the returned [`IntervalHandle`]. The handle is the only
//! way to keep a timer alive: dropping it (or calling
//! [`IntervalHandle::cancel`]) removes the timer before its next tick, so a
//! widget that goes away can never be written to by a stale callback.
//!
//! # Ordering
//!
//! - Ticks of one timer run strictly one after another, never re-entrantly.
//! - A timer that fell behind catches up tick by tick in cadence order, up to
//!   [`MAX_CATCH_UP_TICKS`] per call, then re-synchronises to `now`.
//! - Timers registered from inside a callback start on the next `advance`.
//!
//! The scheduler never reads a clock; callers pass `now` in, which keeps the
//! whole thing deterministic under test.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use embassy_time::{Duration, Instant};
use log::debug;

/// Default animation cadence (~60 FPS)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Maximum ticks a single timer may run in one `advance` call
pub const MAX_CATCH_UP_TICKS: u32 = 8;

/// Returned by a tick callback to keep or end its timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Identifier of a scheduled timer (for logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

type TickCallback = Box<dyn FnMut() -> TickControl>;

struct TimerSlot {
    id: TimerId,
    period: Duration,
    next_due: Instant,
    /// Shared with the owning handle; cleared on cancel or stop
    active: Rc<Cell<bool>>,
    callback: TickCallback,
}

#[derive(Default)]
struct SchedulerState {
    timers: Vec<TimerSlot>,
    next_id: u32,
}

/// Single-threaded repeating-timer scheduler driven by the host frame loop
#[derive(Clone, Default)]
pub struct FrameScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run every `period`, first at `start + period`
    ///
    /// The timer lives until the callback returns [`TickControl::Stop`] or the
    /// returned handle is cancelled or dropped.
    #[must_use = "dropping the handle cancels the timer immediately"]
    pub fn schedule_interval<F>(&self, period: Duration, start: Instant, callback: F) -> IntervalHandle
    where
        F: FnMut() -> TickControl + 'static,
    {
        let active = Rc::new(Cell::new(true));
        let mut state = self.state.borrow_mut();

        let id = TimerId(state.next_id);
        state.next_id = state.next_id.wrapping_add(1);

        state.timers.push(TimerSlot {
            id,
            period,
            next_due: start + period,
            active: active.clone(),
            callback: Box::new(callback),
        });
        debug!("Scheduled timer {:?} every {} ms", id, period.as_millis());

        IntervalHandle {
            id,
            active,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Run every tick that is due at `now`
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, now: Instant) -> usize {
        // Check the timers out so callbacks may schedule or cancel freely
        let mut pending = core::mem::take(&mut self.state.borrow_mut().timers);
        let mut fired = 0;

        for slot in pending.iter_mut() {
            let mut ticks = 0;
            while slot.active.get() && slot.next_due <= now {
                if ticks == MAX_CATCH_UP_TICKS {
                    debug!("Timer {:?} fell behind, re-synchronising", slot.id);
                    slot.next_due = now + slot.period;
                    break;
                }

                ticks += 1;
                fired += 1;
                slot.next_due += slot.period;

                if (slot.callback)() == TickControl::Stop {
                    debug!("Timer {:?} finished", slot.id);
                    slot.active.set(false);
                }
            }
        }

        let (live, finished): (Vec<TimerSlot>, Vec<TimerSlot>) =
            pending.into_iter().partition(|slot| slot.active.get());

        {
            let mut state = self.state.borrow_mut();
            let added = core::mem::take(&mut state.timers);
            state.timers = live;
            state.timers.extend(added);
        }

        // Callback captures are released outside the borrow
        drop(finished);
        fired
    }

    /// Number of timers currently registered
    pub fn active_timers(&self) -> usize {
        self.state
            .borrow()
            .timers
            .iter()
            .filter(|slot| slot.active.get())
            .count()
    }
}

/// Owning handle of a scheduled timer
///
/// Cancels the timer when dropped.
pub struct IntervalHandle {
    id: TimerId,
    active: Rc<Cell<bool>>,
    state: Weak<RefCell<SchedulerState>>,
}

impl IntervalHandle {
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the timer will tick again
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Stop the timer now
    pub fn cancel(self) {}

    fn release(&mut self) {
        if self.active.replace(false) {
            debug!("Cancelled timer {:?}", self.id);
        }

        let Some(state) = self.state.upgrade() else {
            return;
        };

        // While `advance` has the slot checked out the cleared flag is enough
        let removed = {
            let Ok(mut state) = state.try_borrow_mut() else {
                return;
            };
            state
                .timers
                .iter()
                .position(|slot| slot.id == self.id)
                .map(|index| state.timers.remove(index))
        };
        drop(removed);
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn counting_timer(
        scheduler: &FrameScheduler,
        period_ms: u64,
        stop_after: Option<u32>,
    ) -> (IntervalHandle, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let handle = scheduler.schedule_interval(Duration::from_millis(period_ms), at(0), move || {
            counter.set(counter.get() + 1);
            match stop_after {
                Some(limit) if counter.get() >= limit => TickControl::Stop,
                _ => TickControl::Continue,
            }
        });
        (handle, count)
    }

    #[test]
    fn test_ticks_follow_cadence() {
        let scheduler = FrameScheduler::new();
        let (_handle, count) = counting_timer(&scheduler, 16, None);

        assert_eq!(scheduler.advance(at(15)), 0);
        assert_eq!(scheduler.advance(at(16)), 1);
        assert_eq!(scheduler.advance(at(31)), 0);
        assert_eq!(scheduler.advance(at(48)), 2);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_stop_removes_timer() {
        let scheduler = FrameScheduler::new();
        let (handle, count) = counting_timer(&scheduler, 10, Some(2));

        scheduler.advance(at(10));
        scheduler.advance(at(20));
        assert!(!handle.is_active());
        assert_eq!(scheduler.active_timers(), 0);

        scheduler.advance(at(30));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_dropping_handle_cancels_timer() {
        let scheduler = FrameScheduler::new();
        let (handle, count) = counting_timer(&scheduler, 10, None);

        scheduler.advance(at(10));
        drop(handle);
        assert_eq!(scheduler.active_timers(), 0);

        scheduler.advance(at(100));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_explicit_cancel() {
        let scheduler = FrameScheduler::new();
        let (handle, count) = counting_timer(&scheduler, 10, None);
        handle.cancel();
        scheduler.advance(at(50));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let scheduler = FrameScheduler::new();
        let (_handle, count) = counting_timer(&scheduler, 1, None);

        scheduler.advance(at(1_000));
        assert_eq!(count.get(), MAX_CATCH_UP_TICKS);

        // Re-synchronised: next tick is one period after the stall
        assert_eq!(scheduler.advance(at(1_000)), 0);
        assert_eq!(scheduler.advance(at(1_001)), 1);
    }

    #[test]
    fn test_cancel_from_another_callback() {
        let scheduler = FrameScheduler::new();
        let (victim, victim_count) = counting_timer(&scheduler, 10, None);

        let slot = Rc::new(RefCell::new(Some(victim)));
        let captured = slot.clone();
        let _killer = scheduler.schedule_interval(Duration::from_millis(5), at(0), move || {
            captured.borrow_mut().take();
            TickControl::Continue
        });

        // Killer is registered second but ticks first at t=5
        scheduler.advance(at(5));
        scheduler.advance(at(50));
        assert_eq!(victim_count.get(), 0);
        assert!(slot.borrow().is_none());
        assert_eq!(scheduler.active_timers(), 1);
    }

    #[test]
    fn test_schedule_from_callback_starts_next_advance() {
        let scheduler = FrameScheduler::new();
        let spawned: Rc<RefCell<Option<IntervalHandle>>> = Rc::new(RefCell::new(None));
        let inner_count = Rc::new(Cell::new(0));

        let spawner = {
            let scheduler = scheduler.clone();
            let spawned = spawned.clone();
            let inner_count = inner_count.clone();
            scheduler.clone().schedule_interval(Duration::from_millis(10), at(0), move || {
                let counter = inner_count.clone();
                let handle = scheduler.schedule_interval(Duration::from_millis(10), at(10), move || {
                    counter.set(counter.get() + 1);
                    TickControl::Continue
                });
                *spawned.borrow_mut() = Some(handle);
                TickControl::Stop
            })
        };

        scheduler.advance(at(10));
        assert!(!spawner.is_active());
        assert_eq!(inner_count.get(), 0);

        scheduler.advance(at(20));
        assert_eq!(inner_count.get(), 1);
    }
}
