#![forbid(unsafe_code)]

//! Timer seam for delayed and repeating work.
//!
//! Reveal staggers, the certification shift oscillator, and the typewriter all
//! run on a [`Scheduler`]. The browser backend maps it onto
//! `setTimeout`/`setInterval`; [`ManualScheduler`] runs on a virtual clock so
//! every timing property is testable without sleeping.
//!
//! # Invariants
//!
//! 1. A cancelled timer never fires again, even if it was already due within
//!    the same [`ManualScheduler::advance`] call.
//! 2. Due timers fire in deadline order; ties fire in creation order.
//! 3. Callbacks run with no internal borrow held, so they may schedule or
//!    cancel timers (including their own).
//! 4. An interval whose next deadline would pass `Duration::MAX` fires once
//!    more at the saturated deadline and is then retired.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Delayed and periodic callback execution.
pub trait Scheduler {
    /// Run `callback` once after `delay`.
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Run `callback` every `period` until cancelled.
    fn set_interval(&self, period: Duration, callback: Box<dyn Fn()>) -> TimerId;

    /// Stop a timer. Unknown or already-finished ids are ignored.
    fn cancel(&self, timer: TimerId);
}

/// Shortest period an interval may run at on the virtual clock.
const MIN_PERIOD: Duration = Duration::from_millis(1);

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Duration,
        callback: Rc<dyn Fn()>,
    },
}

struct Timer {
    deadline: Duration,
    task: Task,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
    fired: u64,
}

/// Scheduler driven by explicit calls to [`advance`](Self::advance).
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ClockState>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Timers that have not finished or been cancelled.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    #[must_use]
    pub fn is_active(&self, timer: TimerId) -> bool {
        self.state.borrow().timers.contains_key(&timer)
    }

    /// Total callbacks fired so far.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.state.borrow().fired
    }

    /// Deadline of the earliest pending timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state
            .borrow()
            .timers
            .values()
            .map(|t| t.deadline)
            .min()
    }

    /// Move the clock forward by `by`, firing everything that comes due.
    /// Returns how many callbacks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now().saturating_add(by);
        self.advance_to(target)
    }

    /// Move the clock forward to `target`. Moving backwards is a no-op.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut ran = 0;
        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(id, t)| (t.deadline, **id))
                    .map(|(id, _)| *id);
                let Some(id) = next else {
                    break;
                };
                let Some(timer) = state.timers.remove(&id) else {
                    break;
                };
                state.now = state.now.max(timer.deadline);
                state.fired += 1;
                match timer.task {
                    Task::Once(callback) => Due::Once(callback),
                    Task::Repeat { period, callback } => {
                        let deadline = timer.deadline.saturating_add(period);
                        // At the end of the clock an interval cannot move on.
                        if deadline > timer.deadline {
                            state.timers.insert(
                                id,
                                Timer {
                                    deadline,
                                    task: Task::Repeat {
                                        period,
                                        callback: Rc::clone(&callback),
                                    },
                                },
                            );
                        }
                        Due::Repeat(callback)
                    }
                }
            };
            match due {
                Due::Once(callback) => callback(),
                Due::Repeat(callback) => callback(),
            }
            ran += 1;
        }
        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
        ran
    }

    fn insert(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let deadline = state.now.saturating_add(delay);
        state.timers.insert(id, Timer { deadline, task });
        id
    }
}

enum Due {
    Once(Box<dyn FnOnce()>),
    Repeat(Rc<dyn Fn()>),
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        self.insert(delay, Task::Once(callback))
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn Fn()>) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(
            period,
            Task::Repeat {
                period,
                callback: Rc::from(callback),
            },
        )
    }

    fn cancel(&self, timer: TimerId) {
        self.state.borrow_mut().timers.remove(&timer);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("active", &state.timers.len())
            .field("fired", &state.fired)
            .finish()
    }
}

/// [`ManualScheduler`] tied to the wall clock.
///
/// Hosts with their own event loop call [`poll`](Self::poll) each turn; every
/// timer whose deadline has passed in real time fires.
pub struct PolledScheduler {
    clock: ManualScheduler,
    started: Instant,
}

impl PolledScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: ManualScheduler::new(),
            started: Instant::now(),
        }
    }

    /// Fire everything due by now. Returns how many callbacks ran.
    pub fn poll(&self) -> usize {
        self.clock.advance_to(self.started.elapsed())
    }

    /// Time until the next timer is due, or `None` when idle.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        let elapsed = self.started.elapsed();
        self.clock
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(elapsed))
    }

    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.clock.active_timers()
    }
}

impl Default for PolledScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for PolledScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        // Deadlines are measured from the wall clock, not the last poll.
        self.clock.advance_to(self.started.elapsed());
        self.clock.set_timeout(delay, callback)
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn Fn()>) -> TimerId {
        self.clock.advance_to(self.started.elapsed());
        self.clock.set_interval(period, callback)
    }

    fn cancel(&self, timer: TimerId) {
        self.clock.cancel(timer);
    }
}

impl fmt::Debug for PolledScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolledScheduler")
            .field("clock", &self.clock)
            .finish()
    }
}
