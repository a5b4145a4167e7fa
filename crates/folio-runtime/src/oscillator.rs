#![forbid(unsafe_code)]

//! Boundary-reversing offset oscillator.
//!
//! [`ShiftState`] sweeps an offset back and forth across `[0, empty_slots]`.
//! [`ShiftAnimation`] ticks it on a scheduler interval while a visibility
//! signal is `true`, cancels the interval when the signal drops, and resumes
//! from the frozen state when it returns.
//!
//! # Invariants
//!
//! 1. `0 <= offset <= empty_slots` after every tick.
//! 2. With `empty_slots = n >= 1`, the offset sequence has period `2n`.
//! 3. At most one interval is live per animation; none after drop.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::config::ShiftConfig;
use tracing::{debug, trace};

use crate::reactive::{Observable, ReadOnly, Subscription};
use crate::scheduler::{Scheduler, TimerId};

/// Sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Offset and direction of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftState {
    offset: u32,
    direction: Direction,
    empty_slots: u32,
}

impl ShiftState {
    /// Start at offset 0 moving forward.
    #[must_use]
    pub const fn new(empty_slots: u32) -> Self {
        Self {
            offset: 0,
            direction: Direction::Forward,
            empty_slots,
        }
    }

    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn empty_slots(&self) -> u32 {
        self.empty_slots
    }

    /// Ticks per full sweep; 0 when there is nothing to sweep across.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.empty_slots.saturating_mul(2)
    }

    /// Advance one step. Reaching either bound clamps to it and reverses.
    pub fn tick(&mut self) {
        let bound = i64::from(self.empty_slots);
        let next = i64::from(self.offset) + self.direction.sign();
        if next >= bound {
            self.offset = self.empty_slots;
            self.direction = Direction::Backward;
        } else if next <= 0 {
            self.offset = 0;
            self.direction = Direction::Forward;
        } else {
            // 0 < next < bound <= u32::MAX
            self.offset = next as u32;
        }
    }

    /// The state after one tick.
    #[must_use]
    pub fn ticked(mut self) -> Self {
        self.tick();
        self
    }
}

struct Driver {
    scheduler: Rc<dyn Scheduler>,
    interval: Duration,
    timer: Cell<Option<TimerId>>,
    state: Observable<ShiftState>,
}

impl Driver {
    fn start(self: &Rc<Self>) {
        if self.timer.get().is_some() {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let id = self.scheduler.set_interval(
            self.interval,
            Box::new(move || {
                if let Some(driver) = weak.upgrade() {
                    driver.tick();
                }
            }),
        );
        self.timer.set(Some(id));
        debug!(
            timer = id.raw(),
            offset = self.state.with(ShiftState::offset),
            "shift animation resumed"
        );
    }

    fn stop(&self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
            debug!(
                timer = id.raw(),
                offset = self.state.with(ShiftState::offset),
                "shift animation paused"
            );
        }
    }

    fn tick(&self) {
        self.state.update(ShiftState::tick);
        self.state.with(|s| {
            trace!(offset = s.offset, direction = s.direction.sign(), "shift tick");
        });
    }
}

/// A [`ShiftState`] ticking on a scheduler while a section is in view.
pub struct ShiftAnimation {
    driver: Rc<Driver>,
    _visibility: Subscription,
}

impl ShiftAnimation {
    /// Bind a new oscillator to `visible`. Ticking starts immediately if the
    /// signal is already `true`.
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        config: &ShiftConfig,
        visible: &ReadOnly<bool>,
    ) -> Self {
        let driver = Rc::new(Driver {
            scheduler,
            interval: config.interval,
            timer: Cell::new(None),
            state: Observable::new(ShiftState::new(config.empty_slots)),
        });
        let weak = Rc::downgrade(&driver);
        let subscription = visible.subscribe(move |visible| {
            let Some(driver) = weak.upgrade() else {
                return;
            };
            if *visible {
                driver.start();
            } else {
                driver.stop();
            }
        });
        if visible.get() {
            driver.start();
        }
        Self {
            driver,
            _visibility: subscription,
        }
    }

    /// Current `{offset, empty_slots}` for the presentation layer.
    #[must_use]
    pub fn signal(&self) -> ReadOnly<ShiftState> {
        self.driver.state.read_only()
    }

    #[must_use]
    pub fn state(&self) -> ShiftState {
        self.driver.state.get()
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.driver.state.with(ShiftState::offset)
    }

    #[must_use]
    pub fn empty_slots(&self) -> u32 {
        self.driver.state.with(ShiftState::empty_slots)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.driver.timer.get().is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.driver.interval
    }
}

impl Drop for ShiftAnimation {
    fn drop(&mut self) {
        self.driver.stop();
    }
}

impl fmt::Debug for ShiftAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShiftAnimation")
            .field("state", &self.driver.state.get())
            .field("running", &self.is_running())
            .finish()
    }
}
