#![forbid(unsafe_code)]

//! Hero section: role typewriter and entrance cascade.
//!
//! [`Typewriter`] is a pure state machine over grapheme clusters; it never
//! looks at a clock. [`TypewriterDriver`] runs it on a [`Scheduler`] by
//! chaining one-shot timeouts, publishing the visible text after each step.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_content::ROLES;
use folio_runtime::reactive::{Observable, ReadOnly, Subscription};
use folio_runtime::scheduler::{Scheduler, TimerId};
use folio_runtime::stagger::delay_for;
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use crate::markup::animation_delay;
use crate::navigation::{NavAction, SectionId};

/// Step between hero entrance parts.
pub const ENTRANCE_STEP: Duration = Duration::from_millis(200);

/// What the typewriter is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
    Pausing,
}

/// Delays between typewriter steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_delay: Duration,
    pub hold: Duration,
    pub delete_delay: Duration,
    pub pause: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            hold: Duration::from_millis(2000),
            delete_delay: Duration::from_millis(50),
            pause: Duration::from_millis(500),
        }
    }
}

/// Types a role out, holds it, deletes it, pauses, and moves to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    roles: &'static [&'static str],
    timing: TypewriterTiming,
    role: usize,
    shown: usize,
    phase: TypewriterPhase,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(&ROLES)
    }
}

impl Typewriter {
    /// Starts typing the first role from an empty line.
    #[must_use]
    pub fn new(roles: &'static [&'static str]) -> Self {
        Self {
            roles,
            timing: TypewriterTiming::default(),
            role: 0,
            shown: 0,
            phase: TypewriterPhase::Typing,
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: TypewriterTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    #[must_use]
    pub fn role_index(&self) -> usize {
        self.role
    }

    #[must_use]
    pub fn timing(&self) -> &TypewriterTiming {
        &self.timing
    }

    fn current_role(&self) -> &'static str {
        self.roles.get(self.role).copied().unwrap_or("")
    }

    fn role_len(&self) -> usize {
        self.current_role().graphemes(true).count()
    }

    /// The visible prefix of the current role.
    #[must_use]
    pub fn text(&self) -> &'static str {
        let role = self.current_role();
        role.grapheme_indices(true)
            .nth(self.shown)
            .map_or(role, |(at, _)| &role[..at])
    }

    /// How long to wait before the next [`step`](Self::step). `None` when
    /// there are no roles to cycle.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        if self.roles.is_empty() {
            return None;
        }
        Some(match self.phase {
            TypewriterPhase::Typing => self.timing.type_delay,
            TypewriterPhase::Holding => self.timing.hold,
            TypewriterPhase::Deleting => self.timing.delete_delay,
            TypewriterPhase::Pausing => self.timing.pause,
        })
    }

    /// Advance one step.
    pub fn step(&mut self) {
        if self.roles.is_empty() {
            return;
        }
        match self.phase {
            TypewriterPhase::Typing => {
                let len = self.role_len();
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown >= len {
                    self.phase = TypewriterPhase::Holding;
                }
            }
            TypewriterPhase::Holding => self.phase = TypewriterPhase::Deleting,
            TypewriterPhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phase = TypewriterPhase::Pausing;
                }
            }
            TypewriterPhase::Pausing => {
                self.role = (self.role + 1) % self.roles.len();
                self.phase = TypewriterPhase::Typing;
            }
        }
    }
}

struct DriverInner {
    scheduler: Rc<dyn Scheduler>,
    machine: RefCell<Typewriter>,
    text: Observable<String>,
    timer: Cell<Option<TimerId>>,
}

impl DriverInner {
    fn schedule(self: &Rc<Self>) {
        let Some(delay) = self.machine.borrow().next_delay() else {
            return;
        };
        let weak: Weak<Self> = Rc::downgrade(self);
        let id = self.scheduler.set_timeout(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.timer.set(None);
                    inner.advance();
                }
            }),
        );
        self.timer.set(Some(id));
    }

    fn advance(self: &Rc<Self>) {
        let text = {
            let mut machine = self.machine.borrow_mut();
            let before = machine.phase();
            machine.step();
            if machine.phase() != before {
                trace!(role = machine.role_index(), phase = ?machine.phase(), "typewriter phase");
            }
            machine.text()
        };
        self.text.set(text.to_string());
        self.schedule();
    }
}

/// Runs a [`Typewriter`] on a scheduler.
pub struct TypewriterDriver {
    inner: Rc<DriverInner>,
}

impl TypewriterDriver {
    /// Start ticking immediately.
    pub fn start(scheduler: Rc<dyn Scheduler>, typewriter: Typewriter) -> Self {
        let text = Observable::new(typewriter.text().to_string());
        let inner = Rc::new(DriverInner {
            scheduler,
            machine: RefCell::new(typewriter),
            text,
            timer: Cell::new(None),
        });
        inner.schedule();
        debug!(running = inner.timer.get().is_some(), "typewriter started");
        Self { inner }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.inner.text.get()
    }

    #[must_use]
    pub fn signal(&self) -> ReadOnly<String> {
        self.inner.text.read_only()
    }

    pub fn subscribe(&self, callback: impl Fn(&String) + 'static) -> Subscription {
        self.inner.text.subscribe(callback)
    }

    #[must_use]
    pub fn phase(&self) -> TypewriterPhase {
        self.inner.machine.borrow().phase()
    }

    #[must_use]
    pub fn role_index(&self) -> usize {
        self.inner.machine.borrow().role_index()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.timer.get().is_some()
    }
}

impl Drop for TypewriterDriver {
    fn drop(&mut self) {
        if let Some(id) = self.inner.timer.take() {
            self.inner.scheduler.cancel(id);
            debug!(timer = id.raw(), "typewriter stopped");
        }
    }
}

impl fmt::Debug for TypewriterDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypewriterDriver")
            .field("text", &self.text())
            .field("phase", &self.phase())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Hero elements in entrance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroPart {
    Greeting,
    Name,
    Tagline,
    Role,
    Description,
    CallToAction,
}

impl HeroPart {
    pub const ALL: [HeroPart; 6] = [
        Self::Greeting,
        Self::Name,
        Self::Tagline,
        Self::Role,
        Self::Description,
        Self::CallToAction,
    ];

    /// The first part waits one step, each later part one more.
    #[must_use]
    pub fn entrance_delay(self) -> Duration {
        delay_for(self as usize + 1, ENTRANCE_STEP)
    }

    #[must_use]
    pub fn style(self) -> String {
        animation_delay(self.entrance_delay())
    }
}

/// A hero call-to-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: SectionId,
    pub primary: bool,
}

impl CallToAction {
    #[must_use]
    pub const fn action(&self) -> NavAction {
        NavAction::ScrollTo(self.target)
    }
}

pub const HERO_ACTIONS: [CallToAction; 2] = [
    CallToAction {
        label: "View Projects",
        target: SectionId::Projects,
        primary: true,
    },
    CallToAction {
        label: "Get In Touch",
        target: SectionId::Contact,
        primary: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use folio_runtime::scheduler::ManualScheduler;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run_until(tw: &mut Typewriter, phase: TypewriterPhase) -> Duration {
        let mut elapsed = Duration::ZERO;
        while tw.phase() != phase {
            elapsed += tw.next_delay().unwrap();
            tw.step();
        }
        elapsed
    }

    #[test]
    fn types_one_grapheme_per_step() {
        let mut tw = Typewriter::default();
        assert_eq!(tw.text(), "");
        tw.step();
        assert_eq!(tw.text(), "F");
        tw.step();
        assert_eq!(tw.text(), "Fu");
    }

    #[test]
    fn full_cycle_timing() {
        let mut tw = Typewriter::default();
        let len = ROLES[0].len() as u32;
        assert_eq!(run_until(&mut tw, TypewriterPhase::Holding), ms(100) * len);
        assert_eq!(tw.text(), "Full Stack Developer");
        assert_eq!(run_until(&mut tw, TypewriterPhase::Deleting), ms(2000));
        assert_eq!(run_until(&mut tw, TypewriterPhase::Pausing), ms(50) * len);
        assert_eq!(tw.text(), "");
        assert_eq!(run_until(&mut tw, TypewriterPhase::Typing), ms(500));
        assert_eq!(tw.role_index(), 1);
    }

    #[test]
    fn wraps_to_first_role() {
        let mut tw = Typewriter::default();
        for _ in 0..ROLES.len() {
            run_until(&mut tw, TypewriterPhase::Pausing);
            run_until(&mut tw, TypewriterPhase::Typing);
        }
        assert_eq!(tw.role_index(), 0);
    }

    #[test]
    fn counts_graphemes_not_bytes() {
        static ROLES: [&str; 1] = ["e\u{301}t\u{e9}"];
        let mut tw = Typewriter::new(&ROLES);
        tw.step();
        assert_eq!(tw.text(), "e\u{301}");
        tw.step();
        tw.step();
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
        assert_eq!(tw.text(), ROLES[0]);
    }

    #[test]
    fn no_roles_never_schedules() {
        let mut tw = Typewriter::new(&[]);
        assert_eq!(tw.next_delay(), None);
        tw.step();
        assert_eq!(tw.text(), "");

        let sched = Rc::new(ManualScheduler::new());
        let driver = TypewriterDriver::start(sched.clone(), tw);
        assert!(!driver.is_running());
        assert_eq!(sched.active_timers(), 0);
    }

    #[test]
    fn empty_role_moves_on() {
        static ROLES: [&str; 2] = ["", "ok"];
        let mut tw = Typewriter::new(&ROLES);
        tw.step();
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
        run_until(&mut tw, TypewriterPhase::Typing);
        assert_eq!(tw.role_index(), 1);
    }

    #[test]
    fn driver_publishes_text() {
        let sched = Rc::new(ManualScheduler::new());
        let driver = TypewriterDriver::start(sched.clone(), Typewriter::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = driver.subscribe(move |t| s.borrow_mut().push(t.clone()));

        sched.advance(ms(300));
        assert_eq!(driver.text(), "Ful");
        assert_eq!(*seen.borrow(), vec!["F", "Fu", "Ful"]);
        assert_eq!(sched.active_timers(), 1);
    }

    #[test]
    fn driver_cycles_roles() {
        let sched = Rc::new(ManualScheduler::new());
        let driver = TypewriterDriver::start(sched.clone(), Typewriter::default());
        let len = ROLES[0].len() as u32;
        sched.advance(ms(100) * len + ms(2000) + ms(50) * len + ms(500));
        assert_eq!(driver.role_index(), 1);
        assert_eq!(driver.phase(), TypewriterPhase::Typing);
        sched.advance(ms(100));
        assert_eq!(driver.text(), "C");
    }

    #[test]
    fn drop_cancels_pending_timeout() {
        let sched = Rc::new(ManualScheduler::new());
        let driver = TypewriterDriver::start(sched.clone(), Typewriter::default());
        let signal = driver.signal();
        sched.advance(ms(100));
        drop(driver);
        assert_eq!(sched.active_timers(), 0);
        sched.advance(ms(10_000));
        assert_eq!(signal.get(), "F");
    }

    #[test]
    fn entrance_cascade() {
        let delays: Vec<_> = HeroPart::ALL.iter().map(|p| p.entrance_delay()).collect();
        assert_eq!(
            delays,
            vec![ms(200), ms(400), ms(600), ms(800), ms(1000), ms(1200)]
        );
        assert_eq!(HeroPart::Name.style(), "animation-delay: 400ms");
    }

    #[test]
    fn calls_to_action_scroll() {
        assert_eq!(
            HERO_ACTIONS[0].action(),
            NavAction::ScrollTo(SectionId::Projects)
        );
        assert_eq!(
            HERO_ACTIONS[1].action(),
            NavAction::ScrollTo(SectionId::Contact)
        );
    }

    proptest! {
        #[test]
        fn text_is_always_a_role_prefix(steps in 0usize..400) {
            let mut tw = Typewriter::default();
            for _ in 0..steps {
                tw.step();
                prop_assert!(ROLES[tw.role_index()].starts_with(tw.text()));
            }
        }
    }
}
