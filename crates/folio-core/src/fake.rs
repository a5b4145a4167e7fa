#![forbid(unsafe_code)]

//! Hand-driven intersection source for tests.
//!
//! Unlike [`SimulatedViewport`](crate::viewport::SimulatedViewport), nothing
//! is computed: tests push entries with [`FakeIntersection::emit`] and assert
//! on the recorded call counts.

use std::cell::RefCell;
use std::rc::Rc;

use crate::intersection::{
    ElementId, IntersectionCallback, IntersectionEntry, IntersectionFacility, ObserveOptions,
    ObserverId,
};

type SharedCallback = Rc<dyn Fn(&IntersectionEntry)>;

#[derive(Default)]
struct FakeState {
    next: u64,
    live: Vec<(ObserverId, ElementId, ObserveOptions, SharedCallback)>,
    observe_calls: Vec<ElementId>,
    unobserve_calls: Vec<ObserverId>,
    delivered: usize,
}

/// Intersection facility whose entries are pushed by the test.
#[derive(Default)]
pub struct FakeIntersection {
    state: RefCell<FakeState>,
}

impl FakeIntersection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an entry to every live observer of `target`.
    /// Returns how many callbacks ran.
    pub fn emit(&self, target: ElementId, ratio: f64, is_intersecting: bool) -> usize {
        let entry = IntersectionEntry {
            target,
            ratio,
            is_intersecting,
        };
        let callbacks: Vec<(ObserverId, SharedCallback)> = self
            .state
            .borrow()
            .live
            .iter()
            .filter(|(_, el, _, _)| *el == target)
            .map(|(id, _, _, cb)| (*id, Rc::clone(cb)))
            .collect();
        let mut ran = 0;
        for (id, callback) in callbacks {
            if !self.is_live(id) {
                continue;
            }
            callback(&entry);
            ran += 1;
        }
        self.state.borrow_mut().delivered += ran;
        ran
    }

    /// Shorthand for a fully visible entry.
    pub fn enter(&self, target: ElementId) -> usize {
        self.emit(target, 1.0, true)
    }

    /// Shorthand for a fully hidden entry.
    pub fn exit(&self, target: ElementId) -> usize {
        self.emit(target, 0.0, false)
    }

    #[must_use]
    pub fn is_live(&self, id: ObserverId) -> bool {
        self.state.borrow().live.iter().any(|(live, ..)| *live == id)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.state.borrow().live.len()
    }

    #[must_use]
    pub fn observe_count(&self, target: ElementId) -> usize {
        self.state
            .borrow()
            .observe_calls
            .iter()
            .filter(|el| **el == target)
            .count()
    }

    #[must_use]
    pub fn total_observe_calls(&self) -> usize {
        self.state.borrow().observe_calls.len()
    }

    #[must_use]
    pub fn unobserve_count(&self) -> usize {
        self.state.borrow().unobserve_calls.len()
    }

    #[must_use]
    pub fn delivered(&self) -> usize {
        self.state.borrow().delivered
    }

    /// Options the most recent observer of `target` registered with.
    #[must_use]
    pub fn options_for(&self, target: ElementId) -> Option<ObserveOptions> {
        self.state
            .borrow()
            .live
            .iter()
            .rev()
            .find(|(_, el, _, _)| *el == target)
            .map(|(_, _, opts, _)| opts.clone())
    }
}

impl IntersectionFacility for FakeIntersection {
    fn observe(
        &self,
        target: ElementId,
        options: ObserveOptions,
        callback: IntersectionCallback,
    ) -> ObserverId {
        let mut state = self.state.borrow_mut();
        state.next += 1;
        let id = ObserverId::new(state.next);
        state.observe_calls.push(target);
        state.live.push((id, target, options, Rc::from(callback)));
        id
    }

    fn unobserve(&self, observer: ObserverId) {
        let mut state = self.state.borrow_mut();
        state.unobserve_calls.push(observer);
        state.live.retain(|(id, ..)| *id != observer);
    }
}

impl std::fmt::Debug for FakeIntersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FakeIntersection")
            .field("live", &state.live.len())
            .field("observe_calls", &state.observe_calls.len())
            .field("unobserve_calls", &state.unobserve_calls.len())
            .finish()
    }
}
