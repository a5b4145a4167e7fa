#![forbid(unsafe_code)]

//! Emulated intersection facility over a simulated document.
//!
//! [`SimulatedViewport`] stands in for the browser's `IntersectionObserver`
//! where none exists: native builds, tests, and headless previews. Elements
//! are placed as rects in document coordinates; the viewport is a window of
//! fixed size at a scroll offset.
//!
//! # Delivery semantics
//!
//! - A newly observed element receives an initial entry on the next flush.
//! - Afterwards an entry is delivered only when the number of crossed
//!   thresholds or the intersecting flag changes.
//! - `scroll_to`, `scroll_by`, `resize`, `place`, and `remove` flush;
//!   [`flush`](SimulatedViewport::flush) can also be called directly.
//! - Entries are delivered in observer registration order. An observer
//!   released by an earlier callback in the same flush receives nothing.
//! - Elements not placed in the document produce no entries.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ahash::AHashMap;

use crate::geometry::{Rect, intersection_ratio};
use crate::intersection::{
    ElementId, IntersectionCallback, IntersectionEntry, IntersectionFacility, ObserveOptions,
    ObserverId,
};

type SharedCallback = Rc<dyn Fn(&IntersectionEntry)>;

struct Registration {
    target: ElementId,
    options: ObserveOptions,
    callback: SharedCallback,
    /// `(crossed thresholds, intersecting)` at the last delivery.
    last: Option<(usize, bool)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counters {
    observe_calls: usize,
    unobserve_calls: usize,
    delivered: usize,
}

struct ViewportState {
    width: f64,
    height: f64,
    scroll_x: f64,
    scroll_y: f64,
    elements: AHashMap<ElementId, Rect>,
    observers: BTreeMap<ObserverId, Registration>,
    next_observer: u64,
    counters: Counters,
}

impl ViewportState {
    fn viewport_rect(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }
}

/// A scrollable window over a document of element rects.
pub struct SimulatedViewport {
    state: RefCell<ViewportState>,
}

impl SimulatedViewport {
    /// Create a viewport of the given size scrolled to the top.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: RefCell::new(ViewportState {
                width: width.max(0.0),
                height: height.max(0.0),
                scroll_x: 0.0,
                scroll_y: 0.0,
                elements: AHashMap::new(),
                observers: BTreeMap::new(),
                next_observer: 1,
                counters: Counters::default(),
            }),
        }
    }

    /// Place (or move) an element at `rect` in document coordinates.
    pub fn place(&self, element: ElementId, rect: Rect) -> usize {
        self.state.borrow_mut().elements.insert(element, rect);
        self.flush()
    }

    /// Remove an element from the document. Its observers stay registered.
    pub fn remove(&self, element: ElementId) -> usize {
        self.state.borrow_mut().elements.remove(&element);
        self.flush()
    }

    /// Scroll vertically to `y` (clamped at zero).
    pub fn scroll_to(&self, y: f64) -> usize {
        self.state.borrow_mut().scroll_y = y.max(0.0);
        self.flush()
    }

    /// Scroll vertically by `dy`.
    pub fn scroll_by(&self, dy: f64) -> usize {
        let y = self.state.borrow().scroll_y + dy;
        self.scroll_to(y)
    }

    /// Resize the viewport window.
    pub fn resize(&self, width: f64, height: f64) -> usize {
        {
            let mut state = self.state.borrow_mut();
            state.width = width.max(0.0);
            state.height = height.max(0.0);
        }
        self.flush()
    }

    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// Current viewport window in document coordinates.
    #[must_use]
    pub fn viewport_rect(&self) -> Rect {
        self.state.borrow().viewport_rect()
    }

    #[must_use]
    pub fn rect_of(&self, element: ElementId) -> Option<Rect> {
        self.state.borrow().elements.get(&element).copied()
    }

    /// Total `observe` calls since creation.
    #[must_use]
    pub fn observe_calls(&self) -> usize {
        self.state.borrow().counters.observe_calls
    }

    /// Total `unobserve` calls since creation (including no-op calls).
    #[must_use]
    pub fn unobserve_calls(&self) -> usize {
        self.state.borrow().counters.unobserve_calls
    }

    /// Total entries delivered to callbacks.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.state.borrow().counters.delivered
    }

    /// Number of currently registered observers.
    #[must_use]
    pub fn active_observers(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Whether any registered observer targets `element`.
    #[must_use]
    pub fn is_observing(&self, element: ElementId) -> bool {
        self.state
            .borrow()
            .observers
            .values()
            .any(|reg| reg.target == element)
    }

    /// Compute pending entries and deliver them. Returns the number delivered.
    pub fn flush(&self) -> usize {
        let pending: Vec<(ObserverId, SharedCallback, IntersectionEntry)> = {
            let mut state = self.state.borrow_mut();
            let viewport = state.viewport_rect();
            let ViewportState {
                elements,
                observers,
                ..
            } = &mut *state;
            let pending = observers
                .iter_mut()
                .filter_map(|(id, reg)| {
                    let rect = elements.get(&reg.target)?;
                    let root = reg.options.root_margin().apply(viewport);
                    let is_intersecting = !root.is_empty() && rect.intersection(&root).is_some();
                    let ratio = if is_intersecting {
                        intersection_ratio(rect, &root)
                    } else {
                        0.0
                    };
                    let crossed = reg.options.crossed(ratio, is_intersecting);
                    if reg.last == Some((crossed, is_intersecting)) {
                        return None;
                    }
                    reg.last = Some((crossed, is_intersecting));
                    let entry = IntersectionEntry {
                        target: reg.target,
                        ratio,
                        is_intersecting,
                    };
                    Some((*id, Rc::clone(&reg.callback), entry))
                })
                .collect();
            pending
        };

        let mut delivered = 0;
        for (id, callback, entry) in pending {
            // A callback earlier in this flush may have released this observer.
            if !self.state.borrow().observers.contains_key(&id) {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::trace!(
                observer = id.raw(),
                element = entry.target.raw(),
                ratio = entry.ratio,
                intersecting = entry.is_intersecting,
                "deliver intersection entry"
            );
            callback(&entry);
            delivered += 1;
        }
        self.state.borrow_mut().counters.delivered += delivered;
        delivered
    }
}

impl IntersectionFacility for SimulatedViewport {
    fn observe(
        &self,
        target: ElementId,
        options: ObserveOptions,
        callback: IntersectionCallback,
    ) -> ObserverId {
        let mut state = self.state.borrow_mut();
        let id = ObserverId::new(state.next_observer);
        state.next_observer += 1;
        state.counters.observe_calls += 1;
        state.observers.insert(
            id,
            Registration {
                target,
                options,
                callback: Rc::from(callback),
                last: None,
            },
        );
        id
    }

    fn unobserve(&self, observer: ObserverId) {
        let mut state = self.state.borrow_mut();
        state.counters.unobserve_calls += 1;
        state.observers.remove(&observer);
    }
}

impl std::fmt::Debug for SimulatedViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("SimulatedViewport")
            .field("viewport", &state.viewport_rect())
            .field("elements", &state.elements.len())
            .field("observers", &state.observers.len())
            .finish()
    }
}
