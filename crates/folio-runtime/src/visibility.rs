#![forbid(unsafe_code)]

//! Scroll-triggered visibility.
//!
//! [`VisibilityTracker::track`] answers "has this element been scrolled into
//! view yet?" once per element. The first qualifying intersection entry flips
//! the handle's signal to `true` and releases the observer from inside the
//! callback; the signal never reverts.
//!
//! [`VisibilityTracker::track_continuous`] keeps observing and reports both
//! enter and exit. It exists for effects that pause off-screen.
//!
//! # Invariants
//!
//! 1. At most one `observe` per handle, and at most one `unobserve`.
//! 2. A one-shot signal transitions `false -> true` at most once.
//! 3. A missing element is "not yet visible": no observe, no error.
//! 4. Dropping a handle releases its observer if it is still registered.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use folio_core::config::RevealConfig;
use folio_core::intersection::{ElementId, IntersectionEntry, IntersectionFacility, ObserverId};
use tracing::debug;

use crate::reactive::{Observable, ReadOnly, Subscription};

/// Observer ownership shared between a handle and its callback.
struct Registration {
    facility: Weak<dyn IntersectionFacility>,
    element: Option<ElementId>,
    observer: Cell<Option<ObserverId>>,
}

impl Registration {
    fn new(facility: &Rc<dyn IntersectionFacility>, element: Option<ElementId>) -> Rc<Self> {
        Rc::new(Self {
            facility: Rc::downgrade(facility),
            element,
            observer: Cell::new(None),
        })
    }

    fn is_observing(&self) -> bool {
        self.observer.get().is_some()
    }

    /// Unobserve once. Later calls are no-ops.
    fn release(&self) -> bool {
        let Some(observer) = self.observer.take() else {
            return false;
        };
        if let Some(facility) = self.facility.upgrade() {
            facility.unobserve(observer);
        }
        if let Some(element) = self.element {
            debug!(%element, observer = observer.raw(), "visibility observer released");
        }
        true
    }
}

/// Creates visibility handles against one intersection facility.
#[derive(Clone)]
pub struct VisibilityTracker {
    facility: Rc<dyn IntersectionFacility>,
}

impl VisibilityTracker {
    pub fn new(facility: Rc<dyn IntersectionFacility>) -> Self {
        Self { facility }
    }

    #[must_use]
    pub fn facility(&self) -> &Rc<dyn IntersectionFacility> {
        &self.facility
    }

    /// Track `element` until it first becomes visible.
    ///
    /// `None` is a valid "not yet mounted" element: the handle stays `false`
    /// and nothing is observed. The threshold is clamped into `[0, 1]`.
    pub fn track(&self, element: Option<ElementId>, config: &RevealConfig) -> VisibilityHandle {
        let config = config.clamped();
        let visible = Observable::new(false);
        let registration = Registration::new(&self.facility, element);

        if let Some(element) = element {
            let threshold = config.threshold;
            let signal = visible.clone();
            let owner = Rc::downgrade(&registration);
            let observer = self.facility.observe(
                element,
                config.observe_options(),
                Box::new(move |entry: &IntersectionEntry| {
                    if signal.get() || !entry.satisfies(threshold) {
                        return;
                    }
                    if let Some(registration) = owner.upgrade() {
                        registration.release();
                    }
                    debug!(%element, ratio = entry.ratio, "element became visible");
                    signal.set(true);
                }),
            );
            registration.observer.set(Some(observer));
            debug!(%element, observer = observer.raw(), threshold, "tracking visibility");
        }

        VisibilityHandle {
            visible,
            registration,
        }
    }

    /// Track `element` entering and leaving the viewport for as long as the
    /// handle lives.
    pub fn track_continuous(
        &self,
        element: Option<ElementId>,
        config: &RevealConfig,
    ) -> ContinuousVisibility {
        let config = config.clamped();
        let visible = Observable::new(false);
        let registration = Registration::new(&self.facility, element);

        if let Some(element) = element {
            let threshold = config.threshold;
            let signal = visible.clone();
            let observer = self.facility.observe(
                element,
                config.observe_options(),
                Box::new(move |entry: &IntersectionEntry| {
                    signal.set(entry.satisfies(threshold));
                }),
            );
            registration.observer.set(Some(observer));
            debug!(%element, observer = observer.raw(), threshold, "tracking continuous visibility");
        }

        ContinuousVisibility {
            visible,
            registration,
        }
    }
}

impl fmt::Debug for VisibilityTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityTracker").finish_non_exhaustive()
    }
}

/// One-shot visibility of a single element.
///
/// Dropping the handle (or calling [`dispose`](Self::dispose)) releases the
/// observer if the element has not become visible yet.
pub struct VisibilityHandle {
    visible: Observable<bool>,
    registration: Rc<Registration>,
}

impl VisibilityHandle {
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.registration.element
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Whether an observer is still registered.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.registration.is_observing()
    }

    /// Read-only signal for the presentation layer.
    #[must_use]
    pub fn signal(&self) -> ReadOnly<bool> {
        self.visible.read_only()
    }

    /// Notified on the `false -> true` transition.
    pub fn subscribe(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.visible.subscribe(callback)
    }

    /// Release the observer now. Returns whether one was still registered.
    pub fn dispose(&self) -> bool {
        self.registration.release()
    }
}

impl Drop for VisibilityHandle {
    fn drop(&mut self) {
        self.registration.release();
    }
}

impl fmt::Debug for VisibilityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityHandle")
            .field("element", &self.registration.element)
            .field("visible", &self.visible.get())
            .field("observing", &self.registration.is_observing())
            .finish()
    }
}

/// Enter/exit visibility of a single element.
pub struct ContinuousVisibility {
    visible: Observable<bool>,
    registration: Rc<Registration>,
}

impl ContinuousVisibility {
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.registration.element
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.registration.is_observing()
    }

    #[must_use]
    pub fn signal(&self) -> ReadOnly<bool> {
        self.visible.read_only()
    }

    pub fn subscribe(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.visible.subscribe(callback)
    }

    /// Stop observing. The signal keeps its last value.
    pub fn dispose(&self) -> bool {
        self.registration.release()
    }
}

impl Drop for ContinuousVisibility {
    fn drop(&mut self) {
        self.registration.release();
    }
}

impl fmt::Debug for ContinuousVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousVisibility")
            .field("element", &self.registration.element)
            .field("visible", &self.visible.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::fake::FakeIntersection;
    use folio_core::geometry::{Rect, RootMargin};
    use folio_core::viewport::SimulatedViewport;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use tracing_test::traced_test;

    const EL: ElementId = ElementId::new(1);

    fn fake() -> (Rc<FakeIntersection>, VisibilityTracker) {
        let fake = Rc::new(FakeIntersection::new());
        let tracker = VisibilityTracker::new(fake.clone());
        (fake, tracker)
    }

    #[test]
    fn starts_hidden_and_observes_once() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        assert!(!handle.is_visible());
        assert!(handle.is_observing());
        assert_eq!(fake.observe_count(EL), 1);
        assert_eq!(fake.unobserve_count(), 0);
    }

    #[test]
    fn registers_threshold_and_margin() {
        let (fake, tracker) = fake();
        let config = RevealConfig::default()
            .with_threshold(0.2)
            .with_root_margin(RootMargin::uniform_px(10.0));
        let _handle = tracker.track(Some(EL), &config);
        let options = fake.options_for(EL).unwrap();
        assert_eq!(options.thresholds(), &[0.2]);
        assert_eq!(options.root_margin(), RootMargin::uniform_px(10.0));
    }

    #[test]
    fn first_qualifying_entry_triggers_and_releases() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());

        fake.emit(EL, 0.05, true);
        assert!(!handle.is_visible());
        assert!(handle.is_observing());

        fake.emit(EL, 0.1, true);
        assert!(handle.is_visible());
        assert!(!handle.is_observing());
        assert_eq!(fake.unobserve_count(), 1);
        assert_eq!(fake.live_count(), 0);
    }

    #[test]
    fn non_intersecting_entry_never_triggers() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default().with_threshold(0.0));
        fake.emit(EL, 0.0, false);
        assert!(!handle.is_visible());
        fake.emit(EL, 0.0, true);
        assert!(handle.is_visible());
    }

    #[test]
    fn no_callbacks_after_trigger() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        assert_eq!(fake.enter(EL), 1);
        assert_eq!(fake.exit(EL), 0);
        assert_eq!(fake.enter(EL), 0);
        assert_eq!(fake.delivered(), 1);
        assert!(handle.is_visible());
    }

    #[test]
    fn subscriber_sees_single_transition() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = handle.subscribe(move |v| s.borrow_mut().push(*v));
        fake.enter(EL);
        fake.exit(EL);
        fake.enter(EL);
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn missing_element_observes_nothing() {
        let (fake, tracker) = fake();
        let handle = tracker.track(None, &RevealConfig::default());
        assert!(!handle.is_visible());
        assert!(!handle.is_observing());
        assert!(!handle.dispose());
        drop(handle);
        assert_eq!(fake.total_observe_calls(), 0);
        assert_eq!(fake.unobserve_count(), 0);
    }

    #[test]
    fn never_intersecting_unobserves_once_on_drop() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        fake.exit(EL);
        assert!(!handle.is_visible());
        assert!(handle.is_observing());
        drop(handle);
        assert_eq!(fake.unobserve_count(), 1);
        assert_eq!(fake.live_count(), 0);
    }

    #[test]
    fn dispose_then_drop_unobserves_once() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        assert!(handle.dispose());
        assert!(!handle.dispose());
        drop(handle);
        assert_eq!(fake.unobserve_count(), 1);
    }

    #[test]
    fn drop_after_trigger_does_not_unobserve_again() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        fake.enter(EL);
        drop(handle);
        assert_eq!(fake.unobserve_count(), 1);
    }

    #[test]
    fn subscriber_may_drop_handle_during_trigger() {
        let (fake, tracker) = fake();
        let slot: Rc<RefCell<Option<VisibilityHandle>>> = Rc::new(RefCell::new(None));
        let handle = tracker.track(Some(EL), &RevealConfig::default());
        let s = Rc::clone(&slot);
        let sub = handle.subscribe(move |_| {
            s.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(handle);
        fake.enter(EL);
        assert!(slot.borrow().is_none());
        assert_eq!(fake.unobserve_count(), 1);
        drop(sub);
    }

    #[test]
    fn out_of_range_threshold_is_clamped() {
        let (fake, tracker) = fake();
        let handle = tracker.track(Some(EL), &RevealConfig::default().with_threshold(4.0));
        assert_eq!(fake.options_for(EL).unwrap().thresholds(), &[1.0]);
        fake.emit(EL, 1.0, true);
        assert!(handle.is_visible());
    }

    #[test]
    fn continuous_reports_enter_and_exit() {
        let (fake, tracker) = fake();
        let section = tracker.track_continuous(Some(EL), &RevealConfig::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let _sub = section.subscribe(move |v| l.borrow_mut().push(*v));

        fake.enter(EL);
        fake.exit(EL);
        fake.enter(EL);
        assert_eq!(*log.borrow(), vec![true, false, true]);
        assert!(section.is_observing());
        assert_eq!(fake.unobserve_count(), 0);

        drop(section);
        assert_eq!(fake.unobserve_count(), 1);
    }

    #[test]
    fn continuous_missing_element_stays_hidden() {
        let (fake, tracker) = fake();
        let section = tracker.track_continuous(None, &RevealConfig::default());
        assert!(!section.is_visible());
        assert_eq!(fake.total_observe_calls(), 0);
    }

    #[test]
    fn tracker_outlived_by_handle() {
        let fake = Rc::new(FakeIntersection::new());
        let handle = {
            let tracker = VisibilityTracker::new(fake.clone());
            tracker.track(Some(EL), &RevealConfig::default())
        };
        fake.enter(EL);
        assert!(handle.is_visible());
    }

    #[test]
    fn simulated_viewport_reveals_on_scroll() {
        let viewport = Rc::new(SimulatedViewport::new(800.0, 600.0));
        viewport.place(EL, Rect::new(0.0, 1500.0, 800.0, 400.0));
        let tracker = VisibilityTracker::new(viewport.clone());
        let handle = tracker.track(Some(EL), &RevealConfig::default());

        viewport.flush();
        assert!(!handle.is_visible());

        viewport.scroll_to(1000.0);
        assert!(handle.is_visible());
        assert!(!viewport.is_observing(EL));

        viewport.scroll_to(0.0);
        assert!(handle.is_visible());
        assert_eq!(viewport.unobserve_calls(), 1);
    }

    #[test]
    #[traced_test]
    fn logs_trigger_and_release() {
        let (fake, tracker) = fake();
        let _handle = tracker.track(Some(EL), &RevealConfig::default());
        fake.enter(EL);
        assert!(logs_contain("tracking visibility"));
        assert!(logs_contain("element became visible"));
        assert!(logs_contain("visibility observer released"));
    }

    proptest! {
        #[test]
        fn visibility_is_monotonic(events in proptest::collection::vec((0.0f64..=1.0, any::<bool>()), 0..40)) {
            let (fake, tracker) = fake();
            let handle = tracker.track(Some(EL), &RevealConfig::default());
            let mut seen_true = false;
            for (ratio, intersecting) in events {
                fake.emit(EL, ratio, intersecting);
                if seen_true {
                    prop_assert!(handle.is_visible());
                }
                seen_true |= handle.is_visible();
            }
            prop_assert!(fake.unobserve_count() <= 1);
            drop(handle);
            prop_assert_eq!(fake.unobserve_count(), 1);
        }

        #[test]
        fn one_delivery_after_trigger(ratios in proptest::collection::vec(0.1f64..=1.0, 1..20)) {
            let (fake, tracker) = fake();
            let _handle = tracker.track(Some(EL), &RevealConfig::default());
            for ratio in &ratios {
                fake.emit(EL, *ratio, true);
            }
            prop_assert_eq!(fake.delivered(), 1);
        }
    }
}
