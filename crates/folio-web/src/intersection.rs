#![forbid(unsafe_code)]

//! `IntersectionObserver` behind [`IntersectionFacility`].
//!
//! Observers with identical options share one browser observer. Entries are
//! routed back to registrations through the element's id attribute, and a
//! registration released mid-delivery is skipped for the rest of the batch.
//!
//! JS callbacks hold only a weak reference to facility state and are handed
//! to the JS garbage collector, so releasing an observer from inside its own
//! callback never frees the running closure.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use folio_core::intersection::{
    ElementId, IntersectionCallback, IntersectionEntry, IntersectionFacility, ObserveOptions,
    ObserverId,
};
use tracing::{debug, trace, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::convert::observer_key;
use crate::dom::ElementRegistry;
use crate::error::Result;

type SharedCallback = Rc<dyn Fn(&IntersectionEntry)>;

struct Registration {
    target: ElementId,
    key: String,
    callback: SharedCallback,
}

struct State {
    registry: Rc<ElementRegistry>,
    observers: RefCell<HashMap<String, IntersectionObserver>>,
    live: RefCell<HashMap<ObserverId, Registration>>,
    next: Cell<u64>,
}

impl State {
    fn deliver(&self, key: &str, entries: &js_sys::Array) {
        for value in entries.iter() {
            let entry: IntersectionObserverEntry = value.unchecked_into();
            let Some(target) = ElementRegistry::id_of(&entry.target()) else {
                continue;
            };
            let observed = IntersectionEntry {
                target,
                ratio: entry.intersection_ratio(),
                is_intersecting: entry.is_intersecting(),
            };
            let mut callbacks: Vec<(ObserverId, SharedCallback)> = self
                .live
                .borrow()
                .iter()
                .filter(|(_, reg)| reg.target == target && reg.key == key)
                .map(|(id, reg)| (*id, Rc::clone(&reg.callback)))
                .collect();
            callbacks.sort_by_key(|(id, _)| *id);
            for (id, callback) in callbacks {
                if !self.live.borrow().contains_key(&id) {
                    continue;
                }
                trace!(observer = id.raw(), %target, ratio = observed.ratio, "intersection entry");
                callback(&observed);
            }
        }
    }

    fn observer_for(self: &Rc<Self>, key: &str, options: &ObserveOptions) -> Result<IntersectionObserver> {
        if let Some(existing) = self.observers.borrow().get(key) {
            return Ok(existing.clone());
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let owned_key = key.to_string();
        let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                if let Some(state) = weak.upgrade() {
                    state.deliver(&owned_key, &entries);
                }
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin().to_string());
        let thresholds: js_sys::Array = options
            .thresholds()
            .iter()
            .map(|t| JsValue::from_f64(*t))
            .collect();
        init.set_threshold(&thresholds);
        let callback = closure.into_js_value();
        let observer = IntersectionObserver::new_with_options(callback.unchecked_ref(), &init)?;
        self.observers
            .borrow_mut()
            .insert(key.to_string(), observer.clone());
        debug!(key, "intersection observer created");
        Ok(observer)
    }
}

/// Browser [`IntersectionFacility`].
pub struct WebIntersection {
    state: Rc<State>,
}

impl WebIntersection {
    #[must_use]
    pub fn new(registry: Rc<ElementRegistry>) -> Self {
        Self {
            state: Rc::new(State {
                registry,
                observers: RefCell::new(HashMap::new()),
                live: RefCell::new(HashMap::new()),
                next: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Rc<ElementRegistry> {
        &self.state.registry
    }

    /// Registrations that can still receive entries.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.state.live.borrow().len()
    }

    /// Browser observers currently connected.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.observers.borrow().len()
    }
}

impl IntersectionFacility for WebIntersection {
    fn observe(
        &self,
        target: ElementId,
        options: ObserveOptions,
        callback: IntersectionCallback,
    ) -> ObserverId {
        let id = ObserverId::new(self.state.next.get() + 1);
        self.state.next.set(id.raw());

        let Some(element) = self.state.registry.get(target) else {
            warn!(%target, "observing an unregistered element; no entries will arrive");
            return id;
        };
        let key = observer_key(&options);
        let observer = match self.state.observer_for(&key, &options) {
            Ok(observer) => observer,
            Err(e) => {
                warn!(%target, error = %e, "failed to create intersection observer");
                return id;
            }
        };
        self.state.live.borrow_mut().insert(
            id,
            Registration {
                target,
                key,
                callback: Rc::from(callback),
            },
        );
        // Re-observing makes the browser queue a fresh initial entry for the
        // element, which a second registration on it would otherwise miss.
        observer.unobserve(&element);
        observer.observe(&element);
        debug!(observer = id.raw(), %target, "observing element");
        id
    }

    fn unobserve(&self, observer: ObserverId) {
        let Some(released) = self.state.live.borrow_mut().remove(&observer) else {
            return;
        };
        let (element_shared, key_shared) = {
            let live = self.state.live.borrow();
            (
                live.values()
                    .any(|reg| reg.key == released.key && reg.target == released.target),
                live.values().any(|reg| reg.key == released.key),
            )
        };
        let browser = self.state.observers.borrow().get(&released.key).cloned();
        if let Some(browser) = browser {
            if !key_shared {
                browser.disconnect();
                self.state.observers.borrow_mut().remove(&released.key);
            } else if !element_shared
                && let Some(element) = self.state.registry.get(released.target)
            {
                browser.unobserve(&element);
            }
        }
        debug!(observer = observer.raw(), target = %released.target, "stopped observing");
    }
}

impl Drop for WebIntersection {
    fn drop(&mut self) {
        for (_, observer) in self.state.observers.borrow_mut().drain() {
            observer.disconnect();
        }
        self.state.live.borrow_mut().clear();
    }
}

impl std::fmt::Debug for WebIntersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebIntersection")
            .field("live", &self.live_count())
            .field("observers", &self.observer_count())
            .finish()
    }
}
