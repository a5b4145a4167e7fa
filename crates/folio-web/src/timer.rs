#![forbid(unsafe_code)]

//! `setTimeout`/`setInterval` behind [`Scheduler`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_runtime::scheduler::{Scheduler, TimerId};
use tracing::{trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::convert::timeout_ms;
use crate::error::WebError;

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat(Rc<dyn Fn()>),
}

struct Pending {
    handle: i32,
    task: Task,
}

struct State {
    window: Window,
    timers: RefCell<HashMap<TimerId, Pending>>,
    next: Cell<u64>,
}

impl State {
    fn fire(&self, id: TimerId) {
        let repeat = {
            let timers = self.timers.borrow();
            match timers.get(&id).map(|p| &p.task) {
                None => return,
                Some(Task::Repeat(callback)) => Some(Rc::clone(callback)),
                Some(Task::Once(_)) => None,
            }
        };
        trace!(timer = id.raw(), "timer fired");
        match repeat {
            Some(callback) => callback(),
            None => {
                let once = self.timers.borrow_mut().remove(&id);
                if let Some(Pending {
                    task: Task::Once(callback),
                    ..
                }) = once
                {
                    callback();
                }
            }
        }
    }

    fn next_id(&self) -> TimerId {
        let id = TimerId::new(self.next.get() + 1);
        self.next.set(id.raw());
        id
    }
}

/// Browser [`Scheduler`].
///
/// Callbacks live on the Rust side, keyed by [`TimerId`]. The JS functions
/// handed to the browser carry only the id and a weak reference back, so a
/// cancelled timer leaves nothing but that stub behind.
pub struct BrowserScheduler {
    state: Rc<State>,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            state: Rc::new(State {
                window,
                timers: RefCell::new(HashMap::new()),
                next: Cell::new(0),
            }),
        }
    }

    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.state.timers.borrow().len()
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.state.next_id();
        let weak: Weak<State> = Rc::downgrade(&self.state);
        let function = Closure::once_into_js(move || {
            if let Some(state) = weak.upgrade() {
                state.fire(id);
            }
        });
        match self
            .state
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                function.unchecked_ref(),
                timeout_ms(delay),
            ) {
            Ok(handle) => {
                self.state.timers.borrow_mut().insert(
                    id,
                    Pending {
                        handle,
                        task: Task::Once(callback),
                    },
                );
            }
            Err(e) => warn!(timer = id.raw(), error = %WebError::from(e), "setTimeout failed"),
        }
        id
    }

    fn set_interval(&self, period: Duration, callback: Box<dyn Fn()>) -> TimerId {
        let id = self.state.next_id();
        let weak: Weak<State> = Rc::downgrade(&self.state);
        let function = Closure::<dyn FnMut()>::new(move || {
            if let Some(state) = weak.upgrade() {
                state.fire(id);
            }
        })
        .into_js_value();
        match self
            .state
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                function.unchecked_ref(),
                timeout_ms(period),
            ) {
            Ok(handle) => {
                self.state.timers.borrow_mut().insert(
                    id,
                    Pending {
                        handle,
                        task: Task::Repeat(Rc::from(callback)),
                    },
                );
            }
            Err(e) => warn!(timer = id.raw(), error = %WebError::from(e), "setInterval failed"),
        }
        id
    }

    fn cancel(&self, timer: TimerId) {
        let Some(pending) = self.state.timers.borrow_mut().remove(&timer) else {
            return;
        };
        match pending.task {
            Task::Once(_) => self.state.window.clear_timeout_with_handle(pending.handle),
            Task::Repeat(_) => self.state.window.clear_interval_with_handle(pending.handle),
        }
        trace!(timer = timer.raw(), "timer cancelled");
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        let ids: Vec<TimerId> = self.state.timers.borrow().keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }
}

impl std::fmt::Debug for BrowserScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserScheduler")
            .field("active_timers", &self.active_timers())
            .finish()
    }
}
