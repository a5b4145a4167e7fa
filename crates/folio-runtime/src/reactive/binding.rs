#![forbid(unsafe_code)]

//! Derived presentation values and scoped subscriptions.
//!
//! A section's class list or the grid's inline variables are functions of a
//! reveal or oscillator signal. [`bind_mapped`] captures that function once at
//! mount so a host can re-read the markup value whenever it re-renders.
//! [`BindingScope`] owns the subscriptions a mounted page registers for its
//! host, and drops them with the page.

use std::fmt;
use std::rc::Rc;

use super::observable::{ReadOnly, Subscription};

/// A value derived from a [`ReadOnly`] source, recomputed on every read.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T: 'static> Binding<T> {
    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// `source` transformed by `map`.
pub fn bind_mapped<S: Clone + PartialEq + 'static, T: 'static>(
    source: &ReadOnly<S>,
    map: impl Fn(&S) -> T + 'static,
) -> Binding<T> {
    let src = source.clone();
    Binding {
        eval: Rc::new(move || src.with(|v| map(v))),
    }
}

/// Subscriptions owned by one mounted component, released together.
#[derive(Default)]
pub struct BindingScope {
    subscriptions: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `source` for the scope's lifetime.
    pub fn subscribe<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &ReadOnly<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.subscriptions.push(source.subscribe(callback));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release everything now; the scope stays usable.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingScope")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
