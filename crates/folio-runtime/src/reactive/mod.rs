#![forbid(unsafe_code)]

//! Reactive state for reveal, oscillator, and theme values.
//!
//! - [`Observable`]: shared, version-tracked value with change notification.
//! - [`ReadOnly`]: the view of an `Observable` handed to presentation code.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`] and [`BindingScope`]: derived values and scoped lifetimes.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscribers are stored as `Weak` callbacks and pruned during notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped};
pub use observable::{Observable, ReadOnly, Subscription};
