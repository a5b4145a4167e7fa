#![forbid(unsafe_code)]

//! Runtime for Folio's scroll-driven presentation state.
//!
//! # Key Components
//!
//! - [`VisibilityTracker`] - one-shot and continuous element visibility
//! - [`StaggeredReveal`] and [`delay_for`] - per-item cascade delays
//! - [`ShiftAnimation`] - ping-pong offset that ticks only while in view
//! - [`Scheduler`] / [`ManualScheduler`] - cancellable timers
//! - [`ThemeContext`] - stored/system/user theme resolution
//! - [`reactive`] - observables, bindings, and scoped subscriptions
//!
//! Everything here is single-threaded: state is shared with `Rc` and
//! callbacks run on the thread that owns the facility and scheduler.

pub mod oscillator;
pub mod reactive;
pub mod scheduler;
pub mod stagger;
pub mod storage;
pub mod theme;
pub mod visibility;

pub use oscillator::{Direction, ShiftAnimation, ShiftState};
pub use reactive::{Binding, BindingScope, Observable, ReadOnly, Subscription};
pub use scheduler::{ManualScheduler, PolledScheduler, Scheduler, TimerId};
pub use stagger::{StaggeredReveal, delay_for, delays};
pub use storage::{FileStore, MemoryStore, PreferenceStore, StorageError};
pub use theme::{ColorScheme, THEME_ATTRIBUTE, Theme, ThemeContext, current_theme, toggle_theme};
pub use visibility::{ContinuousVisibility, VisibilityHandle, VisibilityTracker};
