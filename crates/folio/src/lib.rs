#![forbid(unsafe_code)]

//! Folio public facade.
//!
//! A single-page portfolio whose sections reveal as they scroll into view.
//! [`Page`] mounts every section against an
//! [`IntersectionFacility`](folio_core::IntersectionFacility) and a
//! [`Scheduler`](folio_runtime::Scheduler); the browser backend lives in
//! `folio-web` behind the `web` feature.
//!
//! ```
//! use std::rc::Rc;
//! use folio::prelude::*;
//!
//! let viewport = Rc::new(SimulatedViewport::new(1280.0, 800.0));
//! let scheduler = Rc::new(ManualScheduler::new());
//! let page = Page::mount(
//!     viewport,
//!     scheduler,
//!     &SiteConfig::default(),
//!     &PageLayout::sequential(),
//! );
//! assert!(!page.pending_sections().is_empty());
//! ```

pub mod page;
pub mod snapshot;

pub use page::{Page, PageLayout};
pub use snapshot::{PageSnapshot, SectionSnapshot};

pub use folio_content as content;
pub use folio_runtime as runtime;
#[cfg(feature = "web")]
pub use folio_web as web;
pub use folio_widgets as widgets;

pub mod prelude {
    pub use crate::{Page, PageLayout, PageSnapshot};

    pub use folio_core::{
        ColorScheme, ElementId, IntersectionFacility, Rect, RevealConfig, RootMargin,
        ShiftConfig, SimulatedViewport, SiteConfig, Theme, ThemeConfig,
    };
    pub use folio_runtime::{
        ManualScheduler, Observable, PolledScheduler, ReadOnly, Scheduler, Subscription,
        ThemeContext, VisibilityTracker, current_theme, toggle_theme,
    };
    pub use folio_widgets::{
        NavAction, NavKey, NavbarState, SectionElements, SectionId, SectionReveal,
    };
}
