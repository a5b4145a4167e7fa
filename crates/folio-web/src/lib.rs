#![forbid(unsafe_code)]

//! Browser backend for Folio.
//!
//! On `wasm32` this crate implements the runtime seams over browser APIs:
//!
//! - [`WebIntersection`] - `IntersectionObserver`
//! - [`BrowserScheduler`] - `setTimeout` / `setInterval`
//! - [`LocalStorage`] - `localStorage`
//! - [`SystemColorScheme`] - `prefers-color-scheme` media queries
//!
//! [`WebHost`] wires them together for a page. The conversions in
//! [`convert`] are target-independent.

pub mod convert;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod intersection;
#[cfg(target_arch = "wasm32")]
pub mod media;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod timer;

pub use error::WebError;

#[cfg(target_arch = "wasm32")]
pub use dom::ElementRegistry;
#[cfg(target_arch = "wasm32")]
pub use intersection::WebIntersection;
#[cfg(target_arch = "wasm32")]
pub use media::SystemColorScheme;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
#[cfg(target_arch = "wasm32")]
pub use timer::BrowserScheduler;

#[cfg(target_arch = "wasm32")]
mod host {
    use std::rc::Rc;

    use folio_core::config::ThemeConfig;
    use folio_runtime::reactive::Subscription;
    use folio_runtime::storage::{MemoryStore, PreferenceStore};
    use folio_runtime::theme::ThemeContext;
    use tracing::{info, warn};
    use web_sys::{Document, Window};

    use crate::dom::{self, ElementRegistry};
    use crate::error::Result;
    use crate::{BrowserScheduler, LocalStorage, SystemColorScheme, WebIntersection};

    /// Browser services for one page.
    pub struct WebHost {
        pub window: Window,
        pub document: Document,
        pub registry: Rc<ElementRegistry>,
        pub intersection: Rc<WebIntersection>,
        pub scheduler: Rc<BrowserScheduler>,
        pub system: SystemColorScheme,
        pub theme: ThemeContext,
        _theme_attribute: Subscription,
    }

    impl WebHost {
        /// Resolve the theme, install it as the thread's global context,
        /// and start mirroring it onto the root element.
        ///
        /// Without `localStorage` the theme still works for the session but
        /// is not persisted.
        pub fn install(config: &ThemeConfig) -> Result<Self> {
            let window = dom::window()?;
            let document = dom::document()?;
            let registry = Rc::new(ElementRegistry::new());
            let intersection = Rc::new(WebIntersection::new(Rc::clone(&registry)));
            let scheduler = Rc::new(BrowserScheduler::new(window.clone()));

            let store: Rc<dyn PreferenceStore> = match LocalStorage::new(&window) {
                Ok(storage) => Rc::new(storage),
                Err(e) => {
                    warn!(error = %e, "localStorage unavailable; theme will not persist");
                    Rc::new(MemoryStore::new())
                }
            };
            let system = SystemColorScheme::new(&window);
            let theme = ThemeContext::new(store, system.current(), config);
            theme.follow_system(&system.signal());
            ThemeContext::install_global(theme.clone());
            let theme_attribute = dom::bind_theme(document.clone(), &theme)?;
            info!(theme = %theme.theme(), "web host installed");

            Ok(Self {
                window,
                document,
                registry,
                intersection,
                scheduler,
                system,
                theme,
                _theme_attribute: theme_attribute,
            })
        }
    }

    impl std::fmt::Debug for WebHost {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("WebHost")
                .field("elements", &self.registry.len())
                .field("intersection", &self.intersection)
                .field("scheduler", &self.scheduler)
                .field("theme", &self.theme.theme())
                .finish()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use host::WebHost;
