#![forbid(unsafe_code)]

//! `prefers-color-scheme` as an observable.

use folio_core::theme::ColorScheme;
use folio_runtime::reactive::{Observable, ReadOnly};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{MediaQueryList, Window};

use crate::convert::{PREFERS_DARK_QUERY, PREFERS_LIGHT_QUERY, scheme_from_matches};
use crate::error::WebError;

/// Live system color scheme.
///
/// Listens for `change` on both media queries until dropped.
pub struct SystemColorScheme {
    scheme: Observable<ColorScheme>,
    queries: Vec<MediaQueryList>,
    listener: JsValue,
}

fn query(window: &Window, text: &str) -> Option<MediaQueryList> {
    match window.match_media(text) {
        Ok(list) => list,
        Err(e) => {
            warn!(query = text, error = %WebError::from(e), "matchMedia failed");
            None
        }
    }
}

fn read(light: Option<&MediaQueryList>, dark: Option<&MediaQueryList>) -> ColorScheme {
    scheme_from_matches(
        light.is_some_and(MediaQueryList::matches),
        dark.is_some_and(MediaQueryList::matches),
    )
}

impl SystemColorScheme {
    #[must_use]
    pub fn new(window: &Window) -> Self {
        let light = query(window, PREFERS_LIGHT_QUERY);
        let dark = query(window, PREFERS_DARK_QUERY);
        let scheme = Observable::new(read(light.as_ref(), dark.as_ref()));

        let signal = scheme.clone();
        let (l, d) = (light.clone(), dark.clone());
        let listener = Closure::<dyn FnMut()>::new(move || {
            let next = read(l.as_ref(), d.as_ref());
            debug!(scheme = ?next, "system color scheme changed");
            signal.set(next);
        })
        .into_js_value();

        let queries: Vec<MediaQueryList> = light.into_iter().chain(dark).collect();
        for list in &queries {
            if let Err(e) = list.add_event_listener_with_callback("change", listener.unchecked_ref()) {
                warn!(error = %WebError::from(e), "failed to watch color scheme");
            }
        }
        Self {
            scheme,
            queries,
            listener,
        }
    }

    #[must_use]
    pub fn current(&self) -> ColorScheme {
        self.scheme.get()
    }

    #[must_use]
    pub fn signal(&self) -> ReadOnly<ColorScheme> {
        self.scheme.read_only()
    }
}

impl Drop for SystemColorScheme {
    fn drop(&mut self) {
        for list in &self.queries {
            let _ = list.remove_event_listener_with_callback("change", self.listener.unchecked_ref());
        }
    }
}

impl std::fmt::Debug for SystemColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemColorScheme")
            .field("current", &self.current())
            .finish()
    }
}
