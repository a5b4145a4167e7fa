#![forbid(unsafe_code)]

//! Theme context provider.
//!
//! [`ThemeContext`] owns the active [`Theme`] and resolves it from three
//! inputs: a stored preference (authoritative when present), the system color
//! scheme (used only while nothing is stored), and explicit user choice
//! ([`toggle`](ThemeContext::toggle), [`set_theme`](ThemeContext::set_theme)),
//! which writes the store and overrides system changes from then on.
//!
//! Storage failures are logged and the context keeps working in memory.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use folio_core::config::ThemeConfig;
pub use folio_core::theme::{ColorScheme, Theme};
use tracing::{debug, warn};

use crate::reactive::{Observable, ReadOnly, Subscription};
use crate::storage::{MemoryStore, PreferenceStore};

/// Attribute the presentation layer sets on the document root.
pub const THEME_ATTRIBUTE: &str = "data-theme";

thread_local! {
    static GLOBAL_CONTEXT: RefCell<ThemeContext> = RefCell::new(ThemeContext::in_memory());
}

struct Inner {
    current: Observable<Theme>,
    store: Rc<dyn PreferenceStore>,
    storage_key: String,
    fallback: Theme,
    user_owned: Cell<bool>,
    system: RefCell<Option<Subscription>>,
}

/// Shared theme state. Clones share one context.
#[derive(Clone)]
pub struct ThemeContext {
    inner: Rc<Inner>,
}

impl ThemeContext {
    /// Resolve the initial theme from `store` and `system`.
    pub fn new(store: Rc<dyn PreferenceStore>, system: ColorScheme, config: &ThemeConfig) -> Self {
        let stored = read_stored(store.as_ref(), &config.storage_key);
        let initial = resolve(stored, system, config.fallback);
        debug!(theme = %initial, stored = stored.is_some(), ?system, "theme resolved");
        Self {
            inner: Rc::new(Inner {
                current: Observable::new(initial),
                store,
                storage_key: config.storage_key.clone(),
                fallback: config.fallback,
                user_owned: Cell::new(false),
                system: RefCell::new(None),
            }),
        }
    }

    /// Context over a fresh [`MemoryStore`] with no system preference.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Rc::new(MemoryStore::new()),
            ColorScheme::NoPreference,
            &ThemeConfig::default(),
        )
    }

    /// The thread's global context.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_CONTEXT.with(|ctx| ctx.borrow().clone())
    }

    /// Replace the thread's global context, returning the previous one.
    pub fn install_global(context: ThemeContext) -> ThemeContext {
        GLOBAL_CONTEXT.with(|ctx| ctx.replace(context))
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.inner.current.get()
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme().is_dark()
    }

    /// Switch between dark and light and persist the result.
    pub fn toggle(&self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    /// Apply and persist an explicit user choice.
    pub fn set_theme(&self, theme: Theme) {
        self.inner.user_owned.set(true);
        self.inner.current.set(theme);
        if let Err(error) = self.inner.store.set(&self.inner.storage_key, theme.as_str()) {
            warn!(%error, key = %self.inner.storage_key, "failed to persist theme");
        }
        debug!(%theme, "theme set by user");
    }

    /// Whether an explicit choice (this session or a stored one) is in effect.
    #[must_use]
    pub fn has_preference(&self) -> bool {
        self.inner.user_owned.get()
            || read_stored(self.inner.store.as_ref(), &self.inner.storage_key).is_some()
    }

    /// Apply a system color scheme change. Ignored while a preference exists.
    /// Returns whether the theme was taken from `scheme`.
    pub fn apply_system(&self, scheme: ColorScheme) -> bool {
        if self.has_preference() {
            debug!(?scheme, "system scheme ignored; preference stored");
            return false;
        }
        let theme = resolve(None, scheme, self.inner.fallback);
        self.inner.current.set(theme);
        debug!(?scheme, %theme, "theme follows system");
        true
    }

    /// Follow `system` until [`stop_following_system`](Self::stop_following_system)
    /// or until the last clone of this context is dropped.
    pub fn follow_system(&self, system: &ReadOnly<ColorScheme>) {
        self.apply_system(system.get());
        let weak = Rc::downgrade(&self.inner);
        let subscription = system.subscribe(move |scheme| {
            if let Some(inner) = weak.upgrade() {
                ThemeContext { inner }.apply_system(*scheme);
            }
        });
        self.inner.system.replace(Some(subscription));
    }

    pub fn stop_following_system(&self) {
        self.inner.system.replace(None);
    }

    #[must_use]
    pub fn is_following_system(&self) -> bool {
        self.inner.system.borrow().is_some()
    }

    pub fn subscribe(&self, callback: impl Fn(&Theme) + 'static) -> Subscription {
        self.inner.current.subscribe(callback)
    }

    #[must_use]
    pub fn signal(&self) -> ReadOnly<Theme> {
        self.inner.current.read_only()
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.current.version()
    }

    /// `("data-theme", name)` for the document root.
    #[must_use]
    pub fn document_attribute(&self) -> (&'static str, &'static str) {
        (THEME_ATTRIBUTE, self.theme().as_str())
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.storage_key
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &self.theme())
            .field("storage_key", &self.inner.storage_key)
            .field("user_owned", &self.inner.user_owned.get())
            .finish()
    }
}

/// Convenience: toggle the global theme.
pub fn toggle_theme() -> Theme {
    ThemeContext::global().toggle()
}

/// Convenience: the global theme.
#[must_use]
pub fn current_theme() -> Theme {
    ThemeContext::global().theme()
}

fn read_stored(store: &dyn PreferenceStore, key: &str) -> Option<Theme> {
    match store.get(key) {
        Ok(value) => value.as_deref().and_then(Theme::parse),
        Err(error) => {
            warn!(%error, key, "failed to read stored theme");
            None
        }
    }
}

fn resolve(stored: Option<Theme>, system: ColorScheme, fallback: Theme) -> Theme {
    if let Some(theme) = stored {
        return theme;
    }
    match system {
        ColorScheme::Light => Theme::Light,
        ColorScheme::Dark => Theme::Dark,
        ColorScheme::NoPreference => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use tracing_test::traced_test;

    const KEY: &str = "portfolio-theme";

    fn ctx_with(store: Rc<dyn PreferenceStore>, system: ColorScheme) -> ThemeContext {
        ThemeContext::new(store, system, &ThemeConfig::default())
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("private browsing".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("private browsing".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn stored_value_wins_over_system() {
        let store = Rc::new(MemoryStore::with_entry(KEY, "dark"));
        let ctx = ctx_with(store, ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Dark);
    }

    #[test]
    fn system_light_used_without_stored_value() {
        let ctx = ctx_with(Rc::new(MemoryStore::new()), ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Light);
    }

    #[test]
    fn fallback_is_dark() {
        let ctx = ctx_with(Rc::new(MemoryStore::new()), ColorScheme::NoPreference);
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(ctx.document_attribute(), ("data-theme", "dark"));
    }

    #[test]
    fn configured_fallback_applies() {
        let config = ThemeConfig {
            fallback: Theme::Light,
            ..ThemeConfig::default()
        };
        let ctx = ThemeContext::new(Rc::new(MemoryStore::new()), ColorScheme::NoPreference, &config);
        assert_eq!(ctx.theme(), Theme::Light);
    }

    #[test]
    fn unknown_stored_value_is_ignored() {
        let store = Rc::new(MemoryStore::with_entry(KEY, "sepia"));
        let ctx = ctx_with(store, ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Light);
        assert!(!ctx.has_preference());
    }

    #[test]
    fn construction_does_not_write_store() {
        let store = Rc::new(MemoryStore::new());
        let _ctx = ctx_with(store.clone(), ColorScheme::Light);
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_writes_store() {
        let store = Rc::new(MemoryStore::new());
        let ctx = ctx_with(store.clone(), ColorScheme::NoPreference);
        assert_eq!(ctx.toggle(), Theme::Light);
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(ctx.toggle(), Theme::Dark);
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(ctx.version(), 2);
    }

    #[test]
    fn system_change_applies_until_user_toggles() {
        let system = Observable::new(ColorScheme::Dark);
        let ctx = ctx_with(Rc::new(MemoryStore::new()), ColorScheme::Dark);
        ctx.follow_system(&system.read_only());
        assert!(ctx.is_following_system());

        system.set(ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Light);

        ctx.toggle();
        assert_eq!(ctx.theme(), Theme::Dark);
        system.set(ColorScheme::Dark);
        system.set(ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Dark);
    }

    #[test]
    fn system_change_ignored_with_stored_value() {
        let store = Rc::new(MemoryStore::with_entry(KEY, "dark"));
        let system = Observable::new(ColorScheme::Dark);
        let ctx = ctx_with(store, ColorScheme::Dark);
        ctx.follow_system(&system.read_only());
        system.set(ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Dark);
    }

    #[test]
    fn dropping_context_releases_system_subscription() {
        let system = Observable::new(ColorScheme::Dark);
        let ctx = ctx_with(Rc::new(MemoryStore::new()), ColorScheme::Dark);
        ctx.follow_system(&system.read_only());
        assert_eq!(system.subscriber_count(), 1);
        let clone = ctx.clone();
        drop(ctx);
        assert_eq!(system.subscriber_count(), 1);
        drop(clone);
        assert_eq!(system.subscriber_count(), 0);
    }

    #[test]
    fn stop_following_releases_subscription() {
        let system = Observable::new(ColorScheme::Dark);
        let ctx = ctx_with(Rc::new(MemoryStore::new()), ColorScheme::Dark);
        ctx.follow_system(&system.read_only());
        ctx.stop_following_system();
        assert_eq!(system.subscriber_count(), 0);
        system.set(ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Dark);
    }

    #[test]
    fn subscribers_see_theme_changes() {
        let ctx = ThemeContext::in_memory();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = ctx.subscribe(move |t| s.borrow_mut().push(*t));
        ctx.toggle();
        ctx.set_theme(Theme::Light);
        ctx.toggle();
        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    #[traced_test]
    fn broken_store_degrades_to_memory() {
        let ctx = ctx_with(Rc::new(BrokenStore), ColorScheme::Light);
        assert_eq!(ctx.theme(), Theme::Light);
        assert_eq!(ctx.toggle(), Theme::Dark);
        assert_eq!(ctx.theme(), Theme::Dark);
        assert!(ctx.has_preference());
        assert!(logs_contain("failed to persist theme"));
        assert!(logs_contain("failed to read stored theme"));
    }

    #[test]
    fn global_context_is_shared_per_thread() {
        let previous = ThemeContext::install_global(ThemeContext::in_memory());
        assert_eq!(current_theme(), Theme::Dark);
        toggle_theme();
        assert_eq!(ThemeContext::global().theme(), Theme::Light);
        ThemeContext::install_global(previous);
    }
}
