#![forbid(unsafe_code)]

//! Pure conversions between Folio types and browser API values.

use std::fmt::Write as _;
use std::time::Duration;

use folio_core::intersection::{ElementId, ObserveOptions};
use folio_core::theme::ColorScheme;

/// Attribute carrying an element's [`ElementId`] in the DOM.
pub const ELEMENT_ID_ATTRIBUTE: &str = "data-folio-id";

/// Media queries read for the system color scheme.
pub const PREFERS_LIGHT_QUERY: &str = "(prefers-color-scheme: light)";
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Milliseconds for `setTimeout`/`setInterval`.
///
/// Browsers fire immediately when the delay overflows a signed 32-bit value,
/// so longer delays are clamped instead of wrapping.
#[must_use]
pub fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

/// Key shared by observers whose options are identical. Observers with the
/// same key share one `IntersectionObserver`.
#[must_use]
pub fn observer_key(options: &ObserveOptions) -> String {
    let mut key = String::new();
    for (i, threshold) in options.thresholds().iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        let _ = write!(key, "{threshold}");
    }
    let _ = write!(key, "|{}", options.root_margin());
    key
}

/// Scheme from the two media query results. Light wins if both match.
#[must_use]
pub const fn scheme_from_matches(prefers_light: bool, prefers_dark: bool) -> ColorScheme {
    match (prefers_light, prefers_dark) {
        (true, _) => ColorScheme::Light,
        (false, true) => ColorScheme::Dark,
        (false, false) => ColorScheme::NoPreference,
    }
}

#[must_use]
pub fn element_tag(id: ElementId) -> String {
    id.raw().to_string()
}

/// Inverse of [`element_tag`].
#[must_use]
pub fn parse_element_tag(tag: &str) -> Option<ElementId> {
    tag.trim().parse().ok().map(ElementId::new)
}
