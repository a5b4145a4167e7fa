#![forbid(unsafe_code)]

//! Attribute values for the presentation layer.
//!
//! The renderer never computes reveal state itself; it asks these helpers for
//! class lists and inline styles built from the runtime's signals.

use std::fmt;
use std::time::Duration;

/// Class appended to revealed elements.
pub const IN_VIEW_CLASS: &str = "in-view";

/// `base` with `in-view` appended once revealed.
#[must_use]
pub fn class_list(base: &str, revealed: bool) -> String {
    if !revealed {
        return base.to_string();
    }
    if base.is_empty() {
        return IN_VIEW_CLASS.to_string();
    }
    format!("{base} {IN_VIEW_CLASS}")
}

/// Whole milliseconds with a CSS unit, e.g. `"150ms"`.
#[must_use]
pub fn css_ms(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

/// `transition-delay: {n}ms`
#[must_use]
pub fn transition_delay(delay: Duration) -> String {
    format!("transition-delay: {}", css_ms(delay))
}

/// `animation-delay: {n}ms`
#[must_use]
pub fn animation_delay(delay: Duration) -> String {
    format!("animation-delay: {}", css_ms(delay))
}

/// Inline CSS custom properties, rendered as `--a: 1; --b: 2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleVars {
    vars: Vec<(&'static str, String)>,
}

impl StyleVars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name: value`. `name` includes the leading `--`.
    #[must_use]
    pub fn var(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.vars.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl fmt::Display for StyleVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Join `parts` into one inline style, skipping empty entries.
#[must_use]
pub fn join_styles<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push_str("; ");
        }
        out.push_str(part);
    }
    out
}
