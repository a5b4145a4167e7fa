#![forbid(unsafe_code)]

//! Reveal, shift, and theme configuration.
//!
//! Values built in code are taken as-is; [`RevealConfig::clamped`] is the
//! hardening step for thresholds. Values loaded from a TOML file through
//! [`SiteConfig::from_toml_str`] are validated and reported as
//! [`ConfigError`].
//!
//! ```toml
//! [reveal]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//! stagger_delay_ms = 100
//!
//! [shift]
//! interval_ms = 2500
//! empty_slots = 1
//!
//! [theme]
//! storage_key = "portfolio-theme"
//! fallback = "dark"
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::geometry::{MarginParseError, RootMargin};
use crate::intersection::ObserveOptions;
use crate::theme::Theme;

/// Default fraction of an element that must be visible.
pub const DEFAULT_THRESHOLD: f64 = 0.1;
/// Default per-index stagger.
pub const DEFAULT_STAGGER_DELAY: Duration = Duration::from_millis(100);
/// Default oscillator tick interval.
pub const DEFAULT_SHIFT_INTERVAL: Duration = Duration::from_millis(2500);
/// Default number of empty slots the certification cards shift across.
pub const DEFAULT_EMPTY_SLOTS: u32 = 1;
/// Key the theme preference is stored under.
pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

/// Threshold, margin, and stagger for one reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Fraction in `[0, 1]` of the element's area that must intersect.
    pub threshold: f64,
    pub root_margin: RootMargin,
    /// Delay added per sequence index.
    pub stagger_delay: Duration,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: RootMargin::default(),
            stagger_delay: DEFAULT_STAGGER_DELAY,
        }
    }
}

impl RevealConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }

    #[must_use]
    pub fn with_stagger(mut self, delay: Duration) -> Self {
        self.stagger_delay = delay;
        self
    }

    #[must_use]
    pub fn with_stagger_ms(self, ms: u64) -> Self {
        self.with_stagger(Duration::from_millis(ms))
    }

    /// Copy with the threshold clamped into `[0, 1]` (NaN becomes the default).
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.threshold = if self.threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            self.threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Options for a single-threshold observation.
    #[must_use]
    pub fn observe_options(&self) -> ObserveOptions {
        ObserveOptions::single(self.threshold, self.root_margin)
    }
}

/// Tick interval and slot count for the card shift oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftConfig {
    pub interval: Duration,
    pub empty_slots: u32,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SHIFT_INTERVAL,
            empty_slots: DEFAULT_EMPTY_SLOTS,
        }
    }
}

/// Where the theme preference lives and what to use without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    pub storage_key: String,
    /// Theme used when nothing is stored and the system has no light preference.
    pub fallback: Theme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_string(),
            fallback: Theme::Dark,
        }
    }
}

/// Complete site configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SiteConfig {
    pub reveal: RevealConfig,
    pub shift: ShiftConfig,
    pub theme: ThemeConfig,
}

/// Errors from loading a [`SiteConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The TOML was malformed or had unknown fields.
    Parse(String),
    /// The root margin string was invalid.
    Margin(MarginParseError),
    /// A numeric field was outside its allowed range.
    OutOfRange { field: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Margin(e) => write!(f, "config root_margin: {e}"),
            Self::OutOfRange { field, value } => {
                write!(f, "config field '{field}' out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Margin(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MarginParseError> for ConfigError {
    fn from(e: MarginParseError) -> Self {
        Self::Margin(e)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSiteConfig {
    reveal: RawReveal,
    shift: RawShift,
    theme: RawTheme,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawReveal {
    threshold: Option<f64>,
    root_margin: Option<String>,
    stagger_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawShift {
    interval_ms: Option<u64>,
    empty_slots: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawTheme {
    storage_key: Option<String>,
    fallback: Option<Theme>,
}

impl SiteConfig {
    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawSiteConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = SiteConfig::default();

        if let Some(threshold) = raw.reveal.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::OutOfRange {
                    field: "reveal.threshold",
                    value: threshold.to_string(),
                });
            }
            config.reveal.threshold = threshold;
        }
        if let Some(margin) = raw.reveal.root_margin {
            config.reveal.root_margin = RootMargin::parse(&margin)?;
        }
        if let Some(ms) = raw.reveal.stagger_delay_ms {
            config.reveal.stagger_delay = Duration::from_millis(ms);
        }

        if let Some(ms) = raw.shift.interval_ms {
            if ms == 0 {
                return Err(ConfigError::OutOfRange {
                    field: "shift.interval_ms",
                    value: ms.to_string(),
                });
            }
            config.shift.interval = Duration::from_millis(ms);
        }
        if let Some(slots) = raw.shift.empty_slots {
            config.shift.empty_slots = slots;
        }

        if let Some(key) = raw.theme.storage_key {
            if key.trim().is_empty() {
                return Err(ConfigError::OutOfRange {
                    field: "theme.storage_key",
                    value: key,
                });
            }
            config.theme.storage_key = key;
        }
        if let Some(fallback) = raw.theme.fallback {
            config.theme.fallback = fallback;
        }

        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Length;

    #[test]
    fn defaults_match_site() {
        let reveal = RevealConfig::default();
        assert_eq!(reveal.threshold, 0.1);
        assert_eq!(reveal.root_margin.bottom, Length::Px(-50.0));
        assert_eq!(reveal.stagger_delay, Duration::from_millis(100));

        let shift = ShiftConfig::default();
        assert_eq!(shift.interval, Duration::from_millis(2500));
        assert_eq!(shift.empty_slots, 1);

        let theme = ThemeConfig::default();
        assert_eq!(theme.storage_key, "portfolio-theme");
        assert_eq!(theme.fallback, Theme::Dark);
    }

    #[test]
    fn clamped_bounds_threshold() {
        assert_eq!(RevealConfig::default().with_threshold(1.7).clamped().threshold, 1.0);
        assert_eq!(RevealConfig::default().with_threshold(-0.2).clamped().threshold, 0.0);
        assert_eq!(
            RevealConfig::default().with_threshold(f64::NAN).clamped().threshold,
            DEFAULT_THRESHOLD
        );
    }

    #[test]
    fn empty_toml_is_default() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn full_toml_overrides_everything() {
        let config = SiteConfig::from_toml_str(
            r#"
            [reveal]
            threshold = 0.2
            root_margin = "10px"
            stagger_delay_ms = 150

            [shift]
            interval_ms = 1000
            empty_slots = 3

            [theme]
            storage_key = "site-theme"
            fallback = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.reveal.threshold, 0.2);
        assert_eq!(config.reveal.root_margin, RootMargin::uniform_px(10.0));
        assert_eq!(config.reveal.stagger_delay, Duration::from_millis(150));
        assert_eq!(config.shift.interval, Duration::from_secs(1));
        assert_eq!(config.shift.empty_slots, 3);
        assert_eq!(config.theme.storage_key, "site-theme");
        assert_eq!(config.theme.fallback, Theme::Light);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = SiteConfig::from_toml_str("[reveal]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "reveal.threshold",
                ..
            }
        ));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = SiteConfig::from_toml_str("[shift]\ninterval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("shift.interval_ms"));
    }

    #[test]
    fn bad_margin_reported() {
        let err = SiteConfig::from_toml_str("[reveal]\nroot_margin = \"5em\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Margin(_)));
    }

    #[test]
    fn unknown_field_is_parse_error() {
        let err = SiteConfig::from_toml_str("[reveal]\nspeed = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_fallback_is_parse_error() {
        let err = SiteConfig::from_toml_str("[theme]\nfallback = \"sepia\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SiteConfig::load("/definitely/not/here/folio.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
