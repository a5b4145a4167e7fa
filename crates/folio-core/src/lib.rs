#![forbid(unsafe_code)]

//! Core types for Folio: viewport geometry, reveal configuration, and the
//! intersection facility seam.
//!
//! This crate provides:
//! - [`Rect`], [`RootMargin`], and [`intersection_ratio`] for viewport math
//! - [`RevealConfig`], [`ShiftConfig`], [`ThemeConfig`], and [`SiteConfig`]
//! - the [`IntersectionFacility`] trait every platform backend implements
//! - [`SimulatedViewport`], an emulated facility for environments without one

pub mod config;
#[cfg(any(test, feature = "test-helpers"))]
pub mod fake;
pub mod geometry;
pub mod intersection;
pub mod theme;
pub mod viewport;

pub use config::{ConfigError, RevealConfig, ShiftConfig, SiteConfig, ThemeConfig};
pub use geometry::{Length, MarginParseError, Rect, RootMargin, intersection_ratio};
pub use intersection::{
    ElementId, IntersectionCallback, IntersectionEntry, IntersectionFacility, ObserveOptions,
    ObserverId,
};
pub use theme::{ColorScheme, Theme};
pub use viewport::SimulatedViewport;
