#![forbid(unsafe_code)]

//! The viewport-intersection facility seam.
//!
//! Everything above this crate observes elements through
//! [`IntersectionFacility`]. The browser backend wraps `IntersectionObserver`;
//! [`SimulatedViewport`](crate::viewport::SimulatedViewport) emulates it over
//! a document of rects for environments without one.
//!
//! # Contract
//!
//! 1. `observe` registers exactly one observer and returns its id. Entries are
//!    delivered asynchronously (never from inside `observe` itself).
//! 2. After `unobserve(id)` returns, the callback for `id` is never invoked
//!    again, including for entries already queued in the current delivery.
//! 3. Callbacks may call `unobserve` re-entrantly, on their own id or another.
//! 4. `unobserve` of an unknown or already-released id is a no-op.

use std::fmt;

use crate::geometry::RootMargin;

/// Identifier of a renderable element in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle for one registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Options passed to [`IntersectionFacility::observe`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    thresholds: Vec<f64>,
    root_margin: RootMargin,
}

impl ObserveOptions {
    /// Build options from a threshold list. Thresholds are clamped to
    /// `[0, 1]`, sorted, and deduplicated; NaN values are dropped. An empty
    /// list becomes `[0.0]`.
    #[must_use]
    pub fn new(thresholds: impl IntoIterator<Item = f64>, root_margin: RootMargin) -> Self {
        let mut thresholds: Vec<f64> = thresholds
            .into_iter()
            .filter(|t| !t.is_nan())
            .map(|t| t.clamp(0.0, 1.0))
            .collect();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        Self {
            thresholds,
            root_margin,
        }
    }

    /// Options with a single threshold.
    #[must_use]
    pub fn single(threshold: f64, root_margin: RootMargin) -> Self {
        Self::new([threshold], root_margin)
    }

    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    #[must_use]
    pub fn root_margin(&self) -> RootMargin {
        self.root_margin
    }

    /// Number of thresholds the given ratio has reached.
    ///
    /// Facilities deliver a new entry whenever this count (or the
    /// intersecting flag) changes.
    #[must_use]
    pub fn crossed(&self, ratio: f64, is_intersecting: bool) -> usize {
        if !is_intersecting {
            return 0;
        }
        self.thresholds.iter().filter(|t| ratio >= **t).count()
    }
}

/// One intersection observation delivered to a callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    /// Fraction of the target's area inside the (margin-adjusted) viewport.
    pub ratio: f64,
    /// Whether the target touches the (margin-adjusted) viewport at all.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Whether this entry counts as visible for `threshold`.
    #[must_use]
    pub fn satisfies(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

/// Callback invoked for each delivered entry.
pub type IntersectionCallback = Box<dyn Fn(&IntersectionEntry)>;

/// Platform capability reporting how much of an element overlaps the
/// visible scrolling region.
pub trait IntersectionFacility {
    /// Start observing `target`. Returns the id used to stop observing.
    fn observe(
        &self,
        target: ElementId,
        options: ObserveOptions,
        callback: IntersectionCallback,
    ) -> ObserverId;

    /// Stop observing. Unknown ids are ignored.
    fn unobserve(&self, observer: ObserverId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_normalize_thresholds() {
        let opts = ObserveOptions::new([0.5, f64::NAN, 2.0, 0.5, -1.0], RootMargin::NONE);
        assert_eq!(opts.thresholds(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn options_empty_thresholds_default_to_zero() {
        let opts = ObserveOptions::new(std::iter::empty(), RootMargin::NONE);
        assert_eq!(opts.thresholds(), &[0.0]);
    }

    #[test]
    fn crossed_counts_reached_thresholds() {
        let opts = ObserveOptions::new([0.0, 0.25, 0.5, 1.0], RootMargin::NONE);
        assert_eq!(opts.crossed(0.3, true), 2);
        assert_eq!(opts.crossed(1.0, true), 4);
        assert_eq!(opts.crossed(0.9, false), 0);
    }

    #[test]
    fn entry_requires_intersection_and_ratio() {
        let target = ElementId::new(1);
        let hit = IntersectionEntry {
            target,
            ratio: 0.1,
            is_intersecting: true,
        };
        assert!(hit.satisfies(0.1));
        assert!(!hit.satisfies(0.2));

        let edge = IntersectionEntry {
            target,
            ratio: 0.0,
            is_intersecting: false,
        };
        assert!(!edge.satisfies(0.0));
    }
}
