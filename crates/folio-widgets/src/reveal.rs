#![forbid(unsafe_code)]

//! Per-section reveal composition.
//!
//! Most sections reveal a header and a body independently. The header always
//! waits for 20% visibility; the body either reveals as one block with its
//! children cascading at a fixed step, or tracks a staggered grid whose cards
//! cascade at the section's own step.

use std::time::Duration;

use folio_content::SKILL_CATEGORIES;
use folio_core::config::RevealConfig;
use folio_core::intersection::ElementId;
use folio_runtime::reactive::{Binding, ReadOnly, bind_mapped};
use folio_runtime::stagger::{StaggeredReveal, delay_for};
use folio_runtime::visibility::{VisibilityHandle, VisibilityTracker};

use crate::markup::{class_list, transition_delay};
use crate::navigation::SectionId;

/// Visibility a section header needs before it reveals.
pub const HEADER_THRESHOLD: f64 = 0.2;

/// Elements a section's reveal observes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionElements {
    pub header: Option<ElementId>,
    pub body: Option<ElementId>,
}

impl SectionElements {
    #[must_use]
    pub const fn new(header: Option<ElementId>, body: Option<ElementId>) -> Self {
        Self { header, body }
    }

    /// A section whose only tracked element is its container.
    #[must_use]
    pub const fn body_only(body: ElementId) -> Self {
        Self {
            header: None,
            body: Some(body),
        }
    }
}

/// How the body reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// One block; children cascade at the plan's `child_stagger`.
    Plain,
    /// A grid of `items` cards cascading at the body stagger.
    Staggered { items: usize },
}

/// Thresholds and delays for one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPlan {
    /// `None` when the section has no separately tracked header.
    pub header_threshold: Option<f64>,
    /// `None` uses the site-wide threshold.
    pub body_threshold: Option<f64>,
    /// `None` uses the site-wide stagger.
    pub body_stagger: Option<Duration>,
    pub body: BodyShape,
    /// Step between children inside the body.
    pub child_stagger: Duration,
}

impl RevealPlan {
    /// The plan each section reveals with; `None` for sections that are
    /// always shown.
    #[must_use]
    pub fn for_section(section: SectionId) -> Option<Self> {
        let plan = match section {
            SectionId::Hero | SectionId::Projects => return None,
            SectionId::Skills => Self {
                header_threshold: Some(HEADER_THRESHOLD),
                body_threshold: None,
                body_stagger: Some(Duration::from_millis(150)),
                body: BodyShape::Staggered {
                    items: SKILL_CATEGORIES.len(),
                },
                child_stagger: Duration::from_millis(50),
            },
            SectionId::Certifications => Self {
                header_threshold: Some(HEADER_THRESHOLD),
                body_threshold: None,
                body_stagger: None,
                body: BodyShape::Plain,
                child_stagger: Duration::from_millis(80),
            },
            SectionId::Education => Self {
                header_threshold: Some(HEADER_THRESHOLD),
                body_threshold: None,
                body_stagger: Some(Duration::from_millis(150)),
                body: BodyShape::Plain,
                child_stagger: Duration::from_millis(100),
            },
            SectionId::About => Self {
                header_threshold: Some(HEADER_THRESHOLD),
                body_threshold: Some(HEADER_THRESHOLD),
                body_stagger: None,
                body: BodyShape::Plain,
                child_stagger: Duration::from_millis(100),
            },
            SectionId::Contact => Self {
                header_threshold: None,
                body_threshold: Some(HEADER_THRESHOLD),
                body_stagger: None,
                body: BodyShape::Plain,
                child_stagger: Duration::from_millis(100),
            },
        };
        Some(plan)
    }

    /// Body config derived from the site-wide `base`.
    #[must_use]
    pub fn body_config(&self, base: &RevealConfig) -> RevealConfig {
        let mut config = *base;
        if let Some(threshold) = self.body_threshold {
            config.threshold = threshold;
        }
        if let Some(stagger) = self.body_stagger {
            config.stagger_delay = stagger;
        }
        config
    }
}

enum Body {
    Plain(VisibilityHandle),
    Staggered(StaggeredReveal),
}

/// A mounted section's header and body reveal state.
pub struct SectionReveal {
    section: SectionId,
    plan: RevealPlan,
    header: Option<VisibilityHandle>,
    body: Body,
}

impl SectionReveal {
    /// Mount `section` with its standard plan. `None` for sections without
    /// scroll reveals.
    pub fn mount(
        tracker: &VisibilityTracker,
        section: SectionId,
        elements: SectionElements,
        base: &RevealConfig,
    ) -> Option<Self> {
        let plan = RevealPlan::for_section(section)?;
        Some(Self::with_plan(tracker, section, plan, elements, base))
    }

    pub fn with_plan(
        tracker: &VisibilityTracker,
        section: SectionId,
        plan: RevealPlan,
        elements: SectionElements,
        base: &RevealConfig,
    ) -> Self {
        let header = plan
            .header_threshold
            .map(|threshold| tracker.track(elements.header, &base.with_threshold(threshold)));
        let config = plan.body_config(base);
        let body = match plan.body {
            BodyShape::Plain => Body::Plain(tracker.track(elements.body, &config)),
            BodyShape::Staggered { items } => {
                Body::Staggered(tracker.track_with_stagger(elements.body, items, &config))
            }
        };
        Self {
            section,
            plan,
            header,
            body,
        }
    }

    #[must_use]
    pub fn section(&self) -> SectionId {
        self.section
    }

    #[must_use]
    pub fn plan(&self) -> &RevealPlan {
        &self.plan
    }

    fn body_handle(&self) -> &VisibilityHandle {
        match &self.body {
            Body::Plain(handle) => handle,
            Body::Staggered(reveal) => reveal.handle(),
        }
    }

    /// Without a tracked header, the header reveals with the body.
    #[must_use]
    pub fn header_in_view(&self) -> bool {
        match &self.header {
            Some(handle) => handle.is_visible(),
            None => self.body_in_view(),
        }
    }

    #[must_use]
    pub fn body_in_view(&self) -> bool {
        self.body_handle().is_visible()
    }

    #[must_use]
    pub fn header_signal(&self) -> ReadOnly<bool> {
        match &self.header {
            Some(handle) => handle.signal(),
            None => self.body_signal(),
        }
    }

    #[must_use]
    pub fn body_signal(&self) -> ReadOnly<bool> {
        self.body_handle().signal()
    }

    /// Delay for the body's `index`th card or child.
    #[must_use]
    pub fn item_delay(&self, index: usize) -> Duration {
        match &self.body {
            Body::Plain(_) => self.child_delay(index),
            Body::Staggered(reveal) => reveal.delay_for(index),
        }
    }

    /// Delay for the `index`th entry nested inside a card.
    #[must_use]
    pub fn child_delay(&self, index: usize) -> Duration {
        delay_for(index, self.plan.child_stagger)
    }

    #[must_use]
    pub fn header_class(&self, base: &str) -> String {
        class_list(base, self.header_in_view())
    }

    #[must_use]
    pub fn body_class(&self, base: &str) -> String {
        class_list(base, self.body_in_view())
    }

    /// Header class list that tracks the header's reveal.
    #[must_use]
    pub fn header_class_binding(&self, base: &'static str) -> Binding<String> {
        bind_mapped(&self.header_signal(), move |in_view| class_list(base, *in_view))
    }

    #[must_use]
    pub fn body_class_binding(&self, base: &'static str) -> Binding<String> {
        bind_mapped(&self.body_signal(), move |in_view| class_list(base, *in_view))
    }

    #[must_use]
    pub fn item_style(&self, index: usize) -> String {
        transition_delay(self.item_delay(index))
    }

    #[must_use]
    pub fn child_style(&self, index: usize) -> String {
        transition_delay(self.child_delay(index))
    }

    /// Whether any observer is still waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.header.as_ref().is_some_and(VisibilityHandle::is_observing)
            || self.body_handle().is_observing()
    }

    /// Release any observers still waiting.
    pub fn dispose(&self) {
        if let Some(header) = &self.header {
            header.dispose();
        }
        self.body_handle().dispose();
    }
}

impl std::fmt::Debug for SectionReveal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionReveal")
            .field("section", &self.section)
            .field("header_in_view", &self.header_in_view())
            .field("body_in_view", &self.body_in_view())
            .finish()
    }
}
