#![forbid(unsafe_code)]

//! Certifications grid: one-shot card reveal plus the shifting empty slots.
//!
//! The grid holds more cells than certifications. The spare cells sweep
//! across the row while the grid is on screen; the sweep freezes when the
//! grid scrolls away and resumes from the same spot when it returns.

use std::rc::Rc;
use std::time::Duration;

use folio_content::{CERTIFICATIONS, Certification};
use folio_core::config::{RevealConfig, ShiftConfig};
use folio_runtime::oscillator::{ShiftAnimation, ShiftState};
use folio_runtime::reactive::{Binding, ReadOnly, bind_mapped};
use folio_runtime::scheduler::Scheduler;
use folio_runtime::visibility::{ContinuousVisibility, VisibilityTracker};
use tracing::debug;

use crate::markup::{StyleVars, css_ms, transition_delay};
use crate::navigation::SectionId;
use crate::reveal::{SectionElements, SectionReveal};

/// Reveal state and slot animation for the certifications section.
#[derive(Debug)]
pub struct CertificationsGrid {
    reveal: SectionReveal,
    presence: ContinuousVisibility,
    shift: ShiftAnimation,
}

impl CertificationsGrid {
    /// Mount the grid. `elements.body` is the grid container; it drives both
    /// the card reveal and the slot animation.
    pub fn mount(
        tracker: &VisibilityTracker,
        scheduler: Rc<dyn Scheduler>,
        elements: SectionElements,
        reveal: &RevealConfig,
        shift: &ShiftConfig,
    ) -> Option<Self> {
        let section = SectionReveal::mount(tracker, SectionId::Certifications, elements, reveal)?;
        let presence = tracker.track_continuous(elements.body, &section.plan().body_config(reveal));
        let shift = ShiftAnimation::new(scheduler, shift, &presence.signal());
        debug!(
            cards = CERTIFICATIONS.len(),
            empty_slots = shift.empty_slots(),
            interval_ms = shift.interval().as_millis() as u64,
            "certifications grid mounted"
        );
        Some(Self {
            reveal: section,
            presence,
            shift,
        })
    }

    #[must_use]
    pub fn reveal(&self) -> &SectionReveal {
        &self.reveal
    }

    #[must_use]
    pub fn certifications(&self) -> &'static [Certification] {
        &CERTIFICATIONS
    }

    /// Whether the grid is on screen right now.
    #[must_use]
    pub fn is_on_screen(&self) -> bool {
        self.presence.is_visible()
    }

    #[must_use]
    pub fn is_shifting(&self) -> bool {
        self.shift.is_running()
    }

    #[must_use]
    pub fn offset(&self) -> u32 {
        self.shift.offset()
    }

    #[must_use]
    pub fn empty_slots(&self) -> u32 {
        self.shift.empty_slots()
    }

    #[must_use]
    pub fn shift_signal(&self) -> ReadOnly<ShiftState> {
        self.shift.signal()
    }

    /// Inline variables for the grid container.
    #[must_use]
    pub fn style_vars(&self) -> StyleVars {
        grid_vars(&self.shift.state())
    }

    /// Grid container style that follows the slot animation.
    #[must_use]
    pub fn style_binding(&self) -> Binding<String> {
        bind_mapped(&self.shift.signal(), |state| grid_vars(state).to_string())
    }

    #[must_use]
    pub fn card_delay(&self, index: usize) -> Duration {
        self.reveal.item_delay(index)
    }

    /// Inline style for the `index`th card.
    #[must_use]
    pub fn card_style(&self, index: usize) -> String {
        transition_delay(self.card_delay(index))
    }

    /// Variables the card's own entrance animation reads.
    #[must_use]
    pub fn card_vars(&self, index: usize) -> StyleVars {
        StyleVars::new()
            .var("--card-index", index)
            .var("--stagger", css_ms(self.card_delay(index)))
    }

    /// Release the grid's observers. The slot animation keeps its last
    /// visibility until dropped.
    pub fn dispose(&self) {
        self.reveal.dispose();
        self.presence.dispose();
    }
}

fn grid_vars(state: &ShiftState) -> StyleVars {
    StyleVars::new()
        .var("--offset", state.offset())
        .var("--empty-slots", state.empty_slots())
}
