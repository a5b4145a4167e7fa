#![forbid(unsafe_code)]

//! Section view state for Folio.

pub mod certifications;
pub mod hero;
pub mod markup;
pub mod navigation;
pub mod reveal;

pub use certifications::CertificationsGrid;
pub use hero::{
    CallToAction, ENTRANCE_STEP, HERO_ACTIONS, HeroPart, Typewriter, TypewriterDriver,
    TypewriterPhase, TypewriterTiming,
};
pub use markup::{
    IN_VIEW_CLASS, StyleVars, animation_delay, class_list, css_ms, join_styles, transition_delay,
};
pub use navigation::{
    NavAction, NavKey, NavbarState, SCROLL_THRESHOLD, SectionId, theme_toggle_label,
};
pub use reveal::{BodyShape, HEADER_THRESHOLD, RevealPlan, SectionElements, SectionReveal};
