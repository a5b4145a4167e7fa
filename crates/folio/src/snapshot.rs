#![forbid(unsafe_code)]

//! Point-in-time presentation state, for hosts that re-render from scratch.

use folio_core::theme::Theme;
use folio_runtime::reactive::Binding;
use folio_widgets::navigation::SectionId;

use crate::page::Page;

pub const HEADER_CLASS: &str = "section-header";

/// Base class of a section's revealed body.
#[must_use]
pub const fn body_class_base(section: SectionId) -> &'static str {
    match section {
        SectionId::Hero => "hero-content",
        SectionId::Skills => "skills-grid",
        SectionId::Certifications => "certifications-grid",
        SectionId::Projects => "projects-grid",
        SectionId::Education => "education-grid",
        SectionId::About => "about-content",
        SectionId::Contact => "contact-content",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSnapshot {
    pub section: SectionId,
    pub header_class: String,
    pub body_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub theme: Theme,
    pub nav_class: &'static str,
    pub menu_open: bool,
    pub typed_role: String,
    pub sections: Vec<SectionSnapshot>,
    /// Inline variables on the certifications grid.
    pub grid_style: Option<String>,
}

impl PageSnapshot {
    pub(crate) fn capture(page: &Page) -> Self {
        let sections = page
            .classes()
            .iter()
            .map(|classes| SectionSnapshot {
                section: classes.section,
                header_class: classes.header.get(),
                body_class: classes.body.get(),
            })
            .collect();
        Self {
            theme: page.theme().theme(),
            nav_class: page.navbar().nav_class(),
            menu_open: page.navbar().is_menu_open(),
            typed_role: page.typewriter().text(),
            sections,
            grid_style: page.grid_style().map(Binding::get),
        }
    }

    #[must_use]
    pub fn section(&self, section: SectionId) -> Option<&SectionSnapshot> {
        self.sections.iter().find(|s| s.section == section)
    }
}
