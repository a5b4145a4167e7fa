#![forbid(unsafe_code)]

//! The assembled portfolio page.

use std::rc::Rc;

use folio_core::config::SiteConfig;
use folio_core::intersection::{ElementId, IntersectionFacility};
use folio_runtime::reactive::{Binding, BindingScope};
use folio_runtime::scheduler::Scheduler;
use folio_runtime::theme::ThemeContext;
use folio_runtime::visibility::VisibilityTracker;
use folio_widgets::certifications::CertificationsGrid;
use folio_widgets::hero::{Typewriter, TypewriterDriver};
use folio_widgets::navigation::{NavAction, NavKey, NavbarState, SectionId};
use folio_widgets::reveal::{SectionElements, SectionReveal};
use tracing::{debug, info};

use crate::snapshot::{HEADER_CLASS, PageSnapshot, body_class_base};

/// Element ids for every tracked part of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub skills: SectionElements,
    pub certifications: SectionElements,
    pub education: SectionElements,
    pub about: SectionElements,
    pub contact: SectionElements,
}

impl PageLayout {
    /// Ids `1..` assigned in page order: each section's header, then its
    /// body. Contact has only a body.
    #[must_use]
    pub const fn sequential() -> Self {
        const fn pair(header: u64) -> SectionElements {
            SectionElements::new(Some(ElementId::new(header)), Some(ElementId::new(header + 1)))
        }
        Self {
            skills: pair(1),
            certifications: pair(3),
            education: pair(5),
            about: pair(7),
            contact: SectionElements::body_only(ElementId::new(9)),
        }
    }

    /// Elements for `section`; `None` for sections that are not tracked.
    #[must_use]
    pub const fn elements(&self, section: SectionId) -> Option<SectionElements> {
        match section {
            SectionId::Skills => Some(self.skills),
            SectionId::Certifications => Some(self.certifications),
            SectionId::Education => Some(self.education),
            SectionId::About => Some(self.about),
            SectionId::Contact => Some(self.contact),
            SectionId::Hero | SectionId::Projects => None,
        }
    }
}

/// Class lists of one revealing section.
#[derive(Debug, Clone)]
pub(crate) struct SectionClasses {
    pub(crate) section: SectionId,
    pub(crate) header: Binding<String>,
    pub(crate) body: Binding<String>,
}

impl SectionClasses {
    fn bind(reveal: &SectionReveal) -> Self {
        let section = reveal.section();
        Self {
            section,
            header: reveal.header_class_binding(HEADER_CLASS),
            body: reveal.body_class_binding(body_class_base(section)),
        }
    }
}

/// Every section's view state, mounted against one facility and scheduler.
///
/// Dropping the page releases every observer, cancels every timer, and
/// drops every callback registered through [`on_reveal`](Self::on_reveal).
pub struct Page {
    tracker: VisibilityTracker,
    reveals: Vec<SectionReveal>,
    certifications: Option<CertificationsGrid>,
    typewriter: TypewriterDriver,
    navbar: NavbarState,
    theme: ThemeContext,
    classes: Vec<SectionClasses>,
    grid_style: Option<Binding<String>>,
    scope: BindingScope,
}

impl Page {
    /// Mount all sections. The theme is the thread's global context.
    pub fn mount(
        facility: Rc<dyn IntersectionFacility>,
        scheduler: Rc<dyn Scheduler>,
        config: &SiteConfig,
        layout: &PageLayout,
    ) -> Self {
        let tracker = VisibilityTracker::new(facility);
        let reveal = config.reveal.clamped();

        let reveals: Vec<SectionReveal> = SectionId::ALL
            .into_iter()
            .filter(|section| *section != SectionId::Certifications)
            .filter_map(|section| {
                let elements = layout.elements(section)?;
                SectionReveal::mount(&tracker, section, elements, &reveal)
            })
            .collect();
        let certifications = CertificationsGrid::mount(
            &tracker,
            Rc::clone(&scheduler),
            layout.certifications,
            &reveal,
            &config.shift,
        );
        let typewriter = TypewriterDriver::start(scheduler, Typewriter::default());

        let classes = SectionId::ALL
            .into_iter()
            .filter_map(|section| {
                if section == SectionId::Certifications {
                    certifications.as_ref().map(CertificationsGrid::reveal)
                } else {
                    reveals.iter().find(|r| r.section() == section)
                }
            })
            .map(SectionClasses::bind)
            .collect();
        let grid_style = certifications.as_ref().map(CertificationsGrid::style_binding);

        info!(
            sections = reveals.len() + usize::from(certifications.is_some()),
            "page mounted"
        );
        Self {
            tracker,
            reveals,
            certifications,
            typewriter,
            navbar: NavbarState::new(),
            theme: ThemeContext::global(),
            classes,
            grid_style,
            scope: BindingScope::new(),
        }
    }

    #[must_use]
    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    /// Reveal state for `section`, if it reveals on scroll.
    #[must_use]
    pub fn reveal(&self, section: SectionId) -> Option<&SectionReveal> {
        if section == SectionId::Certifications {
            return self.certifications.as_ref().map(CertificationsGrid::reveal);
        }
        self.reveals.iter().find(|r| r.section() == section)
    }

    #[must_use]
    pub fn certifications(&self) -> Option<&CertificationsGrid> {
        self.certifications.as_ref()
    }

    #[must_use]
    pub fn typewriter(&self) -> &TypewriterDriver {
        &self.typewriter
    }

    #[must_use]
    pub fn navbar(&self) -> &NavbarState {
        &self.navbar
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    /// Feed the page's scroll offset to the navbar.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.navbar.on_scroll(scroll_y)
    }

    pub fn toggle_menu(&mut self) {
        self.navbar.toggle_menu();
    }

    /// Follow a navigation link.
    pub fn select(&mut self, section: SectionId) -> NavAction {
        self.navbar.select(section)
    }

    pub fn on_key(&mut self, key: NavKey, link: Option<SectionId>) -> Option<NavAction> {
        self.navbar.on_key(key, link)
    }

    /// Apply `action`. Theme toggles are handled here; scrolling and focus
    /// are returned for the host to perform.
    pub fn dispatch(&mut self, action: NavAction) -> Option<NavAction> {
        match action {
            NavAction::ToggleTheme => {
                let theme = self.theme.toggle();
                debug!(%theme, "theme toggled from page");
                None
            }
            other => Some(other),
        }
    }

    /// Call `callback` with the section each time one of its header or body
    /// reveals. Registrations live as long as the page.
    pub fn on_reveal(&mut self, callback: impl Fn(SectionId) + 'static) {
        let callback: Rc<dyn Fn(SectionId)> = Rc::new(callback);
        let sections = SectionId::ALL
            .into_iter()
            .filter_map(|section| self.reveal(section))
            .map(|reveal| {
                let header = reveal
                    .plan()
                    .header_threshold
                    .map(|_| reveal.header_signal());
                (reveal.section(), header, reveal.body_signal())
            })
            .collect::<Vec<_>>();
        for (section, header, body) in sections {
            for signal in header.into_iter().chain(Some(body)) {
                let callback = Rc::clone(&callback);
                self.scope.subscribe(&signal, move |in_view| {
                    if *in_view {
                        callback(section);
                    }
                });
            }
        }
    }

    pub(crate) fn classes(&self) -> &[SectionClasses] {
        &self.classes
    }

    pub(crate) fn grid_style(&self) -> Option<&Binding<String>> {
        self.grid_style.as_ref()
    }

    /// Sections whose observers are still waiting.
    #[must_use]
    pub fn pending_sections(&self) -> Vec<SectionId> {
        SectionId::ALL
            .into_iter()
            .filter(|s| self.reveal(*s).is_some_and(SectionReveal::is_pending))
            .collect()
    }

    /// Current presentation state.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot::capture(self)
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("reveals", &self.reveals)
            .field("certifications", &self.certifications)
            .field("typewriter", &self.typewriter)
            .field("navbar", &self.navbar)
            .field("scope", &self.scope)
            .finish()
    }
}
