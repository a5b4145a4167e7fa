#![forbid(unsafe_code)]

//! Section catalog and navbar state.

use std::fmt;

use folio_core::theme::Theme;
use tracing::debug;

/// Scroll offset beyond which the navbar gets its solid background.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// A page section, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    Skills,
    Certifications,
    Projects,
    Education,
    About,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        Self::Hero,
        Self::Skills,
        Self::Certifications,
        Self::Projects,
        Self::Education,
        Self::About,
        Self::Contact,
    ];

    /// Element id and URL fragment.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Skills => "skills",
            Self::Certifications => "certifications",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::About => "about",
            Self::Contact => "contact",
        }
    }

    /// Navigation link text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::Skills => "Skills",
            Self::Certifications => "Certifications",
            Self::Projects => "Projects",
            Self::Education => "Education",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }

    /// Section heading text.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hero => "Sakhile Twala",
            Self::Skills => "Skills & Technologies",
            Self::Certifications => "Certifications",
            Self::Projects => "Projects",
            Self::Education => "Education",
            Self::About => "About Me",
            Self::Contact => "Get In Touch",
        }
    }

    /// Two-digit heading prefix; the hero has none.
    #[must_use]
    pub const fn number(self) -> Option<&'static str> {
        match self {
            Self::Hero => None,
            Self::Skills => Some("01"),
            Self::Certifications => Some("02"),
            Self::Projects => Some("03"),
            Self::Education => Some("04"),
            Self::About => Some("05"),
            Self::Contact => Some("06"),
        }
    }

    /// `{anchor}-heading`, referenced by `aria-labelledby`.
    #[must_use]
    pub fn heading_id(self) -> String {
        format!("{}-heading", self.anchor())
    }

    /// `#{anchor}`
    #[must_use]
    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }

    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.anchor() == anchor)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// What the host should do after a navbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Smooth-scroll to the section and move focus to it.
    ScrollTo(SectionId),
    /// Return focus to the menu button.
    FocusMenuButton,
    ToggleTheme,
}

/// Keys the navbar reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    Enter,
    Space,
    Other,
}

/// Navbar view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavbarState {
    scrolled: bool,
    menu_open: bool,
}

impl NavbarState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from the window scroll offset. Returns whether `scrolled`
    /// changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        debug!(open = self.menu_open, "mobile menu toggled");
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Body scrolling is locked while the mobile menu is open.
    #[must_use]
    pub fn body_scroll_locked(&self) -> bool {
        self.menu_open
    }

    /// Follow a navigation link. Always closes the menu.
    pub fn select(&mut self, section: SectionId) -> NavAction {
        self.menu_open = false;
        debug!(%section, "navigate");
        NavAction::ScrollTo(section)
    }

    /// The brand mark links home.
    pub fn select_brand(&mut self) -> NavAction {
        self.select(SectionId::Hero)
    }

    /// Keyboard input, optionally on a focused link.
    pub fn on_key(&mut self, key: NavKey, link: Option<SectionId>) -> Option<NavAction> {
        match (key, link) {
            (NavKey::Escape, _) if self.menu_open => {
                self.menu_open = false;
                Some(NavAction::FocusMenuButton)
            }
            (NavKey::Enter | NavKey::Space, Some(section)) => Some(self.select(section)),
            _ => None,
        }
    }

    #[must_use]
    pub fn nav_class(&self) -> &'static str {
        if self.scrolled { "navbar scrolled" } else { "navbar" }
    }

    #[must_use]
    pub fn menu_class(&self) -> &'static str {
        if self.menu_open { "mobile-menu active" } else { "mobile-menu" }
    }

    #[must_use]
    pub fn menu_button_label(&self) -> &'static str {
        if self.menu_open {
            "Close navigation menu"
        } else {
            "Open navigation menu"
        }
    }

    /// Mobile links are only tabbable while the menu is open.
    #[must_use]
    pub fn mobile_tab_index(&self) -> i32 {
        if self.menu_open { 0 } else { -1 }
    }
}

/// Accessible label for the theme toggle.
#[must_use]
pub const fn theme_toggle_label(theme: Theme) -> &'static str {
    if theme.is_dark() {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_order_and_labels() {
        let labels: Vec<_> = SectionId::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            ["Home", "Skills", "Certifications", "Projects", "Education", "About", "Contact"]
        );
    }

    #[test]
    fn numbers_are_unique_and_ordered() {
        let numbers: Vec<_> = SectionId::ALL.iter().filter_map(|s| s.number()).collect();
        assert_eq!(numbers, ["01", "02", "03", "04", "05", "06"]);
    }

    #[test]
    fn anchors_round_trip() {
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_anchor(section.anchor()), Some(section));
        }
        assert_eq!(SectionId::from_anchor("blog"), None);
        assert_eq!(SectionId::Skills.heading_id(), "skills-heading");
        assert_eq!(SectionId::Contact.href(), "#contact");
    }

    #[test]
    fn scrolled_past_threshold() {
        let mut nav = NavbarState::new();
        assert!(!nav.on_scroll(50.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(50.5));
        assert!(nav.is_scrolled());
        assert_eq!(nav.nav_class(), "navbar scrolled");
        assert!(nav.on_scroll(0.0));
        assert_eq!(nav.nav_class(), "navbar");
    }

    #[test]
    fn escape_closes_open_menu() {
        let mut nav = NavbarState::new();
        assert_eq!(nav.on_key(NavKey::Escape, None), None);
        nav.toggle_menu();
        assert!(nav.body_scroll_locked());
        assert_eq!(nav.mobile_tab_index(), 0);
        assert_eq!(nav.on_key(NavKey::Escape, None), Some(NavAction::FocusMenuButton));
        assert!(!nav.is_menu_open());
    }

    #[test]
    fn selecting_link_closes_menu() {
        let mut nav = NavbarState::new();
        nav.toggle_menu();
        assert_eq!(nav.menu_button_label(), "Close navigation menu");
        assert_eq!(
            nav.on_key(NavKey::Enter, Some(SectionId::Projects)),
            Some(NavAction::ScrollTo(SectionId::Projects))
        );
        assert!(!nav.is_menu_open());
        assert_eq!(nav.menu_class(), "mobile-menu");
        assert_eq!(nav.select_brand(), NavAction::ScrollTo(SectionId::Hero));
    }

    #[test]
    fn other_keys_ignored() {
        let mut nav = NavbarState::new();
        assert_eq!(nav.on_key(NavKey::Other, Some(SectionId::About)), None);
        assert_eq!(nav.on_key(NavKey::Space, None), None);
    }

    #[test]
    fn theme_labels() {
        assert_eq!(theme_toggle_label(Theme::Dark), "Switch to light mode");
        assert_eq!(theme_toggle_label(Theme::Light), "Switch to dark mode");
    }
}
