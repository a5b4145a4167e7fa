//! Contact details and social links.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContactInfo {
    pub email: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
}

impl ContactInfo {
    #[must_use]
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

pub const CONTACT: ContactInfo = ContactInfo {
    email: "sakhile.twala@example.com",
    github: "https://github.com/sakhiletwala",
    linkedin: "https://www.linkedin.com/in/sakhile-twala-b05386247/",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SocialLink {
    pub id: &'static str,
    pub href: &'static str,
    pub label: &'static str,
    /// Opens in a new tab with `rel="noopener noreferrer"`.
    pub external: bool,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        id: "github",
        href: CONTACT.github,
        label: "View GitHub profile (opens in new tab)",
        external: true,
    },
    SocialLink {
        id: "linkedin",
        href: CONTACT.linkedin,
        label: "View LinkedIn profile (opens in new tab)",
        external: true,
    },
    SocialLink {
        id: "email",
        href: "mailto:sakhile.twala@example.com",
        label: "Send an email",
        external: false,
    },
];
