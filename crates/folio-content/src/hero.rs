//! Landing section copy.

/// Text shown in the hero section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeroContent {
    pub greeting: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
}

pub const HERO: HeroContent = HeroContent {
    greeting: "Hi, my name is",
    name: "Sakhile Twala",
    tagline: "I build things for the web & cloud.",
    description: "I'm a passionate Full Stack Developer based in South Africa, \
        specializing in creating exceptional digital experiences. \
        Currently focused on building accessible, cloud-native applications.",
};

/// Roles cycled by the typewriter, in order.
pub const ROLES: [&str; 4] = [
    "Full Stack Developer",
    "Cloud Engineer",
    "UI/UX Enthusiast",
    "Problem Solver",
];
