#![forbid(unsafe_code)]

//! Hard-coded portfolio content.
//!
//! Everything is `&'static` and compiled into the page. Enable the `serde`
//! feature to serialize content for templating.

pub mod about;
pub mod certifications;
pub mod contact;
pub mod education;
pub mod footer;
pub mod hero;
pub mod projects;
pub mod skills;

pub use about::{ABOUT_PARAGRAPHS, PROFILE_INITIALS};
pub use certifications::{CERTIFICATIONS, Certification, Issuer};
pub use contact::{CONTACT, ContactInfo, SOCIAL_LINKS, SocialLink};
pub use education::{EDUCATION, Education, EducationKind};
pub use footer::{AUTHOR_NAME, copyright_line, credit_line};
pub use hero::{HERO, HeroContent, ROLES};
pub use projects::{GITHUB_PROFILE_URL, PROJECTS, Project};
pub use skills::{SKILL_CATEGORIES, SkillCategory};
