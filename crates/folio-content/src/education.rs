//! Education timeline.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EducationKind {
    University,
    HighSchool,
    Bootcamp,
    Certification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Education {
    pub id: u32,
    pub degree: &'static str,
    pub institution: &'static str,
    pub location: &'static str,
    /// Empty when no dates are shown.
    pub duration: &'static str,
    pub description: &'static str,
    pub modules: &'static [&'static str],
    pub incomplete_modules: &'static [&'static str],
    pub kind: EducationKind,
}

pub const EDUCATION: [Education; 1] = [Education {
    id: 1,
    degree: "Bachelor of Science in Computer Science and Electronics",
    institution: "North West University",
    location: "South Africa",
    duration: "",
    description: "Final year incomplete.",
    modules: &[
        "Introduction to Computing & Programming",
        "Structured Programming (C++)",
        "Object Oriented Programming (Java)",
        "Software Engineering",
        "Data Structures & Algorithms",
        "Artificial Intelligence",
        "Computer Networks",
        "Operating Systems",
    ],
    incomplete_modules: &["Databases"],
    kind: EducationKind::University,
}];
