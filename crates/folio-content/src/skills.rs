//! Skill categories.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkillCategory {
    /// Stable id, used for element ids (`skill-title-{id}`).
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub skills: &'static [&'static str],
}

pub const SKILL_CATEGORIES: [SkillCategory; 4] = [
    SkillCategory {
        id: "programming",
        title: "Programming",
        icon: "\u{1F4BB}",
        skills: &["JavaScript", "Python", "Java", "TypeScript", "SQL", "HTML/CSS"],
    },
    SkillCategory {
        id: "web",
        title: "Web Development",
        icon: "\u{1F310}",
        skills: &["React", "Node.js", "Express.js", "REST APIs", "MongoDB", "PostgreSQL"],
    },
    SkillCategory {
        id: "cloud",
        title: "Cloud & DevOps",
        icon: "\u{2601}\u{FE0F}",
        skills: &["Azure", "AWS", "Docker", "Kubernetes", "CI/CD", "Git"],
    },
    SkillCategory {
        id: "tools",
        title: "Tools & Others",
        icon: "\u{1F6E0}\u{FE0F}",
        skills: &["VS Code", "Linux", "Agile/Scrum", "Jira", "Figma", "Testing"],
    },
];
