//! Project showcase.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub tech_stack: &'static [&'static str],
    pub github_url: &'static str,
    pub live_url: Option<&'static str>,
    /// Featured projects span the full grid width.
    pub featured: bool,
}

pub const PROJECTS: [Project; 4] = [
    Project {
        id: 1,
        title: "Cloud Task Manager",
        description: "A full-stack task management application with real-time updates, user \
            authentication, and cloud deployment. Features include drag-and-drop functionality, \
            team collaboration, and progress tracking.",
        tech_stack: &["React", "Node.js", "MongoDB", "Azure", "Socket.io"],
        github_url: "https://github.com",
        live_url: Some("https://example.com"),
        featured: true,
    },
    Project {
        id: 2,
        title: "E-Commerce Platform",
        description: "A modern e-commerce solution with product catalog, shopping cart, secure \
            checkout, and admin dashboard for inventory management.",
        tech_stack: &["React", "Express", "PostgreSQL", "Stripe"],
        github_url: "https://github.com",
        live_url: Some("https://example.com"),
        featured: false,
    },
    Project {
        id: 3,
        title: "Weather Dashboard",
        description: "A responsive weather application that provides real-time weather data, \
            forecasts, and location-based services using external APIs.",
        tech_stack: &["JavaScript", "REST API", "CSS Grid", "Chart.js"],
        github_url: "https://github.com",
        live_url: Some("https://example.com"),
        featured: false,
    },
    Project {
        id: 4,
        title: "DevOps Pipeline Tool",
        description: "An automation tool for CI/CD pipelines with Docker containerization, \
            automated testing, and deployment monitoring.",
        tech_stack: &["Python", "Docker", "GitHub Actions", "Kubernetes"],
        github_url: "https://github.com",
        live_url: None,
        featured: false,
    },
];

pub const GITHUB_PROFILE_URL: &str = "https://github.com/sakhiletwala";
