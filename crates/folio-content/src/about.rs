//! Biography paragraphs.

pub const ABOUT_PARAGRAPHS: [&str; 4] = [
    "Hello! I'm Sakhile, a passionate Full Stack Developer based in South Africa \
     with a keen interest in building digital solutions that make a difference. \
     My journey in tech began with curiosity about how websites work, which has \
     evolved into a full-fledged career in software development.",
    "I specialize in creating robust, scalable web applications using modern \
     technologies. My approach combines clean code practices with user-centered \
     design, ensuring that every project I work on is both technically sound and \
     provides an excellent user experience.",
    "Currently, I'm focused on expanding my expertise in cloud technologies and \
     DevOps practices. I believe in continuous learning and staying updated with \
     the ever-evolving tech landscape. When I'm not coding, you'll find me \
     exploring new technologies, contributing to open-source projects, or sharing \
     knowledge with the developer community.",
    "I'm always excited to take on new challenges and collaborate on innovative \
     projects. Whether it's a web application, cloud infrastructure, or anything \
     in between, I'm ready to bring ideas to life through code.",
];

/// Shown in place of a profile photo.
pub const PROFILE_INITIALS: &str = "ST";
