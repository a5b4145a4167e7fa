//! Footer credit.

pub const AUTHOR_NAME: &str = "Sakhile Twala";

#[must_use]
pub fn credit_line() -> String {
    format!("Designed & Built by {AUTHOR_NAME}")
}

/// `year` is supplied by the host; content has no clock.
#[must_use]
pub fn copyright_line(year: i32) -> String {
    format!("\u{a9} {year} All rights reserved.")
}
