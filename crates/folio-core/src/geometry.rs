#![forbid(unsafe_code)]

//! Viewport geometry in CSS pixels.
//!
//! Provides the rectangle type used for element and viewport bounds, the
//! [`RootMargin`] adjustment applied to the viewport before intersection is
//! computed, and [`intersection_ratio`].
//!
//! # Invariants
//!
//! 1. A [`Rect`] never has negative width or height; constructors clamp.
//! 2. `intersection_ratio` always returns a value in `[0.0, 1.0]`.
//! 3. A root margin with all-zero edges leaves the root rect unchanged.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Bad margin token | Missing unit, unknown unit, not a number | [`MarginParseError`] |
//! | Too many margin values | More than four tokens | [`MarginParseError::TooManyValues`] |
//! | Margin collapses root | Negative margins larger than root | Root becomes empty, ratio 0 |

use std::fmt;
use std::str::FromStr;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rect; negative extents are clamped to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Overlapping region of two rects, or `None` when they are disjoint.
    ///
    /// Rects that only share an edge produce a zero-area intersection,
    /// which still counts as touching.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Translate by the given offsets.
    #[must_use]
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A single margin edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute CSS pixels.
    Px(f64),
    /// Percentage of the root extent along the edge's axis.
    Percent(f64),
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    /// Resolve against the root extent (width for left/right, height for top/bottom).
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl FromStr for Length {
    type Err = MarginParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Err(MarginParseError::Empty);
        }
        let (number, percent) = if let Some(stripped) = token.strip_suffix("px") {
            (stripped, false)
        } else if let Some(stripped) = token.strip_suffix('%') {
            (stripped, true)
        } else {
            // A bare zero is the only unitless length CSS accepts.
            return match token.parse::<f64>() {
                Ok(v) if v == 0.0 => Ok(Length::ZERO),
                Ok(_) => Err(MarginParseError::MissingUnit(token.to_string())),
                Err(_) => Err(MarginParseError::InvalidToken(token.to_string())),
            };
        };
        let value = number
            .parse::<f64>()
            .map_err(|_| MarginParseError::InvalidToken(token.to_string()))?;
        if !value.is_finite() {
            return Err(MarginParseError::InvalidToken(token.to_string()));
        }
        Ok(if percent {
            Length::Percent(value)
        } else {
            Length::Px(value)
        })
    }
}

/// Errors from parsing a root-margin string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarginParseError {
    /// The margin string had no tokens.
    Empty,
    /// A token was not a number with a `px` or `%` unit.
    InvalidToken(String),
    /// A non-zero number had no unit.
    MissingUnit(String),
    /// More than four values were supplied.
    TooManyValues(usize),
}

impl fmt::Display for MarginParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "root margin is empty"),
            Self::InvalidToken(t) => write!(f, "invalid root margin token: {t}"),
            Self::MissingUnit(t) => write!(f, "root margin value '{t}' needs a px or % unit"),
            Self::TooManyValues(n) => write!(f, "root margin takes 1-4 values, got {n}"),
        }
    }
}

impl std::error::Error for MarginParseError {}

/// Adjustment applied to the viewport bounds before intersection.
///
/// Positive edges grow the root outward; negative edges shrink it. The
/// default (`0px 0px -50px 0px`) pulls the bottom edge up by 50 px, so an
/// element must clear the bottom of the viewport by that much to count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl RootMargin {
    /// All edges zero.
    pub const NONE: RootMargin = RootMargin {
        top: Length::ZERO,
        right: Length::ZERO,
        bottom: Length::ZERO,
        left: Length::ZERO,
    };

    /// Uniform pixel margin on all edges.
    #[must_use]
    pub const fn uniform_px(px: f64) -> Self {
        Self {
            top: Length::Px(px),
            right: Length::Px(px),
            bottom: Length::Px(px),
            left: Length::Px(px),
        }
    }

    /// Parse the CSS shorthand form (`"10px"`, `"0px 5%"`, `"0px 0px -50px 0px"`).
    pub fn parse(input: &str) -> Result<Self, MarginParseError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let lengths = tokens
            .iter()
            .map(|t| t.parse::<Length>())
            .collect::<Result<Vec<_>, _>>()?;
        match lengths.as_slice() {
            [] => Err(MarginParseError::Empty),
            [all] => Ok(Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            more => Err(MarginParseError::TooManyValues(more.len())),
        }
    }

    /// Expand (or shrink, for negative edges) `root` by this margin.
    #[must_use]
    pub fn apply(&self, root: Rect) -> Rect {
        let top = self.top.resolve(root.height);
        let bottom = self.bottom.resolve(root.height);
        let left = self.left.resolve(root.width);
        let right = self.right.resolve(root.width);
        Rect::new(
            root.x - left,
            root.y - top,
            root.width + left + right,
            root.height + top + bottom,
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: Length::ZERO,
            right: Length::ZERO,
            bottom: Length::Px(-50.0),
            left: Length::ZERO,
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Fraction of `target`'s area that lies inside `root`.
///
/// A zero-area target counts as fully visible when it touches the root.
#[must_use]
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    let Some(overlap) = target.intersection(root) else {
        return 0.0;
    };
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}
