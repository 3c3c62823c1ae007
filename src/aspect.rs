//! Aspect classes applied to an image's display box.

use core::fmt;

/// A named display ratio. The browser crops the bitmap to this box with
/// `object-fit: cover`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AspectClass {
    /// 1:1.
    Square,
    /// 3:4 (portrait).
    Portrait3x4,
    /// 4:5 (portrait, closer to square).
    Portrait4x5,
    /// 16:9.
    Wide16x9,
    /// 21:9.
    Panorama21x9,
}

impl AspectClass {
    /// Every class, narrowest box first.
    pub const ALL: [Self; 5] = [
        Self::Portrait3x4,
        Self::Portrait4x5,
        Self::Square,
        Self::Wide16x9,
        Self::Panorama21x9,
    ];

    /// `(width, height)` units of the ratio.
    pub const fn units(self) -> (u32, u32) {
        match self {
            Self::Square => (1, 1),
            Self::Portrait3x4 => (3, 4),
            Self::Portrait4x5 => (4, 5),
            Self::Wide16x9 => (16, 9),
            Self::Panorama21x9 => (21, 9),
        }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        let (w, h) = self.units();
        w as f64 / h as f64
    }

    /// Height of the box per unit of width.
    pub fn height_per_width(self) -> f64 {
        let (w, h) = self.units();
        h as f64 / w as f64
    }

    /// Human-readable label, e.g. `16:9`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait3x4 => "3:4",
            Self::Portrait4x5 => "4:5",
            Self::Wide16x9 => "16:9",
            Self::Panorama21x9 => "21:9",
        }
    }

    /// Value for the CSS `aspect-ratio` property, e.g. `16 / 9`.
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Square => "1 / 1",
            Self::Portrait3x4 => "3 / 4",
            Self::Portrait4x5 => "4 / 5",
            Self::Wide16x9 => "16 / 9",
            Self::Panorama21x9 => "21 / 9",
        }
    }
}

impl fmt::Display for AspectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
